//! 表示ルール
//!
//! 点検結果から表示用のシグナルを導出する（副作用なし）:
//! - 健全度スコアの色帯
//! - 要対応フラグと見出し
//! - 重大度ごとのスタイル
//! - 所見カード / 欠陥なし表示

use crate::types::{Defect, DefectKind, InspectionResult, Severity};

/// 健全度スコアの色帯
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Warning,
    Critical,
}

impl ScoreBand {
    /// `> 80` Good、`> 50` Warning、それ以外 Critical
    pub fn from_score(score: f64) -> Self {
        if score > 80.0 {
            ScoreBand::Good
        } else if score > 50.0 {
            ScoreBand::Warning
        } else {
            ScoreBand::Critical
        }
    }

    pub fn text_color(&self) -> &'static str {
        match self {
            ScoreBand::Good => "text-green-600",
            ScoreBand::Warning => "text-yellow-600",
            ScoreBand::Critical => "text-red-600",
        }
    }

    pub fn background(&self) -> &'static str {
        match self {
            ScoreBand::Good => "bg-green-50",
            ScoreBand::Warning => "bg-yellow-50",
            ScoreBand::Critical => "bg-red-50",
        }
    }

    /// ゲージの塗り色
    pub fn gauge_color(&self) -> &'static str {
        match self {
            ScoreBand::Good => "#10b981",
            ScoreBand::Warning => "#eab308",
            ScoreBand::Critical => "#ef4444",
        }
    }
}

/// 重大度ごとのスタイル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityStyle {
    pub badge: &'static str,
    pub border: &'static str,
    pub fill: &'static str,
    pub label: &'static str,
}

impl SeverityStyle {
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Low => SeverityStyle {
                badge: "bg-blue-100 text-blue-800 border-blue-200",
                border: "border-blue-500",
                fill: "bg-blue-500/20",
                label: "bg-blue-500 text-white",
            },
            Severity::Medium => SeverityStyle {
                badge: "bg-yellow-100 text-yellow-800 border-yellow-200",
                border: "border-yellow-500",
                fill: "bg-yellow-500/20",
                label: "bg-yellow-500 text-white",
            },
            Severity::High => SeverityStyle {
                badge: "bg-orange-100 text-orange-800 border-orange-200",
                border: "border-orange-500",
                fill: "bg-orange-500/20",
                label: "bg-orange-500 text-white",
            },
            Severity::Critical => SeverityStyle {
                badge: "bg-red-100 text-red-800 border-red-200",
                border: "border-red-600",
                fill: "bg-red-600/20",
                label: "bg-red-600 text-white",
            },
            Severity::None => SeverityStyle {
                badge: "bg-green-100 text-green-800 border-green-200",
                border: "border-green-500",
                fill: "bg-green-500/10",
                label: "bg-green-500 text-white",
            },
        }
    }
}

/// 欠陥種別のアイコン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefectIcon {
    Lightning,
    Crack,
    Generic,
}

impl DefectIcon {
    pub fn for_type(defect_type: &str) -> Self {
        let lower = defect_type.to_lowercase();
        if lower.contains("lightning") {
            DefectIcon::Lightning
        } else if lower.contains("crack") {
            DefectIcon::Crack
        } else {
            DefectIcon::Generic
        }
    }
}

/// 重大度のアイコン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityIcon {
    Triangle,
    Alert,
    Info,
}

impl SeverityIcon {
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Critical | Severity::High => SeverityIcon::Triangle,
            Severity::Medium => SeverityIcon::Alert,
            Severity::Low | Severity::None => SeverityIcon::Info,
        }
    }
}

/// High / Critical が1件でもあるか
pub fn attention_required(defects: &[Defect]) -> bool {
    defects.iter().any(|d| d.severity.needs_attention())
}

/// 見出し文言
pub fn headline(defects: &[Defect]) -> &'static str {
    if attention_required(defects) {
        "Attention Required"
    } else {
        "Blade Operational"
    }
}

/// 所見カード
#[derive(Debug, Clone, PartialEq)]
pub struct DefectCard {
    pub title: String,
    pub badge_text: String,
    pub style: SeverityStyle,
    pub icon: DefectIcon,
    pub severity_icon: SeverityIcon,
    /// 信頼度バーの幅(%)
    pub confidence_width: f64,
    pub location: String,
    pub description: String,
    pub reference: Option<&'static str>,
    pub recommendation: String,
}

impl DefectCard {
    pub fn from_defect(defect: &Defect) -> Self {
        Self {
            title: defect.defect_type.clone(),
            badge_text: defect.severity.as_str().to_uppercase(),
            style: SeverityStyle::for_severity(defect.severity),
            icon: DefectIcon::for_type(&defect.defect_type),
            severity_icon: SeverityIcon::for_severity(defect.severity),
            confidence_width: defect.confidence.clamp(0.0, 100.0),
            location: defect.location.clone(),
            description: defect.description.clone(),
            reference: defect.kind().and_then(|k: DefectKind| k.reference_description()),
            recommendation: defect.recommendation.clone(),
        }
    }
}

/// 所見欄の表示
#[derive(Debug, Clone, PartialEq)]
pub enum FindingsView {
    /// 欠陥なしの確認表示
    NoDefects,
    Findings(Vec<DefectCard>),
}

impl FindingsView {
    pub fn from_defects(defects: &[Defect]) -> Self {
        if defects.is_empty() {
            FindingsView::NoDefects
        } else {
            FindingsView::Findings(defects.iter().map(DefectCard::from_defect).collect())
        }
    }
}

/// 結果欄全体の表示モデル
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub score: f64,
    pub band: ScoreBand,
    pub attention: bool,
    pub headline: &'static str,
    pub critical_count: usize,
    pub issue_count: usize,
    pub summary: String,
    pub timestamp: String,
    pub findings: FindingsView,
}

impl ResultView {
    pub fn from_result(result: &InspectionResult) -> Self {
        Self {
            score: result.blade_condition_score,
            band: ScoreBand::from_score(result.blade_condition_score),
            attention: attention_required(&result.defects),
            headline: headline(&result.defects),
            critical_count: result.critical_count(),
            issue_count: result.defects.len(),
            summary: result.summary.clone(),
            timestamp: result.timestamp.clone(),
            findings: FindingsView::from_defects(&result.defects),
        }
    }

    /// ゲージの2区分（健全度, 欠陥影響）
    pub fn gauge_segments(&self) -> (f64, f64) {
        let score = self.score.clamp(0.0, 100.0);
        (score, 100.0 - score)
    }
}
