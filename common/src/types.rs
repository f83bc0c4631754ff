//! 点検結果の型定義
//!
//! CLIとレポート描画で共有される型:
//! - Severity: 欠陥の重大度（5段階）
//! - DefectKind: 欠陥分類の固定語彙
//! - BoundingBox / Defect / InspectionResult: 解析サービスの出力契約

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// バウンディングボックス座標系の最大値（各軸0〜1000）
pub const BOX_SCALE: f64 = 1000.0;

/// 欠陥の重大度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::None,
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    /// 要対応（High / Critical）か
    pub fn needs_attention(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Severity::None),
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("unknown severity \"{}\"", s)),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// 欠陥分類（固定語彙）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefectKind {
    SurfaceCrackPaint,
    LeadingEdgeErosionPaint,
    LeadingEdgeErosionLaminate,
    LaminateCrack,
    LightningDefectLaminate,
    LightningDefectTip,
    LaminateDefectCore,
    SurfaceErosion,
    DustAccumulation,
    Normal,
}

impl DefectKind {
    pub const ALL: [DefectKind; 10] = [
        DefectKind::SurfaceCrackPaint,
        DefectKind::LeadingEdgeErosionPaint,
        DefectKind::LeadingEdgeErosionLaminate,
        DefectKind::LaminateCrack,
        DefectKind::LightningDefectLaminate,
        DefectKind::LightningDefectTip,
        DefectKind::LaminateDefectCore,
        DefectKind::SurfaceErosion,
        DefectKind::DustAccumulation,
        DefectKind::Normal,
    ];

    /// 解析サービスが返すラベル
    pub fn label(&self) -> &'static str {
        match self {
            DefectKind::SurfaceCrackPaint => "Surface Crack (Paint/Gelcoat)",
            DefectKind::LeadingEdgeErosionPaint => "Leading Edge Erosion (Paint/Gelcoat)",
            DefectKind::LeadingEdgeErosionLaminate => "Leading Edge Erosion (Laminate)",
            DefectKind::LaminateCrack => "Laminate Crack",
            DefectKind::LightningDefectLaminate => "Lightning Defect (Laminate Level)",
            DefectKind::LightningDefectTip => "Lightning Defect (Tip Opened)",
            DefectKind::LaminateDefectCore => "Laminate Defect (Till Core/Through Laminate)",
            DefectKind::SurfaceErosion => "Surface Level Erosion",
            DefectKind::DustAccumulation => "Dust Accumulation",
            DefectKind::Normal => "No Defects Detected",
        }
    }

    /// 参考説明（健全判定には説明なし）
    pub fn reference_description(&self) -> Option<&'static str> {
        match self {
            DefectKind::SurfaceCrackPaint => Some(
                "Superficial fissures in the outer coating, typically not structural but requires monitoring.",
            ),
            DefectKind::LeadingEdgeErosionPaint => Some(
                "Wear on the leading edge affecting only the protective paint layer.",
            ),
            DefectKind::LeadingEdgeErosionLaminate => Some(
                "Severe erosion penetrating the paint and damaging the underlying laminate structure.",
            ),
            DefectKind::LaminateCrack => Some(
                "Structural cracking within the fiberglass laminate layers.",
            ),
            DefectKind::LightningDefectLaminate => Some(
                "Thermal and physical damage to laminate caused by lightning strikes.",
            ),
            DefectKind::LightningDefectTip => Some(
                "Explosive damage or delamination at the blade tip due to lightning exit.",
            ),
            DefectKind::LaminateDefectCore => Some(
                "Deep structural failure penetrating to the core material.",
            ),
            DefectKind::SurfaceErosion => Some(
                "General surface roughening due to environmental factors.",
            ),
            DefectKind::DustAccumulation => Some(
                "Buildup of particulate matter affecting aerodynamics.",
            ),
            DefectKind::Normal => None,
        }
    }

    /// ラベルから分類を引く（大文字小文字・前後空白は無視）
    ///
    /// 語彙外の自由記述は `None`。
    pub fn from_label(label: &str) -> Option<Self> {
        let needle = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.label().eq_ignore_ascii_case(needle))
    }
}

/// 欠陥位置（0〜1000正規化、原点は左上）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub ymin: f64,
    pub xmin: f64,
    pub ymax: f64,
    pub xmax: f64,
}

impl BoundingBox {
    pub fn new(ymin: f64, xmin: f64, ymax: f64, xmax: f64) -> Self {
        Self { ymin, xmin, ymax, xmax }
    }

    /// 座標が範囲内かつ min <= max か
    pub fn is_well_formed(&self) -> bool {
        let in_range = |v: f64| v.is_finite() && (0.0..=BOX_SCALE).contains(&v);
        in_range(self.ymin)
            && in_range(self.xmin)
            && in_range(self.ymax)
            && in_range(self.xmax)
            && self.ymin <= self.ymax
            && self.xmin <= self.xmax
    }
}

/// 検出された欠陥
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Defect {
    #[serde(rename = "type")]
    pub defect_type: String,
    pub severity: Severity,
    pub confidence: f64,
    pub location: String,
    pub description: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

impl Defect {
    pub fn kind(&self) -> Option<DefectKind> {
        DefectKind::from_label(&self.defect_type)
    }
}

/// 点検結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionResult {
    pub has_defects: bool,
    pub blade_condition_score: f64,
    pub defects: Vec<Defect>,
    pub summary: String,
    pub timestamp: String,
}

impl InspectionResult {
    /// High / Critical の欠陥数
    pub fn critical_count(&self) -> usize {
        self.defects
            .iter()
            .filter(|d| d.severity.needs_attention())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parse_case_insensitive() {
        assert_eq!("critical".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!(" High ".parse::<Severity>().unwrap(), Severity::High);
        assert_eq!("NONE".parse::<Severity>().unwrap(), Severity::None);
        assert!("Severe".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_serde_wire_form() {
        let json = serde_json::to_string(&Severity::Medium).unwrap();
        assert_eq!(json, "\"Medium\"");
        let parsed: Severity = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(parsed, Severity::Low);
        assert!(serde_json::from_str::<Severity>("\"Catastrophic\"").is_err());
    }

    #[test]
    fn test_defect_kind_from_label() {
        assert_eq!(
            DefectKind::from_label("laminate crack"),
            Some(DefectKind::LaminateCrack)
        );
        assert_eq!(
            DefectKind::from_label("Lightning Defect (Tip Opened)"),
            Some(DefectKind::LightningDefectTip)
        );
        assert_eq!(DefectKind::from_label("Bird strike"), None);
    }

    #[test]
    fn test_reference_description_for_known_kinds() {
        for kind in DefectKind::ALL {
            if kind == DefectKind::Normal {
                assert!(kind.reference_description().is_none());
            } else {
                assert!(kind.reference_description().is_some(), "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_bounding_box_well_formed() {
        assert!(BoundingBox::new(0.0, 0.0, 1000.0, 1000.0).is_well_formed());
        assert!(BoundingBox::new(100.0, 100.0, 100.0, 100.0).is_well_formed());
        assert!(!BoundingBox::new(500.0, 0.0, 400.0, 10.0).is_well_formed());
        assert!(!BoundingBox::new(0.0, 600.0, 10.0, 500.0).is_well_formed());
        assert!(!BoundingBox::new(0.0, 0.0, 1001.0, 10.0).is_well_formed());
        assert!(!BoundingBox::new(-1.0, 0.0, 10.0, 10.0).is_well_formed());
        assert!(!BoundingBox::new(f64::NAN, 0.0, 10.0, 10.0).is_well_formed());
    }

    #[test]
    fn test_inspection_result_camel_case() {
        let result = InspectionResult {
            has_defects: true,
            blade_condition_score: 72.0,
            defects: vec![Defect {
                defect_type: "Laminate Crack".to_string(),
                severity: Severity::High,
                confidence: 88.0,
                location: "Trailing Edge".to_string(),
                description: "crack".to_string(),
                recommendation: "repair".to_string(),
                bounding_box: Some(BoundingBox::new(10.0, 20.0, 30.0, 40.0)),
            }],
            summary: "one crack".to_string(),
            timestamp: "2026-01-01T00:00:00.000Z".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["hasDefects"], true);
        assert_eq!(value["bladeConditionScore"], 72.0);
        assert_eq!(value["defects"][0]["type"], "Laminate Crack");
        assert_eq!(value["defects"][0]["boundingBox"]["xmax"], 40.0);
        assert_eq!(result.critical_count(), 1);
    }
}
