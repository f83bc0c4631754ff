//! 端末向けレポート

use blade_inspect_common::presentation::DefectCard;
use blade_inspect_common::{FindingsView, InspectionResult, ResultView, ScoreBand};
use std::fmt::Write as _;

use super::format_date;

/// 信頼度バーの文字数
const BAR_WIDTH: usize = 20;

fn band_marker(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Good => "🟢",
        ScoreBand::Warning => "🟡",
        ScoreBand::Critical => "🔴",
    }
}

/// 0〜100を固定幅のバーに
pub fn confidence_bar(confidence: f64) -> String {
    let filled = ((confidence.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn write_card(out: &mut String, n: usize, card: &DefectCard) {
    let _ = writeln!(out, "  {}. [{}] {}", n, card.badge_text, card.title);
    let _ = writeln!(out, "     Location: {}", card.location);
    let _ = writeln!(
        out,
        "     Confidence: {} {}%",
        confidence_bar(card.confidence_width),
        card.confidence_width
    );
    let _ = writeln!(out, "     {}", card.description);
    if let Some(reference) = card.reference {
        let _ = writeln!(out, "     ({})", reference);
    }
    let _ = writeln!(out, "     → {}", card.recommendation);
}

/// 点検結果を端末表示用の文字列に
pub fn render_text(file_name: &str, result: &InspectionResult) -> String {
    let view = ResultView::from_result(result);
    let mut out = String::new();

    let _ = writeln!(out, "📷 {}", file_name);
    let _ = writeln!(
        out,
        "{} Health {} / 100  {}",
        band_marker(view.band),
        view.score,
        view.headline
    );
    let _ = writeln!(out, "{}", view.summary);
    let _ = writeln!(
        out,
        "{} | {} Issues Detected",
        format_date(&view.timestamp),
        view.issue_count
    );
    out.push('\n');

    match &view.findings {
        FindingsView::NoDefects => {
            let _ = writeln!(out, "✔ No Defects Detected");
            let _ = writeln!(out, "  The blade appears to be in excellent structural condition.");
        }
        FindingsView::Findings(cards) => {
            let _ = writeln!(out, "Detailed Findings:");
            for (i, card) in cards.iter().enumerate() {
                write_card(&mut out, i + 1, card);
            }
        }
    }

    out
}
