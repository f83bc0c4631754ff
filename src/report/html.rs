//! HTMLレポート
//!
//! 画像（Data URL埋め込み）とオーバーレイ矩形、スコア、所見カードを
//! 1ファイルのHTMLにまとめる。オーバーレイは画像の onload 後に表示する。

use blade_inspect_common::overlay::{Z_INDEX_BASE, Z_INDEX_HOVER, Z_INDEX_LABEL};
use blade_inspect_common::presentation::{DefectCard, DefectIcon, SeverityIcon};
use blade_inspect_common::{
    layout_overlays, FindingsView, ImageLoadState, InspectionResult, LabelAnchor, Overlay,
    ResultView, SeverityStyle,
};
use std::fmt::Write as _;

use super::{format_date, DISCLAIMER};

/// HTML特殊文字のエスケープ
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn icon_glyph(icon: DefectIcon) -> &'static str {
    match icon {
        DefectIcon::Lightning => "⚡",
        DefectIcon::Crack => "〰",
        DefectIcon::Generic => "●",
    }
}

fn severity_glyph(icon: SeverityIcon) -> &'static str {
    match icon {
        SeverityIcon::Triangle => "▲",
        SeverityIcon::Alert => "!",
        SeverityIcon::Info => "i",
    }
}

/// オーバーレイ1件のマークアップ
pub fn render_overlay(overlay: &Overlay) -> String {
    let style = SeverityStyle::for_severity(overlay.severity);
    let anchor = match overlay.anchor {
        LabelAnchor::InsideTop => "top-0",
        LabelAnchor::Above => "bottom-full",
    };
    let rect = &overlay.rect;

    format!(
        r#"<div class="absolute border-2 {border} {fill} cursor-pointer group z-{z} hover:z-{zh}" data-defect-index="{index}" style="top: {top}%; left: {left}%; height: {height}%; width: {width}%;">
  <span class="absolute {anchor} left-[-2px] px-1.5 py-0.5 text-[10px] font-bold uppercase tracking-wider {label} whitespace-nowrap z-{zl} pointer-events-none">{title}</span>
  <div class="opacity-0 group-hover:opacity-100 absolute top-full left-1/2 -translate-x-1/2 mt-1 bg-gray-900/95 text-white text-xs px-3 py-2 rounded whitespace-nowrap pointer-events-none">
    <div class="font-semibold">{title}</div>
    <div class="text-gray-400 text-[10px]">{detail}</div>
    <div class="text-gray-400 text-[10px] italic">{location}</div>
  </div>
</div>"#,
        border = style.border,
        fill = style.fill,
        label = style.label,
        z = Z_INDEX_BASE,
        zh = Z_INDEX_HOVER,
        zl = Z_INDEX_LABEL,
        index = overlay.index,
        top = rect.top,
        left = rect.left,
        height = rect.height,
        width = rect.width,
        anchor = anchor,
        title = escape_html(&overlay.label),
        detail = escape_html(&overlay.tooltip.detail),
        location = escape_html(&overlay.tooltip.location),
    )
}

fn render_card(card: &DefectCard) -> String {
    let reference = card
        .reference
        .map(|r| format!(r#"<p class="text-xs text-gray-400 mb-3">{}</p>"#, escape_html(r)))
        .unwrap_or_default();

    format!(
        r#"<div class="bg-white rounded-xl border border-gray-200 shadow-sm p-5">
  <div class="flex justify-between items-start mb-3">
    <div class="flex items-start gap-3">
      <div class="p-2 rounded-lg {badge}">{icon}</div>
      <div>
        <h3 class="font-semibold text-gray-900">{title}</h3>
        <p class="text-sm text-gray-500 mt-1">Location: {location}</p>
      </div>
    </div>
    <span class="px-2.5 py-1 rounded-full text-xs font-semibold border {badge}">{severity_icon} {badge_text}</span>
  </div>
  <p class="text-gray-600 text-sm mb-2 bg-gray-50 p-3 rounded-lg">{description}</p>
  {reference}
  <div class="flex items-center gap-2 text-sm border-t border-gray-100 pt-3">
    <span class="text-gray-400">Confidence:</span>
    <div class="h-2 w-16 bg-gray-100 rounded-full overflow-hidden"><div class="h-full bg-blue-600 rounded-full" style="width: {confidence}%"></div></div>
    <span class="font-medium text-gray-700">{confidence}%</span>
  </div>
  <div class="mt-3 pt-3 border-t border-gray-100">
    <p class="text-xs font-semibold text-gray-500 uppercase tracking-wider mb-1">Recommendation</p>
    <p class="text-sm text-gray-800 font-medium">{recommendation}</p>
  </div>
</div>"#,
        badge = card.style.badge,
        icon = icon_glyph(card.icon),
        title = escape_html(&card.title),
        location = escape_html(&card.location),
        severity_icon = severity_glyph(card.severity_icon),
        badge_text = escape_html(&card.badge_text),
        description = escape_html(&card.description),
        reference = reference,
        confidence = card.confidence_width,
        recommendation = escape_html(&card.recommendation),
    )
}

/// 所見欄
pub fn render_findings(findings: &FindingsView) -> String {
    match findings {
        FindingsView::NoDefects => r#"<div class="no-defects bg-white rounded-xl border border-gray-200 p-12 text-center">
  <h3 class="text-xl font-medium text-gray-900">No Defects Detected</h3>
  <p class="text-gray-500 mt-2">The blade appears to be in excellent structural condition.</p>
</div>"#
            .to_string(),
        FindingsView::Findings(cards) => {
            let mut out = String::from(r#"<div class="findings grid grid-cols-1 gap-4">"#);
            for card in cards {
                out.push('\n');
                out.push_str(&render_card(card));
            }
            out.push_str("\n</div>");
            out
        }
    }
}

const CHIP_NEUTRAL: &str = "bg-gray-100 text-gray-600";
const CHIP_ALERT: &str = "bg-red-100 text-red-700";

fn push_chip(out: &mut String, colors: &str, text: &str) {
    let _ = write!(
        out,
        r#"<span class="px-3 py-1 {} text-xs rounded-full">{}</span>"#,
        colors, text
    );
}

fn render_summary(view: &ResultView, captured: Option<&str>) -> String {
    let (score, impact) = view.gauge_segments();
    let headline_icon = if view.attention { "⛔" } else { "✅" };
    let date = format_date(&view.timestamp);

    let mut chips = String::new();
    push_chip(&mut chips, CHIP_NEUTRAL, &escape_html(&date));
    if let Some(captured) = captured {
        push_chip(&mut chips, CHIP_NEUTRAL, &format!("Captured {}", escape_html(captured)));
    }
    push_chip(
        &mut chips,
        CHIP_NEUTRAL,
        &format!("{} Issues Detected", view.issue_count),
    );
    if view.critical_count > 0 {
        push_chip(
            &mut chips,
            CHIP_ALERT,
            &format!("{} High/Critical", view.critical_count),
        );
    }

    format!(
        r#"<div class="bg-white rounded-xl shadow-sm border border-gray-200 p-6 flex gap-6 items-center">
  <div class="relative w-32 h-32 flex-shrink-0 rounded-full {bg}" style="background: conic-gradient({gauge} 0 {score}%, #f3f4f6 {score}% {total}%);" title="Condition {score} / Defect Impact {impact}">
    <div class="absolute inset-4 bg-white rounded-full flex items-center justify-center flex-col">
      <span class="text-xl font-bold {color}">{score}</span>
      <span class="text-[10px] text-gray-400 uppercase">Health</span>
    </div>
  </div>
  <div class="flex-1">
    <h2 class="text-lg font-semibold text-gray-900 mb-1">{headline_icon} {headline}</h2>
    <p class="text-gray-600 text-sm mb-3">{summary}</p>
    <div class="flex flex-wrap gap-2">{chips}</div>
  </div>
</div>"#,
        bg = view.band.background(),
        gauge = view.band.gauge_color(),
        color = view.band.text_color(),
        score = score,
        impact = impact,
        total = 100,
        headline_icon = headline_icon,
        headline = view.headline,
        summary = escape_html(&view.summary),
        chips = chips,
    )
}

/// レポート全体を生成
///
/// # Arguments
/// * `title` - 画像ファイル名など
/// * `preview_url` - 画像のData URL
/// * `captured` - 撮影日時（表示用）
pub fn render_report(
    title: &str,
    preview_url: &str,
    captured: Option<&str>,
    result: &InspectionResult,
) -> String {
    let view = ResultView::from_result(result);
    let overlays: String = layout_overlays(&result.defects, ImageLoadState::Loaded)
        .iter()
        .map(render_overlay)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>BladeGuard Inspection - {title}</title>
<script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="min-h-screen bg-slate-50 text-slate-900">
<main class="container mx-auto px-4 py-8 grid grid-cols-1 lg:grid-cols-12 gap-8">
  <section class="lg:col-span-5">
    <div class="relative rounded-lg bg-gray-900 overflow-hidden">
      <div class="relative inline-block w-full">
        <img src="{preview}" alt="Analyzed Blade" class="block w-full h-auto" onload="document.getElementById('overlays').classList.remove('hidden')">
        <div id="overlays" class="hidden">
{overlays}
        </div>
      </div>
    </div>
    <p class="text-sm text-gray-500 mt-2">{title}</p>
  </section>
  <section class="lg:col-span-7 space-y-6">
{summary}
    <h3 class="text-lg font-semibold text-gray-900">Detailed Findings</h3>
{findings}
  </section>
</main>
<footer class="bg-white border-t border-gray-200 py-6 text-center text-sm text-gray-400">{disclaimer}</footer>
</body>
</html>
"#,
        title = escape_html(title),
        preview = preview_url,
        overlays = overlays,
        summary = render_summary(&view, captured),
        findings = render_findings(&view.findings),
        disclaimer = DISCLAIMER,
    )
}
