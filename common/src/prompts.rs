//! プロンプト生成モジュール
//!
//! 解析サービスに渡す固定の指示ブロック:
//! - 欠陥分類（DefectKindの語彙）
//! - バウンディングボックス規約（0〜1000、原点左上）
//! - 双眼（ステレオ）画像の扱い
//! - 重大度の付け方

use crate::types::DefectKind;

/// 分類手順に付ける注記（構造的な欠陥）
fn taxonomy_note(kind: DefectKind) -> &'static str {
    match kind {
        DefectKind::LeadingEdgeErosionLaminate
        | DefectKind::LaminateCrack
        | DefectKind::LightningDefectLaminate
        | DefectKind::LightningDefectTip
        | DefectKind::LaminateDefectCore => " - *Critical*",
        _ => "",
    }
}

/// 分類リスト（番号付き）
pub fn taxonomy_list() -> String {
    DefectKind::ALL
        .iter()
        .filter(|kind| **kind != DefectKind::Normal)
        .enumerate()
        .map(|(i, kind)| format!("{}. {}{}", i + 1, kind.label(), taxonomy_note(*kind)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 点検用プロンプト生成
pub fn build_inspection_prompt() -> String {
    let taxonomy = taxonomy_list();
    let normal = DefectKind::Normal.label();

    format!(
        r#"You are a World-Class Wind Turbine Structural Engineer and Certified Blade Inspector with 20 years of experience in Non-Destructive Testing (NDT) and Computer Vision Analysis.

Your task is to analyze the provided image (which may be a standard photo or a binocular/stereo inspection image) of a wind turbine blade.

You must rigorously detect, classify, and LOCALIZE faults with extreme precision.

Step 1: Scrutinize the entire image for any anomalies.
Step 2: Classify each anomaly into one of the following specific types:
{taxonomy}

Step 3: For EVERY detected defect, you MUST provide a precise bounding box (ymin, xmin, ymax, xmax) normalized to a 1000x1000 scale.
- 0,0 is the top-left corner.
- 1000,1000 is the bottom-right corner.
- The box should tightly enclose the visible defect.

Guidelines:
- If the image contains binocular views (two similar images side-by-side), detect defects in ALL views where they are visible. Treat the image as a single canvas for coordinates.
- Be conservative with "Critical" severity; reserve it for structural compromises.
- If the blade appears healthy, explicitly state "{normal}" and provide a high condition score.
- Provide a maintenance recommendation for every detected issue."#
    )
}
