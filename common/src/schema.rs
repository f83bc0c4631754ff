//! レスポンススキーマ
//!
//! 解析サービスの `responseSchema` に渡すJSONスキーマ。
//! 必須項目は parser 側の検証と一致させること。

use crate::types::DefectKind;
use serde_json::{json, Value};

/// 欠陥1件の必須フィールド
pub const DEFECT_REQUIRED_FIELDS: &[&str] = &[
    "type",
    "severity",
    "confidence",
    "location",
    "description",
    "recommendation",
    "boundingBox",
];

/// バウンディングボックスの必須フィールド
pub const BOX_REQUIRED_FIELDS: &[&str] = &["ymin", "xmin", "ymax", "xmax"];

/// 結果全体の必須フィールド
pub const RESULT_REQUIRED_FIELDS: &[&str] =
    &["hasDefects", "bladeConditionScore", "summary", "defects"];

fn defect_type_description() -> String {
    let labels = DefectKind::ALL
        .iter()
        .filter(|kind| **kind != DefectKind::Normal)
        .map(|kind| kind.label())
        .collect::<Vec<_>>();
    format!("Must be one of: {}, or Other.", labels.join(", "))
}

/// 点検結果のレスポンススキーマ
pub fn inspection_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "hasDefects": { "type": "BOOLEAN" },
            "bladeConditionScore": {
                "type": "NUMBER",
                "description": "A score from 0 to 100 representing the overall health of the blade. 100 is perfect, 0 is destroyed."
            },
            "summary": {
                "type": "STRING",
                "description": "A concise executive summary of the inspection findings."
            },
            "defects": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "type": { "type": "STRING", "description": defect_type_description() },
                        "severity": { "type": "STRING", "description": "Low, Medium, High, or Critical" },
                        "confidence": { "type": "NUMBER", "description": "Confidence score 0-100" },
                        "location": {
                            "type": "STRING",
                            "description": "Where on the blade this is located (e.g., Tip, Root, Trailing Edge, Leading Edge)"
                        },
                        "description": { "type": "STRING", "description": "Detailed visual description of the specific defect found." },
                        "recommendation": { "type": "STRING", "description": "Actionable maintenance recommendation." },
                        "boundingBox": {
                            "type": "OBJECT",
                            "description": "Precise bounding box of the defect with coordinates normalized to 1000 (0-1000 scale).",
                            "properties": {
                                "ymin": { "type": "NUMBER", "description": "Top Y coordinate (0-1000)" },
                                "xmin": { "type": "NUMBER", "description": "Left X coordinate (0-1000)" },
                                "ymax": { "type": "NUMBER", "description": "Bottom Y coordinate (0-1000)" },
                                "xmax": { "type": "NUMBER", "description": "Right X coordinate (0-1000)" }
                            },
                            "required": BOX_REQUIRED_FIELDS
                        }
                    },
                    "required": DEFECT_REQUIRED_FIELDS
                }
            }
        },
        "required": RESULT_REQUIRED_FIELDS
    })
}
