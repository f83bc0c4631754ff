//! APIレスポンスパーサー
//!
//! 解析サービスの出力テキストからJSONを抽出し、
//! 契約どおりの `InspectionResult` に検証・変換する。
//!
//! 契約違反（必須項目の欠落、未知の重大度、反転・範囲外のボックス等）は
//! 結果全体を拒否する。一部だけ信用して表示することはしない。

use crate::error::{Error, Result};
use crate::types::{BoundingBox, Defect, InspectionResult, Severity, BOX_SCALE};
use serde_json::{Map, Value};

type Object = Map<String, Value>;

/// APIレスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Examples
/// ```
/// use blade_inspect_common::extract_json;
///
/// let response = "result: {\"hasDefects\": false}";
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "{\"hasDefects\": false}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7;
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONが見つかりません".into()))
}

/// 点検レスポンスをパース
///
/// # Arguments
/// * `response` - 解析サービスの出力テキスト
/// * `timestamp` - 受信時刻（ISO-8601）。結果に付与する
///
/// # Returns
/// * `Ok(InspectionResult)` - 全項目が契約を満たす
/// * `Err(Error::Parse)` - 空・JSONでない
/// * `Err(Error::Validation)` - 契約違反
pub fn parse_inspection_response(response: &str, timestamp: &str) -> Result<InspectionResult> {
    if response.trim().is_empty() {
        return Err(Error::Parse("空のレスポンス".into()));
    }

    let json_str = extract_json(response)?;
    let value: Value = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("点検結果 JSONパースエラー: {}", e)))?;

    let mut result = validate_inspection(&value)?;
    result.timestamp = timestamp.to_string();
    Ok(result)
}

/// 保存済みの点検結果JSONを読み込む（timestampはそのまま保持）
pub fn parse_saved_result(json: &str) -> Result<InspectionResult> {
    let value: Value = serde_json::from_str(json)?;
    let mut result = validate_inspection(&value)?;
    result.timestamp = value
        .get("timestamp")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Ok(result)
}

/// JSON値を契約に照らして検証する
pub fn validate_inspection(value: &Value) -> Result<InspectionResult> {
    let root = value
        .as_object()
        .ok_or_else(|| invalid("$", "object expected"))?;

    let has_defects = require(root, "$", "hasDefects")?
        .as_bool()
        .ok_or_else(|| invalid("hasDefects", "boolean expected"))?;

    let score = require_number(root, "$", "bladeConditionScore")?;
    if !(0.0..=100.0).contains(&score) {
        return Err(invalid("bladeConditionScore", &format!("{} is outside 0-100", score)));
    }

    let summary = require_string(root, "$", "summary")?;

    let defects = require(root, "$", "defects")?
        .as_array()
        .ok_or_else(|| invalid("defects", "array expected"))?
        .iter()
        .enumerate()
        .map(|(i, v)| validate_defect(i, v))
        .collect::<Result<Vec<_>>>()?;

    Ok(InspectionResult {
        has_defects,
        blade_condition_score: score,
        defects,
        summary,
        timestamp: String::new(),
    })
}

fn validate_defect(index: usize, value: &Value) -> Result<Defect> {
    let path = format!("defects[{}]", index);
    let obj = value
        .as_object()
        .ok_or_else(|| invalid(&path, "object expected"))?;

    let severity_str = require_string(obj, &path, "severity")?;
    let severity: Severity = severity_str
        .parse()
        .map_err(|e: String| invalid(&format!("{}.severity", path), &e))?;

    let confidence = require_number(obj, &path, "confidence")?;
    if !(0.0..=100.0).contains(&confidence) {
        return Err(invalid(
            &format!("{}.confidence", path),
            &format!("{} is outside 0-100", confidence),
        ));
    }

    let bounding_box = match obj.get("boundingBox") {
        None | Some(Value::Null) => None,
        Some(bbox) => Some(validate_box(&format!("{}.boundingBox", path), bbox)?),
    };

    Ok(Defect {
        defect_type: require_string(obj, &path, "type")?,
        severity,
        confidence,
        location: require_string(obj, &path, "location")?,
        description: require_string(obj, &path, "description")?,
        recommendation: require_string(obj, &path, "recommendation")?,
        bounding_box,
    })
}

fn validate_box(path: &str, value: &Value) -> Result<BoundingBox> {
    let obj = value
        .as_object()
        .ok_or_else(|| invalid(path, "object expected"))?;

    let bbox = BoundingBox::new(
        require_number(obj, path, "ymin")?,
        require_number(obj, path, "xmin")?,
        require_number(obj, path, "ymax")?,
        require_number(obj, path, "xmax")?,
    );

    let coordinates = [
        ("ymin", bbox.ymin),
        ("xmin", bbox.xmin),
        ("ymax", bbox.ymax),
        ("xmax", bbox.xmax),
    ];
    for (name, v) in coordinates {
        if !(0.0..=BOX_SCALE).contains(&v) {
            return Err(invalid(
                &format!("{}.{}", path, name),
                &format!("{} is outside 0-1000", v),
            ));
        }
    }
    if bbox.ymin > bbox.ymax {
        return Err(invalid(path, &format!("inverted: ymin {} > ymax {}", bbox.ymin, bbox.ymax)));
    }
    if bbox.xmin > bbox.xmax {
        return Err(invalid(path, &format!("inverted: xmin {} > xmax {}", bbox.xmin, bbox.xmax)));
    }

    Ok(bbox)
}

fn require<'a>(obj: &'a Object, path: &str, key: &str) -> Result<&'a Value> {
    match obj.get(key) {
        Some(Value::Null) | None => Err(invalid(&join(path, key), "missing required field")),
        Some(v) => Ok(v),
    }
}

fn require_string(obj: &Object, path: &str, key: &str) -> Result<String> {
    require(obj, path, key)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(&join(path, key), "string expected"))
}

fn require_number(obj: &Object, path: &str, key: &str) -> Result<f64> {
    require(obj, path, key)?
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(&join(path, key), "number expected"))
}

fn join(path: &str, key: &str) -> String {
    if path == "$" {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn invalid(path: &str, reason: &str) -> Error {
    Error::Validation(format!("{}: {}", path, reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TS: &str = "2026-03-01T12:00:00.000Z";

    fn sample_defect() -> Value {
        json!({
            "type": "Leading Edge Erosion (Paint/Gelcoat)",
            "severity": "Medium",
            "confidence": 87,
            "location": "Leading Edge",
            "description": "Paint loss along the leading edge.",
            "recommendation": "Apply leading edge protection tape.",
            "boundingBox": { "ymin": 120, "xmin": 40, "ymax": 260, "xmax": 480 }
        })
    }

    fn sample_response(defects: Vec<Value>) -> String {
        json!({
            "hasDefects": !defects.is_empty(),
            "bladeConditionScore": 74,
            "summary": "Moderate erosion on the leading edge.",
            "defects": defects
        })
        .to_string()
    }

    #[test]
    fn test_extract_json_with_block() {
        let response = "Here is the result:\n```json\n{\"hasDefects\": false}\n```\ntrailing";
        assert_eq!(extract_json(response).unwrap(), "{\"hasDefects\": false}");
    }

    #[test]
    fn test_extract_json_not_found() {
        assert!(matches!(extract_json("no json here"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_valid_response() {
        let result =
            parse_inspection_response(&sample_response(vec![sample_defect()]), TS).unwrap();
        assert!(result.has_defects);
        assert_eq!(result.blade_condition_score, 74.0);
        assert_eq!(result.timestamp, TS);
        assert_eq!(result.defects.len(), 1);
        let defect = &result.defects[0];
        assert_eq!(defect.severity, Severity::Medium);
        assert_eq!(defect.bounding_box, Some(BoundingBox::new(120.0, 40.0, 260.0, 480.0)));
    }

    #[test]
    fn test_parse_preserves_defect_order() {
        let mut second = sample_defect();
        second["type"] = json!("Dust Accumulation");
        second["severity"] = json!("Low");
        let response = sample_response(vec![sample_defect(), second]);
        let result = parse_inspection_response(&response, TS).unwrap();
        assert_eq!(result.defects[0].defect_type, "Leading Edge Erosion (Paint/Gelcoat)");
        assert_eq!(result.defects[1].defect_type, "Dust Accumulation");
    }

    #[test]
    fn test_parse_empty_defects() {
        let result = parse_inspection_response(&sample_response(vec![]), TS).unwrap();
        assert!(!result.has_defects);
        assert!(result.defects.is_empty());
    }

    #[test]
    fn test_parse_empty_response() {
        assert!(matches!(parse_inspection_response("   ", TS), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_non_json_response() {
        let err = parse_inspection_response("{ not json }", TS).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_reject_missing_required_field() {
        let mut defect = sample_defect();
        defect.as_object_mut().unwrap().remove("recommendation");
        let err = parse_inspection_response(&sample_response(vec![defect]), TS).unwrap_err();
        match err {
            Error::Validation(msg) => assert!(msg.contains("defects[0].recommendation"), "{}", msg),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_reject_unknown_severity() {
        let mut defect = sample_defect();
        defect["severity"] = json!("Severe");
        let err = parse_inspection_response(&sample_response(vec![defect]), TS).unwrap_err();
        match err {
            Error::Validation(msg) => assert!(msg.contains("defects[0].severity")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_reject_inverted_box() {
        let mut defect = sample_defect();
        defect["boundingBox"] = json!({ "ymin": 500, "xmin": 10, "ymax": 100, "xmax": 20 });
        let err = parse_inspection_response(&sample_response(vec![defect]), TS).unwrap_err();
        match err {
            Error::Validation(msg) => assert!(msg.contains("inverted"), "{}", msg),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_reject_out_of_range_box() {
        let mut defect = sample_defect();
        defect["boundingBox"]["xmax"] = json!(1200);
        assert!(matches!(
            parse_inspection_response(&sample_response(vec![defect]), TS),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_reject_partial_box() {
        let mut defect = sample_defect();
        defect["boundingBox"].as_object_mut().unwrap().remove("ymax");
        let err = parse_inspection_response(&sample_response(vec![defect]), TS).unwrap_err();
        match err {
            Error::Validation(msg) => assert!(msg.contains("boundingBox.ymax")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_accept_defect_without_box() {
        let mut defect = sample_defect();
        defect.as_object_mut().unwrap().remove("boundingBox");
        let result = parse_inspection_response(&sample_response(vec![defect]), TS).unwrap();
        assert!(result.defects[0].bounding_box.is_none());
    }

    #[test]
    fn test_reject_score_out_of_range() {
        let response = json!({
            "hasDefects": false,
            "bladeConditionScore": 140,
            "summary": "ok",
            "defects": []
        })
        .to_string();
        assert!(matches!(
            parse_inspection_response(&response, TS),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_parse_saved_result_keeps_timestamp() {
        let mut value: Value =
            serde_json::from_str(&sample_response(vec![sample_defect()])).unwrap();
        value["timestamp"] = json!(TS);
        let result = parse_saved_result(&value.to_string()).unwrap();
        assert_eq!(result.timestamp, TS);
        assert_eq!(result.defects.len(), 1);
    }
}
