//! Geminiクライアントのテスト
//!
//! ローカルの1回限りのHTTP応答サーバーに向けてクライアントを動かす

use blade_inspect::analyzer::{GeminiClient, InspectionService};
use blade_inspect_common::{Severity, ANALYSIS_FAILED_MESSAGE};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const OK: &str = "HTTP/1.1 200 OK";

/// 1リクエストだけ受けて固定レスポンスを返す。受信したリクエストを返す
async fn one_shot_server(
    status_line: &'static str,
    body: String,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        let mut buf = [0u8; 8192];

        // ヘッダーとContent-Length分のボディを読む
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&received);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|l| {
                        let lower = l.to_ascii_lowercase();
                        lower
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                    })
                    .unwrap_or(0);
                if received.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        let response = format!(
            "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\
             Connection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&received).to_string()
    });

    (format!("http://{}/v1beta", addr), handle)
}

fn client(base_url: &str) -> GeminiClient {
    GeminiClient::new("test-key", base_url, "gemini-test", 0.1, None).unwrap()
}

fn candidate_body(text: &str) -> String {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
    .to_string()
}

#[tokio::test]
async fn test_successful_analysis() {
    let model_output = json!({
        "hasDefects": true,
        "bladeConditionScore": 62,
        "summary": "Lightning damage at the tip.",
        "defects": [{
            "type": "Lightning Defect (Tip Opened)",
            "severity": "Critical",
            "confidence": 93,
            "location": "Tip",
            "description": "Tip shell split open.",
            "recommendation": "Stop turbine and repair tip.",
            "boundingBox": { "ymin": 40, "xmin": 700, "ymax": 180, "xmax": 960 }
        }]
    })
    .to_string();

    let (base_url, server) = one_shot_server(OK, candidate_body(&model_output)).await;
    let result = client(&base_url).analyze("QUJD", "image/jpeg").await.unwrap();

    assert!(result.has_defects);
    assert_eq!(result.blade_condition_score, 62.0);
    assert_eq!(result.defects[0].severity, Severity::Critical);
    assert!(result.timestamp.ends_with('Z'));

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /v1beta/models/gemini-test:generateContent?key=test-key"));
    assert!(request.contains("\"inline_data\""));
    assert!(request.contains("\"mime_type\":\"image/jpeg\""));
    assert!(request.contains("\"responseSchema\""));
}

#[tokio::test]
async fn test_output_split_across_parts() {
    let body = json!({
        "candidates": [{ "content": { "parts": [
            { "text": "{\"hasDefects\": false, \"bladeConditionScore\": 95," },
            { "text": " \"summary\": \"Clean blade.\", \"defects\": []}" }
        ] } }]
    })
    .to_string();

    let (base_url, _server) = one_shot_server(OK, body).await;
    let result = client(&base_url).analyze("QUJD", "image/png").await.unwrap();
    assert!(!result.has_defects);
    assert_eq!(result.blade_condition_score, 95.0);
    assert_eq!(result.summary, "Clean blade.");
}

#[tokio::test]
async fn test_http_error_is_generic() {
    let (base_url, _server) = one_shot_server(
        "HTTP/1.1 500 Internal Server Error",
        json!({ "error": { "message": "internal detail" } }).to_string(),
    )
    .await;
    let err = client(&base_url).analyze("QUJD", "image/png").await.unwrap_err();
    assert_eq!(err.message(), ANALYSIS_FAILED_MESSAGE);
    assert!(!err.message().contains("internal detail"));
}

#[tokio::test]
async fn test_empty_candidates_fail() {
    let body = json!({ "candidates": [] }).to_string();
    let (base_url, _server) = one_shot_server(OK, body).await;
    let err = client(&base_url).analyze("QUJD", "image/png").await.unwrap_err();
    assert_eq!(err.message(), ANALYSIS_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_non_json_model_output_fails() {
    let body = candidate_body("I could not analyze this image.");
    let (base_url, _server) = one_shot_server(OK, body).await;
    assert!(client(&base_url).analyze("QUJD", "image/png").await.is_err());
}

#[tokio::test]
async fn test_contract_violation_rejects_whole_result() {
    let model_output = json!({
        "hasDefects": true,
        "bladeConditionScore": 70,
        "summary": "two findings",
        "defects": [
            {
                "type": "Dust Accumulation", "severity": "Low", "confidence": 80,
                "location": "Root", "description": "dust", "recommendation": "clean",
                "boundingBox": { "ymin": 10, "xmin": 10, "ymax": 50, "xmax": 50 }
            },
            {
                "type": "Laminate Crack", "severity": "Severe", "confidence": 80,
                "location": "Mid-span", "description": "crack", "recommendation": "repair",
                "boundingBox": { "ymin": 10, "xmin": 10, "ymax": 50, "xmax": 50 }
            }
        ]
    })
    .to_string();

    let (base_url, _server) = one_shot_server(OK, candidate_body(&model_output)).await;
    assert!(client(&base_url).analyze("QUJD", "image/png").await.is_err());
}

#[tokio::test]
async fn test_unreachable_service_fails() {
    // 直前に閉じたポートに接続
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/v1beta", addr))
        .analyze("QUJD", "image/png")
        .await
        .unwrap_err();
    assert_eq!(err.message(), ANALYSIS_FAILED_MESSAGE);
}
