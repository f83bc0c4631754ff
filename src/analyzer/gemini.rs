//! Gemini API連携
//!
//! 画像1枚 + 固定プロンプト + レスポンススキーマで generateContent を1回呼ぶ。
//! 失敗の詳細はログにだけ残し、呼び出し元には `AnalysisError` を返す。

use super::{observation_timestamp, InspectionService};
use crate::config::Config;
use crate::error::{InspectError, Result};
use async_trait::async_trait;
use blade_inspect_common::{
    build_inspection_prompt, inspection_response_schema, parse_inspection_response,
    AnalysisError, InspectionResult,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini APIリクエスト
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

/// Gemini APIレスポンス
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl ResponseContent {
    /// テキストパートを順に連結
    fn joined_text(self) -> String {
        self.parts.into_iter().filter_map(|p| p.text).collect()
    }
}

/// 運用者向けの失敗詳細（ログ専用）
#[derive(Error, Debug)]
enum GeminiFailure {
    #[error("HTTP送信エラー: {0}")]
    Transport(reqwest::Error),

    #[error("APIエラー (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("空のレスポンス")]
    Empty,

    #[error("レスポンス検証エラー: {0}")]
    Invalid(#[from] blade_inspect_common::Error),
}

impl GeminiFailure {
    /// URLにはAPIキーが含まれるため落としてから保持する
    fn transport(e: reqwest::Error) -> Self {
        GeminiFailure::Transport(e.without_url())
    }
}

/// Gemini APIクライアント
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        model: &str,
        temperature: f32,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| InspectError::Config(format!("HTTPクライアント初期化エラー: {}", e)))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            endpoint: format!(
                "{}/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                model
            ),
            temperature,
        })
    }

    /// 設定から作成（APIキー必須）
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.get_api_key()?;
        let timeout =
            (config.timeout_seconds > 0).then(|| Duration::from_secs(config.timeout_seconds));
        Self::new(api_key, &config.api_base_url, &config.model, config.temperature, timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(&self, base64: &str, mime_type: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: build_inspection_prompt() },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: base64.to_string(),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                response_mime_type: "application/json".to_string(),
                response_schema: inspection_response_schema(),
            },
        }
    }

    async fn call(
        &self,
        base64: &str,
        mime_type: &str,
    ) -> std::result::Result<InspectionResult, GeminiFailure> {
        let request = self.build_request(base64, mime_type);

        let resp = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(GeminiFailure::transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GeminiFailure::Status {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        let response: GeminiResponse = resp.json().await.map_err(GeminiFailure::transport)?;
        let timestamp = observation_timestamp();

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.joined_text())
            .filter(|t| !t.trim().is_empty())
            .ok_or(GeminiFailure::Empty)?;

        log::debug!("レスポンス長: {} chars", text.len());

        Ok(parse_inspection_response(&text, &timestamp)?)
    }
}

#[async_trait]
impl InspectionService for GeminiClient {
    async fn analyze(
        &self,
        base64: &str,
        mime_type: &str,
    ) -> std::result::Result<InspectionResult, AnalysisError> {
        self.call(base64, mime_type).await.map_err(|e| {
            log::error!("Gemini解析エラー: {}", e);
            AnalysisError::default()
        })
    }
}
