mod gemini;

pub use gemini::{GeminiClient, GEMINI_API_URL};

use crate::encoding::UploadedImage;
use async_trait::async_trait;
use blade_inspect_common::{AnalysisError, InspectionResult};
use chrono::{SecondsFormat, Utc};

/// 画像解析サービス
///
/// 成功時は検証済みの結果、失敗時は利用者向けの `AnalysisError` のみを返す。
/// 再試行はしない。
#[async_trait]
pub trait InspectionService: Send + Sync {
    async fn analyze(
        &self,
        base64: &str,
        mime_type: &str,
    ) -> Result<InspectionResult, AnalysisError>;
}

/// 取り込み済み画像を解析
pub async fn analyze_image<S>(
    service: &S,
    image: &UploadedImage,
) -> Result<InspectionResult, AnalysisError>
where
    S: InspectionService + ?Sized,
{
    log::info!("解析開始: {} ({})", image.file_name(), image.mime_type());
    let result = service.analyze(image.base64(), image.mime_type()).await;
    match &result {
        Ok(r) => log::info!(
            "解析完了: {} score={} defects={}",
            image.file_name(),
            r.blade_condition_score,
            r.defects.len()
        ),
        Err(_) => log::warn!("解析失敗: {}", image.file_name()),
    }
    result
}

/// 受信時刻（ISO-8601、UTC、ミリ秒）
pub fn observation_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_timestamp_format() {
        let ts = observation_timestamp();
        assert!(ts.ends_with('Z'), "{}", ts);
        assert_eq!(ts.len(), "2026-01-01T00:00:00.000Z".len());
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
