pub mod html;
pub mod text;

use crate::encoding::UploadedImage;
use crate::error::{InspectError, Result};
use blade_inspect_common::InspectionResult;
use std::path::{Path, PathBuf};

pub const DISCLAIMER: &str = "Assisting Human Inspectors. Not a replacement for certified NDT.";

/// ISO-8601のタイムスタンプを日付表示に（解釈できなければそのまま）
pub fn format_date(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

/// 出力先がフォルダなら `<画像名>.html` を付ける
pub fn report_path_for(output: &Path, image: &UploadedImage) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        let stem = image
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "inspection".to_string());
        output.join(format!("{}.html", stem))
    } else {
        output.to_path_buf()
    }
}

/// HTMLレポートを書き出す
pub fn write_html_report(
    output: &Path,
    image: &UploadedImage,
    result: &InspectionResult,
) -> Result<PathBuf> {
    let path = report_path_for(output, image);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let captured = image.captured_at.map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string());
    let html = html::render_report(
        &image.file_name(),
        &image.preview_url,
        captured.as_deref(),
        result,
    );

    std::fs::write(&path, html)
        .map_err(|e| InspectError::Report(format!("{}: {}", path.display(), e)))?;
    log::info!("HTMLレポート出力: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-02-03T04:05:06.789Z"), "2026-02-03");
        assert_eq!(format_date("yesterday"), "yesterday");
    }
}
