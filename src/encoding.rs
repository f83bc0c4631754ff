//! 画像ファイルの取り込み
//!
//! ファイルを読み、内容からMIMEタイプを判定してData URLを作り、
//! そこから転送用のBase64とMIMEタイプを取り出す。

use crate::error::{InspectError, Result};
use crate::scanner::exif;
use blade_inspect_common::EncodedImage;
use chrono::NaiveDateTime;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// アップロード上限の目安（超えても警告のみ）
pub const SOFT_SIZE_LIMIT: u64 = 10 * 1024 * 1024;

/// 取り込み済みの画像
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// 元ファイル（再利用のため保持）
    pub path: PathBuf,
    /// プレビュー用Data URL
    pub preview_url: String,
    pub encoded: EncodedImage,
    /// 内容のSHA-256（hex）
    pub fingerprint: String,
    pub size: u64,
    /// EXIF撮影日時
    pub captured_at: Option<NaiveDateTime>,
}

impl UploadedImage {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn mime_type(&self) -> &str {
        &self.encoded.mime_type
    }

    pub fn base64(&self) -> &str {
        &self.encoded.base64
    }
}

/// 内容からMIMEタイプを判定
pub fn detect_mime_type(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|format| format.to_mime_type())
}

/// バイト列を取り込む
pub fn encode_bytes(path: &Path, bytes: &[u8]) -> Result<UploadedImage> {
    let mime_type = detect_mime_type(bytes)
        .ok_or_else(|| InspectError::UnsupportedImage(path.display().to_string()))?;

    let preview_url = EncodedImage::from_bytes(bytes, mime_type).to_data_url();
    let encoded = EncodedImage::from_data_url(&preview_url)?;

    Ok(UploadedImage {
        path: path.to_path_buf(),
        preview_url,
        encoded,
        fingerprint: hex::encode(Sha256::digest(bytes)),
        size: bytes.len() as u64,
        captured_at: exif::capture_time(bytes),
    })
}

/// 画像ファイルを取り込む
pub fn load_image(path: &Path) -> Result<UploadedImage> {
    if !path.exists() {
        return Err(InspectError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| InspectError::ImageLoad(format!("{}: {}", path.display(), e)))?;

    if bytes.len() as u64 > SOFT_SIZE_LIMIT {
        log::warn!(
            "{} は {} bytes あります（目安 10MB を超過）",
            path.display(),
            bytes.len()
        );
    }

    let image = encode_bytes(path, &bytes)?;
    log::debug!(
        "画像を取り込み: {} ({}, {} bytes, sha256={})",
        image.file_name(),
        image.mime_type(),
        image.size,
        &image.fingerprint[..12]
    );
    Ok(image)
}
