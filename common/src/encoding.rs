//! 画像の転送用エンコーディング
//!
//! Data URL (`data:<mime>;base64,<payload>`) を組み立て、
//! そこからMIMEタイプとBase64本体を取り出す。

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// 転送用にエンコードされた画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub base64: String,
    pub mime_type: String,
}

impl EncodedImage {
    /// バイト列とMIMEタイプから作成
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        Self {
            base64: STANDARD.encode(bytes),
            mime_type: mime_type.to_string(),
        }
    }

    /// Data URLから作成
    ///
    /// MIMEタイプは `data:` と `;` の間、Base64は最初のカンマ以降。
    pub fn from_data_url(data_url: &str) -> Result<Self> {
        let base64 = extract_base64_from_data_url(data_url)
            .ok_or_else(|| Error::Encoding("Data URLにカンマがありません".into()))?;
        let mime_type = extract_mime_type_from_data_url(data_url)
            .ok_or_else(|| Error::Encoding("Data URLからMIMEタイプを取得できません".into()))?;

        Ok(Self {
            base64: base64.to_string(),
            mime_type: mime_type.to_string(),
        })
    }

    /// プレビュー用のData URL
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }

    /// 元のバイト列に戻す
    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.base64.as_bytes())
            .map_err(|e| Error::Encoding(format!("Base64デコードエラー: {}", e)))
    }
}

/// Data URLからBase64データ部分を抽出（最初のカンマ以降）
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split_once(',').map(|(_, payload)| payload)
}

/// Data URLからMIMEタイプを抽出
pub fn extract_mime_type_from_data_url(data_url: &str) -> Option<&str> {
    let (header, _) = data_url.split_once(',')?;
    let rest = header.strip_prefix("data:")?;
    let mime = rest.split(';').next()?;
    if mime.is_empty() {
        None
    } else {
        Some(mime)
    }
}
