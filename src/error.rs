use blade_inspect_common::{AnalysisError, SessionError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。GEMINI_API_KEY を設定するか `blade-inspect config --set-api-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("画像形式を判別できません: {0}")]
    UnsupportedImage(String),

    #[error("{0}")]
    Analysis(#[from] AnalysisError),

    #[error("セッションエラー: {0}")]
    Session(#[from] SessionError),

    #[error("レポート生成エラー: {0}")]
    Report(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] blade_inspect_common::Error),
}

pub type Result<T> = std::result::Result<T, InspectError>;
