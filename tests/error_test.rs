//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use blade_inspect::encoding;
use blade_inspect::error::InspectError;
use blade_inspect::scanner;
use blade_inspect_common::{AnalysisError, SessionError, ANALYSIS_FAILED_MESSAGE};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"), false);
    assert!(matches!(result, Err(InspectError::FolderNotFound(_))));
}

/// 空のフォルダはエラーではなく空のVec
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path(), false).unwrap();
    assert!(result.is_empty());
}

/// 存在しない画像
#[test]
fn test_load_missing_image() {
    let err = encoding::load_image(Path::new("/nonexistent/blade.jpg")).unwrap_err();
    assert!(matches!(err, InspectError::FileNotFound(_)));
}

/// 画像でないファイル
#[test]
fn test_load_non_image_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.jpg");
    std::fs::write(&path, "this is not an image").unwrap();

    let err = encoding::load_image(&path).unwrap_err();
    assert!(matches!(err, InspectError::UnsupportedImage(_)));
}

/// 読めないパス（フォルダ）は読み込みエラー
#[test]
fn test_load_directory_as_image() {
    let dir = tempdir().unwrap();
    let err = encoding::load_image(dir.path()).unwrap_err();
    assert!(matches!(err, InspectError::ImageLoad(_)));
}

/// 解析失敗は利用者向けメッセージのみを表示
#[test]
fn test_analysis_error_display_is_user_safe() {
    let err: InspectError = AnalysisError::default().into();
    assert_eq!(format!("{}", err), ANALYSIS_FAILED_MESSAGE);
}

/// MissingApiKeyエラーのメッセージ確認
#[test]
fn test_missing_api_key_message() {
    let display = format!("{}", InspectError::MissingApiKey);
    assert!(display.contains("APIキー"));
    assert!(display.contains("GEMINI_API_KEY"));
}

/// セッションエラーからの変換
#[test]
fn test_session_error_conversion() {
    let err: InspectError = SessionError::Busy.into();
    assert!(matches!(err, InspectError::Session(SessionError::Busy)));
}

/// common::Errorは透過的に表示
#[test]
fn test_common_error_transparent() {
    let err: InspectError =
        blade_inspect_common::Error::Validation("defects[0].severity".to_string()).into();
    assert!(matches!(err, InspectError::Common(_)));
    assert!(format!("{}", err).contains("defects[0].severity"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: InspectError = io_err.into();
    assert!(matches!(err, InspectError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}
