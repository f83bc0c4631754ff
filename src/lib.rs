//! blade-inspect
//!
//! 風車ブレード画像をAI解析し、欠陥をオーバーレイ表示するCLI

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod encoding;
pub mod error;
pub mod inspect;
pub mod interactive;
pub mod report;
pub mod scanner;
