//! Blade Inspect Common Library
//!
//! CLIとレポート描画で共有される型・検証・表示ルール

pub mod encoding;
pub mod error;
pub mod overlay;
pub mod parser;
pub mod presentation;
pub mod prompts;
pub mod schema;
pub mod session;
pub mod types;

pub use encoding::EncodedImage;
pub use error::{AnalysisError, Error, Result, ANALYSIS_FAILED_MESSAGE};
pub use overlay::{layout_overlays, ImageLoadState, LabelAnchor, Overlay, ScreenRect};
pub use parser::{extract_json, parse_inspection_response, parse_saved_result};
pub use presentation::{FindingsView, ResultView, ScoreBand, SeverityStyle};
pub use prompts::build_inspection_prompt;
pub use schema::inspection_response_schema;
pub use session::{
    AnalysisStatus, AnalysisTicket, Completion, ImageId, InspectionSession, SessionError,
};
pub use types::{BoundingBox, Defect, DefectKind, InspectionResult, Severity};
