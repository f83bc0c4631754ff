//! 点検セッション
//!
//! 現在の画像と解析状態を1つにまとめた状態機械:
//!
//! ```text
//! Idle -> Analyzing -> Done | Failed
//! ```
//!
//! 解析の完了はチケットで照合し、画像が差し替え・クリアされた後に
//! 届いた結果は破棄する。

use crate::error::AnalysisError;
use crate::types::InspectionResult;
use thiserror::Error;

/// 選択された画像の識別子（選択ごとに増える）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(u64);

/// 解析1回分の引換券
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket {
    image: ImageId,
    attempt: u64,
}

impl AnalysisTicket {
    pub fn image_id(&self) -> ImageId {
        self.image
    }
}

/// 解析状態
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisStatus {
    Idle,
    Analyzing(AnalysisTicket),
    Done(InspectionResult),
    Failed(String),
}

/// 完了の反映結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// 画像が変わった等で破棄した
    Stale,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("画像が選択されていません")]
    NoImage,

    #[error("解析中です")]
    Busy,
}

struct Selected<I> {
    id: ImageId,
    image: I,
}

/// 点検セッション
pub struct InspectionSession<I> {
    current: Option<Selected<I>>,
    status: AnalysisStatus,
    next_image: u64,
    next_attempt: u64,
}

impl<I> Default for InspectionSession<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> InspectionSession<I> {
    pub fn new() -> Self {
        Self {
            current: None,
            status: AnalysisStatus::Idle,
            next_image: 1,
            next_attempt: 1,
        }
    }

    /// 画像を選択（前の画像・結果・エラーは丸ごと置き換え）
    pub fn select_image(&mut self, image: I) -> ImageId {
        let id = ImageId(self.next_image);
        self.next_image += 1;
        self.current = Some(Selected { id, image });
        self.status = AnalysisStatus::Idle;
        id
    }

    /// 画像・結果・エラーを破棄
    pub fn clear(&mut self) {
        self.current = None;
        self.status = AnalysisStatus::Idle;
    }

    /// 解析を開始
    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, SessionError> {
        let image = self.current.as_ref().ok_or(SessionError::NoImage)?.id;
        if self.is_busy() {
            return Err(SessionError::Busy);
        }

        let ticket = AnalysisTicket {
            image,
            attempt: self.next_attempt,
        };
        self.next_attempt += 1;
        self.status = AnalysisStatus::Analyzing(ticket);
        Ok(ticket)
    }

    /// 解析結果を反映
    ///
    /// チケットが現在の画像・実行中の解析と一致しない場合は何もしない。
    pub fn complete(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<InspectionResult, AnalysisError>,
    ) -> Completion {
        let current_image = self.current.as_ref().map(|s| s.id);
        let in_flight = matches!(self.status, AnalysisStatus::Analyzing(t) if t == ticket);

        if current_image != Some(ticket.image) || !in_flight {
            return Completion::Stale;
        }

        self.status = match outcome {
            Ok(result) => AnalysisStatus::Done(result),
            Err(e) => AnalysisStatus::Failed(e.message().to_string()),
        };
        Completion::Applied
    }

    pub fn image(&self) -> Option<&I> {
        self.current.as_ref().map(|s| &s.image)
    }

    pub fn image_id(&self) -> Option<ImageId> {
        self.current.as_ref().map(|s| s.id)
    }

    pub fn status(&self) -> &AnalysisStatus {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.status, AnalysisStatus::Analyzing(_))
    }

    pub fn result(&self) -> Option<&InspectionResult> {
        match &self.status {
            AnalysisStatus::Done(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            AnalysisStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}
