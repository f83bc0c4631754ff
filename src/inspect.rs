//! セッション経由の解析実行
//!
//! どのコマンドも `InspectionSession` を通して解析する。
//! 実行中は二重起動できず、画像が変わっていれば結果は反映されない。

use crate::analyzer::{analyze_image, InspectionService};
use crate::encoding::UploadedImage;
use crate::error::Result;
use blade_inspect_common::{Completion, InspectionSession};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub type Session = InspectionSession<UploadedImage>;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 現在の画像を解析し、セッションに反映する
pub async fn run_analysis<S>(
    session: &mut Session,
    service: &S,
    show_progress: bool,
) -> Result<Completion>
where
    S: InspectionService + ?Sized,
{
    let ticket = session.begin_analysis()?;
    log::debug!("解析チケット: {:?}", ticket.image_id());
    let image = match session.image() {
        Some(image) => image.clone(),
        None => return Ok(Completion::Stale),
    };

    let pb = show_progress.then(|| spinner("Analyzing Structure..."));
    let outcome = analyze_image(service, &image).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let completion = session.complete(ticket, outcome);
    if completion == Completion::Stale {
        log::warn!("画像が変更されたため解析結果を破棄: {}", image.file_name());
    }
    Ok(completion)
}
