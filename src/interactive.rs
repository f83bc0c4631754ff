//! 対話モード
//!
//! 画像選択 → 解析 → 結果表示 → クリア を1つのセッションで繰り返す。

use crate::analyzer::InspectionService;
use crate::encoding::load_image;
use crate::error::{InspectError, Result};
use crate::inspect::{run_analysis, Session};
use crate::report::{text::render_text, write_html_report};
use dialoguer::{Input, Select};
use std::path::PathBuf;

/// 対話アクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// 画像を選択（差し替え）
    SelectImage,
    /// 解析を実行
    Analyze,
    /// HTMLレポートを書き出す
    SaveHtml,
    /// 画像と結果をクリア
    Clear,
    Quit,
}

impl MenuAction {
    fn label(&self) -> &'static str {
        match self {
            MenuAction::SelectImage => "画像を選択",
            MenuAction::Analyze => "AI解析を実行",
            MenuAction::SaveHtml => "HTMLレポートを保存",
            MenuAction::Clear => "クリア",
            MenuAction::Quit => "終了",
        }
    }
}

/// セッション状態に応じたメニュー
pub fn available_actions(session: &Session) -> Vec<MenuAction> {
    let mut actions = vec![MenuAction::SelectImage];
    if session.image().is_some() {
        if !session.is_busy() {
            actions.push(MenuAction::Analyze);
        }
        if session.result().is_some() {
            actions.push(MenuAction::SaveHtml);
        }
        actions.push(MenuAction::Clear);
    }
    actions.push(MenuAction::Quit);
    actions
}

fn prompt_error(e: dialoguer::Error) -> InspectError {
    InspectError::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
}

/// 対話モードを実行
pub async fn run_interactive<S>(service: &S) -> Result<()>
where
    S: InspectionService + ?Sized,
{
    let mut session = Session::new();

    println!("🌬  blade-inspect - 対話モード\n");

    loop {
        match session.image() {
            Some(image) => println!("画像: {} ({})", image.file_name(), image.mime_type()),
            None => println!("画像: 未選択"),
        }

        let actions = available_actions(&session);
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let choice = Select::new()
            .with_prompt("操作を選択")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        match actions[choice] {
            MenuAction::SelectImage => {
                let path: String = Input::new()
                    .with_prompt("画像ファイルのパス")
                    .interact_text()
                    .map_err(prompt_error)?;
                match load_image(&PathBuf::from(path.trim())) {
                    Ok(image) => {
                        session.select_image(image);
                        println!("✔ 画像を読み込みました\n");
                    }
                    Err(e) => println!("✖ {}\n", e),
                }
            }
            MenuAction::Analyze => {
                run_analysis(&mut session, service, true).await?;
                if let Some(message) = session.error() {
                    println!("✖ Analysis Failed: {}\n", message);
                }
                if let (Some(image), Some(result)) = (session.image(), session.result()) {
                    println!("{}", render_text(&image.file_name(), result));
                }
            }
            MenuAction::SaveHtml => {
                let output: String = Input::new()
                    .with_prompt("出力先")
                    .default(".".to_string())
                    .interact_text()
                    .map_err(prompt_error)?;
                if let (Some(image), Some(result)) = (session.image(), session.result()) {
                    let path = write_html_report(&PathBuf::from(output.trim()), image, result)?;
                    println!("✔ HTMLレポート: {}\n", path.display());
                }
            }
            MenuAction::Clear => {
                session.clear();
                println!("✔ クリアしました\n");
            }
            MenuAction::Quit => break,
        }
    }

    Ok(())
}
