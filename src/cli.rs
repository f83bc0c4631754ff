use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blade-inspect")]
#[command(about = "風車ブレード外観点検AIアシスタント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ブレード画像を1枚解析
    Analyze {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// HTMLレポートの出力先（ファイルまたはフォルダ）
        #[arg(long)]
        html: Option<PathBuf>,

        /// 解析結果JSONを標準出力に出す
        #[arg(long)]
        json: bool,
    },

    /// フォルダ内の画像を順に解析
    Batch {
        /// 画像フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// HTMLレポートの出力フォルダ
        #[arg(long)]
        report_dir: Option<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// 保存済みの解析結果JSONを画像に重ねてHTML化
    Render {
        /// 解析結果JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 元画像
        #[arg(required = true)]
        image: PathBuf,

        /// 出力HTML
        #[arg(short, long)]
        output: PathBuf,
    },

    /// 対話モード（画像選択・解析・クリア）
    Interactive,

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// モデルを設定
        #[arg(long)]
        set_model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
