use blade_inspect::{analyzer, cli, config, encoding, error, inspect, interactive, report, scanner};
use blade_inspect_common::{parse_saved_result, Completion};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use inspect::Session;

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { image, html, json } => {
            println!("🌬  blade-inspect - ブレード解析\n");

            // 1. 画像読み込み
            println!("[1/2] 画像を読み込み中...");
            let uploaded = encoding::load_image(&image)?;
            println!(
                "✔ {} ({}, {} bytes)\n",
                uploaded.file_name(),
                uploaded.mime_type(),
                uploaded.size
            );

            // 2. AI解析
            println!("[2/2] AI解析中...");
            let client = analyzer::GeminiClient::from_config(&config)?;
            let mut session = Session::new();
            session.select_image(uploaded);
            inspect::run_analysis(&mut session, &client, true).await?;

            if let Some(message) = session.error() {
                return Err(error::InspectError::Analysis(
                    blade_inspect_common::AnalysisError::new(message),
                ));
            }

            if let (Some(uploaded), Some(result)) = (session.image(), session.result()) {
                println!("{}", report::text::render_text(&uploaded.file_name(), result));

                if let Some(output) = html {
                    let path = report::write_html_report(&output, uploaded, result)?;
                    println!("✔ HTMLレポート: {}", path.display());
                }

                if json {
                    println!("{}", serde_json::to_string_pretty(result)?);
                }
            }

            println!("\n✅ 解析完了");
        }

        Commands::Batch { folder, report_dir, recursive } => {
            println!("🌬  blade-inspect - 一括解析\n");

            let images = scanner::scan_folder(&folder, recursive)?;
            println!("✔ {}枚の画像を検出\n", images.len());

            let client = analyzer::GeminiClient::from_config(&config)?;
            let mut session = Session::new();
            let mut failed = 0usize;

            for (i, path) in images.iter().enumerate() {
                println!("[{}/{}] {}", i + 1, images.len(), path.display());

                let uploaded = match encoding::load_image(path) {
                    Ok(image) => image,
                    Err(e) => {
                        println!("✖ {}\n", e);
                        failed += 1;
                        continue;
                    }
                };

                session.select_image(uploaded);
                if inspect::run_analysis(&mut session, &client, true).await? == Completion::Stale {
                    continue;
                }

                if let Some(message) = session.error() {
                    println!("✖ {}\n", message);
                    failed += 1;
                } else if let (Some(uploaded), Some(result)) = (session.image(), session.result()) {
                    println!("{}", report::text::render_text(&uploaded.file_name(), result));
                    if let Some(dir) = &report_dir {
                        std::fs::create_dir_all(dir)?;
                        let path = report::write_html_report(dir, uploaded, result)?;
                        println!("✔ HTMLレポート: {}\n", path.display());
                    }
                }
            }
            session.clear();

            println!("\n✅ 一括解析完了 ({}件中 {}件失敗)", images.len(), failed);
        }

        Commands::Render { input, image, output } => {
            let content = std::fs::read_to_string(&input)?;
            let result = parse_saved_result(&content)?;
            let uploaded = encoding::load_image(&image)?;

            let path = report::write_html_report(&output, &uploaded, &result)?;
            println!("✔ HTMLレポート: {}", path.display());
        }

        Commands::Interactive => {
            let client = analyzer::GeminiClient::from_config(&config)?;
            interactive::run_interactive(&client).await?;
        }

        Commands::Config { set_api_key, set_model, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if let Some(model) = set_model {
                config.set_model(model)?;
                println!("✔ モデルを設定しました");
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  APIエンドポイント: {}", config.api_base_url);
                println!("  temperature: {}", config.temperature);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}
