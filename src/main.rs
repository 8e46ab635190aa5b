mod cli;
mod workflow;

use clap::Parser;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    // コマンドライン引数を解析します
    let args = cli::Args::parse();
    init_tracing(args.verbose);

    match workflow::run(args) {
        Ok(zip_path) => {
            println!("ZIPファイルを作成しました: {}", zip_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("エラー: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// ログ出力を初期化します。`RUST_LOG` が指定されていればそちらを優先します。
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(verbose).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
