//! アプリケーションのメインワークフローを定義するモジュール。
//!
//! UI層（`cli`）とドメイン層（`domain`）を仲介し、
//! アイコン生成からZIP出力までの処理フローを実装します。

use crate::cli::Args;
use favicon_collection::domain::builder::{BuildOptions, Builder};
use favicon_collection::domain::ico::ico_encoder::{IcoConverter, IcoEncoder};
use favicon_collection::domain::source_file::source_file_path::SourceFilePath;
use favicon_collection::error::AppError;
use std::fs;
use std::path::PathBuf;

/// アプリケーションのメインロジックを実行します。
///
/// # 戻り値
/// * `Ok(PathBuf)`: 作成したZIPファイルのパス。
/// * `Err(AppError)`: ソース画像が無効、アイコンが1つも生成できなかった、
///   またはZIPの作成に失敗した場合。
pub fn run(args: Args) -> Result<PathBuf, AppError> {
    // 1. ソース画像の検証
    let source = SourceFilePath::new(&args.source)?;

    // 2. 出力先ディレクトリの準備
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    // 3. アイコン一式の生成
    let ico_encoder: Option<Box<dyn IcoEncoder>> = if args.no_ico {
        None
    } else {
        Some(Box::new(IcoConverter::new()))
    };
    let mut builder = match args.work_dir {
        Some(dir) => {
            fs::create_dir_all(&dir)?;
            Builder::with_tmp_path(ico_encoder, dir)
        }
        None => Builder::new(ico_encoder),
    };
    let options = BuildOptions {
        background_color_hex: args.background_color,
        gutter: args.gutter,
        sizes: args.sizes,
    };
    println!(
        "[生成開始] {} (作業ディレクトリ: {})",
        source,
        builder.tmp_path().display()
    );
    builder.build(source.as_path(), &options);

    if !builder.has_output_files() {
        return Err(AppError::NoOutputFiles(source.to_string()));
    }
    for path in builder.output_files() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("  -> {}", name);
    }

    // 4. ZIPにまとめて出力先へコピー
    builder.zip_output_files(Some(&args.output))?;

    // builder のスコープ終了時に残った一時ファイルも削除される
    Ok(args.output)
}
