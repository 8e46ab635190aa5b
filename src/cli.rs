use clap::Parser;
use favicon_collection::domain::size_request::coerce_size;
use std::path::PathBuf;

/// 1枚の画像から favicon / タッチアイコン一式を生成し、ZIPにまとめるツール
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 元になる画像ファイルのパス
    #[arg(required = true)]
    pub source: PathBuf,

    /// 背景色 (3桁または6桁の16進数。無効な値は白になる)
    #[arg(short, long, default_value = "fff")]
    pub background_color: String,

    /// キャンバスの内側に確保する余白 (ピクセル)
    #[arg(short, long, default_value_t = 0)]
    pub gutter: u32,

    /// 生成するサイズをカンマ区切りで指定 (例: 76,192。省略時はすべて)
    #[arg(short, long, value_delimiter = ',', value_parser = parse_size)]
    pub sizes: Vec<i64>,

    /// ZIPファイルの出力先
    #[arg(short, long, default_value = "faviconCollection.zip")]
    pub output: PathBuf,

    /// 一時ファイルを置く作業ディレクトリ (省略時はシステムの一時ディレクトリ)
    #[arg(short, long)]
    pub work_dir: Option<PathBuf>,

    /// favicon.ico を生成しない
    #[arg(long)]
    pub no_ico: bool,

    /// デバッグログを出力する
    #[arg(short, long)]
    pub verbose: bool,
}

// サイズ指定は数値として解釈できない値も受け付け、整数に強制変換する
fn parse_size(raw: &str) -> Result<i64, std::convert::Infallible> {
    Ok(coerce_size(raw))
}
