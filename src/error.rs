use crate::domain::builder::BuilderError;
use crate::domain::source_file::path_error::PathError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/Oエラーが発生しました: {0}")]
    Io(#[from] std::io::Error),

    #[error("パス関連のエラー: {0}")]
    Path(#[from] PathError),

    #[error("アイコン生成エラー: {0}")]
    Builder(#[from] BuilderError),

    #[error("アイコンを1つも生成できませんでした: {0}")]
    NoOutputFiles(String),
}
