use thiserror::Error;

// パス検証のエラー型
#[derive(Debug, Error)]
pub enum PathError {
    #[error("無効なパスです: {0}")]
    InvalidPath(String),
}
