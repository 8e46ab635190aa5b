use super::path_error::PathError;
use std::fmt;
use std::path::{Path, PathBuf};

/// アイコン生成の元になるソース画像ファイルへのパス。
///
/// 存在し、かつ通常のファイルであることを生成時に検証します。
/// 画像として読めるかどうかはリサイズ時に判定されます。
#[derive(Debug, Clone)]
pub struct SourceFilePath(PathBuf);

impl SourceFilePath {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PathError::InvalidPath(format!(
                "パス '{}' は存在しません。",
                path.display()
            )));
        }
        if !path.is_file() {
            return Err(PathError::InvalidPath(format!(
                "パス '{}' はファイルではありません。",
                path.display()
            )));
        }

        Ok(Self(path.to_path_buf()))
    }

    // 内部のPathBufへの参照を返す
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

// Displayトレイトの実装（表示用）
impl fmt::Display for SourceFilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
