use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::imageops::FilterType;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// ICOフォーマットで表現できるフレームの最大辺長。
pub const MAX_FRAME_SIZE: u32 = 256;

#[derive(Debug, Error)]
pub enum IcoError {
    #[error("画像 '{}' を読み込めません: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("フレームサイズ {0}x{1} はICOでは扱えません (1〜256)")]
    UnsupportedSize(u32, u32),
    #[error("ICOに含めるフレームがありません")]
    NoFrames,
    #[error("ICOの書き込みに失敗しました")]
    Io(#[from] std::io::Error),
}

/// 複数フレームのICOファイルを生成するエンコーダ。
///
/// `add_image` で追加したフレームを `save_ico` でひとつのICOファイルにまとめます。
pub trait IcoEncoder {
    /// `source` の画像から、`sizes` の各サイズのフレームを追加します。
    fn add_image(&mut self, source: &Path, sizes: &[(u32, u32)]) -> Result<(), IcoError>;

    /// 追加済みのすべてのフレームを `output` に書き出します。
    ///
    /// 書き出し後、追加済みのフレームはクリアされます。
    fn save_ico(&mut self, output: &Path) -> Result<(), IcoError>;
}

/// `ico` クレートを使った `IcoEncoder` の標準実装。
#[derive(Default)]
pub struct IcoConverter {
    frames: Vec<IconImage>,
}

impl IcoConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加済みのフレーム数。
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl IcoEncoder for IcoConverter {
    fn add_image(&mut self, source: &Path, sizes: &[(u32, u32)]) -> Result<(), IcoError> {
        // サイズを先に検証し、途中まで追加された状態を残さない
        if let Some(&(w, h)) = sizes
            .iter()
            .find(|(w, h)| !(1..=MAX_FRAME_SIZE).contains(w) || !(1..=MAX_FRAME_SIZE).contains(h))
        {
            return Err(IcoError::UnsupportedSize(w, h));
        }

        let image = image::open(source).map_err(|e| IcoError::Decode {
            path: source.to_path_buf(),
            source: e,
        })?;

        for &(width, height) in sizes {
            let frame = image
                .resize_exact(width, height, FilterType::Lanczos3)
                .to_rgba8();
            self.frames
                .push(IconImage::from_rgba_data(width, height, frame.into_raw()));
        }
        Ok(())
    }

    fn save_ico(&mut self, output: &Path) -> Result<(), IcoError> {
        if self.frames.is_empty() {
            return Err(IcoError::NoFrames);
        }

        let mut dir = IconDir::new(ResourceType::Icon);
        for frame in self.frames.drain(..) {
            dir.add_entry(IconDirEntry::encode(&frame)?);
        }

        // メモリ上でエンコードしてから書き出し、失敗時に壊れたICOを残さない
        let mut encoded = Vec::new();
        dir.write(&mut encoded)?;
        if let Err(e) = fs::write(output, &encoded) {
            let _ = fs::remove_file(output);
            return Err(IcoError::Io(e));
        }
        Ok(())
    }
}
