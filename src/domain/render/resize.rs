//! ソース画像を正方形などの指定サイズのキャンバスへ合成するリサイズ処理。
//!
//! 背景色の塗りつぶし、余白（ガター）、角丸のクリッピングをここでまとめて扱います。

use super::hex_color::HexColor;
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 角丸の半径を、キャンバスの短辺に対する比率で表したもの。
const ROUND_EDGE_RATIO: f32 = 0.2;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("画像 '{}' を読み込めません: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("出力サイズ {width}x{height} は無効です")]
    InvalidSize { width: u32, height: u32 },
    #[error("画像 '{}' を保存できません: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// 出力フォーマット。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
}

impl OutputFormat {
    pub fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
        }
    }
}

/// `resize` に渡すレンダリング条件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeOptions {
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
    /// `None` の場合、背景は透過のままになります。
    pub background: Option<HexColor>,
    pub round_edges: bool,
    /// キャンバスの四辺に均等に確保する余白（ピクセル）。
    pub gutter: u32,
}

impl ResizeOptions {
    /// 不透明な白背景・角丸なし・余白なしの正方形。
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
            format: OutputFormat::Png,
            background: Some(HexColor::white()),
            round_edges: false,
            gutter: 0,
        }
    }
}

/// ソース画像を読み込み、指定サイズのキャンバスへ合成した画像を返します。
///
/// ソース画像は縦横比を保ったまま余白の内側に収まるよう縮小（拡大）され、中央に配置されます。
pub fn resize(source: &Path, options: &ResizeOptions) -> Result<RgbaImage, RenderError> {
    if options.width == 0 || options.height == 0 {
        return Err(RenderError::InvalidSize {
            width: options.width,
            height: options.height,
        });
    }

    let source_image = image::open(source).map_err(|e| RenderError::Decode {
        path: source.to_path_buf(),
        source: e,
    })?;

    let fill = options
        .background
        .as_ref()
        .map(HexColor::to_rgba)
        .unwrap_or(Rgba([0, 0, 0, 0]));
    let mut canvas = RgbaImage::from_pixel(options.width, options.height, fill);

    // 余白を差し引いた内側の領域。最低でも 1x1 は確保する
    let inner_width = options
        .width
        .saturating_sub(options.gutter.saturating_mul(2))
        .max(1);
    let inner_height = options
        .height
        .saturating_sub(options.gutter.saturating_mul(2))
        .max(1);

    let fitted = source_image
        .resize(inner_width, inner_height, FilterType::Lanczos3)
        .to_rgba8();
    let x = (i64::from(options.width) - i64::from(fitted.width())) / 2;
    let y = (i64::from(options.height) - i64::from(fitted.height())) / 2;
    imageops::overlay(&mut canvas, &fitted, x, y);

    if options.round_edges {
        round_corners(&mut canvas);
    }

    Ok(canvas)
}

/// 画像を指定フォーマットで保存します。
pub fn save_image(image: &RgbaImage, path: &Path, format: OutputFormat) -> Result<(), RenderError> {
    image
        .save_with_format(path, format.image_format())
        .map_err(|e| RenderError::Write {
            path: path.to_path_buf(),
            source: e,
        })
}

/// 四隅を角丸で切り抜きます。境界の1ピクセルはアンチエイリアスされます。
fn round_corners(image: &mut RgbaImage) {
    let (width, height) = image.dimensions();
    let radius = width.min(height) as f32 * ROUND_EDGE_RATIO;
    if radius <= 0.0 {
        return;
    }

    let (w, h) = (width as f32, height as f32);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;
        // 最寄りの角の円の中心。辺の内側では自分自身になり距離は0
        let cx = px.clamp(radius, w - radius);
        let cy = py.clamp(radius, h - radius);
        let distance = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
        let coverage = (radius - distance + 0.5).clamp(0.0, 1.0);
        if coverage < 1.0 {
            pixel.0[3] = (f32::from(pixel.0[3]) * coverage).round() as u8;
        }
    }
}
