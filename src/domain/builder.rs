//! ソース画像1枚からアイコン一式を生成し、ZIPにまとめるビルダー。
//!
//! 生成したファイルのパスはすべて `Builder` が追跡し、ZIP化やセッション終了（`Drop` / `close`）の
//! タイミングで削除します。個々のバリアントやICOの生成失敗はエラーとして返さず、
//! 出力一覧に含まれないことで表現されます。

use super::archive::zip_archive::{create_flat_archive, ArchiveError};
use super::catalog::{resolve_sizes, IMAGE_DEFINITIONS};
use super::ico::ico_encoder::{IcoEncoder, IcoError};
use super::image_definition::ImageDefinition;
use super::render::hex_color::HexColor;
use super::render::resize::{resize, save_image, OutputFormat, RenderError, ResizeOptions};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// `favicon.ico` に含めるフレームのサイズ。
pub const ICO_FRAME_SIZES: [(u32, u32); 5] = [(16, 16), (32, 32), (48, 48), (64, 64), (128, 128)];

const TEMPORARY_PNG_NAME: &str = "temp.png";
const ICO_FILE_NAME: &str = "favicon.ico";
const ZIP_FILE_NAME: &str = "faviconCollection.zip";

/// `zip_output_files` で発生するエラー。
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("ZIPファイルの作成に失敗しました: {0}")]
    Archive(#[from] ArchiveError),
    #[error("ZIPファイルを '{}' にコピーできません: {source}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// ICO生成の内部エラー。ログに残すだけで呼び出し元には返さない。
#[derive(Debug, Error)]
enum IcoBuildError {
    #[error("ソース画像の寸法を取得できません: {0}")]
    Dimensions(#[from] image::ImageError),
    #[error("中間PNGの生成に失敗しました: {0}")]
    Render(#[from] RenderError),
    #[error("ICOのエンコードに失敗しました: {0}")]
    Encode(#[from] IcoError),
}

/// `build` のパラメータ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// 背景色。無効な値は白 (`fff`) に置き換えられます。
    pub background_color_hex: String,
    /// キャンバスの内側に確保する余白（ピクセル）。
    pub gutter: u32,
    /// 生成するサイズ。空、またはカタログと一致しない場合は全サイズを生成します。
    pub sizes: Vec<i64>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            background_color_hex: HexColor::white().to_string(),
            gutter: 0,
            sizes: Vec::new(),
        }
    }
}

/// 1回のビルドセッションを表すビルダー。
///
/// セッションが終了すると（`Drop` または `close`）、追跡中のファイルはディスクから削除されます。
pub struct Builder {
    ico_encoder: Option<Box<dyn IcoEncoder>>,
    image_definitions: &'static [ImageDefinition],
    tmp_path: PathBuf,
    output_files: Vec<PathBuf>,
}

impl Builder {
    /// システムの一時ディレクトリを作業場所とするビルダーを作成します。
    ///
    /// `ico_encoder` が `None` の場合、`favicon.ico` は生成されません。
    pub fn new(ico_encoder: Option<Box<dyn IcoEncoder>>) -> Self {
        Self::with_tmp_path(ico_encoder, std::env::temp_dir())
    }

    /// 指定したディレクトリを作業場所とするビルダーを作成します。
    ///
    /// 一時ファイル名は固定なので、同時に動く複数のセッションはそれぞれ別のディレクトリを使うこと。
    pub fn with_tmp_path(
        ico_encoder: Option<Box<dyn IcoEncoder>>,
        tmp_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            ico_encoder,
            image_definitions: &IMAGE_DEFINITIONS,
            tmp_path: tmp_path.into(),
            output_files: Vec::new(),
        }
    }

    /// ソース画像からアイコン一式を生成します。
    ///
    /// 失敗したバリアントは出力一覧に含まれないだけで、エラーにはなりません。
    /// 何が生成されたかは `has_output_files` / `output_files` で確認してください。
    pub fn build(
        &mut self,
        source_file_path: impl AsRef<Path>,
        options: &BuildOptions,
    ) -> &mut Self {
        let source = source_file_path.as_ref();
        let sizes = resolve_sizes(&options.sizes);
        let background = sanitize_background_color(&options.background_color_hex);
        info!(
            source = %source.display(),
            sizes = ?sizes,
            background = %background,
            gutter = options.gutter,
            "アイコンの生成を開始します"
        );

        let definitions = self.image_definitions;
        for definition in definitions.iter().filter(|d| sizes.contains(&d.size())) {
            match self.render_variant(source, definition, &background, options.gutter) {
                Ok(output_path) => {
                    debug!(path = %output_path.display(), "バリアントを生成しました");
                    self.output_files.push(output_path);
                }
                Err(e) => {
                    warn!(
                        size = definition.size(),
                        prefix = definition.output_filename_prefix(),
                        error = %e,
                        "バリアントの生成に失敗したためスキップします"
                    );
                }
            }
        }

        if let Some(encoder) = self.ico_encoder.as_deref_mut() {
            match build_ico_file(encoder, &self.tmp_path, source) {
                Ok(ico_path) => {
                    debug!(path = %ico_path.display(), "ICOを生成しました");
                    self.output_files.push(ico_path);
                }
                Err(e) => warn!(error = %e, "ICOの生成に失敗したためスキップします"),
            }
        }

        self
    }

    /// 追跡中のファイルを一時ディレクトリ内のZIPファイルにまとめます。
    ///
    /// ZIP作成後、まとめたファイルはディスクと出力一覧から削除されます。
    /// `output_path` を指定した場合はZIPをそこへコピーし、一時ディレクトリ内のZIPは追跡しません。
    /// 指定しない場合は一時ディレクトリ内のZIPが唯一の出力として追跡されます。
    ///
    /// # 戻り値
    /// * `Err(BuilderError)`: ZIPの作成、またはコピーに失敗した場合。
    pub fn zip_output_files(
        &mut self,
        output_path: Option<&Path>,
    ) -> Result<&mut Self, BuilderError> {
        let zip_file_path = self.tmp_path.join(ZIP_FILE_NAME);

        // 以前の呼び出しで追跡したZIP自身は中身に含めない
        let files: Vec<PathBuf> = self
            .output_files
            .iter()
            .filter(|p| **p != zip_file_path)
            .cloned()
            .collect();
        let entry_count = create_flat_archive(&zip_file_path, &files)?;
        info!(
            path = %zip_file_path.display(),
            entries = entry_count,
            "ZIPファイルを作成しました"
        );

        self.output_files.retain(|p| p != &zip_file_path);
        self.remove_output_files();

        match output_path {
            // 出力先が一時ZIPそのものなら、コピーすると中身が切り詰められるのでそのまま渡す
            Some(path) if is_same_file(&zip_file_path, path) => {
                info!(path = %path.display(), "ZIPファイルは出力先に作成済みです");
            }
            Some(path) => {
                if let Err(e) = fs::copy(&zip_file_path, path) {
                    // コピーに失敗した一時ZIPは追跡を続け、セッション終了時に削除する
                    self.output_files.push(zip_file_path);
                    return Err(BuilderError::Copy {
                        path: path.to_path_buf(),
                        source: e,
                    });
                }
                info!(path = %path.display(), "ZIPファイルをコピーしました");
            }
            None => self.output_files.push(zip_file_path),
        }

        Ok(self)
    }

    /// 追跡中の出力ファイルがあるかどうか。
    pub fn has_output_files(&self) -> bool {
        !self.output_files.is_empty()
    }

    /// 追跡中の出力ファイルのパス一覧。
    pub fn output_files(&self) -> &[PathBuf] {
        &self.output_files
    }

    pub fn tmp_path(&self) -> &Path {
        &self.tmp_path
    }

    /// セッションを終了し、追跡中のファイルを削除します。
    ///
    /// 削除できなかったファイルのパスを返します。これらは以降追跡されません。
    pub fn close(mut self) -> Vec<PathBuf> {
        self.remove_output_files();
        std::mem::take(&mut self.output_files)
    }

    // --- private なヘルパー関数 ---

    /// 1つのバリアントをレンダリングしてPNGとして保存します。
    fn render_variant(
        &self,
        source: &Path,
        definition: &ImageDefinition,
        background: &HexColor,
        gutter: u32,
    ) -> Result<PathBuf, RenderError> {
        let output_path = self.tmp_path.join(definition.output_file_name());
        let options = ResizeOptions {
            width: definition.size(),
            height: definition.size(),
            format: OutputFormat::Png,
            background: if definition.has_transparent_background() {
                None
            } else {
                Some(background.clone())
            },
            round_edges: definition.has_round_edges(),
            gutter,
        };

        // 画像はこのスコープを抜けると成功・失敗に関わらず解放される
        let image = resize(source, &options)?;
        save_image(&image, &output_path, options.format)?;
        Ok(output_path)
    }

    /// 追跡中のファイルを削除します。削除に失敗したパスだけが一覧に残ります。
    fn remove_output_files(&mut self) {
        self.output_files.retain(|path| {
            if !path.exists() {
                return false;
            }
            match fs::remove_file(path) {
                Ok(()) => false,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "出力ファイルを削除できません");
                    true
                }
            }
        });
    }
}

impl Drop for Builder {
    fn drop(&mut self) {
        self.remove_output_files();
    }
}

/// 背景色を検証し、無効な場合は白に置き換えます。
fn sanitize_background_color(raw: &str) -> HexColor {
    HexColor::parse(raw).unwrap_or_else(|e| {
        debug!(error = %e, "背景色が無効なため白を使用します");
        HexColor::white()
    })
}

/// 2つのパスがディスク上の同じファイルを指すかどうか。どちらかが存在しない場合は `false`。
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// ソース画像から `favicon.ico` を生成し、そのパスを返します。
fn build_ico_file(
    encoder: &mut dyn IcoEncoder,
    tmp_path: &Path,
    source: &Path,
) -> Result<PathBuf, IcoBuildError> {
    let (width, height) = image::image_dimensions(source)?;
    let size = width.max(height);

    let temporary_path = tmp_path.join(TEMPORARY_PNG_NAME);
    {
        let options = ResizeOptions::square(size);
        let image = resize(source, &options)?;
        save_image(&image, &temporary_path, options.format)?;
    }

    let output_path = tmp_path.join(ICO_FILE_NAME);
    let result = encoder
        .add_image(&temporary_path, &ICO_FRAME_SIZES)
        .and_then(|()| encoder.save_ico(&output_path));

    if let Err(e) = fs::remove_file(&temporary_path) {
        warn!(path = %temporary_path.display(), error = %e, "中間PNGを削除できません");
    }

    result?;
    Ok(output_path)
}
