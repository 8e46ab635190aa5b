use image::Rgba;
use std::fmt;
use thiserror::Error;

/// 16進カラーコードの解析エラー。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("カラーコードが空です")]
    Empty,
    #[error("カラーコード '{0}' は3桁または6桁の16進数ではありません")]
    Malformed(String),
}

/// 検証済みの16進カラーコード（`#` なし、小文字、3桁または6桁）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor(String);

impl HexColor {
    /// 文字列を解析して `HexColor` を生成します。
    ///
    /// 前後の空白と先頭の `#` を取り除き、3桁または6桁の16進数であることを検証します。
    pub fn parse(raw: &str) -> Result<Self, ColorError> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(ColorError::Empty);
        }
        let valid_len = digits.len() == 3 || digits.len() == 6;
        if !valid_len || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::Malformed(raw.to_string()));
        }
        Ok(Self(digits.to_ascii_lowercase()))
    }

    /// デフォルトの背景色（白）。
    pub fn white() -> Self {
        Self("fff".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 不透明な RGBA ピクセル値に変換します。3桁表記は各桁を2桁に展開します。
    pub fn to_rgba(&self) -> Rgba<u8> {
        let nibble = |b: u8| -> u8 {
            // parse で16進数字であることは検証済み
            (b as char).to_digit(16).unwrap_or(0) as u8
        };
        let bytes = self.0.as_bytes();
        let channels: [u8; 3] = if bytes.len() == 3 {
            [
                nibble(bytes[0]) * 0x11,
                nibble(bytes[1]) * 0x11,
                nibble(bytes[2]) * 0x11,
            ]
        } else {
            [
                nibble(bytes[0]) << 4 | nibble(bytes[1]),
                nibble(bytes[2]) << 4 | nibble(bytes[3]),
                nibble(bytes[4]) << 4 | nibble(bytes[5]),
            ]
        };
        Rgba([channels[0], channels[1], channels[2], 0xff])
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::white()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
