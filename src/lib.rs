//! 1枚のソース画像から favicon / タッチアイコン一式と `favicon.ico` を生成し、
//! ZIPファイルにまとめるライブラリ。

pub mod domain;
pub mod error;
