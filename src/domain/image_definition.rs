/// 出力する1種類のアイコン画像（バリアント）を表す不変の定義。
///
/// 正方形の一辺のサイズ、背景を透過のままにするか、角を丸めるか、
/// ファイル名のプレフィックス（"apple-touch-icon" など）を保持します。
/// カタログの定数テーブルとして `const` で構築されるため、生成後に変更されることはありません。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDefinition {
    size: u32,
    transparent_background: bool,
    round_edges: bool,
    output_filename_prefix: &'static str,
}

impl ImageDefinition {
    pub const fn new(
        size: u32,
        transparent_background: bool,
        round_edges: bool,
        output_filename_prefix: &'static str,
    ) -> Self {
        Self {
            size,
            transparent_background,
            round_edges,
            output_filename_prefix,
        }
    }

    // --- ゲッターメソッド ---

    pub fn size(&self) -> u32 {
        self.size
    }
    /// `true` の場合、レンダリング時に背景色の指定は無視されます。
    pub fn has_transparent_background(&self) -> bool {
        self.transparent_background
    }
    pub fn has_round_edges(&self) -> bool {
        self.round_edges
    }
    pub fn output_filename_prefix(&self) -> &'static str {
        self.output_filename_prefix
    }

    /// 出力ファイル名を返します（例: `apple-touch-icon-057.png`）。
    ///
    /// サイズは3桁にゼロ埋めされます。この命名規則は互換性のため変更しないこと。
    pub fn output_file_name(&self) -> String {
        format!("{}-{:03}.png", self.output_filename_prefix, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_constructor_values() {
        let def = ImageDefinition::new(128, false, true, "favicon");
        assert_eq!(def.size(), 128);
        assert!(!def.has_transparent_background());
        assert!(def.has_round_edges());
        assert_eq!(def.output_filename_prefix(), "favicon");
    }

    /// 2桁のサイズは3桁にゼロ埋めされることをテストします。
    #[test]
    fn output_file_name_pads_size_to_three_digits() {
        let def = ImageDefinition::new(57, false, false, "apple-touch-icon");
        assert_eq!(def.output_file_name(), "apple-touch-icon-057.png");

        let def = ImageDefinition::new(310, false, false, "favicon");
        assert_eq!(def.output_file_name(), "favicon-310.png");
    }
}
