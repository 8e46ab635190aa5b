//! 生成するアイコン画像の固定カタログと、要求サイズの解決ロジック。

use super::image_definition::ImageDefinition;

/// 生成対象となるすべてのバリアント。
///
/// 並び順がそのままファイルの生成順になります。
pub static IMAGE_DEFINITIONS: [ImageDefinition; 15] = [
    // iPhone (初代 / 3G / 3GS)
    ImageDefinition::new(57, false, false, "apple-touch-icon"),
    // Windows Phone 小タイル
    ImageDefinition::new(70, false, false, "windows"),
    // iPad / iPad mini @1x
    ImageDefinition::new(76, false, false, "apple-touch-icon"),
    // SNS
    ImageDefinition::new(100, true, false, "favicon"),
    // iPhone Retina (iOS 6)
    ImageDefinition::new(114, false, false, "apple-touch-icon"),
    // iPhone 6/7, iPhone 6s/7s, iPhone SE
    ImageDefinition::new(120, false, false, "apple-touch-icon"),
    // Android 標準
    ImageDefinition::new(128, false, true, "favicon"),
    // iPad Retina (iOS 6)
    ImageDefinition::new(144, false, false, "apple-touch-icon"),
    // Windows Phone 中タイル
    ImageDefinition::new(150, false, false, "windows"),
    // iPad / iPad mini Retina
    ImageDefinition::new(152, false, false, "apple-touch-icon"),
    // iPad Pro
    ImageDefinition::new(167, false, false, "apple-touch-icon"),
    // iPhone 6/7 Plus, iPhone 6s/7s Plus
    ImageDefinition::new(180, false, false, "apple-touch-icon"),
    // Android 高解像度
    ImageDefinition::new(192, false, true, "favicon"),
    // SNS
    ImageDefinition::new(200, true, false, "favicon"),
    // Windows Phone 大タイル
    ImageDefinition::new(310, false, false, "favicon"),
];

/// カタログに含まれるサイズをカタログ順で返します。
pub fn catalog_sizes() -> Vec<u32> {
    IMAGE_DEFINITIONS.iter().map(ImageDefinition::size).collect()
}

/// 要求されたサイズの集合を、実際に生成するサイズの集合へ解決します。
///
/// - 要求が空の場合はカタログの全サイズ
/// - それ以外はカタログとの共通部分（重複なし、カタログ順）
/// - 共通部分が空の場合もカタログの全サイズ（出力ゼロにはしない）
pub fn resolve_sizes(requested: &[i64]) -> Vec<u32> {
    let all = catalog_sizes();
    if requested.is_empty() {
        return all;
    }

    let matched: Vec<u32> = all
        .iter()
        .copied()
        .filter(|size| requested.contains(&i64::from(*size)))
        .collect();

    if matched.is_empty() {
        all
    } else {
        matched
    }
}
