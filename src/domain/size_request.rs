/// 文字列で渡されたサイズ指定を整数へ強制変換します。
///
/// 先頭の空白を読み飛ばし、符号と先頭の数字列だけを解釈して残りは無視します。
/// 数字で始まらない場合は `0` になり、桁あふれは飽和させます。
/// `"192px"` は `192`、`"abc"` は `0` です。
pub fn coerce_size(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }

    if negative {
        -value
    } else {
        value
    }
}
