use crate::data::model::DataValue;

/// `$` followed by the integer part of `value`, grouped in thousands (`$1,234,567`).
pub fn format_currency(value: Option<&DataValue>) -> String {
    let raw = value.map(DataValue::raw).unwrap_or_default();
    format!("${}", group_thousands(&raw))
}

/// Integer prefix of `raw` with `,` between groups of three digits, or `NaN` when `raw` does not
/// start with an integer.
///
/// Leading whitespace and a sign are accepted, as is a `0x` prefix for hexadecimal. Parsing stops
/// at the first character that is not a digit, so `"12.9"` gives `12` and `"3e5"` gives `3`.
pub fn group_thousands(raw: &str) -> String {
    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = match s.get(..2) {
        Some("0x") | Some("0X") => {
            let hex: String = s[2..].chars().take_while(char::is_ascii_hexdigit).collect();
            if hex.is_empty() {
                return "NaN".to_owned();
            }
            hex_to_decimal(&hex)
        }
        _ => {
            let dec: String = s.chars().take_while(char::is_ascii_digit).collect();
            if dec.is_empty() {
                return "NaN".to_owned();
            }
            dec
        }
    };

    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return "0".to_owned();
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Base conversion on decimal digit strings so long inputs do not overflow.
fn hex_to_decimal(hex: &str) -> String {
    let mut dec: Vec<u8> = vec![0];
    for h in hex.chars() {
        let mut carry = h.to_digit(16).unwrap_or(0);
        for d in dec.iter_mut() {
            let v = u32::from(*d) * 16 + carry;
            *d = (v % 10) as u8;
            carry = v / 10;
        }
        while carry > 0 {
            dec.push((carry % 10) as u8);
            carry /= 10;
        }
    }
    dec.iter().rev().map(|d| char::from(b'0' + d)).collect()
}
