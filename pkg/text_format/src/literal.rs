/// Parses the full signed magnitude of an integer token (decimal, `0x`/`0X`
/// hex, or C-style leading-zero octal) into an `i128`, wide enough to hold
/// every value a 64-bit field (signed or unsigned) can take before the
/// caller narrows and range-checks it.
fn parse_integer_wide(token: &str) -> Option<i128> {
    let (negative, rest) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };

    if rest.is_empty() {
        return None;
    }

    let magnitude = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X"))
    {
        i128::from_str_radix(hex, 16).ok()?
    } else if rest.len() > 1 && rest.starts_with('0') && rest[1..].bytes().all(|b| (b'0'..=b'7').contains(&b))
    {
        i128::from_str_radix(&rest[1..], 8).ok()?
    } else {
        rest.parse::<i128>().ok()?
    };

    Some(if negative { -magnitude } else { magnitude })
}

pub fn parse_int32(token: &str) -> Option<i32> {
    let v = parse_integer_wide(token)?;
    i32::try_from(v).ok()
}

pub fn parse_uint32(token: &str) -> Option<u32> {
    let v = parse_integer_wide(token)?;
    u32::try_from(v).ok()
}

pub fn parse_int64(token: &str) -> Option<i64> {
    let v = parse_integer_wide(token)?;
    i64::try_from(v).ok()
}

pub fn parse_uint64(token: &str) -> Option<u64> {
    let v = parse_integer_wide(token)?;
    u64::try_from(v).ok()
}

/// Parses a float literal: decimal/exponent forms, an optional trailing
/// `f`/`F` suffix, and the case-insensitive special identifiers
/// `inf`/`infinity`/`-inf`/`-infinity`/`nan`.
pub fn parse_float(token: &str) -> Option<f64> {
    match token.to_ascii_lowercase().as_str() {
        "inf" | "infinity" => return Some(f64::INFINITY),
        "-inf" | "-infinity" => return Some(f64::NEG_INFINITY),
        "nan" => return Some(f64::NAN),
        _ => {}
    }

    let trimmed = match token.strip_suffix('f').or_else(|| token.strip_suffix('F')) {
        Some(rest) => rest,
        None => token,
    };

    trimmed.parse::<f64>().ok()
}

pub fn parse_bool(token: &str) -> Option<bool> {
    match token {
        "true" | "True" | "t" | "1" => Some(true),
        "false" | "False" | "f" | "0" => Some(false),
        _ => None,
    }
}

/// Decodes the escape sequences inside a single quoted literal's payload
/// (the characters strictly between the opening and closing quote) into a
/// sequence of raw Unicode code points. Returns code points rather than
/// `char`s since a `bytes` field reinterprets each one modulo 256.
pub fn decode_escaped_payload(payload: &[char]) -> Vec<u32> {
    let mut out = Vec::with_capacity(payload.len());
    let mut i = 0;

    while i < payload.len() {
        let c = payload[i];
        if c != '\\' {
            out.push(c as u32);
            i += 1;
            continue;
        }

        i += 1;
        if i >= payload.len() {
            out.push('\\' as u32);
            break;
        }

        let e = payload[i];
        match e {
            'a' => {
                out.push(0x07);
                i += 1;
            }
            'b' => {
                out.push(0x08);
                i += 1;
            }
            'f' => {
                out.push(0x0C);
                i += 1;
            }
            'n' => {
                out.push(0x0A);
                i += 1;
            }
            'r' => {
                out.push(0x0D);
                i += 1;
            }
            't' => {
                out.push(0x09);
                i += 1;
            }
            'v' => {
                out.push(0x0B);
                i += 1;
            }
            '\\' | '\'' | '"' | '?' => {
                out.push(e as u32);
                i += 1;
            }
            '0'..='7' => {
                let mut n = 0u32;
                let mut count = 0;
                while count < 3 && i < payload.len() && ('0'..='7').contains(&payload[i]) {
                    n = n * 8 + payload[i].to_digit(8).unwrap();
                    i += 1;
                    count += 1;
                }
                out.push(n);
            }
            'x' => {
                i += 1;
                out.push(read_hex_digits(payload, &mut i, 2));
            }
            'u' => {
                i += 1;
                out.push(read_hex_digits(payload, &mut i, 4));
            }
            'U' => {
                i += 1;
                out.push(read_hex_digits(payload, &mut i, 8));
            }
            other => {
                out.push(other as u32);
                i += 1;
            }
        }
    }

    out
}

fn read_hex_digits(payload: &[char], i: &mut usize, max: usize) -> u32 {
    let mut n = 0u32;
    let mut count = 0;
    while count < max && *i < payload.len() && payload[*i].is_ascii_hexdigit() {
        n = n * 16 + payload[*i].to_digit(16).unwrap();
        *i += 1;
        count += 1;
    }
    n
}
