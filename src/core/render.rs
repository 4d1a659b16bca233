//! Message rendering for record arguments
//!
//! Two modes: joining displayed arguments with single spaces, or expanding a
//! printf-style format string at render time. Format strings are runtime data
//! here, so the verbs are interpreted by hand rather than by `format!`.

use super::record::Arg;
use std::fmt::Write;
use std::iter::Peekable;
use std::str::Chars;

/// Join argument displays with single spaces, no trailing newline.
pub(crate) fn join(args: &[Arg]) -> String {
    let mut out = String::new();
    for (idx, arg) in args.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}", arg.display());
    }
    out
}

/// Expand a printf-style format string.
///
/// Every ASCII letter verb consumes one argument. `%q` quotes the argument,
/// `%f`/`%e`/`%g` honour precision on numeric text, `%x`/`%X`/`%o`/`%b`
/// re-radix integer text, and `%%` is a literal percent sign. `-` left-aligns
/// and `0` zero-pads; other flags are accepted and ignored. Mismatches are
/// rendered inline rather than failing: `%!v(MISSING)`, `%!(EXTRA ...)` and `%!(NOVERB)`.
pub(crate) fn sprintf(format: &str, args: &[Arg]) -> String {
    let mut out = String::with_capacity(format.len() + args.len() * 8);
    let mut next = 0;
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut left_align = false;
        let mut zero_pad = false;
        while let Some(&flag) = chars.peek() {
            if !matches!(flag, '-' | '+' | '#' | ' ' | '0') {
                break;
            }
            left_align |= flag == '-';
            zero_pad |= flag == '0';
            chars.next();
        }
        let width = read_number(&mut chars);
        let precision = if chars.peek() == Some(&'.') {
            chars.next();
            Some(read_number(&mut chars).unwrap_or(0))
        } else {
            None
        };

        let verb = match chars.next() {
            Some(verb) => verb,
            None => {
                out.push_str("%!(NOVERB)");
                break;
            }
        };
        if verb == '%' {
            out.push('%');
            continue;
        }

        let Some(arg) = args.get(next) else {
            let _ = write!(out, "%!{}(MISSING)", verb);
            continue;
        };
        next += 1;

        let text = apply_verb(verb, arg.display().to_string(), precision);
        pad(&mut out, &text, width, left_align, zero_pad && !left_align);
    }

    if next < args.len() {
        out.push_str("%!(EXTRA ");
        for (idx, arg) in args[next..].iter().enumerate() {
            if idx > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}", arg.display());
        }
        out.push(')');
    }

    out
}

fn read_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize));
        chars.next();
    }
    value
}

fn apply_verb(verb: char, text: String, precision: Option<usize>) -> String {
    match verb {
        'q' => {
            let text = truncate(text, precision);
            format!("{:?}", text)
        }
        'f' | 'F' | 'e' | 'E' | 'g' | 'G' => match (precision, text.parse::<f64>()) {
            (Some(p), Ok(value)) if matches!(verb, 'e' | 'E') => {
                let rendered = format!("{:.*e}", p, value);
                if verb == 'E' {
                    rendered.to_uppercase()
                } else {
                    rendered
                }
            }
            (Some(p), Ok(value)) => format!("{:.*}", p, value),
            _ => text,
        },
        'x' | 'X' | 'o' | 'b' => match text.parse::<i128>() {
            Ok(value) => {
                let magnitude = value.unsigned_abs();
                let digits = match verb {
                    'x' => format!("{:x}", magnitude),
                    'X' => format!("{:X}", magnitude),
                    'o' => format!("{:o}", magnitude),
                    _ => format!("{:b}", magnitude),
                };
                if value < 0 {
                    format!("-{}", digits)
                } else {
                    digits
                }
            }
            Err(_) => text,
        },
        _ => truncate(text, precision),
    }
}

fn truncate(text: String, precision: Option<usize>) -> String {
    match precision {
        Some(max) if text.chars().count() > max => text.chars().take(max).collect(),
        _ => text,
    }
}

/// Pad `text` to `width`. Zero padding goes after a leading sign.
fn pad(out: &mut String, text: &str, width: Option<usize>, left_align: bool, zeros: bool) {
    let len = text.chars().count();
    let fill = width.map_or(0, |w| w.saturating_sub(len));
    if zeros {
        let digits = match text.strip_prefix(|c: char| c == '-' || c == '+') {
            Some(rest) => {
                out.push_str(&text[..1]);
                rest
            }
            None => text,
        };
        out.extend(std::iter::repeat('0').take(fill));
        out.push_str(digits);
        return;
    }
    if !left_align {
        out.extend(std::iter::repeat(' ').take(fill));
    }
    out.push_str(text);
    if left_align {
        out.extend(std::iter::repeat(' ').take(fill));
    }
}
