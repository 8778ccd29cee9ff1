//! Numeric literal scanning.
//!
//! Grammar: an optional `+`/`-` sign, then digits, then an optional `.`
//! fractional part, then an optional `e`/`E` exponent with optional sign and
//! digits. A token is `FLOAT` iff it contains `.` or `e`/`E`; otherwise
//! `INT`. At least one digit must appear anywhere in the literal.

use crate::diag::{Error, ErrorKind, Span};
use crate::lexer::cursor::Cursor;

/// The raw text of a scanned number, and whether it should be treated as a
/// float (saw a `.` or exponent marker) or an int.
pub struct Scanned {
    pub text: String,
    pub is_float: bool,
}

/// Scans a numeric literal starting at the cursor's current position, which
/// must be positioned at `+`, `-`, or an ASCII digit.
pub fn scan(cursor: &mut Cursor, start_span: Span) -> Result<Scanned, Error> {
    let start = cursor.offset();
    let mut saw_digit = false;
    let mut is_float = false;

    if !cursor.advance_if(b'+') {
        cursor.advance_if(b'-');
    }

    while cursor.advance_if_matches(|b| b.is_ascii_digit()).is_some() {
        saw_digit = true;
    }

    if cursor.peek() == Some(b'.') && cursor.peek_at(1).map_or(false, |b| b.is_ascii_digit()) {
        cursor.advance(); // '.'
        is_float = true;
        while cursor.advance_if_matches(|b| b.is_ascii_digit()).is_some() {
            saw_digit = true;
        }
    }

    if matches!(cursor.peek(), Some(b'e') | Some(b'E')) {
        cursor.advance(); // 'e'/'E'
        if matches!(cursor.peek(), Some(b'+') | Some(b'-')) {
            cursor.advance();
        }
        let mut saw_exp_digit = false;
        while cursor.advance_if_matches(|b| b.is_ascii_digit()).is_some() {
            saw_exp_digit = true;
        }
        if saw_exp_digit {
            is_float = true;
        } else {
            return Err(Error::new(
                ErrorKind::InvalidNumber,
                start_span,
                "exponent marker must be followed by at least one digit",
            ));
        }
    }

    if !saw_digit {
        return Err(Error::new(
            ErrorKind::InvalidNumber,
            start_span,
            "numeric literal must contain at least one digit",
        ));
    }

    let text = String::from_utf8_lossy(cursor.slice_from(start)).into_owned();
    Ok(Scanned { text, is_float })
}

/// Parses a scanned integer literal's text as a signed 64-bit integer.
pub fn parse_int(text: &str, span: Span) -> Result<i64, Error> {
    text.parse::<i64>().map_err(|_| {
        Error::new(ErrorKind::InvalidNumber, span, format!("integer out of range: {text}"))
    })
}

/// Parses a scanned float literal's text as a 64-bit double, rejecting
/// non-finite results as out-of-range.
pub fn parse_float(text: &str, span: Span) -> Result<f64, Error> {
    let value: f64 = text
        .parse()
        .map_err(|_| Error::new(ErrorKind::InvalidNumber, span, format!("invalid float: {text}")))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::new(ErrorKind::InvalidNumber, span, format!("float out of range: {text}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_str(s: &str) -> Scanned {
        let mut c = Cursor::new(s.as_bytes());
        scan(&mut c, Span::START).unwrap()
    }

    #[test]
    fn scans_plain_int() {
        let s = scan_str("42");
        assert_eq!(s.text, "42");
        assert!(!s.is_float);
    }

    #[test]
    fn scans_negative_int() {
        let s = scan_str("-7");
        assert_eq!(s.text, "-7");
        assert!(!s.is_float);
    }

    #[test]
    fn scans_float_with_fraction() {
        let s = scan_str("3.14");
        assert_eq!(s.text, "3.14");
        assert!(s.is_float);
    }

    #[test]
    fn scans_float_with_exponent() {
        let s = scan_str("1e10");
        assert_eq!(s.text, "1e10");
        assert!(s.is_float);
    }

    #[test]
    fn dot_not_followed_by_digit_is_not_consumed() {
        let mut c = Cursor::new(b"1.x");
        let s = scan(&mut c, Span::START).unwrap();
        assert_eq!(s.text, "1");
        assert!(!s.is_float);
        assert_eq!(c.peek(), Some(b'.'));
    }

    #[test]
    fn no_digits_is_error() {
        let mut c = Cursor::new(b"+");
        assert!(scan(&mut c, Span::START).is_err());
    }

    #[test]
    fn int_overflow_is_error() {
        assert!(parse_int("99999999999999999999", Span::START).is_err());
    }

    #[test]
    fn int_bound_parses() {
        assert_eq!(parse_int("9223372036854775807", Span::START).unwrap(), i64::MAX);
        assert_eq!(parse_int("-9223372036854775808", Span::START).unwrap(), i64::MIN);
    }

    #[test]
    fn int_one_past_bound_fails() {
        assert!(parse_int("9223372036854775808", Span::START).is_err());
    }
}
