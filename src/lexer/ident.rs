//! Identifier recognition.
//!
//! `[A-Za-z_] [A-Za-z0-9_\-]*`. After scanning, the literal bytes
//! `true`/`false`/`null` are reclassified as keywords by the caller.

/// Returns whether `byte` can start an identifier.
#[inline]
pub fn is_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

/// Returns whether `byte` can continue an identifier.
#[inline]
pub fn is_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_accepts_letters_and_underscore() {
        assert!(is_start(b'a'));
        assert!(is_start(b'Z'));
        assert!(is_start(b'_'));
        assert!(!is_start(b'0'));
        assert!(!is_start(b'-'));
    }

    #[test]
    fn continue_accepts_hyphen_and_digits() {
        assert!(is_continue(b'-'));
        assert!(is_continue(b'9'));
        assert!(is_continue(b'_'));
        assert!(!is_continue(b' '));
    }
}
