//! Primary key types for item addressing.

use std::fmt;

mod private {
    pub trait Sealed {}
    impl Sealed for String {}
    impl Sealed for i64 {}
}

/// A primary key that addresses an item in a URL path.
///
/// Implemented for `String` (UUIDs, slugs) and `i64` (auto-increment keys).
/// String keys are percent-encoded as a single path segment; numeric keys are
/// rendered in plain decimal.
pub trait PrimaryKey: private::Sealed + Clone + fmt::Display + Send + Sync + 'static {
    /// Renders the key as one URL path segment.
    fn path_segment(&self) -> String;

    /// Returns `true` if the key cannot address an item.
    fn is_blank(&self) -> bool;
}

impl PrimaryKey for String {
    fn path_segment(&self) -> String {
        urlencoding::encode(self).into_owned()
    }

    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl PrimaryKey for i64 {
    fn path_segment(&self) -> String {
        self.to_string()
    }

    fn is_blank(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_keys_are_percent_encoded() {
        assert_eq!("abc-123".to_string().path_segment(), "abc-123");
        assert_eq!("a/b c".to_string().path_segment(), "a%2Fb%20c");
    }

    #[test]
    fn test_numeric_keys_render_plainly() {
        assert_eq!(7_i64.path_segment(), "7");
        assert_eq!((-1_i64).path_segment(), "-1");
    }

    #[test]
    fn test_blank_keys() {
        assert!(String::new().is_blank());
        assert!(!"x".to_string().is_blank());
        assert!(!0_i64.is_blank());
    }
}
