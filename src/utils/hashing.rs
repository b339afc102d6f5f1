//! Context hashing

/// Hash a string the way the JVM's `String.hashCode` does.
///
/// The polynomial `h = 31 * h + unit` runs over UTF-16 code units with
/// wrapping 32-bit arithmetic. Only the string hash matches; the window fed
/// into it is chosen differently from older JVM trackers, so their stored
/// fingerprints are not comparable. The empty string hashes to 0.
pub fn java_string_hash(text: &str) -> i32 {
    text.encode_utf16().fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(java_string_hash(""), 0);
        assert_eq!(java_string_hash("a"), 97);
        assert_eq!(java_string_hash("abc"), 96354);
        assert_eq!(java_string_hash("hello"), 99162322);
    }

    #[test]
    fn test_wraps_on_overflow() {
        assert_eq!(java_string_hash("abcdefg"), -1206291356);
        assert_eq!(java_string_hash("warning here"), -2074643980);
    }

    #[test]
    fn test_hashes_utf16_code_units() {
        // Non-BMP characters contribute both surrogate halves.
        assert_eq!(java_string_hash("🚀"), 1773027);
        assert_eq!(java_string_hash("héllo"), 103094734);
    }

    #[test]
    fn test_known_collision() {
        assert_eq!(java_string_hash("Aa"), java_string_hash("BB"));
    }
}
