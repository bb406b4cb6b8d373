//! Search term classification.
//!
//! Every lookup request carries one search string. Following the HKP
//! convention, a term starting with `0x` whose remainder decodes as hex
//! selects an exact-match form by decoded length; anything else is a
//! free-text search over identity names. A term is exactly one kind.

use rusqlite::types::Value;

/// A classified search term.
///
/// The kinds are mutually exclusive and tried in strict priority order:
/// [`Fingerprint`](Search::Fingerprint), then [`KeyId64`](Search::KeyId64),
/// then [`KeyId32`](Search::KeyId32), then [`FreeText`](Search::FreeText).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Search {
    /// Full 20-byte fingerprint, matched by exact byte equality
    Fingerprint([u8; 20]),
    /// 64-bit key id
    KeyId64(u64),
    /// 32-bit short key id
    KeyId32(u32),
    /// Case-insensitive substring match over identity names
    FreeText(String),
}

impl Search {
    /// Classify a raw search term.
    ///
    /// The hex forms require the `0x` prefix; a bare hex string is treated
    /// as free text. Hex digits may be in either case.
    pub fn parse(term: &str) -> Search {
        if let Some(digits) = term.strip_prefix("0x") {
            if let Ok(bytes) = hex::decode(digits) {
                match bytes.len() {
                    20 => {
                        let mut fingerprint = [0u8; 20];
                        fingerprint.copy_from_slice(&bytes);
                        return Search::Fingerprint(fingerprint);
                    }
                    8 => {
                        let mut id = [0u8; 8];
                        id.copy_from_slice(&bytes);
                        return Search::KeyId64(u64::from_be_bytes(id));
                    }
                    4 => {
                        let mut id = [0u8; 4];
                        id.copy_from_slice(&bytes);
                        return Search::KeyId32(u32::from_be_bytes(id));
                    }
                    _ => {}
                }
            }
        }

        Search::FreeText(term.to_string())
    }

    /// The SQL predicate for this term and its single bound parameter.
    ///
    /// The fragment references the table aliases `k` (keys) and `i`
    /// (identities) used by the lookup joins. Key ids are bound with the
    /// same integer conversion the importer uses to store them.
    pub(crate) fn predicate(&self) -> (&'static str, Value) {
        match self {
            Search::Fingerprint(fingerprint) => {
                ("k.fingerprint = ?1", Value::Blob(fingerprint.to_vec()))
            }
            Search::KeyId64(id) => ("k.keyid64 = ?1", Value::Integer(*id as i64)),
            Search::KeyId32(id) => ("k.keyid32 = ?1", Value::Integer(*id as i64)),
            Search::FreeText(term) => ("i.name LIKE ?1", Value::Text(format!("%{}%", term))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fingerprint() {
        let term = "0xDAFFB000FEEDC0DEDAFFB000FEEDC0DE12345678";
        match Search::parse(term) {
            Search::Fingerprint(fp) => {
                assert_eq!(fp[0], 0xda);
                assert_eq!(fp[19], 0x78);
            }
            other => panic!("expected fingerprint, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_keyid64() {
        assert_eq!(
            Search::parse("0x1122334455667788"),
            Search::KeyId64(0x1122334455667788)
        );
    }

    #[test]
    fn test_parse_keyid32() {
        assert_eq!(Search::parse("0xDEADBEEF"), Search::KeyId32(0xdeadbeef));
    }

    #[test]
    fn test_parse_hex_is_case_insensitive() {
        assert_eq!(Search::parse("0xdeadbeef"), Search::KeyId32(0xdeadbeef));
    }

    #[test]
    fn test_parse_requires_prefix() {
        // Hex without the 0x prefix is free text
        assert_eq!(
            Search::parse("DEADBEEF"),
            Search::FreeText("DEADBEEF".to_string())
        );
    }

    #[test]
    fn test_parse_odd_lengths_are_free_text() {
        // 6 bytes is not a recognized id length
        assert_eq!(
            Search::parse("0x112233445566"),
            Search::FreeText("0x112233445566".to_string())
        );
        // Odd digit count does not decode
        assert_eq!(
            Search::parse("0xABC"),
            Search::FreeText("0xABC".to_string())
        );
    }

    #[test]
    fn test_parse_non_hex_after_prefix_is_free_text() {
        assert_eq!(
            Search::parse("0xnothex"),
            Search::FreeText("0xnothex".to_string())
        );
    }

    #[test]
    fn test_parse_plain_text() {
        assert_eq!(
            Search::parse("alice@example.com"),
            Search::FreeText("alice@example.com".to_string())
        );
    }

    #[test]
    fn test_free_text_predicate_wraps_wildcards() {
        let (clause, value) = Search::parse("alice").predicate();
        assert_eq!(clause, "i.name LIKE ?1");
        assert_eq!(value, Value::Text("%alice%".to_string()));
    }

    #[test]
    fn test_keyid_predicates_reinterpret_as_signed() {
        // High-bit ids must bind as the same bit pattern the importer stores
        let (_, value) = Search::parse("0xFFFFFFFFFFFFFFFF").predicate();
        assert_eq!(value, Value::Integer(-1));
    }
}
