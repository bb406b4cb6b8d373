//! Internal helper functions.

use std::io::Cursor;

use pgp::composed::{Deserializable, SignedPublicKey};
use pgp::ser::Serialize;
use pgp::types::KeyDetails;

use crate::error::Result;

/// Parse a stored packets blob into the keys it contains.
///
/// Blobs are written by the importer and expected to round-trip; a blob
/// with any unreadable certificate fails the whole parse.
pub(crate) fn parse_keyring(data: &[u8]) -> Result<Vec<SignedPublicKey>> {
    let cursor = Cursor::new(data);
    let (iter, _headers) = SignedPublicKey::from_reader_many(cursor)?;

    let mut keys = Vec::new();
    for key in iter {
        keys.push(key?);
    }

    Ok(keys)
}

/// Serialize a key entity to binary packet format.
pub(crate) fn entity_to_bytes(entity: &SignedPublicKey) -> Result<Vec<u8>> {
    Ok(entity.to_bytes()?)
}

/// Get the fingerprint as a hex string (uppercase, no spaces).
pub(crate) fn fingerprint_to_hex(key: &impl KeyDetails) -> String {
    let fingerprint = key.fingerprint();
    hex::encode_upper(fingerprint.as_bytes())
}

/// Convert a SystemTime to a chrono DateTime.
pub(crate) fn system_time_to_datetime(st: std::time::SystemTime) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from(st)
}
