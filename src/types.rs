//! Public types returned by index lookups.

use chrono::{DateTime, Utc};

/// Summary record for one stored key.
///
/// Carries the metadata columns of a key plus all of its identities,
/// without the packet data itself. This is what an HKP index response
/// is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexKey {
    /// Full 20-byte fingerprint
    pub fingerprint: [u8; 20],
    /// When the key was created
    pub creation_time: DateTime<Utc>,
    /// When the key expires (None means never)
    pub expiration_time: Option<DateTime<Utc>>,
    /// Numeric OpenPGP public-key algorithm id
    pub algo: u8,
    /// Key size in bits
    pub bit_length: u16,
    /// Identities bound to the key, in store order
    pub identities: Vec<IndexIdentity>,
}

impl IndexKey {
    /// The fingerprint as an uppercase hex string.
    pub fn fingerprint_hex(&self) -> String {
        hex::encode_upper(self.fingerprint)
    }
}

/// Summary record for one identity of an indexed key.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexIdentity {
    /// The identity string, e.g. "Alice <alice@example.com>"
    pub name: String,
    /// When the identity was self-certified
    pub creation_time: DateTime<Utc>,
    /// When the certification expires (None means never)
    pub expiration_time: Option<DateTime<Utc>>,
}
