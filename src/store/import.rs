//! Transactional key import.

use pgp::composed::SignedPublicKey;
use pgp::types::KeyDetails;
use rusqlite::params;

use crate::error::{Error, Result};
use crate::internal::{
    algorithm_id, entity_to_bytes, fingerprint_bytes, fingerprint_to_hex, key_bit_length,
    key_id32, key_id64, primary_self_signature, self_signature, signature_created,
    signature_expiration, system_time_to_datetime,
};
use crate::wkd;

use super::store::Store;

/// Import service persisting parsed keys.
pub struct KeyImporter<'a> {
    store: &'a Store,
}

impl<'a> KeyImporter<'a> {
    /// Create an importer over the given store.
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Atomically persist one key and all of its identities.
    ///
    /// Writes one key row plus one identity row per user id inside a single
    /// transaction; any failure rolls the whole import back and the store is
    /// unchanged. Importing a fingerprint that is already stored fails on
    /// the uniqueness constraint.
    ///
    /// # Arguments
    /// * `entity` - The parsed certificate to store
    ///
    /// # Example
    /// ```no_run
    /// use keydir::{KeyImporter, Store};
    ///
    /// # let entity = unimplemented!();
    /// let store = Store::open("keys.db").unwrap();
    /// KeyImporter::new(&store).import(&entity).unwrap();
    /// ```
    pub fn import(&self, entity: &SignedPublicKey) -> Result<()> {
        let users = &entity.details.users;
        let primary_sig = primary_self_signature(users)?;

        let fingerprint = fingerprint_bytes(&entity.primary_key)?;
        let keyid64 = key_id64(&entity.primary_key)?;
        let keyid32 = key_id32(&fingerprint);
        let algo = algorithm_id(&entity.primary_key)?;
        let bit_length = key_bit_length(&entity.primary_key)?;

        let creation_systime: std::time::SystemTime = entity.primary_key.created_at().into();
        let creation_time = system_time_to_datetime(creation_systime);
        let expiration_time = signature_expiration(primary_sig)?;

        let packets = entity_to_bytes(entity)?;

        let tx = self
            .store
            .conn()
            .unchecked_transaction()
            .map_err(|e| Error::Transaction(format!("failed to begin import: {}", e)))?;

        tx.execute(
            "INSERT INTO keys \
                (fingerprint, keyid64, keyid32, creation_time, expiration_time, \
                 algo, bit_length, packets) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                &fingerprint[..],
                keyid64 as i64,
                keyid32 as i64,
                creation_time,
                expiration_time,
                algo as i64,
                bit_length as i64,
                packets,
            ],
        )?;
        let key_id = tx.last_insert_rowid();

        for user in users {
            let sig = self_signature(user)?;
            let name = String::from_utf8_lossy(user.id.id()).to_string();

            let email = extract_email(&name).ok_or_else(|| {
                Error::Derivation(format!("user id {:?} has no email address", name))
            })?;
            let wkd_hash = wkd::hash_address(&email).map_err(|e| {
                Error::Derivation(format!("cannot hash the address of {:?}: {}", name, e))
            })?;

            let id_created = signature_created(sig)?;
            let id_expiration = signature_expiration(sig)?;

            tx.execute(
                "INSERT INTO identities (key, name, creation_time, expiration_time, wkd_hash) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![key_id, name, id_created, id_expiration, wkd_hash],
            )?;
        }

        tx.commit()
            .map_err(|e| Error::Transaction(format!("failed to commit import: {}", e)))?;

        log::debug!("imported key {}", fingerprint_to_hex(&entity.primary_key));

        Ok(())
    }
}

/// Extract the email address from a user id such as "Name <email@example.com>".
fn extract_email(uid: &str) -> Option<String> {
    if let (Some(start), Some(end)) = (uid.find('<'), uid.find('>')) {
        if end > start {
            return Some(uid[start + 1..end].to_string());
        }
    }

    // A bare address with no display name
    if uid.contains('@') && !uid.contains(' ') {
        return Some(uid.to_string());
    }

    None
}
