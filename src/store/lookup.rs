//! Search-driven key retrieval.

use chrono::{DateTime, Utc};
use pgp::composed::SignedPublicKey;
use rusqlite::params;

use crate::error::{Error, Result};
use crate::internal::parse_keyring;
use crate::search::Search;
use crate::types::{IndexIdentity, IndexKey};

use super::store::Store;

/// Lookup service resolving search terms to stored keys.
///
/// Both operations classify their term with [`Search::parse`] and return
/// an empty list when nothing matches.
pub struct KeyLookup<'a> {
    store: &'a Store,
}

impl<'a> KeyLookup<'a> {
    /// Create a lookup service over the given store.
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Retrieve the full keys matching a search term.
    ///
    /// Returns every match as parsed certificates; a key reachable through
    /// several identities appears once. The stored packets must parse, so a
    /// corrupt row fails the whole call rather than being skipped.
    ///
    /// # Example
    /// ```no_run
    /// use keydir::{KeyLookup, Store};
    ///
    /// let store = Store::open("keys.db").unwrap();
    /// let keys = KeyLookup::new(&store).get("alice").unwrap();
    /// println!("{} match(es)", keys.len());
    /// ```
    pub fn get(&self, term: &str) -> Result<Vec<SignedPublicKey>> {
        let (clause, param) = Search::parse(term).predicate();
        let sql = format!(
            "SELECT DISTINCT k.packets FROM keys k \
             JOIN identities i ON i.key = k.id \
             WHERE {}",
            clause
        );

        let mut stmt = self.store.conn().prepare(&sql)?;
        let rows = stmt.query_map([param], |row| row.get::<_, Vec<u8>>(0))?;

        let mut blobs = Vec::new();
        for row in rows {
            blobs.push(row?);
        }

        let mut keyring = Vec::new();
        for blob in &blobs {
            keyring.extend(parse_keyring(blob)?);
        }

        Ok(keyring)
    }

    /// Retrieve summary records for the keys matching a search term.
    ///
    /// Fetches the matching key rows first, then the identities of each
    /// key. A stored fingerprint that is not 20 bytes marks the row as
    /// corrupt and aborts the whole call.
    pub fn index(&self, term: &str) -> Result<Vec<IndexKey>> {
        let (clause, param) = Search::parse(term).predicate();
        let sql = format!(
            "SELECT DISTINCT k.id, k.fingerprint, k.creation_time, k.expiration_time, \
                    k.algo, k.bit_length \
             FROM keys k \
             JOIN identities i ON i.key = k.id \
             WHERE {}",
            clause
        );

        let mut stmt = self.store.conn().prepare(&sql)?;
        let rows = stmt.query_map([param], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Vec<u8>>(1)?,
                row.get::<_, DateTime<Utc>>(2)?,
                row.get::<_, Option<DateTime<Utc>>>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, i64>(5)?,
            ))
        })?;

        let mut matches = Vec::new();
        for row in rows {
            matches.push(row?);
        }

        let mut keys = Vec::new();
        for (key_id, fingerprint, creation_time, expiration_time, algo, bit_length) in matches {
            let fingerprint: [u8; 20] = fingerprint.try_into().map_err(|bad: Vec<u8>| {
                log::warn!("key {} has a corrupt fingerprint ({} bytes)", key_id, bad.len());
                Error::Integrity(format!(
                    "stored fingerprint of key {} is not 20 bytes",
                    key_id
                ))
            })?;

            keys.push(IndexKey {
                fingerprint,
                creation_time,
                expiration_time,
                algo: algo as u8,
                bit_length: bit_length as u16,
                identities: self.identities_of(key_id)?,
            });
        }

        Ok(keys)
    }

    /// Retrieve the full keys having an identity with the given WKD hash.
    ///
    /// The hash is the value [`hash_address`](crate::hash_address) computes;
    /// it is stored per identity at import time.
    pub fn find_by_address_hash(&self, hash: &str) -> Result<Vec<SignedPublicKey>> {
        let mut stmt = self.store.conn().prepare(
            "SELECT DISTINCT k.packets FROM keys k \
             JOIN identities i ON i.key = k.id \
             WHERE i.wkd_hash = ?1",
        )?;
        let rows = stmt.query_map([hash], |row| row.get::<_, Vec<u8>>(0))?;

        let mut blobs = Vec::new();
        for row in rows {
            blobs.push(row?);
        }

        let mut keyring = Vec::new();
        for blob in &blobs {
            keyring.extend(parse_keyring(blob)?);
        }

        Ok(keyring)
    }

    /// The identities of one key, in store order.
    fn identities_of(&self, key_id: i64) -> Result<Vec<IndexIdentity>> {
        let mut stmt = self.store.conn().prepare(
            "SELECT name, creation_time, expiration_time FROM identities WHERE key = ?1",
        )?;
        let rows = stmt.query_map(params![key_id], |row| {
            Ok(IndexIdentity {
                name: row.get(0)?,
                creation_time: row.get(1)?,
                expiration_time: row.get(2)?,
            })
        })?;

        let mut identities = Vec::new();
        for row in rows {
            identities.push(row?);
        }

        Ok(identities)
    }
}
