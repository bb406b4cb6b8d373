//! # keydir
//!
//! Storage and lookup backend for an OpenPGP key directory, built on
//! [rPGP](https://docs.rs/pgp) and SQLite.
//!
//! The crate is the persistence layer of an HKP-style key server: it
//! classifies search terms, resolves them to stored keys, imports
//! submitted keys transactionally, and streams the whole directory back
//! out for mirroring.
//!
//! - **Search terms**: `0x`-prefixed fingerprints and key ids, or free text
//! - **Lookup**: full keys ([`KeyLookup::get`]) or summary records
//!   ([`KeyLookup::index`])
//! - **Import**: one key plus all of its identities, atomically
//! - **Export**: lazy iteration over every stored key
//!
//! ## Quick Start
//!
//! ```no_run
//! use keydir::{KeyLookup, Store};
//!
//! let store = Store::open("directory.db").unwrap();
//!
//! // One search string serves fingerprints, key ids and names alike
//! let keys = KeyLookup::new(&store).get("alice").unwrap();
//! println!("{} key(s)", keys.len());
//! ```

// Modules
mod error;
mod internal;
mod search;
mod types;
mod wkd;

pub mod store;

// Re-export error types
pub use error::{Error, Result};

// Re-export search term classification
pub use search::Search;

// Re-export index record types
pub use types::{IndexIdentity, IndexKey};

// Re-export the WKD address hash
pub use wkd::hash_address;

// Re-export storage types
pub use store::{Export, KeyExporter, KeyImporter, KeyLookup, Store};
