//! Import-time derivations.
//!
//! Everything a key or identity row stores besides the raw packets is
//! computed here from the parsed entity: which self-signature speaks for
//! the key as a whole, signature timestamps, and per-algorithm metadata.

use std::time::SystemTime;

use chrono::{DateTime, Utc};
use pgp::crypto::public_key::PublicKeyAlgorithm;
use pgp::packet::{Signature, SubpacketData};
use pgp::types::{KeyDetails, SignedUser};

use crate::error::{Error, Result};

use super::helpers::system_time_to_datetime;

/// Select the self-signature that speaks for the whole key.
///
/// The first identity's signature is the default. From the second identity
/// on, the first one whose self-signature carries the primary-user-id flag
/// wins instead.
pub(crate) fn primary_self_signature(users: &[SignedUser]) -> Result<&Signature> {
    let first = users
        .first()
        .ok_or_else(|| Error::Derivation("key has no identities".to_string()))?;
    let mut selected = self_signature(first)?;

    for user in &users[1..] {
        let sig = self_signature(user)?;
        if is_primary_flagged(sig) {
            selected = sig;
            break;
        }
    }

    Ok(selected)
}

/// The self-signature of an identity: the first signature bound to it.
pub(crate) fn self_signature(user: &SignedUser) -> Result<&Signature> {
    user.signatures.first().ok_or_else(|| {
        Error::Derivation(format!(
            "user id {:?} has no self-signature",
            String::from_utf8_lossy(user.id.id())
        ))
    })
}

/// Whether a self-signature flags its identity as the primary one.
pub(crate) fn is_primary_flagged(sig: &Signature) -> bool {
    let Some(config) = sig.config() else {
        return false;
    };

    config
        .hashed_subpackets()
        .any(|subpacket| matches!(subpacket.data, SubpacketData::IsPrimary(true)))
}

fn signature_created_systime(sig: &Signature) -> Result<SystemTime> {
    let config = sig
        .config()
        .ok_or_else(|| Error::Derivation("cannot read signature config".to_string()))?;

    for subpacket in config.hashed_subpackets() {
        if let SubpacketData::SignatureCreationTime(timestamp) = &subpacket.data {
            return Ok(timestamp.clone().into());
        }
    }

    Err(Error::Derivation(
        "signature has no creation time".to_string(),
    ))
}

/// When a signature was made.
pub(crate) fn signature_created(sig: &Signature) -> Result<DateTime<Utc>> {
    Ok(system_time_to_datetime(signature_created_systime(sig)?))
}

/// When the validity set by a signature ends.
///
/// A signature without a key-lifetime field means no expiration. Otherwise
/// the lifetime counts from the signature's own creation time.
pub(crate) fn signature_expiration(sig: &Signature) -> Result<Option<DateTime<Utc>>> {
    let Some(validity) = sig.key_expiration_time() else {
        return Ok(None);
    };

    let created = signature_created_systime(sig)?;
    Ok(Some(system_time_to_datetime(created + validity.into())))
}

/// The 20-byte fingerprint of a primary key.
pub(crate) fn fingerprint_bytes(key: &impl KeyDetails) -> Result<[u8; 20]> {
    let fingerprint = key.fingerprint();
    fingerprint
        .as_bytes()
        .try_into()
        .map_err(|_| Error::Derivation("key fingerprint is not 20 bytes".to_string()))
}

/// The 64-bit key id of a primary key.
pub(crate) fn key_id64(key: &impl KeyDetails) -> Result<u64> {
    let key_id = key.legacy_key_id();
    let bytes: [u8; 8] = key_id
        .as_ref()
        .try_into()
        .map_err(|_| Error::Derivation("key id is not 8 bytes".to_string()))?;
    Ok(u64::from_be_bytes(bytes))
}

/// The 32-bit short key id: the low 32 bits of the fingerprint.
pub(crate) fn key_id32(fingerprint: &[u8; 20]) -> u32 {
    u32::from_be_bytes([
        fingerprint[16],
        fingerprint[17],
        fingerprint[18],
        fingerprint[19],
    ])
}

/// Numeric OpenPGP algorithm id of a key.
pub(crate) fn algorithm_id(key: &impl KeyDetails) -> Result<u8> {
    match key.algorithm() {
        PublicKeyAlgorithm::RSA => Ok(1),
        PublicKeyAlgorithm::RSAEncrypt => Ok(2),
        PublicKeyAlgorithm::RSASign => Ok(3),
        PublicKeyAlgorithm::Elgamal => Ok(16),
        PublicKeyAlgorithm::DSA => Ok(17),
        PublicKeyAlgorithm::ECDH => Ok(18),
        PublicKeyAlgorithm::ECDSA => Ok(19),
        PublicKeyAlgorithm::EdDSALegacy => Ok(22),
        PublicKeyAlgorithm::X25519 => Ok(25),
        PublicKeyAlgorithm::X448 => Ok(26),
        PublicKeyAlgorithm::Ed25519 => Ok(27),
        PublicKeyAlgorithm::Ed448 => Ok(28),
        algorithm => Err(Error::Derivation(format!(
            "unsupported public-key algorithm: {:?}",
            algorithm
        ))),
    }
}

/// Nominal key size in bits, derived from the algorithm.
pub(crate) fn key_bit_length(key: &impl KeyDetails) -> Result<u16> {
    match key.algorithm() {
        // Common size; the raw key material width is not exposed cheaply
        PublicKeyAlgorithm::RSA | PublicKeyAlgorithm::RSAEncrypt | PublicKeyAlgorithm::RSASign => {
            Ok(2048)
        }
        PublicKeyAlgorithm::Elgamal => Ok(2048),
        PublicKeyAlgorithm::DSA => Ok(2048),
        PublicKeyAlgorithm::ECDH => Ok(256),
        PublicKeyAlgorithm::ECDSA => Ok(256),
        PublicKeyAlgorithm::EdDSALegacy => Ok(256),
        PublicKeyAlgorithm::X25519 => Ok(256),
        PublicKeyAlgorithm::Ed25519 => Ok(256),
        PublicKeyAlgorithm::X448 => Ok(448),
        PublicKeyAlgorithm::Ed448 => Ok(448),
        algorithm => Err(Error::Derivation(format!(
            "cannot derive a bit length for algorithm: {:?}",
            algorithm
        ))),
    }
}
