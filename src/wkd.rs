//! Web Key Directory address hashing.
//!
//! WKD identifies a key by the SHA-1 hash of the lowercased local part of
//! an email address, encoded with z-base-32. The importer stores this value
//! for every identity so that WKD queries become a plain column lookup.

use sha1::{Digest, Sha1};

use crate::error::{Error, Result};

/// Compute the WKD hash of an email address.
///
/// # Arguments
/// * `email` - The address to hash, e.g. "alice@example.com"
///
/// # Returns
/// The z-base-32 encoded SHA-1 hash of the lowercased local part.
///
/// # Example
/// ```
/// let hash = keydir::hash_address("Joe.Doe@Example.ORG").unwrap();
/// assert_eq!(hash, "iy9q119eutrkn8s1mk4r39qejnbu3n5q");
/// ```
pub fn hash_address(email: &str) -> Result<String> {
    let (local_part, _domain) = parse_email(email)?;

    let mut hasher = Sha1::new();
    hasher.update(local_part.as_bytes());
    let hash = hasher.finalize();

    Ok(zbase32_encode(&hash))
}

/// Parse an email address into local part and domain.
fn parse_email(email: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(Error::InvalidInput(format!(
            "Invalid email address: {}",
            email
        )));
    }

    let local_part = parts[0].to_lowercase();
    let domain = parts[1].to_lowercase();

    Ok((local_part, domain))
}

/// Encode data using z-base-32 encoding (RFC 6189 variant).
fn zbase32_encode(data: &[u8]) -> String {
    const ALPHABET: &[u8] = b"ybndrfg8ejkmcpqxot1uwisza345h769";

    let mut result = String::new();
    let mut buffer = 0u64;
    let mut bits_in_buffer = 0;

    for &byte in data {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;

        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let index = ((buffer >> bits_in_buffer) & 0x1f) as usize;
            result.push(ALPHABET[index] as char);
        }
    }

    if bits_in_buffer > 0 {
        let index = ((buffer << (5 - bits_in_buffer)) & 0x1f) as usize;
        result.push(ALPHABET[index] as char);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_email() {
        let (local, domain) = parse_email("user@example.com").unwrap();
        assert_eq!(local, "user");
        assert_eq!(domain, "example.com");

        let (local, domain) = parse_email("User.Name@EXAMPLE.COM").unwrap();
        assert_eq!(local, "user.name");
        assert_eq!(domain, "example.com");

        assert!(parse_email("not-an-email").is_err());
        assert!(parse_email("too@many@parts").is_err());
    }

    #[test]
    fn test_hash_address_known_value() {
        // Draft-koch example: "Joe.Doe" hashes as its lowercased form
        let hash = hash_address("Joe.Doe@Example.ORG").unwrap();
        assert_eq!(hash, "iy9q119eutrkn8s1mk4r39qejnbu3n5q");
    }

    #[test]
    fn test_hash_address_ignores_domain() {
        let a = hash_address("joe.doe@example.org").unwrap();
        let b = hash_address("joe.doe@another.example").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zbase32_encode_empty() {
        assert_eq!(zbase32_encode(&[]), "");
    }

    #[test]
    fn test_zbase32_encode_single_byte() {
        // 0xFF = 11111111 -> 11111 111(00) -> indexes 31, 28
        assert_eq!(zbase32_encode(&[0xff]), "9h");
    }
}
