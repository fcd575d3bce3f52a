//! Stored payload format (implicit v1).
//!
//! ```text
//! payload := base64( nonce[24] || ciphertext[len + 16] )
//! ```
//!
//! Standard alphabet with padding. This is the only format: writers and
//! readers share it as a compatibility contract, and any future change needs
//! an explicit version marker in the stored record rather than a silent
//! switch.

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{
    aead::TAG_SIZE,
    error::CryptoError,
    keys::{NONCE_SIZE, Nonce},
};

/// Smallest well-formed decoded payload: nonce plus an empty-plaintext tag.
pub const MIN_PAYLOAD_LEN: usize = NONCE_SIZE + TAG_SIZE;

/// Nonce and ciphertext split out of a stored payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    /// Nonce the ciphertext was sealed under
    pub nonce: Nonce,
    /// Ciphertext including the trailing 16-byte tag
    pub ciphertext: Vec<u8>,
}

/// Concatenate `nonce || ciphertext` and base64 encode.
pub fn encode(nonce: &Nonce, ciphertext: &[u8]) -> String {
    let mut raw = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    raw.extend_from_slice(nonce.as_bytes());
    raw.extend_from_slice(ciphertext);
    STANDARD.encode(raw)
}

/// Reverse [`encode`], splitting at byte offset 24.
///
/// # Errors
///
/// - `MalformedPayload`: invalid base64, or fewer than 40 decoded bytes
pub fn decode(payload: &str) -> Result<DecodedPayload, CryptoError> {
    let raw = STANDARD
        .decode(payload)
        .map_err(|_| CryptoError::MalformedPayload { reason: "invalid base64" })?;

    if raw.len() < NONCE_SIZE {
        return Err(CryptoError::MalformedPayload { reason: "too short for nonce" });
    }
    if raw.len() < MIN_PAYLOAD_LEN {
        return Err(CryptoError::MalformedPayload { reason: "too short for ciphertext" });
    }

    let (nonce_bytes, ciphertext) = raw.split_at(NONCE_SIZE);
    let mut nonce = [0u8; NONCE_SIZE];
    nonce.copy_from_slice(nonce_bytes);

    Ok(DecodedPayload { nonce: Nonce::from_bytes(nonce), ciphertext: ciphertext.to_vec() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_layout_is_nonce_then_ciphertext() {
        let nonce = Nonce::from_bytes([0x01; NONCE_SIZE]);
        let ciphertext = [0x02u8; TAG_SIZE];

        let raw = STANDARD.decode(encode(&nonce, &ciphertext)).unwrap();

        assert_eq!(&raw[..NONCE_SIZE], &[0x01; NONCE_SIZE]);
        assert_eq!(&raw[NONCE_SIZE..], &[0x02; TAG_SIZE]);
    }

    #[test]
    fn decode_splits_at_nonce_boundary() {
        let nonce = Nonce::from_bytes([0xAA; NONCE_SIZE]);
        let ciphertext = vec![0xBB; 100];

        let decoded = decode(&encode(&nonce, &ciphertext)).unwrap();

        assert_eq!(decoded.nonce, nonce);
        assert_eq!(decoded.ciphertext, ciphertext);
    }

    #[test]
    fn rejects_invalid_base64() {
        assert_eq!(
            decode("not*base64!"),
            Err(CryptoError::MalformedPayload { reason: "invalid base64" })
        );
    }

    #[test]
    fn rejects_payload_without_room_for_nonce() {
        let short = STANDARD.encode([0u8; NONCE_SIZE - 1]);
        assert_eq!(decode(&short), Err(CryptoError::MalformedPayload { reason: "too short for nonce" }));
    }

    #[test]
    fn rejects_payload_without_room_for_tag() {
        let short = STANDARD.encode([0u8; MIN_PAYLOAD_LEN - 1]);
        assert_eq!(
            decode(&short),
            Err(CryptoError::MalformedPayload { reason: "too short for ciphertext" })
        );
    }

    #[test]
    fn accepts_minimum_length() {
        let minimal = STANDARD.encode([0u8; MIN_PAYLOAD_LEN]);
        let decoded = decode(&minimal).unwrap();

        assert_eq!(decoded.ciphertext.len(), TAG_SIZE);
    }

    #[test]
    fn empty_string_is_malformed() {
        assert!(matches!(decode(""), Err(CryptoError::MalformedPayload { .. })));
    }
}
