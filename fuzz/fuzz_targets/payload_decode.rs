//! Fuzz target for payload::decode
//!
//! Feeds arbitrary text to the stored-payload decoder:
//! - Non-base64 characters and broken padding
//! - Payloads shorter than a nonce plus tag
//! - Very long inputs
//!
//! The decoder should NEVER panic. Anything it accepts must split into a
//! 24-byte nonce and a ciphertext of at least one tag.

#![no_main]

use libfuzzer_sys::fuzz_target;
use noslock_crypto::{payload, AeadCodec, SymmetricKey, NONCE_SIZE, TAG_SIZE};

fuzz_target!(|data: &str| {
    let Ok(decoded) = payload::decode(data) else {
        return;
    };

    assert_eq!(decoded.nonce.as_bytes().len(), NONCE_SIZE);
    assert!(decoded.ciphertext.len() >= TAG_SIZE);

    // Forged payloads never authenticate under an unrelated key
    let key = SymmetricKey::from_bytes([0x5a; 32]);
    let result =
        AeadCodec::default().decrypt(&decoded.ciphertext, decoded.nonce.as_bytes(), key.as_bytes());
    assert!(result.is_err());
});
