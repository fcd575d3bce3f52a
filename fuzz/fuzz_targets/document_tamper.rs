//! Fuzz target for the encrypt/decrypt document path
//!
//! Encrypts arbitrary text, then applies an arbitrary edit to the stored
//! payload string before decrypting.
//!
//! # Invariants
//!
//! - Untouched payloads always decrypt to the original text
//! - Any edit that changes the payload is rejected, never silently accepted
//!   as different plaintext

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use noslock_core::{decrypt_document, encrypt_document};

#[derive(Debug, Arbitrary)]
struct Scenario {
    plaintext: String,
    edit: Option<Edit>,
}

#[derive(Debug, Arbitrary)]
struct Edit {
    position: usize,
    replacement: char,
}

fuzz_target!(|scenario: Scenario| {
    let Ok(document) = encrypt_document(&scenario.plaintext) else {
        return;
    };

    let mut payload = document.payload.clone();
    if let Some(edit) = scenario.edit {
        let chars: Vec<char> = payload.chars().collect();
        let index = edit.position % chars.len();
        payload = chars
            .iter()
            .enumerate()
            .map(|(i, c)| if i == index { edit.replacement } else { *c })
            .collect();
    }

    match decrypt_document(&payload, &document.key) {
        Ok(plaintext) => assert_eq!(plaintext.as_str(), scenario.plaintext),
        Err(_) => assert_ne!(payload, document.payload),
    }
});
