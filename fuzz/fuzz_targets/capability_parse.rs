//! Fuzz target for capability link parsing
//!
//! Arbitrary strings, plus strings assembled around a real key fragment so
//! the fuzzer reaches the document id checks quickly.
//!
//! # Invariants
//!
//! - Parsing never panics
//! - Any accepted link rebuilds into a link that parses to the same
//!   document id and key

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use noslock_core::capability;

#[derive(Debug, Arbitrary)]
enum Input {
    Raw(String),
    Assembled { prefix: String, key: [u8; 32], suffix: String },
}

fuzz_target!(|input: Input| {
    let url = match input {
        Input::Raw(url) => url,
        Input::Assembled { prefix, key, suffix } => {
            let mut hex = String::with_capacity(64);
            for byte in key {
                hex.push_str(&format!("{byte:02x}"));
            }
            format!("{prefix}#{hex}{suffix}")
        },
    };

    let Ok(parsed) = capability::parse(&url) else {
        return;
    };

    let rebuilt = capability::build(&parsed.doc_id, &parsed.key);
    let reparsed = capability::parse(&rebuilt).expect("rebuilt link must parse");

    assert_eq!(reparsed.doc_id, parsed.doc_id);
    assert_eq!(reparsed.key, parsed.key);
});
