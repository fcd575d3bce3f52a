//! Whole-document encryption: generator, AEAD and payload codec composed.

use noslock_crypto::{
    AeadCodec, CryptoError, DocumentId, EntropySource, OsEntropy, SymmetricKey, Zeroizing,
    generate_document_id_from, generate_key_from, generate_nonce_from, payload,
};

/// Output of the write path.
#[derive(Debug)]
pub struct EncryptedDocument {
    /// Fresh identifier to publish under
    pub doc_id: DocumentId,
    /// Fresh key. Goes into the link and nowhere else, wiped on drop
    pub key: SymmetricKey,
    /// Encoded `nonce || ciphertext`, ready for the relay
    pub payload: String,
}

/// Encrypt `plaintext` under a fresh key, nonce and identifier.
///
/// # Errors
///
/// - `PayloadTooLarge`: plaintext above the default ceiling
/// - `EntropyUnavailable`: OS RNG failure
pub fn encrypt_document(plaintext: &str) -> Result<EncryptedDocument, CryptoError> {
    encrypt_document_with(&AeadCodec::default(), &OsEntropy, plaintext)
}

/// [`encrypt_document`] with an explicit codec and entropy source.
///
/// The size check runs first, so oversized input consumes no entropy.
pub fn encrypt_document_with(
    codec: &AeadCodec,
    entropy: &impl EntropySource,
    plaintext: &str,
) -> Result<EncryptedDocument, CryptoError> {
    codec.check_len(plaintext.len())?;

    let key = generate_key_from(entropy)?;
    let nonce = generate_nonce_from(entropy)?;
    let doc_id = generate_document_id_from(entropy)?;

    let ciphertext = codec.encrypt(plaintext.as_bytes(), nonce.as_bytes(), key.as_bytes())?;
    let payload = payload::encode(&nonce, &ciphertext);

    Ok(EncryptedDocument { doc_id, key, payload })
}

/// Decode and decrypt a stored payload.
///
/// # Errors
///
/// - `MalformedPayload`: payload encoding invalid, or plaintext is not UTF-8
/// - `AuthenticationFailed`: wrong key or corrupted data
pub fn decrypt_document(
    payload: &str,
    key: &SymmetricKey,
) -> Result<Zeroizing<String>, CryptoError> {
    decrypt_document_with(&AeadCodec::default(), payload, key)
}

/// [`decrypt_document`] with an explicit codec.
pub fn decrypt_document_with(
    codec: &AeadCodec,
    payload: &str,
    key: &SymmetricKey,
) -> Result<Zeroizing<String>, CryptoError> {
    let decoded = payload::decode(payload)?;
    let mut plaintext =
        codec.decrypt(&decoded.ciphertext, decoded.nonce.as_bytes(), key.as_bytes())?;

    match String::from_utf8(std::mem::take(&mut *plaintext)) {
        Ok(text) => Ok(Zeroizing::new(text)),
        Err(err) => {
            drop(Zeroizing::new(err.into_bytes()));
            Err(CryptoError::MalformedPayload { reason: "plaintext is not utf-8" })
        },
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use noslock_crypto::{KEY_SIZE, NONCE_SIZE, Nonce};

    use super::*;

    /// Counts bytes handed out so tests can see whether entropy was touched.
    #[derive(Default)]
    struct CountingEntropy {
        bytes: Cell<usize>,
    }

    impl EntropySource for CountingEntropy {
        fn fill_bytes(&self, buf: &mut [u8]) -> Result<(), CryptoError> {
            OsEntropy.fill_bytes(buf)?;
            self.bytes.set(self.bytes.get() + buf.len());
            Ok(())
        }
    }

    #[test]
    fn hello_roundtrip() {
        let document = encrypt_document("Hello, Noslock!").unwrap();
        let plaintext = decrypt_document(&document.payload, &document.key).unwrap();

        assert_eq!(plaintext.as_str(), "Hello, Noslock!");
    }

    #[test]
    fn zero_key_does_not_open() {
        let document = encrypt_document("Hello, Noslock!").unwrap();
        let zero = SymmetricKey::from_bytes([0u8; KEY_SIZE]);

        assert_eq!(
            decrypt_document(&document.payload, &zero).unwrap_err(),
            CryptoError::AuthenticationFailed
        );
    }

    #[test]
    fn empty_and_unicode_roundtrip() {
        for text in ["", "héllo wörld", "🔐 ключ 鍵"] {
            let document = encrypt_document(text).unwrap();
            assert_eq!(decrypt_document(&document.payload, &document.key).unwrap().as_str(), text);
        }
    }

    #[test]
    fn oversized_input_consumes_no_entropy() {
        let entropy = CountingEntropy::default();
        let codec = AeadCodec::new(4);

        let result = encrypt_document_with(&codec, &entropy, "hello");

        assert_eq!(result.unwrap_err(), CryptoError::PayloadTooLarge { len: 5, max: 4 });
        assert_eq!(entropy.bytes.get(), 0);
    }

    #[test]
    fn fresh_material_per_document() {
        let a = encrypt_document("same").unwrap();
        let b = encrypt_document("same").unwrap();

        assert_ne!(a.doc_id, b.doc_id);
        assert_ne!(a.key, b.key);
        assert_ne!(a.payload, b.payload);
    }

    #[test]
    fn non_utf8_plaintext_is_malformed() {
        let key = SymmetricKey::from_bytes([5u8; KEY_SIZE]);
        let nonce = Nonce::from_bytes([6u8; NONCE_SIZE]);
        let ciphertext =
            AeadCodec::default().encrypt(&[0xFF, 0xFE], nonce.as_bytes(), key.as_bytes()).unwrap();

        let result = decrypt_document(&payload::encode(&nonce, &ciphertext), &key);

        assert_eq!(
            result.unwrap_err(),
            CryptoError::MalformedPayload { reason: "plaintext is not utf-8" }
        );
    }
}
