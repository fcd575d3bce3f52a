//! Capability link encoding and parsing.
//!
//! A link names the stored document and carries its key:
//!
//! ```text
//! custom scheme:  noslock://<docId>#<keyHex>
//! web:            <origin>/<docId>#<keyHex>
//! ```
//!
//! The key only ever lives in the fragment, which browsers never send to a
//! server. The document identifier lives in the scheme-specific part or the
//! last path segment.

use noslock_crypto::{DocumentId, HEX_LEN, KEY_SIZE, SymmetricKey, Zeroizing};

use crate::error::LinkError;

/// URI scheme of the custom-scheme form
pub const SCHEME: &str = "noslock";

const SCHEME_PREFIX: &str = "noslock://";

/// Which link form to emit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LinkStyle {
    /// `noslock://<docId>#<keyHex>`
    #[default]
    Scheme,
    /// `<origin>/<docId>#<keyHex>`
    Web {
        /// Origin such as `https://paste.example`, without a trailing slash
        origin: String,
    },
}

/// Parsed capability link: where the document is and how to open it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    /// Relay lookup key
    pub doc_id: DocumentId,
    /// Decryption key, wiped on drop
    pub key: SymmetricKey,
}

/// Build a custom-scheme link.
pub fn build(doc_id: &DocumentId, key: &SymmetricKey) -> Zeroizing<String> {
    build_with_style(&LinkStyle::Scheme, doc_id, key)
}

/// Build a web link under `origin`.
pub fn build_web(origin: &str, doc_id: &DocumentId, key: &SymmetricKey) -> Zeroizing<String> {
    build_with_style(&LinkStyle::Web { origin: origin.to_string() }, doc_id, key)
}

/// Build a link in the given style.
///
/// The result contains the key and is wiped when dropped.
pub fn build_with_style(
    style: &LinkStyle,
    doc_id: &DocumentId,
    key: &SymmetricKey,
) -> Zeroizing<String> {
    let key_hex = key.to_hex();
    let mut url = Zeroizing::new(String::with_capacity(96 + HEX_LEN * 2));

    match style {
        LinkStyle::Scheme => url.push_str(SCHEME_PREFIX),
        LinkStyle::Web { origin } => {
            url.push_str(origin.trim_end_matches('/'));
            url.push('/');
        },
    }
    url.push_str(&doc_id.to_hex());
    url.push('#');
    url.push_str(&key_hex);

    url
}

/// Parse either link form.
///
/// # Errors
///
/// In order of checking:
/// - `MissingKeyFragment`: no `#`
/// - `InvalidKeyLength`: fragment is not 64 characters
/// - `InvalidKeyFormat`: fragment is not hex (either case)
/// - `InvalidDocumentId`: identifier position empty or not 64 hex characters
pub fn parse(url: &str) -> Result<Capability, LinkError> {
    let url = url.trim();
    let Some((locator, fragment)) = url.split_once('#') else {
        return Err(LinkError::MissingKeyFragment);
    };

    let key = parse_key(fragment)?;
    let doc_id = locate_document_id(locator)?
        .parse::<DocumentId>()
        .map_err(|_| LinkError::InvalidDocumentId)?;

    Ok(Capability { doc_id, key })
}

fn parse_key(fragment: &str) -> Result<SymmetricKey, LinkError> {
    if fragment.len() != HEX_LEN {
        return Err(LinkError::InvalidKeyLength { actual: fragment.len() });
    }
    if !fragment.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(LinkError::InvalidKeyFormat);
    }

    let mut bytes = Zeroizing::new([0u8; KEY_SIZE]);
    hex::decode_to_slice(fragment, &mut *bytes).map_err(|_| LinkError::InvalidKeyFormat)?;
    Ok(SymmetricKey::from_bytes(*bytes))
}

/// Slice out the identifier: the scheme-specific part of a custom-scheme
/// link, or the last path segment of a web link.
fn locate_document_id(locator: &str) -> Result<&str, LinkError> {
    if let Some(rest) = strip_scheme_prefix(locator) {
        return Ok(rest.trim_end_matches('/'));
    }

    let without_query = locator.split_once('?').map_or(locator, |(path, _)| path);
    let after_scheme =
        without_query.split_once("://").map_or(without_query, |(_, rest)| rest);

    // Authority first, then at least one path segment
    let Some((_, path)) = after_scheme.split_once('/') else {
        return Err(LinkError::InvalidDocumentId);
    };

    path.trim_end_matches('/').rsplit('/').next().ok_or(LinkError::InvalidDocumentId)
}

/// Scheme-specific part of a `noslock://` link. Schemes compare
/// case-insensitively.
fn strip_scheme_prefix(locator: &str) -> Option<&str> {
    let (prefix, rest) = locator.split_at_checked(SCHEME_PREFIX.len())?;
    prefix.eq_ignore_ascii_case(SCHEME_PREFIX).then_some(rest)
}
