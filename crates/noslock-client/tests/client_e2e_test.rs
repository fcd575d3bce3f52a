//! End-to-end tests for the create and open flows
//!
//! Runs the full stack (generator, AEAD, payload codec, links, relay pool)
//! against in-memory and on-disk relays and checks that every failure lands
//! on the right user-facing outcome.

use std::{sync::Arc, time::Duration};

use noslock_client::{
    ClientConfig, ClientError, FileRelay, LinkStyle, MemoryRelay, PasteClient, PoolConfig, Relay,
    UserFacing, ViewState,
};
use noslock_crypto::{CryptoError, DocumentId, EntropySource, SymmetricKey};
use noslock_relay::{ChaoticRelay, RelayError};
use tempfile::tempdir;

fn config() -> ClientConfig {
    ClientConfig { pool: PoolConfig { timeout: Duration::from_secs(5) }, ..Default::default() }
}

fn memory_relays(count: usize) -> Vec<MemoryRelay> {
    (0..count).map(|i| MemoryRelay::new(format!("relay-{i}"))).collect()
}

fn as_dyn(relays: &[MemoryRelay]) -> Vec<Arc<dyn Relay>> {
    relays.iter().map(|r| Arc::new(r.clone()) as Arc<dyn Relay>).collect()
}

fn with_key(url: &str, key: &SymmetricKey) -> String {
    let (locator, _) = url.split_once('#').expect("fragment");
    format!("{locator}#{}", key.to_hex().as_str())
}

struct BrokenEntropy;

impl EntropySource for BrokenEntropy {
    fn fill_bytes(&self, _buf: &mut [u8]) -> Result<(), CryptoError> {
        Err(CryptoError::EntropyUnavailable)
    }
}

#[tokio::test]
async fn hello_noslock_roundtrip() {
    let relays = memory_relays(3);
    let client = PasteClient::new(as_dyn(&relays), config());

    let link = client.create("Hello, Noslock!").await.unwrap();
    assert!(link.url.starts_with("noslock://"));

    let plaintext = client.open(&link.url).await.unwrap();
    assert_eq!(plaintext.as_str(), "Hello, Noslock!");
}

#[tokio::test]
async fn all_zero_key_fails_to_decrypt() {
    let client = PasteClient::new(as_dyn(&memory_relays(2)), config());
    let link = client.create("Hello, Noslock!").await.unwrap();

    let forged = with_key(&link.url, &SymmetricKey::from_bytes([0u8; 32]));
    let err = client.open(&forged).await.unwrap_err();

    assert_eq!(err, ClientError::Crypto(CryptoError::AuthenticationFailed));
    assert_eq!(err.user_facing(), UserFacing::DecryptFailed);
}

#[tokio::test]
async fn reader_with_separate_client_opens_paste() {
    let relays = memory_relays(2);
    let writer = PasteClient::new(as_dyn(&relays), config());
    let reader = PasteClient::new(as_dyn(&relays[1..]), config());

    let link = writer.create("shared across clients").await.unwrap();

    assert_eq!(reader.open(&link.url).await.unwrap().as_str(), "shared across clients");
}

#[tokio::test]
async fn web_links_roundtrip() {
    let config = ClientConfig {
        link_style: LinkStyle::Web { origin: "https://paste.example".to_string() },
        ..config()
    };
    let client = PasteClient::new(as_dyn(&memory_relays(1)), config);

    let link = client.create("via the web").await.unwrap();
    assert!(link.url.starts_with(&format!("https://paste.example/{}#", link.doc_id)));

    assert_eq!(client.open(&link.url).await.unwrap().as_str(), "via the web");
}

#[tokio::test]
async fn unknown_document_is_not_found() {
    let client = PasteClient::new(as_dyn(&memory_relays(2)), config());
    let url = format!("noslock://{}#{}", "a".repeat(64), "12".repeat(32));

    let err = client.open(&url).await.unwrap_err();

    assert_eq!(err, ClientError::Relay(RelayError::NotFound));
    assert_eq!(err.user_facing(), UserFacing::NotFound);
}

#[tokio::test]
async fn structurally_invalid_links_are_invalid_link() {
    let relays = memory_relays(1);
    let client = PasteClient::new(as_dyn(&relays), config());
    let doc = "a".repeat(64);

    for url in [
        format!("noslock://{doc}"),
        format!("noslock://{doc}#{}", "12".repeat(16)),
        format!("noslock://{doc}#{}", "zz".repeat(32)),
        format!("noslock://not-an-id#{}", "12".repeat(32)),
    ] {
        let err = client.open(&url).await.unwrap_err();
        assert_eq!(err.user_facing(), UserFacing::InvalidLink, "{url}");
    }
}

#[tokio::test]
async fn corrupted_record_is_decrypt_failure() {
    let relays = memory_relays(1);
    let client = PasteClient::new(as_dyn(&relays), config());
    let link = client.create("soon to be corrupted").await.unwrap();

    relays[0].insert_raw(link.doc_id, "@@not base64@@");
    let err = client.open(&link.url).await.unwrap_err();

    assert!(matches!(err, ClientError::Crypto(CryptoError::MalformedPayload { .. })));
    assert_eq!(err.user_facing(), UserFacing::DecryptFailed);
}

#[tokio::test]
async fn unreachable_relays_are_network_error() {
    let relays: Vec<Arc<dyn Relay>> = vec![
        Arc::new(ChaoticRelay::new(MemoryRelay::new("a"), 1.0)),
        Arc::new(ChaoticRelay::new(MemoryRelay::new("b"), 1.0)),
    ];
    let client = PasteClient::new(relays, config());

    let create = client.create("nobody hears this").await.unwrap_err();
    assert_eq!(create.user_facing(), UserFacing::NetworkError);
    assert!(create.is_retryable());

    let url = format!("noslock://{}#{}", "b".repeat(64), "34".repeat(32));
    let open = client.open(&url).await.unwrap_err();
    assert_eq!(open.user_facing(), UserFacing::NetworkError);
}

#[tokio::test]
async fn relays_refusing_record_size_is_too_large() {
    let relays: Vec<Arc<dyn Relay>> = vec![
        Arc::new(MemoryRelay::with_record_limit("small-a", 10)),
        Arc::new(MemoryRelay::with_record_limit("small-b", 10)),
    ];
    let client = PasteClient::new(relays, config());

    let err = client.create("hello").await.unwrap_err();

    assert!(matches!(err, ClientError::Relay(RelayError::RecordTooLarge { max: 10, .. })));
    assert_eq!(err.user_facing(), UserFacing::TooLarge);
    assert!(!err.is_retryable());
}

#[tokio::test(start_paused = true)]
async fn abandoned_create_publishes_nothing() {
    let slow =
        ChaoticRelay::new(MemoryRelay::new("slow"), 0.0).with_latency(Duration::from_secs(2));
    let client = PasteClient::new(vec![Arc::new(slow.clone()) as Arc<dyn Relay>], config());

    let create = client.create("abandoned");
    let abandoned = tokio::time::timeout(Duration::from_secs(1), create).await;
    assert!(abandoned.is_err());
    drop(client);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(slow.inner().is_empty());
}

#[tokio::test]
async fn oversized_text_rejected_before_network() {
    let relay = ChaoticRelay::new(MemoryRelay::new("watched"), 0.0);
    let config = ClientConfig { max_plaintext_len: 16, ..config() };
    let client = PasteClient::new(vec![Arc::new(relay.clone()) as Arc<dyn Relay>], config);

    let err = client.create(&"x".repeat(17)).await.unwrap_err();

    assert_eq!(err, ClientError::Crypto(CryptoError::PayloadTooLarge { len: 17, max: 16 }));
    assert_eq!(err.user_facing(), UserFacing::TooLarge);
    assert_eq!(relay.operation_count(), 0);
}

#[tokio::test]
async fn entropy_failure_aborts_before_publish() {
    let relay = ChaoticRelay::new(MemoryRelay::new("watched"), 0.0);
    let relays: Vec<Arc<dyn Relay>> = vec![Arc::new(relay.clone())];
    let client = PasteClient::with_entropy(relays, config(), BrokenEntropy);

    let err = client.create("never published").await.unwrap_err();

    assert_eq!(err.user_facing(), UserFacing::CryptoUnavailable);
    assert_eq!(relay.operation_count(), 0);
}

#[tokio::test]
async fn sixty_thousand_characters_roundtrip() {
    let client = PasteClient::new(as_dyn(&memory_relays(2)), config());
    let text: String = (0..60_000).map(|i| char::from(b'!' + (i % 90) as u8)).collect();

    let start = std::time::Instant::now();
    let link = client.create(&text).await.unwrap();
    let opened = client.open(&link.url).await.unwrap();

    assert_eq!(opened.as_str(), text);
    assert!(start.elapsed() < Duration::from_secs(10));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_flows_do_not_interfere() {
    let client = Arc::new(PasteClient::new(as_dyn(&memory_relays(3)), config()));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                let text = format!("paste number {i}");
                let link = client.create(&text).await.unwrap();
                (text, link)
            })
        })
        .collect();

    let mut ids = std::collections::HashSet::new();
    for handle in handles {
        let (text, link) = handle.await.unwrap();
        assert!(ids.insert(link.doc_id));
        assert_eq!(client.open(&link.url).await.unwrap().as_str(), text);
    }
}

#[tokio::test]
async fn pastes_survive_relay_restart() {
    let dir = tempdir().unwrap();
    let paths = [dir.path().join("a.redb"), dir.path().join("b.redb")];

    let url = {
        let relays: Vec<Arc<dyn Relay>> = paths
            .iter()
            .map(|p| Arc::new(FileRelay::open(p).unwrap()) as Arc<dyn Relay>)
            .collect();
        let client = PasteClient::new(relays, config());
        let link = client.create("persisted").await.unwrap();
        // Let the detached replication finish before the nodes close
        tokio::time::sleep(Duration::from_millis(200)).await;
        link.url.to_string()
    };

    let reopened: Vec<Arc<dyn Relay>> = vec![Arc::new(FileRelay::open(&paths[1]).unwrap())];
    let client = PasteClient::new(reopened, config());

    assert_eq!(client.open(&url).await.unwrap().as_str(), "persisted");
}

#[tokio::test]
async fn view_state_follows_flow_outcome() {
    let client = PasteClient::new(as_dyn(&memory_relays(1)), config());

    let created = client.create("state").await;
    assert_eq!(ViewState::finished(&created), ViewState::Ready);

    let missing = client
        .open(&format!("noslock://{}#{}", DocumentId::from_bytes([1; 32]), "00".repeat(32)))
        .await;
    assert_eq!(ViewState::finished(&missing), ViewState::Failed(UserFacing::NotFound));
}
