//! Noslock command-line client.
//!
//! # Usage
//!
//! ```bash
//! # Encrypt stdin and publish it, printing the share link
//! echo "Hello, Noslock!" | noslock --relay a.redb --relay b.redb put
//!
//! # Fetch and decrypt a paste
//! noslock --relay b.redb get 'noslock://<doc id>#<key>'
//! ```
//!
//! Logs go to stderr so stdout carries only the link or the plaintext.

use std::{
    io::{self, Read, Write},
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
    time::Duration,
};

use clap::{Parser, Subcommand};
use noslock_client::{
    ClientConfig, ClientError, FileRelay, LinkStyle, PasteClient, PoolConfig, Relay,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use zeroize::Zeroizing;

/// Noslock zero-knowledge pastebin client
#[derive(Parser, Debug)]
#[command(name = "noslock")]
#[command(about = "Share text through end-to-end encrypted capability links")]
#[command(version)]
struct Args {
    /// Relay database to publish to or fetch from (repeatable)
    #[arg(long = "relay", value_name = "PATH", required = true)]
    relays: Vec<PathBuf>,

    /// Seconds to wait for relays before giving up
    #[arg(long, default_value = "8")]
    timeout_secs: u64,

    /// Maximum plaintext size in bytes
    #[arg(long, default_value = "131072")]
    max_size: usize,

    /// Emit web links under this origin instead of `noslock://` links
    #[arg(long)]
    origin: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encrypt stdin, publish it and print the share link
    Put,
    /// Fetch and decrypt the paste behind a share link
    Get {
        /// Share link, including its `#key` fragment
        url: String,
    },
}

#[derive(Debug)]
enum CliError {
    Client(ClientError),
    Io(io::Error),
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        Self::Client(err)
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl Args {
    fn client_config(&self) -> ClientConfig {
        let link_style = match &self.origin {
            Some(origin) => LinkStyle::Web { origin: origin.clone() },
            None => LinkStyle::Scheme,
        };

        ClientConfig {
            max_plaintext_len: self.max_size,
            link_style,
            pool: PoolConfig { timeout: Duration::from_secs(self.timeout_secs) },
        }
    }

    fn open_relays(&self) -> Result<Vec<Arc<dyn Relay>>, ClientError> {
        self.relays
            .iter()
            .map(|path| Ok(Arc::new(FileRelay::open(path)?) as Arc<dyn Relay>))
            .collect()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Client(err)) => {
            tracing::debug!(error = %err, "flow failed");
            report(err.user_facing().message())
        },
        Err(CliError::Io(err)) => report(&err.to_string()),
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let client = PasteClient::new(args.open_relays()?, args.client_config());
    let max_size = args.max_size;
    let mut stdout = io::stdout().lock();

    match args.command {
        Command::Put => {
            let text = read_paste(io::stdin().lock(), max_size)?;
            let link = client.create(&text).await?;
            writeln!(stdout, "{}", link.url.as_str())?;
        },
        Command::Get { url } => {
            let plaintext = client.open(&url).await?;
            stdout.write_all(plaintext.as_bytes())?;
        },
    }

    stdout.flush()?;
    Ok(())
}

/// Read the whole paste into a buffer that is wiped on drop.
fn read_paste(mut reader: impl Read, max_size: usize) -> io::Result<Zeroizing<String>> {
    // Sized to the ceiling so accepted input never reallocates
    let mut text = Zeroizing::new(String::with_capacity(max_size));
    reader.read_to_string(&mut *text)?;
    Ok(text)
}

fn report(message: &str) -> ExitCode {
    let _ = writeln!(io::stderr().lock(), "error: {message}");
    ExitCode::FAILURE
}
