//! zelid-auth CLI - sign a message, or log in against a verification service

use std::process::ExitCode;

use clap::Parser;
use secrecy::{ExposeSecret, SecretString};
use tracing_subscriber::EnvFilter;
use zelid_auth::{
    config::{API_URL_ENV, DEFAULT_API_URL, DEFAULT_TIMEOUT_MS, TIMEOUT_ENV},
    sign_message, AuthClient, AuthConfig,
};

/// Sign a message with a WIF private key using the Bitcoin signed-message scheme
#[derive(Debug, Parser)]
#[command(name = "zelid-auth", version, about)]
struct Cli {
    /// WIF-encoded private key (Bitcoin mainnet)
    private_key: String,

    /// Message to sign; the login phrase when --zelid is given
    message: String,

    /// Verify the signed phrase for this ZelID and print the auth header
    #[arg(long, value_name = "ID")]
    zelid: Option<String>,

    /// Verification service base URL
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Request timeout in milliseconds
    #[arg(long, env = TIMEOUT_ENV, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let private_key = SecretString::new(cli.private_key);

    match cli.zelid {
        None => match sign_message(&cli.message, private_key.expose_secret()) {
            Ok(signature) => {
                println!("Signature: {signature}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error signing message: {e}");
                ExitCode::FAILURE
            }
        },
        Some(zelid) => {
            let config = AuthConfig::new(cli.api_url).with_timeout_ms(cli.timeout_ms);
            let client = match AuthClient::new(config) {
                Ok(client) => client,
                Err(e) => {
                    eprintln!("Error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            match client
                .get_auth_header(&zelid, &private_key, &cli.message)
                .await
            {
                Ok(header) => {
                    println!("{header}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error verifying login: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
