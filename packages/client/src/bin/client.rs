//! Terminal chat client for Besedka.
//!
//! Registers a new account when no credential is given, then connects and sends lines
//! typed on stdin. `@name text` goes to one person, anything else to everyone.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval),
//! unless the server rejected the credential or another connection took over.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin besedka-client -- --name alice
//! cargo run --bin besedka-client -- -n alice -c 0123456789abcdef0123456789abcdef
//! ```

use clap::Parser;

use besedka_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "besedka-client")]
#[command(about = "Terminal chat client for the Besedka messaging server", long_about = None)]
struct Args {
    /// Name to chat as (2-30 characters)
    #[arg(short = 'n', long)]
    name: String,

    /// Credential issued at registration; a new account is registered when omitted
    #[arg(short = 'c', long, env = "BESEDKA_CREDENTIAL")]
    credential: Option<String>,

    /// Server base URL
    #[arg(short = 's', long, env = "BESEDKA_SERVER", default_value = "http://127.0.0.1:8000")]
    server: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(&["besedka_client", "besedka_shared"], "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = besedka_client::run_client(args.server, args.name, args.credential).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
