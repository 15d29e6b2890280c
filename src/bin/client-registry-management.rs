//! Client registry management CLI.
//!
//! Creates, inspects and deletes OAuth client registrations on a running
//! registry server through its HTTP API.
//!
//! ## Usage Examples
//!
//! ```bash
//! client-registry-management --base-url http://localhost:8080 create \
//!   --name "My OAuth Client" \
//!   --redirect-uri "http://localhost:3000/callback" \
//!   --grant-type authorization_code \
//!   --response-type code \
//!   --scope "read write"
//!
//! client-registry-management get --client-id "client_id_here"
//!
//! client-registry-management delete --client-id "client_id_here"
//! ```
//!
//! `REGISTRY_BASE_URL` may be used instead of `--base-url`.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Network or output error
//! - 2: The registry rejected the request

use clap::{Args, Parser, Subcommand, ValueEnum};
use client_registry::{
    errors::ServiceError,
    http::HttpClientService,
    registry::{Client, ClientService, types::GRANT_TYPE_AUTHORIZATION_CODE},
};
use serde::Serialize;
use std::process;

/// Main CLI application structure
#[derive(Parser)]
#[command(
    name = "client-registry-management",
    about = "OAuth client registry management CLI",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Base URL of the registry server
    #[arg(long, env = "REGISTRY_BASE_URL", default_value = "http://localhost:8080")]
    base_url: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// JSON formatted output
    Json,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Register a new OAuth client
    Create(CreateArgs),
    /// Get an existing client
    Get(ClientIdArgs),
    /// Delete an existing client
    Delete(ClientIdArgs),
}

/// Arguments for client registration
#[derive(Args)]
struct CreateArgs {
    /// Human-readable name for the client
    #[arg(long)]
    name: String,

    /// OAuth redirect URI
    #[arg(long = "redirect-uri", default_value = "")]
    redirect_uri: String,

    /// OAuth grant type
    #[arg(long = "grant-type", default_value = GRANT_TYPE_AUTHORIZATION_CODE)]
    grant_type: String,

    /// OAuth response type
    #[arg(long = "response-type", default_value = "code")]
    response_type: String,

    /// OAuth scopes (space-separated)
    #[arg(long, default_value = "")]
    scope: String,

    /// Register the client as public
    #[arg(long)]
    public: bool,
}

/// Arguments identifying an existing client
#[derive(Args)]
struct ClientIdArgs {
    /// Client ID
    #[arg(long, env = "REGISTRY_CLIENT_ID")]
    client_id: String,
}

/// Application errors
#[derive(Debug, thiserror::Error)]
enum AppError {
    /// The registry could not be reached, or answered unreadably
    #[error("Network error: {0}")]
    Network(ServiceError),
    /// The registry answered with an error
    #[error("Client management error: {0}")]
    ClientManagement(ServiceError),
    /// Output could not be written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Transport(_) => AppError::Network(err),
            _ => AppError::ClientManagement(err),
        }
    }
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::Network(_) | AppError::Json(_) => 1,
            AppError::ClientManagement(_) => 2,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli).await {
        eprintln!("Error: {}", err);
        process::exit(err.exit_code());
    }
}

async fn run(cli: &Cli) -> Result<(), AppError> {
    let service = HttpClientService::new(reqwest::Client::new(), &cli.base_url);

    match &cli.command {
        Commands::Create(args) => {
            if cli.verbose {
                eprintln!("Registering new OAuth client with {}", cli.base_url);
            }
            let client = Client {
                name: args.name.clone(),
                redirect_uri: args.redirect_uri.clone(),
                grant_type: args.grant_type.clone(),
                response_type: args.response_type.clone(),
                scope: args.scope.clone(),
                public: args.public,
                ..Default::default()
            };
            let created = service.create_client(client).await?;
            print_output(cli, &created)
        }
        Commands::Get(args) => {
            if cli.verbose {
                eprintln!("Fetching client {} from {}", args.client_id, cli.base_url);
            }
            let client = service.get_client(&args.client_id).await?;
            print_output(cli, &client)
        }
        Commands::Delete(args) => {
            if cli.verbose {
                eprintln!("Deleting client {} from {}", args.client_id, cli.base_url);
            }
            service.delete_client(&args.client_id).await?;
            print_output(cli, &serde_json::json!({ "deleted": args.client_id }))
        }
    }
}

fn print_output<T: Serialize>(cli: &Cli, value: &T) -> Result<(), AppError> {
    let output = match cli.format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(value)?,
    };
    println!("{}", output);
    Ok(())
}
