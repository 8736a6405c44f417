use std::fmt::Write as _;

use clap::{Parser, Subcommand};
use client::net::config::{DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
use client::{ClientBuildError, ClientConfig, ClientTimeouts, HttpAuthApi, LoginController, LoginError, SessionState};
use tokio::runtime::Handle;
use wire::MapSeed;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("could not build http client: {0}")]
    ClientBuild(#[from] ClientBuildError),
    #[error("request failed: {0}")]
    Request(#[from] LoginError),
    #[error("invalid input")]
    InvalidInput,
    #[error("login failed: {0}")]
    LoginFailed(String),
    #[error("login did not settle: {0}")]
    Interrupted(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "auth-cli", about = "Login API client and session controller driver")]
struct Cli {
    #[arg(long, env = "AUTH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "AUTH_CONNECT_TIMEOUT_SECS", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,

    #[arg(long, env = "AUTH_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the liveness payload.
    Ping,
    /// Run one login attempt through the session controller.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = ClientConfig::new(&cli.base_url).with_timeouts(ClientTimeouts {
        connect_secs: cli.connect_timeout_secs,
        request_secs: cli.request_timeout_secs,
    });

    match cli.command {
        Command::Ping => run_ping(config).await,
        Command::Login { email, password } => run_login(config, &email, &password).await,
    }
}

async fn run_ping(config: ClientConfig) -> Result<(), CliError> {
    let api = HttpAuthApi::new(config)?;
    let info = api.service_info().await?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

async fn run_login(config: ClientConfig, email: &str, password: &str) -> Result<(), CliError> {
    let controller = LoginController::from_config(config, Handle::current())?;

    let Some(handle) = controller.login(email, password) else {
        for error in [controller.email_error(), controller.password_error()].into_iter().flatten() {
            eprintln!("{error}");
        }
        return Err(CliError::InvalidInput);
    };
    println!("{}", describe_state(&controller.state()));

    handle.await.map_err(|e| CliError::Interrupted(e.to_string()))?;
    let state = controller.state();
    println!("{}", describe_state(&state));

    match state {
        SessionState::Succeeded(_) => {
            if let Some(seed) = controller.map_seed() {
                print!("{}", render_map_seed(&seed));
            }
            Ok(())
        }
        SessionState::Failed(message) => Err(CliError::LoginFailed(message)),
        other => Err(CliError::Interrupted(describe_state(&other))),
    }
}

fn describe_state(state: &SessionState) -> String {
    match state {
        SessionState::Idle => "idle".to_owned(),
        SessionState::Submitting => "submitting".to_owned(),
        SessionState::Succeeded(user) => format!("succeeded: {} <{}> (id {})", user.display_name, user.email, user.id),
        SessionState::Failed(message) => format!("failed: {message}"),
    }
}

fn render_map_seed(seed: &MapSeed) -> String {
    let mut out = format!(
        "map center {:.6}, {:.6} zoom {}\n",
        seed.center_latitude, seed.center_longitude, seed.zoom
    );
    for marker in &seed.markers {
        let _ = writeln!(
            out,
            "  marker {} \"{}\" at {:.6}, {:.6}",
            marker.id, marker.title, marker.latitude, marker.longitude
        );
    }
    out
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
