use clap::{Parser, Subcommand};
use session_guard::SessionError;
use session_guard::api::ApiClient;
use session_guard::bootstrap::bootstrap;
use session_guard::config::GuardConfig;
use session_guard::guard::SessionGuard;
use session_guard::router::{MemoryRouter, Router};
use session_guard::session::{SessionContext, clear_session, persist_session};
use session_guard::store::FileStore;

#[derive(Parser, Debug)]
#[command(name = "session-guard", about = "Restore a persisted session and guard navigation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Navigate to each path in turn and print where it lands.
    Check {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Sign in and persist the returned session.
    Login {
        #[arg(long, env = "SESSION_USERNAME")]
        username: String,
        #[arg(long, env = "SESSION_PASSWORD")]
        password: String,
    },
    /// Forget the persisted session.
    Logout,
    /// List users with the restored credential.
    Users,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, code = e.error_code(), retryable = e.retryable(), "session-guard failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), SessionError> {
    let config = GuardConfig::from_env()?;
    let store = FileStore::new(&config.store_path);

    let mut ctx = SessionContext::new();
    let outcome = bootstrap(&store, &config.session_key, &mut ctx)?;
    tracing::info!(?outcome, authenticated = ctx.is_authenticated(), "session bootstrapped");

    match cli.command {
        Command::Check { paths } => {
            let mut router = MemoryRouter::new(config.routes.clone(), "/");
            router.install(SessionGuard::new(config.routes.clone(), store, config.session_key.clone()));
            for path in paths {
                let nav = router.navigate(&path)?;
                let marker = if nav.redirected() { "redirected" } else { "allowed" };
                println!("{path} -> {} ({marker})", nav.resolved);
            }
            println!("current: {}", router.current_path());
        }
        Command::Login { username, password } => {
            let client = ApiClient::new(&config.api_base_url, &ctx, config.timeouts)?;
            let session = client.login(&username, &password).await?;
            persist_session(&store, &config.session_key, &session)?;
            println!("logged in as {username}");
        }
        Command::Logout => {
            clear_session(&store, &config.session_key)?;
            println!("logged out");
        }
        Command::Users => {
            let client = ApiClient::new(&config.api_base_url, &ctx, config.timeouts)?;
            let users = client.list_users().await?;
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
    }

    Ok(())
}
