mod auth;
mod candidates;
mod config;
mod dashboard;
mod db;
mod errors;
mod jobs;
mod models;
mod pipeline;
mod query;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::models::NewAgent;
use crate::auth::password::hash_password;
use crate::auth::repository::UserRepository;
use crate::config::{database_url_from_env, Config};
use crate::db::{create_pool, run_migrations};
use crate::models::enums::Role;
use crate::routes::build_router;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "cube-api")]
#[command(about = "Cube Agent recruiting CRM API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

// Agents have no sign-up flow; accounts are provisioned from the command line.
#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Read a password from stdin and print its Argon2id hash
    HashPassword,
    /// Create an agent account; the password is read from stdin
    CreateAgent {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        organization: String,
        #[arg(long)]
        phone: Option<String>,
        /// agent, company or admin
        #[arg(long, default_value = "agent", value_parser = parse_role)]
        role: Role,
    },
}

fn parse_role(value: &str) -> std::result::Result<Role, String> {
    Role::parse(value).ok_or_else(|| format!("unknown role '{value}' (expected agent, company or admin)"))
}

#[tokio::main]
async fn main() -> Result<()> {
    match Cli::parse().command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::HashPassword => {
            let password = read_password()?;
            println!("{}", hash(&password)?);
            Ok(())
        }
        Command::CreateAgent {
            email,
            name,
            organization,
            phone,
            role,
        } => {
            let password = read_password()?;
            let agent = NewAgent {
                email,
                name,
                organization,
                phone,
                role,
                password_hash: Some(hash(&password)?),
            };
            create_agent(agent).await
        }
    }
}

fn init_tracing(rust_log: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                rust_log,
                rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;
    init_tracing(&config.rust_log);

    info!("Starting Cube API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.database_max_connections).await?;
    run_migrations(&db).await?;

    let state = AppState {
        db: db.clone(),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Database pool closed, bye");
    Ok(())
}

async fn create_agent(agent: NewAgent) -> Result<()> {
    let database_url = database_url_from_env()?;
    init_tracing("info");

    let db = create_pool(&database_url, 1).await?;
    run_migrations(&db).await?;

    let created = UserRepository::create(&db, &agent)
        .await
        .with_context(|| format!("failed to create agent '{}'", agent.email))?;
    db.close().await;

    println!("{}", created.id);
    Ok(())
}

/// Reads one password line from stdin.
fn read_password() -> Result<String> {
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']);
    anyhow::ensure!(!password.is_empty(), "no password given on stdin");
    Ok(password.to_string())
}

fn hash(password: &str) -> Result<String> {
    hash_password(password).map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))
}

/// Permissive when no origin is configured (local development).
fn cors_layer(config: &Config) -> Result<CorsLayer> {
    let Some(origin) = &config.cors_allow_origin else {
        return Ok(CorsLayer::permissive());
    };
    let origin: HeaderValue = origin
        .parse()
        .with_context(|| format!("CORS_ALLOW_ORIGIN is not a valid origin: '{origin}'"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_serves() {
        let cli = Cli::try_parse_from(["cube-api"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_create_agent_arguments() {
        let cli = Cli::try_parse_from([
            "cube-api",
            "create-agent",
            "--email",
            "akira@cube.example",
            "--name",
            "Akira",
            "--organization",
            "Cube Agency",
            "--role",
            "ADMIN",
        ])
        .unwrap();

        match cli.command {
            Some(Command::CreateAgent { email, role, phone, .. }) => {
                assert_eq!(email, "akira@cube.example");
                assert_eq!(role, Role::Admin);
                assert_eq!(phone, None);
            }
            _ => panic!("expected create-agent"),
        }
    }

    #[test]
    fn test_create_agent_rejects_unknown_role() {
        let result = Cli::try_parse_from([
            "cube-api",
            "create-agent",
            "--email",
            "a@cube.example",
            "--name",
            "A",
            "--organization",
            "Cube",
            "--role",
            "owner",
        ]);
        assert!(result.is_err());
    }
}
