use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// carbie-web - Carbie marketing site and contact relay
#[derive(Parser)]
#[command(name = "carbie-web")]
#[command(about = "Marketing website and contact form backend for Carbie", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = carbie_web::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    carbie_web::observability::init_observability(
        "carbie-web",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        config.environment,
    )?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: carbie_web::config::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting carbie-web server...");

    let host = host_override.unwrap_or_else(|| config.server.host.clone());
    let port = port_override.unwrap_or(config.server.port);

    let mailer = carbie_web::mailer::SmtpMailer::new(&config.smtp)?;
    let app = carbie_web::create_app(config, Arc::new(mailer));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
