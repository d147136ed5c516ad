//! tp - AI trip planner
//!
//! Runs the HTTP API server, or talks to a running one.

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::fmt::writer::MakeWriterExt;

use tripplanner::cli::{Cli, Command, plan_request};
use tripplanner::client::{PlannerClient, render_health, render_plan};
use tripplanner::config::Config;
use tripplanner::llm::create_client;
use tripplanner::maps::{GoogleMapsClient, PlacesLookup};
use tripplanner::narrative::NarrativeGenerator;
use tripplanner::planner::TripPlanner;
use tripplanner::prompts::PromptLoader;
use tripplanner::ratelimit::RateLimiter;
use tripplanner::{AppState, router};

fn parse_level(s: &str) -> tracing::Level {
    match s.to_uppercase().as_str() {
        "TRACE" => tracing::Level::TRACE,
        "DEBUG" => tracing::Level::DEBUG,
        "INFO" => tracing::Level::INFO,
        "WARN" | "WARNING" => tracing::Level::WARN,
        "ERROR" => tracing::Level::ERROR,
        _ => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
            tracing::Level::INFO
        }
    }
}

fn setup_logging(cli_log_level: Option<&str>, config: &Config) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripplanner")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config app.log-level > DEBUG when app.debug > INFO
    let level = match cli_log_level.or(config.app.log_level.as_deref()) {
        Some(s) => parse_level(s),
        None if config.app.debug => tracing::Level::DEBUG,
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("tripplanner.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr.and(log_file))
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.log_level.as_deref(), &config).context("Failed to setup logging")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Serve { bind }) => {
            debug!(?bind, "main: matched Serve command");
            cmd_serve(&config, bind).await
        }
        Some(Command::Plan {
            from,
            to,
            travelers,
            date,
            duration,
            interests,
            server,
            json,
        }) => {
            debug!(%from, %to, %server, "main: matched Plan command");
            let body = plan_request(&from, &to, travelers, &date, duration, &interests);
            cmd_plan(&server, body, json).await
        }
        Some(Command::Health { server }) => {
            debug!(%server, "main: matched Health command");
            cmd_health(&server).await
        }
        None => {
            debug!("main: no command specified, serving");
            cmd_serve(&config, None).await
        }
    }
}

/// Build the collaborators and run the API server until Ctrl-C
async fn cmd_serve(config: &Config, bind: Option<String>) -> Result<()> {
    debug!("cmd_serve: called");
    config.validate().context("Invalid configuration")?;

    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    let prompts = PromptLoader::new(config.prompts.dir.as_ref());
    let narrative = NarrativeGenerator::new(llm, prompts, config.llm.max_tokens);

    let maps = GoogleMapsClient::from_config(&config.maps).context("Failed to create maps client")?;
    let mut places = PlacesLookup::new(Arc::new(maps), &config.maps);
    if config.cache.enabled {
        places = places.with_cache(config.cache.ttl());
    }

    let planner = TripPlanner::new(narrative, Arc::new(places), &config.planner);
    let mut state = AppState::new(Arc::new(planner));
    if config.rate_limit.enabled {
        state = state.with_rate_limiter(RateLimiter::from_config(&config.rate_limit));
    }

    let app = router(state, config.server.cors);
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .context(format!("Failed to bind {}", bind))?;

    info!(
        %bind,
        environment = %config.app.environment,
        llm = %config.llm.provider,
        model = %config.llm.model,
        cache = config.cache.enabled,
        rate_limit = config.rate_limit.enabled,
        "Trip planner API listening"
    );

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .await
        .context("Server error")?;

    info!("Trip planner API stopped");
    Ok(())
}

/// Submit a plan request to a running server and print the result
async fn cmd_plan(server: &str, body: tripplanner::TripRequestBody, json: bool) -> Result<()> {
    debug!(%server, json, "cmd_plan: called");
    let client = PlannerClient::new(server)?;

    if !json {
        eprintln!("{}", "Planning trip, this can take a minute...".dimmed());
    }
    let plan = client.plan(&body).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", render_plan(&plan));
    }
    Ok(())
}

/// Print the server's diagnostics report
async fn cmd_health(server: &str) -> Result<()> {
    debug!(%server, "cmd_health: called");
    let client = PlannerClient::new(server)?;
    let report = client.health().await?;
    print!("{}", render_health(&report));
    Ok(())
}
