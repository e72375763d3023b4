//! CLI entry point for Pristup.
//!
//! This binary provides the `pristup` command with subcommands for the
//! interactive prompt, one-shot classification, the HTTP API, assistant
//! provisioning and a configuration check.

mod cli;
mod helpers;
mod repl;
mod settings;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use pristup_assistant::{AssistantClient, AssistantConfig, provision_assistant};
use pristup_web::WebServer;

use crate::cli::{Cli, Commands};
use crate::helpers::{build_analyzer, build_engine, init_tracing};
use crate::settings::Settings;

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            init_tracing("warn");
            let settings = Settings::load(&cli.config)?;
            let engine = build_engine(build_analyzer(&settings.analyzer)?);
            repl::cmd_run(engine).await
        }
        Commands::Classify { text } => {
            init_tracing("warn");
            cmd_classify(&cli.config, &text).await
        }
        Commands::Serve { bind, port } => {
            init_tracing("info");
            cmd_serve(&cli.config, bind, port).await
        }
        Commands::InitAssistant { name, model } => {
            init_tracing("info");
            cmd_init_assistant(&name, model).await
        }
        Commands::Status => {
            init_tracing("warn");
            cmd_status(&cli.config)
        }
    }
}

// ---------------------------------------------------------------------------
// Subcommand: classify
// ---------------------------------------------------------------------------

async fn cmd_classify(config_path: &str, text: &str) -> Result<()> {
    let settings = Settings::load(config_path)?;
    let engine = build_engine(build_analyzer(&settings.analyzer)?);

    let decision = engine.resolve(text).await;
    let json = serde_json::to_string_pretty(&decision).context("failed to encode decision")?;
    println!("{json}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: serve
// ---------------------------------------------------------------------------

async fn cmd_serve(config_path: &str, bind: Option<String>, port: Option<u16>) -> Result<()> {
    let mut settings = Settings::load(config_path)?;
    if let Some(bind) = bind {
        settings.web.bind_addr = bind;
    }
    if let Some(port) = port {
        settings.web.port = port;
    }

    let analyzer = build_analyzer(&settings.analyzer)?;
    let server = WebServer::new(settings.web, analyzer);
    info!(addr = %server.addr(), "serving Pristup API");

    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("web server failed: {e}"))
}

// ---------------------------------------------------------------------------
// Subcommand: init-assistant
// ---------------------------------------------------------------------------

async fn cmd_init_assistant(name: &str, model: Option<String>) -> Result<()> {
    let config = AssistantConfig::from_env().context("cannot provision without OPENAI_API_KEY")?;
    let model = model.unwrap_or_else(|| config.model.clone());
    let client = AssistantClient::new(config).context("failed to create assistant client")?;

    let id = provision_assistant(&client, name, &model)
        .await
        .context("failed to create assistant")?;

    println!();
    println!("  Assistant created: {id}");
    println!("  Add this to your .env file:");
    println!("    ACCESSIBILITY_ASSISTANT_ID={id}");
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: status
// ---------------------------------------------------------------------------

fn cmd_status(config_path: &str) -> Result<()> {
    println!();
    println!("  Pristup Status");
    println!("  ==============");
    println!();

    let path = Path::new(config_path);
    if path.exists() {
        println!("  Config:           OK ({})", path.display());
    } else {
        println!("  Config:           MISSING (using defaults)");
    }

    match Settings::load(path) {
        Ok(settings) => {
            println!(
                "  Polling:          every {} ms, up to {} attempts",
                settings.analyzer.poll_interval_ms, settings.analyzer.max_attempts
            );
            println!("  Web:              {}", settings.web.addr());
        }
        Err(e) => println!("  Settings:         INVALID ({e:#})"),
    }

    match AssistantConfig::from_env() {
        Ok(config) => {
            println!("  OpenAI API:       CONFIGURED ({})", config.base_url);
            match config.assistant_id.as_deref() {
                Some(id) => println!("  Assistant:        {id}"),
                None => println!("  Assistant:        NOT SET (run `pristup init-assistant`)"),
            }
        }
        Err(_) => println!("  OpenAI API:       NOT SET (quick phrases only)"),
    }

    println!();
    Ok(())
}
