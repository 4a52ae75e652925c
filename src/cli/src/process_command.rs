use crate::commands::{Cli, Command};
use crate::logging::setup_logging;
use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use tesmon_client::{EventClient, EventSender, SenderConfig};
use tesmon_common::{Config, ConfigLoader, Target};

/// Process the command line.
pub fn process_cli() -> Result<()> {
    // NOTE: this exits the process if there is a parsing error
    let cli = Cli::parse();

    setup_logging(cli.log_dir.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_config_at(path)?,
        None => ConfigLoader::load_default_config()?,
    };
    cli.target.apply(&mut config);

    match cli.command {
        Command::Send {
            event_key,
            event_body,
        } => {
            let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
            let response = runtime.block_on(send(&config, &event_key, event_body.as_deref()))?;
            println!("{}", response);
        }
        Command::Info { json } => print_info(&config, json)?,
    }

    Ok(())
}

async fn send(config: &Config, event_key: &str, event_body: Option<&str>) -> Result<String> {
    let event_body = parse_event_body(event_body)?;
    let sender = EventSender::try_new(SenderConfig::from(config))?;

    let response = send_with(&sender, event_key, event_body).await;
    sender.close().await;
    response
}

async fn send_with(
    client: &impl EventClient,
    event_key: &str,
    event_body: Option<Value>,
) -> Result<String> {
    let pending = client.send_event(event_key, event_body)?;
    match pending.await {
        Ok(response) => Ok(response),
        Err(err) => {
            let message = format!("Failed to send event {}: {}", event_key, err.user_message());
            Err(anyhow::Error::new(err).context(message))
        }
    }
}

fn parse_event_body(event_body: Option<&str>) -> Result<Option<Value>> {
    event_body
        .map(serde_json::from_str)
        .transpose()
        .context("EVENT_BODY is not valid JSON")
}

fn print_info(config: &Config, as_json: bool) -> Result<()> {
    let target = config.target();
    let timeouts = config.timeouts();
    let url = target
        .events_url()
        .map(|url| url.to_string())
        .unwrap_or_default();
    let (mode, environment_id) = match &target {
        Target::SelfHosted { .. } => ("self-hosted", None),
        Target::Environment { environment_id, .. } => ("environment", Some(environment_id)),
    };
    let problem = target.validate().err().map(|e| e.to_string());

    if as_json {
        let info = json!({
            "mode": mode,
            "events_url": url,
            "environment_id": environment_id,
            "connect_timeout_ms": timeouts.connect.as_millis() as u64,
            "read_timeout_ms": timeouts.read.as_millis() as u64,
            "request_timeout_ms": timeouts.request.map(|t| t.as_millis() as u64),
            "problem": problem,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Mode:            {}", mode);
    println!("Events URL:      {}", url);
    if let Some(environment_id) = environment_id {
        println!("Environment ID:  {}", environment_id);
    }
    let request = timeouts
        .request
        .map(|t| t.as_millis().to_string())
        .unwrap_or_else(|| "none".to_string());
    println!(
        "Timeouts (ms):   connect {} / read {} / request {}",
        timeouts.connect.as_millis(),
        timeouts.read.as_millis(),
        request
    );
    if let Some(problem) = problem {
        println!("Problem:         {}", problem);
    }
    Ok(())
}
