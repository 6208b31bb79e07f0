//! `PagerDuty` CLI.
//!
//! Queries escalation policies and prints the result as JSON on stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pagerduty::config::{
    DEFAULT_API_URL, ENV_PAGERDUTY_API_TOKEN, ENV_PAGERDUTY_API_URL, ENV_PAGERDUTY_TIMEOUT_SECS,
};
use pagerduty::{ClientConfig, ListOptions, PagerDutyClient, PagerDutyError};

/// Query the `PagerDuty` REST API
#[derive(Parser)]
#[command(name = "pagerduty")]
#[command(about = "Query PagerDuty escalation policies and on-call assignments")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// REST API token
    #[arg(long, env = ENV_PAGERDUTY_API_TOKEN, hide_env_values = true, global = true)]
    token: Option<String>,

    /// API base URL
    #[arg(long, env = ENV_PAGERDUTY_API_URL, default_value = DEFAULT_API_URL, global = true)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = ENV_PAGERDUTY_TIMEOUT_SECS, default_value = "30", global = true)]
    timeout_secs: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Escalation policy operations
    EscalationPolicies {
        #[command(subcommand)]
        command: EscalationPolicyCommand,
    },
}

#[derive(Subcommand)]
enum EscalationPolicyCommand {
    /// List escalation policies
    List {
        /// Filter by name
        #[arg(long)]
        query: Option<String>,

        /// Act on behalf of this user ID
        #[arg(long)]
        requester_id: Option<String>,
    },
    /// Show a single escalation policy
    Get {
        /// Escalation policy ID
        id: String,
    },
    /// Show who is on call for an escalation policy
    OnCall {
        /// Escalation policy ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("pagerduty=info".parse()?))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig {
        api_token: cli.token,
        base_url: cli.base_url,
        timeout_secs: cli.timeout_secs,
    };
    let client = PagerDutyClient::new(config).context("Failed to create PagerDuty client")?;

    let result = match cli.command {
        Commands::EscalationPolicies { command } => run_escalation_policies(&client, command).await,
    };

    if let Err(e) = &result {
        if let Some(status) = e.downcast_ref::<PagerDutyError>().and_then(PagerDutyError::status) {
            error!(status = %status, "PagerDuty request failed");
        }
    }

    result
}

async fn run_escalation_policies(
    client: &PagerDutyClient,
    command: EscalationPolicyCommand,
) -> Result<()> {
    let policies = client.escalation_policies();

    match command {
        EscalationPolicyCommand::List {
            query,
            requester_id,
        } => {
            let options = ListOptions {
                query,
                requester_id,
            };
            let response = policies.list(Some(&options)).await?;
            info!(
                count = response.value.escalation_policies.len(),
                total = response.value.total,
                "Listed escalation policies"
            );
            print_json(&response.value)
        }
        EscalationPolicyCommand::Get { id } => {
            let response = policies.get(&id).await?;
            print_json(&response.value)
        }
        EscalationPolicyCommand::OnCall { id } => {
            let response = policies.on_call(&id).await?;
            info!(
                policy_id = %id,
                assignments = response.value.len(),
                "Fetched on-call assignments"
            );
            print_json(&response.value)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
