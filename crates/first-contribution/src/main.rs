mod action_outputs;
mod bootstrap_helpers;

use std::{fs, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use fc_cli::{build_input_source, Cli};
use fc_github_events::webhook_payload::WebhookPayload;
use fc_github_runtime::{FirstContributionRuntime, GithubApiClient, RepoRef, RunOutcome};

use crate::action_outputs::write_action_outputs;
use crate::bootstrap_helpers::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let fail_on_error = cli.fail_on_error;

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error:#}");
            if fail_on_error {
                ExitCode::FAILURE
            } else {
                tracing::warn!("fail-on-error is disabled, reporting success");
                ExitCode::SUCCESS
            }
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let raw_payload = fs::read_to_string(&cli.event_path).with_context(|| {
        format!(
            "failed to read event payload {}",
            cli.event_path.display()
        )
    })?;
    let payload = WebhookPayload::from_json_str(&raw_payload).with_context(|| {
        format!(
            "failed to parse event payload {}",
            cli.event_path.display()
        )
    })?;
    let repo = RepoRef::parse(&cli.repository)?;
    let inputs = build_input_source(cli.inputs_file.as_deref())?;
    let client = GithubApiClient::new(
        cli.api_base.clone(),
        cli.token.clone(),
        repo,
        cli.request_timeout_ms,
    )?;

    let runtime = FirstContributionRuntime::new(Arc::new(client), Arc::new(inputs));
    match runtime.run(&cli.event_name, &payload).await? {
        RunOutcome::Completed { outputs, .. } => {
            write_action_outputs(cli.output_path.as_deref(), &outputs)
        }
        RunOutcome::Unsupported | RunOutcome::NotQualifying => Ok(()),
    }
}
