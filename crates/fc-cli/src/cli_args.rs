use std::path::PathBuf;

use clap::{ArgAction, Parser};

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "first-contribution",
    about = "Welcome and label first-time contributors on issues and pull requests",
    version
)]
/// Public struct `Cli` used across first-contribution components.
pub struct Cli {
    #[arg(
        long = "event-name",
        env = "GITHUB_EVENT_NAME",
        help = "Name of the webhook event that triggered the run, e.g. issues or pull_request_target"
    )]
    pub event_name: String,

    #[arg(
        long = "event-path",
        env = "GITHUB_EVENT_PATH",
        help = "Path to the JSON webhook payload of the triggering event"
    )]
    pub event_path: PathBuf,

    #[arg(
        long,
        env = "GITHUB_REPOSITORY",
        help = "Repository in owner/repo format"
    )]
    pub repository: String,

    #[arg(
        long,
        env = "INPUT_TOKEN",
        hide_env_values = true,
        help = "GitHub token used for API access"
    )]
    pub token: String,

    #[arg(
        long = "api-base",
        env = "GITHUB_API_URL",
        default_value = "https://api.github.com",
        help = "Base URL of the GitHub REST API"
    )]
    pub api_base: String,

    #[arg(
        long = "output-path",
        env = "GITHUB_OUTPUT",
        help = "File that receives name=value outputs. Outputs are printed to stdout when unset"
    )]
    pub output_path: Option<PathBuf>,

    #[arg(
        long = "inputs-file",
        env = "FC_INPUTS_FILE",
        help = "Optional TOML file of action inputs; its values take precedence over INPUT_* variables"
    )]
    pub inputs_file: Option<PathBuf>,

    #[arg(
        long = "request-timeout-ms",
        env = "FC_REQUEST_TIMEOUT_MS",
        default_value_t = 30_000,
        value_parser = parse_positive_u64,
        help = "Timeout for each GitHub API request in milliseconds"
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long = "fail-on-error",
        env = "INPUT_FAIL-ON-ERROR",
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Exit with a failure status when processing fails. When false, errors are only logged"
    )]
    pub fail_on_error: bool,
}
