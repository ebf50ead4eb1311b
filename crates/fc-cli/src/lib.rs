//! CLI argument models and input sources for the first-contribution binary.
//!
//! Exposes the clap-backed [`Cli`] plus the [`fc_github_events::action_inputs::InputSource`]
//! implementations backed by `INPUT_*` environment variables and TOML files.

pub mod cli_args;
pub mod input_sources;

pub use cli_args::Cli;
pub use input_sources::*;
