use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use fc_github_runtime::ActionOutputs;

pub(crate) fn render_action_outputs(outputs: &ActionOutputs) -> String {
    outputs
        .pairs()
        .iter()
        .map(|(name, value)| format!("{name}={value}\n"))
        .collect()
}

/// Appends the outputs to `path` in the runner's `name=value` format, or prints
/// them to stdout when no output file is configured.
pub(crate) fn write_action_outputs(path: Option<&Path>, outputs: &ActionOutputs) -> Result<()> {
    let rendered = render_action_outputs(outputs);
    let Some(path) = path else {
        print!("{rendered}");
        return Ok(());
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open output file {}", path.display()))?;
    file.write_all(rendered.as_bytes())
        .with_context(|| format!("failed to write outputs to {}", path.display()))?;
    Ok(())
}
