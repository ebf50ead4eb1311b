use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use fc_github_events::action_inputs::InputSource;

/// Environment variable name the Actions runner uses for input `name`.
pub fn input_env_var_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

#[derive(Debug, Clone, Default)]
/// Inputs read from `INPUT_*` environment variables.
pub struct EnvInputSource {
    vars: BTreeMap<String, String>,
}

impl EnvInputSource {
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            vars: vars
                .into_iter()
                .filter(|(key, _)| key.starts_with("INPUT_"))
                .collect(),
        }
    }
}

impl InputSource for EnvInputSource {
    fn input(&self, name: &str) -> String {
        self.vars
            .get(&input_env_var_name(name))
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default)]
/// Inputs declared in a TOML table, keyed by input name.
pub struct TomlInputSource {
    values: BTreeMap<String, String>,
}

impl TomlInputSource {
    pub fn parse(raw: &str) -> Result<Self> {
        let table: toml::Table = raw.parse().context("failed to parse inputs file as TOML")?;
        let mut values = BTreeMap::new();
        for (name, value) in table {
            let rendered = render_toml_input(&name, value)?;
            values.insert(name, rendered);
        }
        Ok(Self { values })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read inputs file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid inputs file {}", path.display()))
    }
}

// Arrays of strings are joined with commas so list inputs can be written as TOML arrays.
fn render_toml_input(name: &str, value: toml::Value) -> Result<String> {
    match value {
        toml::Value::String(text) => Ok(text),
        toml::Value::Boolean(flag) => Ok(flag.to_string()),
        toml::Value::Integer(number) => Ok(number.to_string()),
        toml::Value::Array(items) => {
            let mut rendered = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    toml::Value::String(text) => rendered.push(text),
                    other => bail!("input '{name}' must be an array of strings, found {other}"),
                }
            }
            Ok(rendered.join(","))
        }
        other => bail!("input '{name}' has unsupported value {other}"),
    }
}

impl InputSource for TomlInputSource {
    fn input(&self, name: &str) -> String {
        self.values.get(name).cloned().unwrap_or_default()
    }
}

/// Consults each layer in order and returns the first non-empty value.
#[derive(Default)]
pub struct LayeredInputSource {
    layers: Vec<Box<dyn InputSource + Send + Sync>>,
}

impl LayeredInputSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, layer: impl InputSource + Send + Sync + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }
}

impl InputSource for LayeredInputSource {
    fn input(&self, name: &str) -> String {
        self.layers
            .iter()
            .map(|layer| layer.input(name))
            .find(|value| !value.trim().is_empty())
            .unwrap_or_default()
    }
}

/// Builds the input source used by the binary: the optional inputs file first,
/// then the process environment.
pub fn build_input_source(inputs_file: Option<&Path>) -> Result<LayeredInputSource> {
    let mut source = LayeredInputSource::new();
    if let Some(path) = inputs_file {
        source = source.with_layer(TomlInputSource::load(path)?);
    }
    Ok(source.with_layer(EnvInputSource::from_env()))
}
