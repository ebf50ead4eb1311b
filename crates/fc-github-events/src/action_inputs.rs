use std::collections::{BTreeMap, HashMap};

use crate::fc_event::{FcEvent, FcEventName};

/// Names of every `-msg` input. A message whose value is one of these names is
/// a symlink to that input.
pub const MESSAGE_INPUT_NAMES: [&str; 7] = [
    "discussion-created-msg",
    "issue-opened-msg",
    "issue-completed-msg",
    "issue-not-planned-msg",
    "pr-opened-msg",
    "pr-merged-msg",
    "pr-closed-msg",
];

/// Trait contract for reading named workflow inputs.
///
/// Implementations return an empty string for inputs that are not set.
pub trait InputSource {
    fn input(&self, name: &str) -> String;
}

impl InputSource for HashMap<String, String> {
    fn input(&self, name: &str) -> String {
        self.get(name).cloned().unwrap_or_default()
    }
}

impl InputSource for BTreeMap<String, String> {
    fn input(&self, name: &str) -> String {
        self.get(name).cloned().unwrap_or_default()
    }
}

impl<T: InputSource + ?Sized> InputSource for &T {
    fn input(&self, name: &str) -> String {
        (**self).input(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Labels, message, and reactions configured for one event.
pub struct ActionInputs {
    pub labels: Vec<String>,
    pub msg: String,
    pub reactions: Vec<String>,
}

pub fn resolve_action_inputs<S: InputSource + ?Sized>(source: &S, event: &FcEvent) -> ActionInputs {
    ActionInputs {
        labels: resolve_list_input(source, event.name, "labels"),
        msg: resolve_msg_input(source, event),
        reactions: resolve_list_input(source, event.name, "reactions"),
    }
}

/// Reads `{name}-{suffix}`, falling back to the generic `{suffix}` input.
pub fn resolve_list_input<S: InputSource + ?Sized>(
    source: &S,
    name: FcEventName,
    suffix: &str,
) -> Vec<String> {
    let specific = source.input(&format!("{name}-{suffix}"));
    if !specific.trim().is_empty() {
        return parse_comma_list(&specific);
    }
    parse_comma_list(&source.input(suffix))
}

/// Splits a comma separated input and trims each element.
///
/// Empty elements between adjacent commas are kept; an empty input yields no
/// elements.
pub fn parse_comma_list(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|item| item.trim().to_string()).collect()
}

/// Reads `{name}-{state}-msg`, following one level of symlink.
pub fn resolve_msg_input<S: InputSource + ?Sized>(source: &S, event: &FcEvent) -> String {
    let msg = source.input(&event.msg_input_name()).trim().to_string();
    if MESSAGE_INPUT_NAMES.contains(&msg.as_str()) {
        return source.input(&msg).trim().to_string();
    }
    msg
}
