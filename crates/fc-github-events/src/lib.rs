//! Shared domain model for the first-contribution GitHub workflow.
//! This crate classifies webhook events, compares contribution histories, and
//! resolves the labels, reactions, and message configured for an event. It
//! performs no I/O; runtime crates supply the GitHub client and inputs.

pub mod action_inputs;
pub mod contribution_history;
pub mod fc_event;
pub mod supported_event;
pub mod webhook_payload;
