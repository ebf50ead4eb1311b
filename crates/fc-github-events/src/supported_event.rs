/// Event codes (`{event_name}.{action}`) the workflow reacts to.
pub const SUPPORTED_EVENT_CODES: [&str; 6] = [
    "issues.opened",
    "issues.closed",
    "pull_request.opened",
    "pull_request.closed",
    "pull_request_target.opened",
    "pull_request_target.closed",
];

/// Return true when the webhook event name and action form a supported event code.
pub fn is_supported_event(event_name: &str, action: Option<&str>) -> bool {
    let Some(action) = action else {
        return false;
    };
    let code = format!("{event_name}.{action}");
    SUPPORTED_EVENT_CODES.contains(&code.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Enumerates supported `PayloadAction` values.
pub enum PayloadAction {
    Opened,
    Closed,
}

impl PayloadAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "opened" => Some(Self::Opened),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Closed => "closed",
        }
    }
}
