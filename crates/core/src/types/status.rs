//! Status enums for contact-inbox entities.

use serde::{Deserialize, Serialize};

/// Workflow status of a contact message.
///
/// Transitions are deliberately unconstrained: any status may be set at
/// any time. The inbox is a triage queue, not a state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    /// Freshly submitted, nobody has looked at it yet.
    #[default]
    New,
    /// Someone is working it.
    InProgress,
    /// Handled; a reply sets this automatically unless told otherwise.
    Closed,
}

impl ContactStatus {
    /// The stable string form used in storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContactStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "in_progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            _ => Err(format!("invalid contact status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_new() {
        assert_eq!(ContactStatus::default(), ContactStatus::New);
    }

    #[test]
    fn test_roundtrip_via_str() {
        for status in [
            ContactStatus::New,
            ContactStatus::InProgress,
            ContactStatus::Closed,
        ] {
            let parsed: ContactStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&ContactStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
