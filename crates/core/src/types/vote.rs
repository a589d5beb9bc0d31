//! User vote direction.

use serde::{Deserialize, Serialize};

/// The direction of a user's vote on a product.
///
/// The wire format is a JSON boolean (`true` = up, `false` = down); the
/// absent/no-vote state is expressed as `Option<Vote>` with `null` on the
/// wire, so a product's vote field is tri-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum Vote {
    Up,
    Down,
}

impl Vote {
    /// Whether this is an upvote.
    #[must_use]
    pub const fn is_up(self) -> bool {
        matches!(self, Self::Up)
    }

    /// The wire representation (`true` = up, `false` = down).
    #[must_use]
    pub const fn as_bool(self) -> bool {
        matches!(self, Self::Up)
    }
}

impl From<bool> for Vote {
    fn from(up: bool) -> Self {
        if up { Self::Up } else { Self::Down }
    }
}

impl From<Vote> for bool {
    fn from(vote: Vote) -> Self {
        vote.as_bool()
    }
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_boolean() {
        assert_eq!(serde_json::to_string(&Vote::Up).unwrap(), "true");
        assert_eq!(serde_json::to_string(&Vote::Down).unwrap(), "false");

        assert_eq!(serde_json::from_str::<Vote>("true").unwrap(), Vote::Up);
        assert_eq!(serde_json::from_str::<Vote>("false").unwrap(), Vote::Down);
    }

    #[test]
    fn test_tri_state_via_option() {
        let none: Option<Vote> = serde_json::from_str("null").unwrap();
        assert_eq!(none, None);

        let up: Option<Vote> = serde_json::from_str("true").unwrap();
        assert_eq!(up, Some(Vote::Up));
    }

    #[test]
    fn test_as_bool() {
        assert!(Vote::Up.as_bool());
        assert!(!Vote::Down.as_bool());
    }
}
