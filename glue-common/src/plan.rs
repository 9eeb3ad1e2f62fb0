//! Participant plans and the visibility gate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Membership plan of a participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Basic,
    Premium,
}

impl Plan {
    /// Wire names, in plan order
    pub const NAMES: &'static [&'static str] = &["free", "basic", "premium"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Basic => "basic",
            Plan::Premium => "premium",
        }
    }

    /// Paid plans get a public profile page
    pub fn allows_public_profile(&self) -> bool {
        !matches!(self, Plan::Free)
    }

    /// Premium participants are featured on the home page
    pub fn is_featured(&self) -> bool {
        matches!(self, Plan::Premium)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Plan::Free),
            "basic" => Ok(Plan::Basic),
            "premium" => Ok(Plan::Premium),
            other => Err(Error::InvalidInput(format!("Unknown plan: {}", other))),
        }
    }
}

/// Whether a profile shows up in the public directory
///
/// Both the participant's own flag and the plan must allow it.
pub fn is_publicly_visible(plan: Plan, is_public: bool) -> bool {
    is_public && plan.allows_public_profile()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_gate() {
        assert!(!is_publicly_visible(Plan::Free, true));
        assert!(!is_publicly_visible(Plan::Basic, false));
        assert!(is_publicly_visible(Plan::Basic, true));
        assert!(is_publicly_visible(Plan::Premium, true));
    }

    #[test]
    fn test_plan_round_trip_names() {
        for name in Plan::NAMES {
            let plan: Plan = name.parse().unwrap();
            assert_eq!(plan.as_str(), *name);
        }
        assert!("gold".parse::<Plan>().is_err());
    }

    #[test]
    fn test_featured_only_premium() {
        assert!(Plan::Premium.is_featured());
        assert!(!Plan::Basic.is_featured());
    }
}
