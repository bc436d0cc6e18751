use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// How much of an accusation must be right for the verdict to count as a success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictPolicy {
    /// Naming the right culprit is enough.
    #[default]
    CulpritOnly,
    /// Culprit must match and motive and method must be at least a partial match.
    AllFields,
}

impl fmt::Display for VerdictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CulpritOnly => write!(f, "culprit"),
            Self::AllFields => write!(f, "all"),
        }
    }
}

impl FromStr for VerdictPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "culprit" | "culprit_only" => Ok(Self::CulpritOnly),
            "all" | "all_fields" => Ok(Self::AllFields),
            other => Err(DomainError::validation(format!(
                "Unknown verdict policy: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_policies() {
        assert_eq!("culprit".parse::<VerdictPolicy>().unwrap(), VerdictPolicy::CulpritOnly);
        assert_eq!(" ALL ".parse::<VerdictPolicy>().unwrap(), VerdictPolicy::AllFields);
        assert!("lenient".parse::<VerdictPolicy>().is_err());
    }
}
