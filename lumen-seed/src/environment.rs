//! Deployment environments and their seeding policy.

use std::fmt;
use std::str::FromStr;

/// The environment a seeding run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development. Seeds essential and sample data.
    #[default]
    Development,
    /// Pre-production. Seeds essential data only.
    Staging,
    /// Live deployment. Seeds essential data only; sample data is never
    /// allowed here.
    Production,
}

impl Environment {
    /// Whether sample/demonstration records may be seeded.
    pub fn seeds_sample_data(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Staging => write!(f, "staging"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}
