use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which tasks the list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Finished,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Finished];

    /// All → Active → Finished → All
    pub fn cycle(self) -> Filter {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Finished,
            Filter::Finished => Filter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Finished => "Finished",
        }
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "finished" | "done" => Ok(Filter::Finished),
            other => Err(format!("unknown filter '{}' (expected all, active, finished)", other)),
        }
    }
}
