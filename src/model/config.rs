use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration from tasklist.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub variant: Variant,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub features: FeatureConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Partitioning strategy: explicit `[store]` setting, else the variant's
    pub fn partitioning(&self) -> Partitioning {
        self.store
            .partitioning
            .unwrap_or_else(|| self.variant.partitioning())
    }

    /// Feature flags: explicit `[features]` settings over the variant preset
    pub fn features(&self) -> Features {
        let preset = self.variant.features();
        Features {
            due_date: self.features.due_date.unwrap_or(preset.due_date),
            bulk_actions: self.features.bulk_actions.unwrap_or(preset.bulk_actions),
            require_description: self
                .features
                .require_description
                .unwrap_or(preset.require_description),
        }
    }
}

/// Product variant. Each one is a preset of partitioning and features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Single flagged list, optional due date on every task
    #[default]
    Dated,
    /// Separate active/finished lists with bulk finish/unfinish
    Bulk,
}

impl Variant {
    pub fn partitioning(self) -> Partitioning {
        match self {
            Variant::Dated => Partitioning::Flagged,
            Variant::Bulk => Partitioning::Physical,
        }
    }

    pub fn features(self) -> Features {
        match self {
            Variant::Dated => Features {
                due_date: true,
                bulk_actions: false,
                require_description: false,
            },
            Variant::Bulk => Features {
                due_date: false,
                bulk_actions: true,
                require_description: true,
            },
        }
    }
}

/// How the store represents the active/finished split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partitioning {
    /// One list, `finished` boolean on each task
    #[default]
    Flagged,
    /// Two lists; membership decides the partition
    Physical,
}

/// Resolved feature flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub due_date: bool,
    pub bulk_actions: bool,
    pub require_description: bool,
}

impl Default for Features {
    fn default() -> Self {
        Variant::default().features()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub partitioning: Option<Partitioning>,
}

/// Per-feature overrides; `None` falls back to the variant preset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureConfig {
    #[serde(default)]
    pub due_date: Option<bool>,
    #[serde(default)]
    pub bulk_actions: Option<bool>,
    #[serde(default)]
    pub require_description: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Color overrides by theme role, e.g. `accent = "#5EB1FF"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file for TUI sessions. Without it the TUI does not log.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
