//! Report configuration types.

use std::fmt;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Remaining number of levels a traversal may descend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum DepthBudget {
    /// At most this many more levels.
    Finite(u32),
    /// No limit.
    Unlimited,
}

impl DepthBudget {
    /// Check if no further descent is allowed.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, DepthBudget::Finite(0))
    }

    /// Budget left for the children of the current object.
    pub fn descend(self) -> Self {
        match self {
            DepthBudget::Finite(n) => DepthBudget::Finite(n.saturating_sub(1)),
            DepthBudget::Unlimited => DepthBudget::Unlimited,
        }
    }
}

impl Default for DepthBudget {
    fn default() -> Self {
        DepthBudget::Finite(0)
    }
}

/// Negative depths mean unlimited.
impl From<i64> for DepthBudget {
    fn from(depth: i64) -> Self {
        if depth < 0 {
            DepthBudget::Unlimited
        } else {
            DepthBudget::Finite(u32::try_from(depth).unwrap_or(u32::MAX))
        }
    }
}

impl From<DepthBudget> for i64 {
    fn from(budget: DepthBudget) -> Self {
        match budget {
            DepthBudget::Finite(n) => i64::from(n),
            DepthBudget::Unlimited => -1,
        }
    }
}

impl fmt::Display for DepthBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthBudget::Finite(n) => write!(f, "{n}"),
            DepthBudget::Unlimited => f.write_str("unlimited"),
        }
    }
}

/// Output style selected by the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// One checksum line per file.
    Checksum,
    /// One CSV row per permission entry.
    Csv,
    /// Full metadata block followed by permission blocks.
    Verbose,
}

/// Options shared by every object rendered in one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct ReportOptions {
    /// Emit only checksum lines.
    #[builder(default = "false")]
    pub checksum_only: bool,

    /// Emit permission rows as CSV.
    #[builder(default = "false")]
    pub csv: bool,

    /// Maximum recursion below each source.
    #[builder(default)]
    pub depth: DepthBudget,

    /// List hidden children when expanding folders.
    #[builder(default = "false")]
    pub include_hidden: bool,

    /// The requested path is the store root.
    #[builder(default = "false")]
    pub root_is_trivial: bool,

    /// Highlight path headers with ANSI colors.
    #[builder(default = "true")]
    pub color: bool,
}

impl ReportOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.checksum_only.unwrap_or(false) && self.csv.unwrap_or(false) {
            return Err("checksum and csv output are mutually exclusive".to_string());
        }
        Ok(())
    }
}

impl ReportOptions {
    /// Create a new options builder.
    pub fn builder() -> ReportOptionsBuilder {
        ReportOptionsBuilder::default()
    }

    /// The output style these options select.
    pub fn mode(&self) -> ReportMode {
        if self.checksum_only {
            ReportMode::Checksum
        } else if self.csv {
            ReportMode::Csv
        } else {
            ReportMode::Verbose
        }
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            checksum_only: false,
            csv: false,
            depth: DepthBudget::default(),
            include_hidden: false,
            root_is_trivial: false,
            color: true,
        }
    }
}
