use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The two families of recurring templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Finance installments, repeating every N days.
    Finance,
    /// Task installments, repeating on a cron schedule.
    Task,
}

impl TemplateKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Finance => "finance",
            Self::Task => "task",
        }
    }

    /// Human-readable noun used in progress messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Finance => "finance installment",
            Self::Task => "task installment",
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "finance" => Ok(Self::Finance),
            "task" => Ok(Self::Task),
            other => Err(CoreError::InvalidInput(format!(
                "unknown template kind: {other}"
            ))),
        }
    }
}
