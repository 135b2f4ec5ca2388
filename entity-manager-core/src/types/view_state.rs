//! Which backend state the snapshot is requested for

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// View state selecting which entities the backend lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    #[default]
    Disabled,
    Enabled,
    All,
}

impl ViewState {
    pub const ALL: [Self; 3] = [Self::Disabled, Self::Enabled, Self::All];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Enabled => "enabled",
            Self::All => "all",
        }
    }

    /// Whether an entity with the given disabled flag is listed in this view
    pub fn includes(self, is_disabled: bool) -> bool {
        match self {
            Self::All => true,
            Self::Disabled => is_disabled,
            Self::Enabled => !is_disabled,
        }
    }

    /// Next state in `disabled → enabled → all` order (wraps)
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Disabled => Self::Enabled,
            Self::Enabled => Self::All,
            Self::All => Self::Disabled,
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid view state '{s}'. Must be one of: disabled, enabled, all"
                ))
            })
    }
}
