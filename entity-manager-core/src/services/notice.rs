//! User-facing outcome messages

use std::fmt;

use serde::Serialize;

/// Bulk action reported in a summary notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    Enable,
    Disable,
}

impl BulkAction {
    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Enable => "Enabled",
            Self::Disable => "Disabled",
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }
}

/// Outcome of a dispatched command that the user should see
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// Single-action failure; must be acknowledged
    Blocking { title: String, message: String },
    /// Bulk outcome with backend tallies; never blocking
    Summary {
        action: BulkAction,
        succeeded: usize,
        failed: usize,
    },
    /// Rejected before any backend call
    Warning { message: String },
}

impl Notice {
    pub fn blocking(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Blocking {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning {
            message: message.into(),
        }
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Blocking { .. })
    }

    /// Whether the summary reports any failed id
    pub fn has_failures(&self) -> bool {
        matches!(self, Self::Summary { failed, .. } if *failed > 0)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocking { title, message } => write!(f, "{title}: {message}"),
            Self::Summary {
                action,
                succeeded,
                failed,
            } => {
                write!(f, "{} {succeeded} entities.", action.past_tense())?;
                if *failed > 0 {
                    write!(f, " Failed: {failed}")?;
                }
                Ok(())
            }
            Self::Warning { message } => f.write_str(message),
        }
    }
}

/// Message shown inside a rename modal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum InlineMessage {
    Success(String),
    Error(String),
}

impl InlineMessage {
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_mentions_counts() {
        let notice = Notice::Summary {
            action: BulkAction::Disable,
            succeeded: 1,
            failed: 1,
        };
        assert_eq!(notice.to_string(), "Disabled 1 entities. Failed: 1");
        assert!(!notice.is_blocking());
        assert!(notice.has_failures());
    }

    #[test]
    fn clean_summary_omits_failures() {
        let notice = Notice::Summary {
            action: BulkAction::Enable,
            succeeded: 3,
            failed: 0,
        };
        assert_eq!(notice.to_string(), "Enabled 3 entities.");
    }

    #[test]
    fn blocking_notice_names_the_entity() {
        let notice = Notice::blocking("Failed to enable light.a", "not allowed");
        assert!(notice.is_blocking());
        assert_eq!(notice.to_string(), "Failed to enable light.a: not allowed");
    }
}
