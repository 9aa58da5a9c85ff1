use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of notification. Presentation (icons, colors) is up to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Success,
    Error,
    Information,
    Warning,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Success => "success",
            Category::Error => "error",
            Category::Information => "information",
            Category::Warning => "warning",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown notification category '{0}'")]
pub struct ParseCategoryError(String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Category::Success),
            "error" => Ok(Category::Error),
            "information" | "info" => Ok(Category::Information),
            "warning" => Ok(Category::Warning),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

/// Unique notification id: a base-36 millisecond timestamp and a random
/// base-36 suffix, e.g. `lx2k9f1c-3nd8w0qz5v`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    pub(crate) fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default();
        let suffix: u64 = rand::random();
        Self(format!("{}-{}", base36(millis), base36(suffix)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NotificationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NotificationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

fn base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Request to add a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    pub category: Category,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub auto_close: bool,
}

impl NewNotification {
    pub fn new(
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
        auto_close: bool,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            description: description.into(),
            auto_close,
        }
    }

    /// Canned notification for each category.
    ///
    /// Errors and warnings close on their own; successes and information
    /// stay until dismissed.
    pub fn preset(category: Category) -> Self {
        match category {
            Category::Error => Self::new(category, "Error", "Something went wrong.", true),
            Category::Warning => Self::new(category, "Warning", "Proceed with care.", true),
            Category::Success => {
                Self::new(category, "Success!", "The operation completed.", false)
            }
            Category::Information => {
                Self::new(category, "Information", "This is an informational notice.", false)
            }
        }
    }
}

/// An immutable notification record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    id: NotificationId,
    category: Category,
    title: String,
    description: String,
    auto_close: bool,
}

impl Notification {
    pub(crate) fn new(id: NotificationId, request: NewNotification) -> Self {
        Self {
            id,
            category: request.category,
            title: request.title,
            description: request.description,
            auto_close: request.auto_close,
        }
    }

    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn auto_close(&self) -> bool {
        self.auto_close
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for category in [
            Category::Success,
            Category::Error,
            Category::Information,
            Category::Warning,
        ] {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert_eq!("INFO".parse::<Category>(), Ok(Category::Information));
        assert!("fatal".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&Category::Information).unwrap();
        assert_eq!(json, "\"information\"");
    }

    #[test]
    fn test_base36() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
    }

    #[test]
    fn test_generated_ids_differ() {
        let a = NotificationId::generate();
        let b = NotificationId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().contains('-'));
    }

    #[test]
    fn test_presets() {
        assert!(NewNotification::preset(Category::Error).auto_close);
        assert!(NewNotification::preset(Category::Warning).auto_close);
        assert!(!NewNotification::preset(Category::Success).auto_close);
        assert!(!NewNotification::preset(Category::Information).auto_close);
    }
}
