use chrono::DateTime;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

/// Which tasks a listing keeps, by completion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskStatus {
    #[default]
    All,
    Active,
    Completed,
}

impl TaskStatus {
    /// Anything other than `active` or `completed` reads as `All`.
    pub fn parse_lenient(raw: &str) -> Self {
        Self::parse_strict(raw).unwrap_or_default()
    }

    pub fn parse_strict(raw: &str) -> Option<Self> {
        match raw {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.done,
            Self::Completed => task.done,
        }
    }
}

impl Task {
    /// Case-insensitive substring match on title or description.
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, description: Option<&str>, done: bool) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.map(str::to_string),
            done,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_parsing_falls_back_to_all() {
        assert_eq!(TaskStatus::parse_lenient("active"), TaskStatus::Active);
        assert_eq!(TaskStatus::parse_lenient("completed"), TaskStatus::Completed);
        assert_eq!(TaskStatus::parse_lenient("ACTIVE"), TaskStatus::All);
        assert_eq!(TaskStatus::parse_lenient(""), TaskStatus::All);
        assert_eq!(TaskStatus::parse_strict("bogus"), None);
    }

    #[test]
    fn test_search_checks_title_and_description() {
        let t = task("Foobar", None, false);
        assert!(t.matches_search("foo"));
        assert!(!t.matches_search("milk"));

        let t = task("Groceries", Some("Buy MILK"), false);
        assert!(t.matches_search("milk"));
        assert!(t.matches_search(""));
    }

    #[test]
    fn test_serializes_camel_case_and_omits_missing_description() {
        let t = task("Write report", None, true);
        let json = serde_json::to_value(&t).unwrap();

        assert_eq!(json["title"], "Write report");
        assert_eq!(json["done"], true);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("description").is_none());
        assert_eq!(json["id"], t.id.to_string());
    }
}
