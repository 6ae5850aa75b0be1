use serde::{Deserialize, Deserializer, Serialize, Serializer};
use url::form_urlencoded;

use super::model::TaskStatus;
use super::validation::{normalize_description, normalize_title, ValidationError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTask {
    // Optional so a missing title is a 400, not a body parse failure.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateTask {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: Some(title.into()),
            description,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        normalize_title(self.title.as_deref().unwrap_or_default())?;
        normalize_description(self.description.as_deref())?;
        Ok(())
    }
}

/// One field of a partial update.
///
/// `Unset` means the key was absent from the body, `Null` that it was sent as
/// JSON `null`, `Value` that it carried a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Unset,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Patch::Unset)
    }

    pub fn by_ref(&self) -> Patch<&T> {
        match self {
            Patch::Unset => Patch::Unset,
            Patch::Null => Patch::Null,
            Patch::Value(v) => Patch::Value(v),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        }
    }
}

// Only reached when the key is present; absent keys take `Default` (Unset).
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Value(v) => serializer.serialize_some(v),
            Patch::Unset | Patch::Null => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub title: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub done: Patch<bool>,
}

impl UpdateTask {
    pub fn done(done: bool) -> Self {
        Self {
            done: Patch::Value(done),
            ..Self::default()
        }
    }

    /// Checks only the fields that were supplied. A `null` title counts as
    /// an empty one; a `null` or blank description clears it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.title.by_ref() {
            Patch::Unset => {}
            Patch::Null => return Err(ValidationError::TitleRequired),
            Patch::Value(title) => {
                normalize_title(title)?;
            }
        }
        if let Patch::Value(description) = self.description.by_ref() {
            normalize_description(Some(description.as_str()))?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct ListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

impl ListQuery {
    // A repeated key keeps its first value; other keys are ignored.
    pub fn from_query_string(raw: &str) -> Self {
        let mut query = Self::default();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let slot = match &*key {
                "status" => &mut query.status,
                "search" => &mut query.search,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        query
    }

    pub fn status(&self) -> TaskStatus {
        TaskStatus::parse_lenient(self.status.as_deref().unwrap_or("all"))
    }

    pub fn search(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }
}
