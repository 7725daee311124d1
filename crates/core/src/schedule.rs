//! The generated schedule as returned by the external backend.
//!
//! A [`GenerationResult`] maps a day label to the ordered activities for that
//! day. Day order and item order are both kept exactly as delivered; nothing
//! here sorts.

use std::fmt;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// Activity category. Unrecognised tags are kept in [`ActivityKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityKind {
    Meeting,
    Focus,
    Development,
    Work,
    Break,
    Learning,
    Exercise,
    Personal,
    Other(String),
}

impl ActivityKind {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityKind::Meeting => "meeting",
            ActivityKind::Focus => "focus",
            ActivityKind::Development => "development",
            ActivityKind::Work => "work",
            ActivityKind::Break => "break",
            ActivityKind::Learning => "learning",
            ActivityKind::Exercise => "exercise",
            ActivityKind::Personal => "personal",
            ActivityKind::Other(raw) => raw,
        }
    }
}

impl From<String> for ActivityKind {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "meeting" => ActivityKind::Meeting,
            "focus" => ActivityKind::Focus,
            "development" => ActivityKind::Development,
            "work" => ActivityKind::Work,
            "break" => ActivityKind::Break,
            "learning" => ActivityKind::Learning,
            "exercise" => ActivityKind::Exercise,
            "personal" => ActivityKind::Personal,
            _ => ActivityKind::Other(raw),
        }
    }
}

impl From<ActivityKind> for String {
    fn from(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity priority. Unrecognised tags are kept in [`Priority::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
    Unknown(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Unknown(raw) => raw,
        }
    }
}

impl From<String> for Priority {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            _ => Priority::Unknown(raw),
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// One time-blocked activity.
///
/// Every field is optional on the wire and parsing never fails: see
/// [`ScheduleItem::from_value`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleItem {
    pub activity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ActivityKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

const ACTIVITY_KEYS: &[&str] = &["activity", "task", "title"];
const START_KEYS: &[&str] = &["start_time", "startTime"];
const END_KEYS: &[&str] = &["end_time", "endTime"];

impl ScheduleItem {
    /// Read an item from any JSON value.
    ///
    /// For each field the first key holding a non-empty string wins
    /// (`activity`, then `task`, then `title`; snake_case before camelCase
    /// times). Values of the wrong type count as absent, except numeric or
    /// boolean `type`/`priority` tags, which become the fallback variant. A
    /// bare string item is taken as the activity name; anything else that is
    /// not an object yields an empty item.
    pub fn from_value(value: &Value) -> Self {
        let fields = match value {
            Value::Object(fields) => fields,
            Value::String(name) => {
                return Self {
                    activity: Some(name.clone()),
                    ..Self::default()
                }
            }
            _ => return Self::default(),
        };

        let text = |keys: &[&str]| -> Option<String> {
            keys.iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_str))
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        };
        let tag = |key: &str| -> Option<String> {
            match fields.get(key)? {
                Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            }
        };

        Self {
            activity: text(ACTIVITY_KEYS),
            start_time: text(START_KEYS),
            end_time: text(END_KEYS),
            kind: tag("type").map(ActivityKind::from),
            priority: tag("priority").map(Priority::from),
        }
    }
}

impl<'de> Deserialize<'de> for ScheduleItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(&Value::deserialize(deserializer)?))
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Day label → ordered activities, in the order the backend delivered them.
///
/// Deserializes from either the day-keyed object
/// `{"monday": [...], ...}` or the list form
/// `[{"day": "Monday", "activities": [...]}, ...]`. Serializes as the
/// day-keyed object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GenerationResult {
    days: IndexMap<String, Vec<ScheduleItem>>,
}

impl<'de> Deserialize<'de> for GenerationResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Self::from_value(&Value::deserialize(deserializer)?).map_err(D::Error::custom)
    }
}

/// Items of one day. `null` is an empty day; any other non-array is an error
/// naming the day.
fn day_items(day: &str, value: Option<&Value>) -> Result<Vec<ScheduleItem>, String> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.iter().map(ScheduleItem::from_value).collect()),
        Some(other) => Err(format!(
            "day '{day}' holds {} instead of a list of activities",
            json_kind(other)
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Repeated day labels append to the first occurrence instead of replacing it.
impl FromIterator<(String, Vec<ScheduleItem>)> for GenerationResult {
    fn from_iter<I: IntoIterator<Item = (String, Vec<ScheduleItem>)>>(iter: I) -> Self {
        let mut days: IndexMap<String, Vec<ScheduleItem>> = IndexMap::new();
        for (day, items) in iter {
            days.entry(day).or_default().extend(items);
        }
        Self { days }
    }
}

impl GenerationResult {
    /// Normalize either result shape. Individual items never fail; only the
    /// day structure itself can be rejected.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Object(days) => days
                .iter()
                .map(|(day, items)| -> Result<_, String> {
                    Ok((day.clone(), day_items(day, Some(items))?))
                })
                .collect(),
            Value::Array(entries) => entries
                .iter()
                .enumerate()
                .map(|(index, entry)| -> Result<_, String> {
                    let day = entry
                        .get("day")
                        .and_then(Value::as_str)
                        .ok_or_else(|| format!("list entry {index} has no 'day' label"))?;
                    Ok((day.to_string(), day_items(day, entry.get("activities"))?))
                })
                .collect(),
            other => Err(format!(
                "expected a day-keyed object or a list of days, got {}",
                json_kind(other)
            )),
        }
    }

    /// Parse a backend response body.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(bytes)
            .map_err(|e| CoreError::Internal(format!("Malformed schedule payload: {e}")))
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn item_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Items for `day`, matched exactly.
    pub fn day(&self, day: &str) -> Option<&[ScheduleItem]> {
        self.days.get(day).map(Vec::as_slice)
    }

    /// Day labels in delivery order.
    pub fn day_labels(&self) -> impl Iterator<Item = &str> {
        self.days.keys().map(String::as_str)
    }

    /// `(day, items)` pairs in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ScheduleItem])> {
        self.days.iter().map(|(d, items)| (d.as_str(), items.as_slice()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
