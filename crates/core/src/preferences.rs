//! User scheduling preferences: defaults, wire shapes, and validation.
//!
//! Two shapes reach this module:
//!
//! - the camelCase preference payload a client sends with a generation
//!   request ([`UserPreferences`]), and
//! - the snake_case profile record held by the profile store
//!   ([`UserProfile`]).
//!
//! Both resolve into a [`PreferenceSnapshot`], the fully-defaulted form that
//! is forwarded to the schedule-generation backend.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::time_format::parse_clock;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_WAKE_UP_TIME: &str = "07:00";
pub const DEFAULT_BED_TIME: &str = "23:00";
pub const DEFAULT_WORKING_HOURS_START: &str = "09:00";
pub const DEFAULT_WORKING_HOURS_END: &str = "17:00";
pub const DEFAULT_DAILY_PRODUCTIVITY_HOURS: &str = "8";

// ---------------------------------------------------------------------------
// Onboarding option sets
// ---------------------------------------------------------------------------

/// Priority areas offered during onboarding. Labels outside this list are
/// still accepted.
pub const PRIORITY_AREA_OPTIONS: &[&str] = &[
    "Career Growth",
    "Health & Fitness",
    "Learning & Education",
    "Relationships",
    "Financial Goals",
    "Creative Projects",
    "Side Business",
    "Hobbies",
    "Travel",
    "Personal Development",
];

/// Daily productivity buckets offered during onboarding.
pub const PRODUCTIVITY_HOUR_BUCKETS: &[&str] = &["4-6", "6-8", "8-10", "10+"];

/// Keys of the camelCase preference payload. A request body carrying any of
/// these is treated as the richer call path.
pub const PREFERENCE_KEYS: &[&str] = &[
    "wakeUpTime",
    "bedTime",
    "sleepPreference",
    "focusPreference",
    "shortTermGoals",
    "longTermGoals",
    "workingHoursStart",
    "workingHoursEnd",
    "dailyProductivityHours",
    "priorityAreas",
    "fixedCommitments",
];

/// Whether `label` is one of the onboarding catalogue entries.
pub fn is_catalogue_priority_area(label: &str) -> bool {
    PRIORITY_AREA_OPTIONS.contains(&label)
}

/// Whether `bucket` is one of the onboarding productivity buckets (or the
/// request default).
pub fn is_known_productivity_bucket(bucket: &str) -> bool {
    bucket == DEFAULT_DAILY_PRODUCTIVITY_HOURS || PRODUCTIVITY_HOUR_BUCKETS.contains(&bucket)
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Self-reported diurnal preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chronotype {
    #[default]
    MorningPerson,
    NightOwl,
}

/// Preferred way of structuring focused work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusPreference {
    #[default]
    DeepWork,
    Pomodoro,
}

// ---------------------------------------------------------------------------
// Fixed commitments
// ---------------------------------------------------------------------------

/// A recurring block the generated schedule must not move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedCommitment {
    pub day: String,
    pub start: String,
    pub end: String,
    pub title: String,
}

// ---------------------------------------------------------------------------
// Client payload
// ---------------------------------------------------------------------------

/// Partial preference payload as sent by a client. Every field is optional;
/// [`UserPreferences::resolve`] fills the gaps with defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub wake_up_time: Option<String>,
    #[serde(default)]
    pub bed_time: Option<String>,
    #[serde(default, rename = "sleepPreference")]
    pub chronotype: Option<Chronotype>,
    #[serde(default)]
    pub focus_preference: Option<FocusPreference>,
    #[serde(default)]
    pub short_term_goals: Option<String>,
    #[serde(default)]
    pub long_term_goals: Option<String>,
    #[serde(default)]
    pub working_hours_start: Option<String>,
    #[serde(default)]
    pub working_hours_end: Option<String>,
    #[serde(default)]
    pub daily_productivity_hours: Option<String>,
    #[serde(default)]
    pub priority_areas: Option<Vec<String>>,
    #[serde(default)]
    pub fixed_commitments: Option<Vec<serde_json::Value>>,
}

/// Fully-resolved preferences, serialized in the backend's camelCase shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceSnapshot {
    pub wake_up_time: String,
    pub bed_time: String,
    #[serde(rename = "sleepPreference")]
    pub chronotype: Chronotype,
    pub focus_preference: FocusPreference,
    pub short_term_goals: String,
    pub long_term_goals: String,
    pub working_hours_start: String,
    pub working_hours_end: String,
    pub daily_productivity_hours: String,
    pub priority_areas: Vec<String>,
    pub fixed_commitments: Vec<serde_json::Value>,
}

impl Default for PreferenceSnapshot {
    fn default() -> Self {
        Self {
            wake_up_time: DEFAULT_WAKE_UP_TIME.to_string(),
            bed_time: DEFAULT_BED_TIME.to_string(),
            chronotype: Chronotype::default(),
            focus_preference: FocusPreference::default(),
            short_term_goals: String::new(),
            long_term_goals: String::new(),
            working_hours_start: DEFAULT_WORKING_HOURS_START.to_string(),
            working_hours_end: DEFAULT_WORKING_HOURS_END.to_string(),
            daily_productivity_hours: DEFAULT_DAILY_PRODUCTIVITY_HOURS.to_string(),
            priority_areas: Vec::new(),
            fixed_commitments: Vec::new(),
        }
    }
}

impl PreferenceSnapshot {
    /// Commitments that match the `{day, start, end, title}` shape. Entries
    /// of any other shape are skipped here but still forwarded verbatim.
    pub fn typed_commitments(&self) -> Vec<FixedCommitment> {
        self.fixed_commitments
            .iter()
            .filter_map(|c| serde_json::from_value(c.clone()).ok())
            .collect()
    }

    /// Priority areas that are not onboarding catalogue entries, in order.
    pub fn off_catalogue_areas(&self) -> Vec<&str> {
        self.priority_areas
            .iter()
            .map(String::as_str)
            .filter(|area| !is_catalogue_priority_area(area))
            .collect()
    }

    /// Whether the productivity bucket is one the onboarding form offers.
    pub fn has_known_productivity_bucket(&self) -> bool {
        is_known_productivity_bucket(&self.daily_productivity_hours)
    }
}

/// Treat a missing or blank string as absent, like the onboarding form does.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl UserPreferences {
    /// Apply defaults and validate, producing the snapshot forwarded to the
    /// backend.
    ///
    /// Time fields must be `HH:MM`, and the working-hours window must not be
    /// empty. Priority areas are trimmed and de-duplicated, keeping the first
    /// occurrence.
    pub fn resolve(&self) -> Result<PreferenceSnapshot, CoreError> {
        let defaults = PreferenceSnapshot::default();

        let wake_up_time = resolve_time("wakeUpTime", &self.wake_up_time, defaults.wake_up_time)?;
        let bed_time = resolve_time("bedTime", &self.bed_time, defaults.bed_time)?;
        let working_hours_start = resolve_time(
            "workingHoursStart",
            &self.working_hours_start,
            defaults.working_hours_start,
        )?;
        let working_hours_end = resolve_time(
            "workingHoursEnd",
            &self.working_hours_end,
            defaults.working_hours_end,
        )?;

        if working_hours_start == working_hours_end {
            return Err(CoreError::Validation(format!(
                "Working hours must not start and end at the same time ({working_hours_start})"
            )));
        }

        let daily_productivity_hours = non_blank(&self.daily_productivity_hours)
            .map(str::to_string)
            .unwrap_or(defaults.daily_productivity_hours);

        Ok(PreferenceSnapshot {
            wake_up_time,
            bed_time,
            chronotype: self.chronotype.unwrap_or_default(),
            focus_preference: self.focus_preference.unwrap_or_default(),
            short_term_goals: self.short_term_goals.clone().unwrap_or_default(),
            long_term_goals: self.long_term_goals.clone().unwrap_or_default(),
            working_hours_start,
            working_hours_end,
            daily_productivity_hours,
            priority_areas: dedupe_areas(self.priority_areas.as_deref().unwrap_or_default()),
            fixed_commitments: self.fixed_commitments.clone().unwrap_or_default(),
        })
    }
}

/// Validate a time field, normalising it to `HH:MM`, or fall back to the
/// default when blank.
fn resolve_time(field: &str, value: &Option<String>, default: String) -> Result<String, CoreError> {
    match non_blank(value) {
        Some(raw) => parse_clock(raw)
            .map(|t| t.to_string())
            .map_err(|_| CoreError::Validation(format!("{field} must be HH:MM, got '{raw}'"))),
        None => Ok(default),
    }
}

fn dedupe_areas(areas: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(areas.len());
    for area in areas.iter().map(|a| a.trim()).filter(|a| !a.is_empty()) {
        if !out.iter().any(|seen| seen == area) {
            out.push(area.to_string());
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Profile record
// ---------------------------------------------------------------------------

/// A row from the external profile store, keyed by user id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub wake_up_time: Option<String>,
    #[serde(default)]
    pub bed_time: Option<String>,
    #[serde(default)]
    pub chronotype: Option<Chronotype>,
    #[serde(default)]
    pub focus_preference: Option<FocusPreference>,
    #[serde(default)]
    pub short_term_goals: Option<String>,
    #[serde(default)]
    pub long_term_goals: Option<String>,
    #[serde(default)]
    pub working_hours_start: Option<String>,
    #[serde(default)]
    pub working_hours_end: Option<String>,
    #[serde(default)]
    pub daily_productivity_hours: Option<String>,
    #[serde(default)]
    pub priority_areas: Option<Vec<String>>,
    #[serde(default)]
    pub fixed_commitments: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub onboarding_completed: bool,
}

impl UserPreferences {
    /// Build the preference payload from a stored profile.
    ///
    /// Profiles that have not finished onboarding have no usable
    /// preferences yet and are rejected.
    pub fn from_profile(profile: &UserProfile) -> Result<Self, CoreError> {
        if !profile.onboarding_completed {
            return Err(CoreError::Validation(format!(
                "Onboarding not completed for user '{}'",
                profile.user_id
            )));
        }

        Ok(Self {
            wake_up_time: profile.wake_up_time.clone(),
            bed_time: profile.bed_time.clone(),
            chronotype: profile.chronotype,
            focus_preference: profile.focus_preference,
            short_term_goals: profile.short_term_goals.clone(),
            long_term_goals: profile.long_term_goals.clone(),
            working_hours_start: profile.working_hours_start.clone(),
            working_hours_end: profile.working_hours_end.clone(),
            daily_productivity_hours: profile.daily_productivity_hours.clone(),
            priority_areas: profile.priority_areas.clone(),
            fixed_commitments: profile.fixed_commitments.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
