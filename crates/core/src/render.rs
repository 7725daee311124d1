//! View model for displaying a [`GenerationResult`].
//!
//! [`render`] turns a result into day sections and rows without reordering
//! anything. Missing fields fall back to defaults instead of dropping the
//! row. [`render_text`] prints the view as plain text for CLI and log output.

use std::fmt::Write as _;

use serde::Serialize;

use crate::schedule::{ActivityKind, GenerationResult, Priority, ScheduleItem};
use crate::time_format::format_12h;

/// Icon shown for rows without a recognised activity type.
pub const DEFAULT_ICON: &str = "📋";

/// Label shown for rows without an activity name.
pub const UNTITLED_ACTIVITY: &str = "Untitled";

/// Visual treatment of a priority tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTone {
    High,
    Medium,
    /// Also used for missing and unrecognised priorities.
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleView {
    pub days: Vec<DayView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
    /// Day key exactly as delivered.
    pub label: String,
    /// Display heading (first letter upper-cased).
    pub heading: String,
    pub rows: Vec<RowView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub icon: &'static str,
    pub activity: String,
    pub time_range: String,
    pub tone: PriorityTone,
    /// Priority text as received; `None` when the item had no priority.
    pub priority_label: Option<String>,
}

/// Build the view for a result.
///
/// `None` means nothing has been generated yet and renders nothing, which is
/// different from an empty result (a view with zero days).
pub fn render(result: Option<&GenerationResult>) -> Option<ScheduleView> {
    let result = result?;
    let days = result
        .iter()
        .map(|(label, items)| DayView {
            label: label.to_string(),
            heading: capitalize(label),
            rows: items.iter().map(render_row).collect(),
        })
        .collect();
    Some(ScheduleView { days })
}

fn render_row(item: &ScheduleItem) -> RowView {
    let activity = item
        .activity
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(UNTITLED_ACTIVITY)
        .to_string();

    RowView {
        icon: icon_for(item.kind.as_ref()),
        activity,
        time_range: time_range(item.start_time.as_deref(), item.end_time.as_deref()),
        tone: tone_for(item.priority.as_ref()),
        priority_label: item.priority.as_ref().map(|p| p.as_str().to_string()),
    }
}

/// `"9:00 AM - 10:30 AM"` when both ends are present. With only one end the
/// raw value is shown unformatted; with neither the range is empty.
pub fn time_range(start: Option<&str>, end: Option<&str>) -> String {
    match (start, end) {
        (Some(start), Some(end)) => format!("{} - {}", format_12h(start), format_12h(end)),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => String::new(),
    }
}

pub fn icon_for(kind: Option<&ActivityKind>) -> &'static str {
    match kind {
        Some(ActivityKind::Meeting) => "🤝",
        Some(ActivityKind::Focus) => "🎯",
        Some(ActivityKind::Development) | Some(ActivityKind::Learning) => "📚",
        Some(ActivityKind::Work) => "💼",
        Some(ActivityKind::Break) => "☕",
        Some(ActivityKind::Exercise) => "🏃",
        Some(ActivityKind::Personal) => "⭐",
        Some(ActivityKind::Other(_)) | None => DEFAULT_ICON,
    }
}

pub fn tone_for(priority: Option<&Priority>) -> PriorityTone {
    match priority {
        Some(Priority::High) => PriorityTone::High,
        Some(Priority::Medium) => PriorityTone::Medium,
        Some(Priority::Low) | Some(Priority::Unknown(_)) | None => PriorityTone::Low,
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Plain-text rendering: a heading per day and one indented line per row.
pub fn render_text(view: &ScheduleView) -> String {
    let mut out = String::new();
    for day in &view.days {
        let _ = writeln!(out, "{}", day.heading);
        for row in &day.rows {
            let _ = write!(out, "  {} {}", row.icon, row.activity);
            if !row.time_range.is_empty() {
                let _ = write!(out, " ({})", row.time_range);
            }
            if let Some(label) = &row.priority_label {
                let _ = write!(out, " [{label}]");
            }
            out.push('\n');
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> GenerationResult {
        GenerationResult::from_slice(body.as_bytes()).unwrap()
    }

    #[test]
    fn absent_result_renders_nothing() {
        assert_eq!(render(None), None);
    }

    #[test]
    fn empty_result_renders_zero_days() {
        let result = parse("{}");
        let view = render(Some(&result)).unwrap();
        assert!(view.days.is_empty());
        assert_eq!(render_text(&view), "");
    }

    #[test]
    fn day_order_is_not_alphabetized() {
        let result = parse(r#"{"sunday": [], "friday": [], "monday": []}"#);
        let view = render(Some(&result)).unwrap();
        let labels: Vec<_> = view.days.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["sunday", "friday", "monday"]);
        assert_eq!(view.days[0].heading, "Sunday");
    }

    #[test]
    fn full_row_is_formatted() {
        let result = parse(
            r#"{"monday": [{"activity": "Deep Work", "startTime": "13:30", "endTime": "15:00",
                "type": "focus", "priority": "high"}]}"#,
        );
        let view = render(Some(&result)).unwrap();
        let row = &view.days[0].rows[0];
        assert_eq!(row.icon, "🎯");
        assert_eq!(row.activity, "Deep Work");
        assert_eq!(row.time_range, "1:30 PM - 3:00 PM");
        assert_eq!(row.tone, PriorityTone::High);
        assert_eq!(row.priority_label.as_deref(), Some("high"));
    }

    #[test]
    fn missing_fields_degrade_without_dropping_the_row() {
        let result = parse(r#"{"tuesday": [{}, {"startTime": "09:00"}]}"#);
        let view = render(Some(&result)).unwrap();
        let rows = &view.days[0].rows;
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].icon, DEFAULT_ICON);
        assert_eq!(rows[0].activity, UNTITLED_ACTIVITY);
        assert_eq!(rows[0].time_range, "");
        assert_eq!(rows[0].tone, PriorityTone::Low);
        assert_eq!(rows[0].priority_label, None);

        // A lone start time is shown raw.
        assert_eq!(rows[1].time_range, "09:00");
    }

    #[test]
    fn unknown_tags_use_defaults() {
        let result = parse(r#"{"monday": [{"activity": "Nap", "type": "siesta", "priority": "urgent"}]}"#);
        let row = &render(Some(&result)).unwrap().days[0].rows[0];
        assert_eq!(row.icon, DEFAULT_ICON);
        assert_eq!(row.tone, PriorityTone::Low);
        assert_eq!(row.priority_label.as_deref(), Some("urgent"));
    }

    #[test]
    fn every_known_kind_has_an_icon() {
        let kinds = [
            ActivityKind::Meeting,
            ActivityKind::Focus,
            ActivityKind::Development,
            ActivityKind::Work,
            ActivityKind::Break,
            ActivityKind::Learning,
            ActivityKind::Exercise,
            ActivityKind::Personal,
        ];
        for kind in &kinds {
            assert_ne!(icon_for(Some(kind)), DEFAULT_ICON, "{kind} should have its own icon");
        }
    }

    #[test]
    fn text_rendering_lists_rows_in_order() {
        let result = parse(
            r#"{"monday": [
                {"activity": "Standup", "startTime": "09:00", "endTime": "09:15", "type": "meeting", "priority": "medium"},
                {"activity": "Lunch", "startTime": "12:00", "endTime": "13:00", "type": "break"}
            ]}"#,
        );
        let text = render_text(&render(Some(&result)).unwrap());
        assert_eq!(
            text,
            "Monday\n  🤝 Standup (9:00 AM - 9:15 AM) [medium]\n  ☕ Lunch (12:00 PM - 1:00 PM)\n"
        );
    }
}
