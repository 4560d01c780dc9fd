//! Turn availability results into text or JSON for the end user.

use serde::Serialize;
use slot_engine::{AvailabilityQuery, AvailabilityResult, CandidateSlot, SlotError};

const SLOT_FORMAT: &str = "%Y-%m-%d %I:%M %p %Z";

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

pub fn render_text(result: &AvailabilityResult, query: &AvailabilityQuery) -> String {
    let participants = query.participants();
    let listing = match result {
        AvailabilityResult::NoFreeSlots => {
            let who = if participants.is_empty() { "you" } else { "everyone" };
            return format!("No free slots found for {} in the specified time range.", who);
        }
        AvailabilityResult::Available(listing) => listing,
    };

    let whose = if participants.is_empty() {
        "your calendar".to_string()
    } else {
        format!("calendars of: you, {}", participants.join(", "))
    };

    let mut lines = vec![format!(
        "Available {}-minute slots for {}:",
        query.duration_minutes, whose
    )];
    for slot in listing.shown() {
        lines.push(format!("- {}", slot.start.format(SLOT_FORMAT)));
    }
    if listing.remaining() > 0 {
        lines.push(format!(
            "\n(Showing first {} of {} available slots)",
            listing.shown().len(),
            listing.total()
        ));
    }
    lines.join("\n")
}

pub fn render_error_text(err: &SlotError, query: &AvailabilityQuery) -> String {
    match err {
        SlotError::PrimaryCalendarInaccessible => {
            "Could not access your calendar. Please check your permissions.".to_string()
        }
        SlotError::CalendarAccess(ids) => format!(
            "Could not access calendars for: {}. Please check the email addresses and calendar sharing permissions.",
            ids.join(", ")
        ),
        other => {
            let participants = query.participants();
            let whose = if participants.is_empty() {
                "your calendar".to_string()
            } else {
                format!("calendars for you, {}", participants.join(", "))
            };
            format!("Error finding free slots in {}: {}", whose, other)
        }
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDto {
    start: String,
    end: String,
}

impl From<&CandidateSlot> for SlotDto {
    fn from(slot: &CandidateSlot) -> Self {
        Self {
            start: slot.start.to_rfc3339(),
            end: slot.end.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
struct ResultDto {
    status: &'static str,
    duration_minutes: u32,
    timezone: String,
    participants: Vec<String>,
    total: usize,
    remaining: usize,
    slots: Vec<SlotDto>,
}

#[derive(Serialize)]
struct ErrorDto {
    status: &'static str,
    kind: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    calendars: Vec<String>,
    message: String,
}

pub fn render_json(result: &AvailabilityResult, query: &AvailabilityQuery) -> serde_json::Result<String> {
    let (status, total, remaining, slots) = match result {
        AvailabilityResult::NoFreeSlots => ("no_free_slots", 0, 0, Vec::new()),
        AvailabilityResult::Available(listing) => (
            "available",
            listing.total(),
            listing.remaining(),
            listing.shown().iter().map(SlotDto::from).collect(),
        ),
    };
    let dto = ResultDto {
        status,
        duration_minutes: query.duration_minutes,
        timezone: query.timezone.name().to_string(),
        participants: query.participants(),
        total,
        remaining,
        slots,
    };
    serde_json::to_string_pretty(&dto)
}

pub fn render_error_json(err: &SlotError, query: &AvailabilityQuery) -> serde_json::Result<String> {
    let (kind, calendars) = match err {
        SlotError::PrimaryCalendarInaccessible => ("primary_calendar_inaccessible", Vec::new()),
        SlotError::CalendarAccess(ids) => ("calendar_access", ids.clone()),
        SlotError::Validation(_) => ("validation", Vec::new()),
        _ => ("other", Vec::new()),
    };
    let dto = ErrorDto {
        status: "error",
        kind,
        calendars,
        message: render_error_text(err, query),
    };
    serde_json::to_string_pretty(&dto)
}
