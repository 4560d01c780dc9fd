//! # slot-engine
//!
//! Deterministic multi-calendar free slot finding for scheduling agents.
//!
//! Given busy intervals for the caller's calendar and any number of
//! participants, finds fixed-duration slots inside working hours that are
//! free for everyone. The engine is pure: busy data comes from an injected
//! [`FreeBusySource`] and the caller resolves "now" before building a query.
//!
//! ## Modules
//!
//! - [`interval`] — Half-open time ranges with strict overlap
//! - [`busy`] — Merge busy intervals into a sorted disjoint [`BusySet`]
//! - [`window`] — Per-day working windows, weekends skipped
//! - [`dst`] — DST gap policies for window boundaries
//! - [`scanner`] — Fixed-step scan of windows against the busy set
//! - [`availability`] — Access policy, result assembly, display cap
//! - [`source`] — The free/busy collaborator boundary
//! - [`config`] — Working hours and search configuration
//! - [`error`] — Error types

pub mod availability;
pub mod busy;
pub mod config;
pub mod dst;
pub mod error;
pub mod interval;
pub mod scanner;
pub mod source;
pub mod window;

pub use availability::{
    assemble, availability_from_response, collect_busy, find_availability, AvailabilityQuery,
    AvailabilityResult, SlotListing,
};
pub use busy::BusySet;
pub use config::{parse_timezone, SearchConfig, WorkingHours};
pub use dst::{local_midnight, DstPolicy};
pub use error::{SlotError, ValidationError};
pub use interval::Interval;
pub use scanner::{scan_free_slots, CandidateSlot};
pub use source::{
    CalendarBusy, FreeBusyRequest, FreeBusyResponse, FreeBusySource, StaticFreeBusy,
    PRIMARY_CALENDAR,
};
pub use window::{working_windows, WorkingWindow, WorkingWindows};
