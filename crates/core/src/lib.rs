//! Domain layer for the Zchedule gateway and schedule viewer.
//!
//! Everything here is pure data and logic with no I/O, so it can be shared by
//! the HTTP gateway, the backend client, and any UI or CLI consumer.

pub mod error;
pub mod generation;
pub mod preferences;
pub mod render;
pub mod request;
pub mod schedule;
pub mod time_format;
