#![forbid(unsafe_code)]

//! Canonical input types for canopy widgets.
//!
//! One shared vocabulary for the events a tree widget consumes: key events
//! with modifier bitflags, and the discrete bulk commands a host can issue.
//! Hosts translate whatever their input source produces (terminal, browser,
//! test harness) into these types before handing them to the widget layer.

pub mod event;

pub use event::{Command, KeyCode, KeyEvent, KeyEventKind, Modifiers};
