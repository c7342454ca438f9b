//! # panel-core
//!
//! Core panel signal model and store implementation.
//!
//! This crate provides:
//! - Signal types (join ids, signal kinds, change events)
//! - The panel store trait and in-memory implementation
//! - Subscribe/notify wiring for signal-change callbacks
//! - 16-bit raw level to percentage scaling
//!
//! This crate is intentionally runtime-agnostic and contains no async code,
//! keeping it usable from both the HTTP layer and any panel-side collaborator.

pub mod panel;
pub mod signal;

pub use panel::{MemoryPanel, PanelStore};
pub use signal::*;
