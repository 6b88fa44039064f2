//! # Tripline - Terminal Trip Planner with Inline Editing
//!
//! An interactive board of travel points that can be created, edited in
//! place, deleted, filtered, and sorted, backed by a remote REST data
//! source. Built with a presenter-centred MVP architecture for
//! maintainability and testability.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   Intents    ┌──────────────┐   Mutations  ┌─────────┐
//! │    Views    │─────────────▶│  Presenters  │─────────────▶│ Models  │
//! │             │              │              │              │         │
//! │ - Templates │              │ - Row state  │              │ - Points│
//! │ - Surface   │◀─────────────│ - Dispatch   │◀─────────────│ - Filter│
//! │ - Painter   │   Swaps      │ - Reconcile  │   Events     │         │
//! └─────────────┘              └──────────────┘              └─────────┘
//!                                      ▲
//!                                      │ Keys
//!                                      ▼
//!                               ┌──────────────┐
//!                               │  Controller  │
//!                               │              │
//!                               │ - Input      │
//!                               │   Routing    │
//!                               │ - Event Loop │
//!                               └──────────────┘
//! ```

pub mod board;
pub mod cmd_args;
pub mod config;

// Re-export main types for easy access
pub use board::*;
