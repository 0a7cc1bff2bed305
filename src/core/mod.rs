//! # Core Application Logic
//!
//! This module contains Koa's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Backend   │      │   Voice    │
//!     │  Adapter   │      │  (reqwest) │      │ (process)  │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct holding all application state
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`conversation`]: The append-only message log
//! - [`menu`]: Profile menu and help submenu state machine
//! - [`banner`]: Error banner with timed dismissal
//! - [`prefs`]: Theme preference persistence
//! - [`config`]: Config file and override resolution

pub mod action;
pub mod banner;
pub mod config;
pub mod conversation;
pub mod menu;
pub mod prefs;
pub mod state;
