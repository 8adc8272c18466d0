//! Shared test utilities for tekox integration tests.
//!
//! This module provides:
//! - An in-memory mailbox behind the `Connector` / `MailSession` traits
//! - A ledger that counts opened and closed sessions
//! - A progress reporter that records every event
//! - Raw message builders

pub mod builders;
pub mod mailbox;

pub use builders::*;
pub use mailbox::*;
