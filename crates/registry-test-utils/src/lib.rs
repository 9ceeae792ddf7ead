//! Shared test utilities for the platform registry workspace.
//!
//! This crate is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`mock`]: [`MockRegistry`], an in-memory registry endpoint recording the
//!   queries it answers
//! - [`diagnostics`]: capture of `tracing` warnings emitted during a test

pub mod diagnostics;
pub mod mock;

pub use diagnostics::CapturedWarnings;
pub use mock::MockRegistry;
