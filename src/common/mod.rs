//! # Common Components
//!
//! Shared utilities used by the library and the command-line front end.
//!
//! ## Modules
//!
//! - [`config`]: Configuration parsing utilities

pub mod config;
