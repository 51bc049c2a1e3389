//! Core application modules
//!
//! This module contains configuration, constants, logging, errors, the
//! provider seam, and the summary client.

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod provider;
pub mod providers;
pub mod summarizer;
