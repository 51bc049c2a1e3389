//! API data models
//!
//! This module contains data structures for the OpenAI-compatible wire format
//! and the request/result types of a summary.

pub mod openai;
pub mod summary;
