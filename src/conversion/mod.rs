//! Conversion between input files, wire requests, and summary text

pub mod request_builder;
pub mod response_parser;
