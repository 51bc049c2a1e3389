//! Terminal display of a summary and the actions offered on it

pub mod presenter;
pub mod render;
pub mod session;
