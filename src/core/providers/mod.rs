//! Provider implementations

pub mod local_server;

pub use local_server::LocalServerProvider;
