//! Core Components
//!
//! Transport infrastructure shared by both flow legs.

pub mod transport;

pub use transport::*;
