//! Request routing module
//!
//! Turns raw request targets into structured route descriptors. Pure string
//! processing; the dispatch layer decides what the descriptor means.

pub mod parser;

pub use parser::{parse_path, RouteDescriptor, RouteError};
