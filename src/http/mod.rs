//! HTTP protocol layer module
//!
//! Provides JSON response builders, decoupled from specific business logic.

pub mod response;

// Re-export commonly used builders
pub use response::{
    bad_request, empty_response, json_response, method_not_allowed, not_found, options_response,
    payload_too_large, server_error,
};
