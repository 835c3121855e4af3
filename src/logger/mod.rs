//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging
//! - Per-request access logging
//! - Error and warning logging

use crate::config::Config;
use chrono::Local;
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Journal server started successfully");
    println!("Listening on: http://{addr}");
    println!("Log level: {}", config.logging.level);
    println!("Database: {}", config.database.path);
    println!("Max body size: {} bytes", config.http.max_body_size);
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

/// Log one access line per handled request, CLF-style timestamp
pub fn log_access(method: &str, target: &str, status: u16, body_bytes: u64) {
    println!(
        "[{}] \"{method} {target}\" {status} {body_bytes}",
        Local::now().format("%d/%b/%Y:%H:%M:%S %z"),
    );
}

/// Log one dispatch-table row at startup
pub fn log_route_mapping(resource: &str, allow: &str, filters: &[&str]) {
    if filters.is_empty() {
        println!("[Routes] /{resource}  ({allow})");
    } else {
        println!("[Routes] /{resource}  ({allow})  filters: {}", filters.join(", "));
    }
}
