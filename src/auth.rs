//! Admin authentication and the session security manager.

pub mod config;
pub mod csrf;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod session;
