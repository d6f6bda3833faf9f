//! Ticket tracker: a REST API over a single-table ticket store and a
//! client view-model that mirrors it.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod server;

pub use self::config::Config;
