//! Wire types of the HTTP API.

pub mod ticket;

use constcat::concat;

pub use self::ticket::Ticket;

/// Prefix every route is mounted under.
pub const BASE_PATH: &str = "/api";

pub const TICKETS_PATH: &str = concat!(BASE_PATH, "/tickets");
