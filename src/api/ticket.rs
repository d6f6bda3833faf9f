use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db;

pub use crate::db::ticket::{Id, Status};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Id,
    pub description: String,
    pub status: Status,
    #[serde(with = "time::serde::rfc3339")]
    pub created_date: OffsetDateTime,
}

impl From<db::Ticket> for Ticket {
    fn from(ticket: db::Ticket) -> Self {
        Self {
            id: ticket.id,
            description: ticket.description,
            status: ticket.status,
            created_date: ticket.created_date,
        }
    }
}

/// Body of a create request.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct New {
    pub description: String,
}

/// Body of an update request.
///
/// `id` must repeat the id of the route. Other ticket fields sent by the
/// caller, such as `createdDate`, are ignored.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edit {
    pub id: Id,
    pub description: String,
    pub status: Status,
}
