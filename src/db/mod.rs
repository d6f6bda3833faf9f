pub mod memory;
pub mod ticket;

use std::{error::Error as StdError, time::Duration};

use async_trait::async_trait;
use derive_more::{Display, From};
use tokio_postgres::{tls::NoTlsStream, NoTls, Socket};

pub use self::{memory::Memory, ticket::Ticket};

pub type Connection = tokio_postgres::Connection<Socket, NoTlsStream>;

/// Storage failure other than a missing record.
///
/// Absent tickets are reported as `None` or as zero affected rows, never
/// through this type.
#[derive(Debug, Display, From)]
pub enum Error {
    #[display("postgres: {_0}")]
    Postgres(tokio_postgres::Error),
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Postgres(e) => Some(e),
        }
    }
}

/// Keyed storage of [`Ticket`] rows.
#[async_trait]
pub trait Store: Send + Sync {
    /// Returns all tickets in insertion order.
    async fn list_tickets(&self) -> Result<Vec<Ticket>, Error>;

    async fn get_ticket_by_id(
        &self,
        id: ticket::Id,
    ) -> Result<Option<Ticket>, Error>;

    async fn insert_ticket(
        &self,
        ticket: &ticket::New,
    ) -> Result<ticket::Id, Error>;

    /// Overwrites `description` and `status` of the row with the same id.
    ///
    /// Returns the number of affected rows, `0` if the row is gone.
    async fn update_ticket(&self, ticket: &Ticket) -> Result<u64, Error>;

    async fn delete_ticket(&self, id: ticket::Id) -> Result<u64, Error>;
}

pub async fn connect(
    url: &str,
    connect_timeout: Option<Duration>,
) -> Result<(Client, Connection), Error> {
    let mut config = url.parse::<tokio_postgres::Config>()?;
    if let Some(timeout) = connect_timeout {
        config.connect_timeout(timeout);
    }
    let (client, connection) = config.connect(NoTls).await?;
    Ok((Client(client), connection))
}

pub struct Client(tokio_postgres::Client);
