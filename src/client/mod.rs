//! Client side of the ticket API: the remote calls and the list view-model
//! built on top of them.

pub mod list;

use async_trait::async_trait;
use derive_more::{Display, From};
use reqwest::StatusCode;

use crate::api;

pub use self::list::{Draft, Form, TicketList};

#[derive(Debug, Display, From)]
pub enum Error {
    #[display("http: {_0}")]
    Http(reqwest::Error),
}

impl Error {
    /// Status of the rejected response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http(e) => e.status(),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
        }
    }
}

/// Remote calls the view-model depends on.
#[async_trait]
pub trait Service: Send + Sync {
    async fn list_tickets(&self) -> Result<Vec<api::Ticket>, Error>;

    async fn add_ticket(
        &self,
        ticket: &api::ticket::New,
    ) -> Result<api::Ticket, Error>;

    async fn edit_ticket(
        &self,
        id: api::ticket::Id,
        ticket: &api::ticket::Edit,
    ) -> Result<(), Error>;

    async fn delete_ticket(&self, id: api::ticket::Id) -> Result<(), Error>;
}

/// [`Service`] over HTTP.
pub struct Client {
    inner: reqwest::Client,
    tickets_url: String,
}

impl Client {
    /// `base_url` is the server origin, e.g. `http://localhost:5026`.
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: reqwest::Client::new(),
            tickets_url: format!(
                "{}{}",
                base_url.trim_end_matches('/'),
                api::TICKETS_PATH,
            ),
        }
    }
}

#[async_trait]
impl Service for Client {
    async fn list_tickets(&self) -> Result<Vec<api::Ticket>, Error> {
        Ok(self
            .inner
            .get(&self.tickets_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    async fn add_ticket(
        &self,
        ticket: &api::ticket::New,
    ) -> Result<api::Ticket, Error> {
        Ok(self
            .inner
            .post(&self.tickets_url)
            .json(ticket)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    async fn edit_ticket(
        &self,
        id: api::ticket::Id,
        ticket: &api::ticket::Edit,
    ) -> Result<(), Error> {
        self.inner
            .put(format!("{}/{id}", self.tickets_url))
            .json(ticket)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn delete_ticket(&self, id: api::ticket::Id) -> Result<(), Error> {
        self.inner
            .delete(format!("{}/{id}", self.tickets_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
