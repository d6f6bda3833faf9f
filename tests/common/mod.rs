use reqwest::StatusCode;
use serde_json::Value;
use ticket_tracker::{api, db, server};
use tokio::net::TcpListener;

/// Starts the API on an ephemeral port backed by a fresh in-memory store
/// and returns its origin.
pub async fn spawn_server() -> String {
    spawn_server_with(db::Memory::new()).await
}

/// Starts the API on an ephemeral port over the given store.
pub async fn spawn_server_with(store: impl db::Store + 'static) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind a listener");
    let addr = listener.local_addr().expect("failed to get local address");
    let app = server::router(server::AppState::new(store));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server failed");
    });
    format!("http://{addr}")
}

pub struct Client {
    pub inner: reqwest::Client,
    pub base_url: String,
}

impl Client {
    pub async fn spawn() -> Self {
        Self::with_base_url(spawn_server().await)
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn tickets_url(&self) -> String {
        format!("{}{}", self.base_url, api::TICKETS_PATH)
    }

    pub fn ticket_url(&self, id: api::ticket::Id) -> String {
        format!("{}/{id}", self.tickets_url())
    }

    pub async fn get_tickets(&self) -> Result<Vec<api::Ticket>, StatusCode> {
        Ok(self
            .inner
            .get(self.tickets_url())
            .send()
            .await
            .expect("failed to send a request")
            .error_for_status()
            .map_err(|e| e.status().expect("status error"))?
            .json::<Vec<api::Ticket>>()
            .await
            .expect("failed to get a response"))
    }

    pub async fn get_ticket(
        &self,
        id: api::ticket::Id,
    ) -> Result<api::Ticket, StatusCode> {
        Ok(self
            .inner
            .get(self.ticket_url(id))
            .send()
            .await
            .expect("failed to send a request")
            .error_for_status()
            .map_err(|e| e.status().expect("status error"))?
            .json::<api::Ticket>()
            .await
            .expect("failed to get a response"))
    }

    pub async fn add_ticket(
        &self,
        description: &str,
    ) -> Result<api::Ticket, StatusCode> {
        Ok(self
            .inner
            .post(self.tickets_url())
            .json(&serde_json::json!({ "description": description }))
            .send()
            .await
            .expect("failed to send a request")
            .error_for_status()
            .map_err(|e| e.status().expect("status error"))?
            .json::<api::Ticket>()
            .await
            .expect("failed to get a response"))
    }

    /// Sends `body` as is, so tests can put a mismatching id in it.
    pub async fn edit_ticket(
        &self,
        id: api::ticket::Id,
        body: Value,
    ) -> Result<StatusCode, StatusCode> {
        Ok(self
            .inner
            .put(self.ticket_url(id))
            .json(&body)
            .send()
            .await
            .expect("failed to send a request")
            .error_for_status()
            .map_err(|e| e.status().expect("status error"))?
            .status())
    }

    pub async fn delete_ticket(
        &self,
        id: api::ticket::Id,
    ) -> Result<StatusCode, StatusCode> {
        Ok(self
            .inner
            .delete(self.ticket_url(id))
            .send()
            .await
            .expect("failed to send a request")
            .error_for_status()
            .map_err(|e| e.status().expect("status error"))?
            .status())
    }
}
