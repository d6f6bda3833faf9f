//! HTTP handlers of the ticket API.
//!
//! Each handler performs at most one store mutation and maps the outcome to
//! a status code through its own error type.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use constcat::concat;
use derive_more::From;
use tower_http::trace::TraceLayer;

use crate::{api, db};

pub type SharedAppState = Arc<AppState>;

pub struct AppState {
    pub store: Box<dyn db::Store>,
}

impl AppState {
    pub fn new(store: impl db::Store + 'static) -> SharedAppState {
        Arc::new(Self {
            store: Box::new(store),
        })
    }
}

pub fn router(state: SharedAppState) -> Router {
    Router::new()
        .route(api::TICKETS_PATH, get(list_tickets).post(add_ticket))
        .route(
            concat!(api::TICKETS_PATH, "/:id"),
            get(get_ticket).put(edit_ticket).delete(delete_ticket),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn list_tickets(
    State(state): State<SharedAppState>,
) -> Result<Json<Vec<api::Ticket>>, ListTicketsError> {
    let tickets = state.store.list_tickets().await?;
    Ok(Json(tickets.into_iter().map(api::Ticket::from).collect()))
}

#[derive(Debug, From)]
pub enum ListTicketsError {
    #[from]
    DbError(db::Error),
}

impl IntoResponse for ListTicketsError {
    fn into_response(self) -> Response {
        match self {
            Self::DbError(e) => internal_error(&e),
        }
    }
}

async fn get_ticket(
    State(state): State<SharedAppState>,
    Path(id): Path<api::ticket::Id>,
) -> Result<Json<api::Ticket>, GetTicketError> {
    use GetTicketError as E;

    let ticket = state
        .store
        .get_ticket_by_id(id)
        .await?
        .ok_or(E::TicketNotFound)?;

    Ok(Json(ticket.into()))
}

#[derive(Debug, From)]
pub enum GetTicketError {
    #[from]
    DbError(db::Error),
    TicketNotFound,
}

impl IntoResponse for GetTicketError {
    fn into_response(self) -> Response {
        match self {
            Self::TicketNotFound => StatusCode::NOT_FOUND.into_response(),
            Self::DbError(e) => internal_error(&e),
        }
    }
}

async fn add_ticket(
    State(state): State<SharedAppState>,
    Json(api::ticket::New { description }): Json<api::ticket::New>,
) -> Result<impl IntoResponse, AddTicketError> {
    use AddTicketError as E;

    if description.trim().is_empty() {
        return Err(E::DescriptionRequired);
    }

    let new = db::ticket::New::open(description);
    let id = state.store.insert_ticket(&new).await?;
    tracing::info!(%id, "ticket created");

    let ticket = api::Ticket {
        id,
        description: new.description,
        status: new.status,
        created_date: new.created_date,
    };
    let location = format!("{}/{id}", api::TICKETS_PATH);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(ticket)))
}

#[derive(Debug, From)]
pub enum AddTicketError {
    #[from]
    DbError(db::Error),
    DescriptionRequired,
}

impl IntoResponse for AddTicketError {
    fn into_response(self) -> Response {
        match self {
            Self::DescriptionRequired => {
                StatusCode::BAD_REQUEST.into_response()
            }
            Self::DbError(e) => internal_error(&e),
        }
    }
}

async fn edit_ticket(
    State(state): State<SharedAppState>,
    Path(id): Path<api::ticket::Id>,
    Json(edit): Json<api::ticket::Edit>,
) -> Result<StatusCode, EditTicketError> {
    use EditTicketError as E;

    if edit.id != id {
        return Err(E::IdMismatch);
    }

    let mut ticket = state
        .store
        .get_ticket_by_id(id)
        .await?
        .ok_or(E::TicketNotFound)?;

    ticket.description = edit.description;
    ticket.status = edit.status;

    // The row may have been deleted since it was read.
    if state.store.update_ticket(&ticket).await? == 0 {
        return Err(E::TicketNotFound);
    }
    tracing::info!(%id, status = %ticket.status, "ticket updated");

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, From)]
pub enum EditTicketError {
    #[from]
    DbError(db::Error),
    IdMismatch,
    TicketNotFound,
}

impl IntoResponse for EditTicketError {
    fn into_response(self) -> Response {
        match self {
            Self::IdMismatch => StatusCode::BAD_REQUEST.into_response(),
            Self::TicketNotFound => StatusCode::NOT_FOUND.into_response(),
            Self::DbError(e) => internal_error(&e),
        }
    }
}

async fn delete_ticket(
    State(state): State<SharedAppState>,
    Path(id): Path<api::ticket::Id>,
) -> Result<StatusCode, DeleteTicketError> {
    use DeleteTicketError as E;

    if state.store.delete_ticket(id).await? == 0 {
        return Err(E::TicketNotFound);
    }
    tracing::info!(%id, "ticket deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, From)]
pub enum DeleteTicketError {
    #[from]
    DbError(db::Error),
    TicketNotFound,
}

impl IntoResponse for DeleteTicketError {
    fn into_response(self) -> Response {
        match self {
            Self::TicketNotFound => StatusCode::NOT_FOUND.into_response(),
            Self::DbError(e) => internal_error(&e),
        }
    }
}

fn internal_error(e: &db::Error) -> Response {
    tracing::error!(error = %e, "store failure");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
