//! View-model of the ticket list with its popup form.

use std::fmt;

use itertools::Itertools as _;

use super::{Error, Service};
use crate::api::{
    self,
    ticket::{Id, Status},
};

/// Fields the popup form edits.
///
/// The id of an edited ticket lives in [`Form::Editing`], not here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Draft {
    pub description: String,
    pub status: Status,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Form {
    #[default]
    Hidden,
    Adding,
    Editing(Id),
}

/// Mirror of the server's ticket list.
///
/// The list is never patched locally: every successful mutation is
/// followed by a full reload. A failed call leaves the state untouched.
pub struct TicketList<S> {
    service: S,
    tickets: Vec<api::Ticket>,
    draft: Draft,
    form: Form,
}

impl<S: Service> TicketList<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            tickets: Vec::new(),
            draft: Draft::default(),
            form: Form::Hidden,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn tickets(&self) -> &[api::Ticket] {
        &self.tickets
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn form(&self) -> Form {
        self.form
    }

    pub fn is_form_visible(&self) -> bool {
        self.form != Form::Hidden
    }

    pub fn is_edit_mode(&self) -> bool {
        matches!(self.form, Form::Editing(_))
    }

    pub async fn load(&mut self) -> Result<(), Error> {
        self.tickets = self.service.list_tickets().await.inspect_err(|e| {
            tracing::warn!(error = %e, "failed to load tickets");
        })?;
        Ok(())
    }

    pub fn show_add_form(&mut self) {
        self.draft = Draft::default();
        self.form = Form::Adding;
    }

    pub fn show_edit_form(&mut self, ticket: &api::Ticket) {
        self.draft = Draft {
            description: ticket.description.clone(),
            status: ticket.status,
        };
        self.form = Form::Editing(ticket.id);
    }

    pub fn hide_form(&mut self) {
        self.form = Form::Hidden;
    }

    /// Sends the draft as a new ticket or as an edit, depending on the form.
    ///
    /// Does nothing while the form is hidden.
    pub async fn submit(&mut self) -> Result<(), Error> {
        match self.form {
            Form::Hidden => return Ok(()),
            Form::Adding => {
                let new = api::ticket::New {
                    description: self.draft.description.clone(),
                };
                self.service.add_ticket(&new).await.inspect_err(|e| {
                    tracing::warn!(error = %e, "failed to add ticket");
                })?;
            }
            Form::Editing(id) => {
                let edit = api::ticket::Edit {
                    id,
                    description: self.draft.description.clone(),
                    status: self.draft.status,
                };
                self.service.edit_ticket(id, &edit).await.inspect_err(|e| {
                    tracing::warn!(%id, error = %e, "failed to edit ticket");
                })?;
            }
        }

        self.draft = Draft::default();
        self.hide_form();
        self.load().await
    }

    pub async fn delete(&mut self, id: Id) -> Result<(), Error> {
        self.service.delete_ticket(id).await.inspect_err(|e| {
            tracing::warn!(%id, error = %e, "failed to delete ticket");
        })?;
        self.load().await
    }
}

impl<S> fmt::Display for TicketList<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tickets.is_empty() {
            writeln!(f, "no tickets")?;
        } else {
            let rows = self
                .tickets
                .iter()
                .map(|t| {
                    format!(
                        "#{:<4} {:<6} {} {}",
                        t.id.to_string(),
                        t.status.to_string(),
                        t.created_date.date(),
                        t.description,
                    )
                })
                .join("\n");
            writeln!(f, "{rows}")?;
        }

        let Draft {
            description,
            status,
        } = &self.draft;
        match self.form {
            Form::Hidden => Ok(()),
            Form::Adding => {
                writeln!(f, "[add ticket] {description:?} ({status})")
            }
            Form::Editing(id) => {
                writeln!(f, "[edit ticket #{id}] {description:?} ({status})")
            }
        }
    }
}
