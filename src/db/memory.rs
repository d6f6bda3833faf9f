//! In-process [`Store`] for tests and database-less runs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    ticket::{Id, New},
    Error, Store, Ticket,
};

#[derive(Debug, Default)]
pub struct Memory {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    last_id: i32,
    tickets: BTreeMap<Id, Ticket>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for Memory {
    async fn list_tickets(&self) -> Result<Vec<Ticket>, Error> {
        Ok(self.state.read().await.tickets.values().cloned().collect())
    }

    async fn get_ticket_by_id(&self, id: Id) -> Result<Option<Ticket>, Error> {
        Ok(self.state.read().await.tickets.get(&id).cloned())
    }

    async fn insert_ticket(&self, ticket: &New) -> Result<Id, Error> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let id = Id::from(state.last_id);
        state.tickets.insert(
            id,
            Ticket {
                id,
                description: ticket.description.clone(),
                status: ticket.status,
                created_date: ticket.created_date,
            },
        );
        Ok(id)
    }

    async fn update_ticket(&self, ticket: &Ticket) -> Result<u64, Error> {
        let mut state = self.state.write().await;
        let Some(stored) = state.tickets.get_mut(&ticket.id) else {
            return Ok(0);
        };
        stored.description.clone_from(&ticket.description);
        stored.status = ticket.status;
        Ok(1)
    }

    async fn delete_ticket(&self, id: Id) -> Result<u64, Error> {
        let removed = self.state.write().await.tickets.remove(&id);
        Ok(removed.map_or(0, |_| 1))
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;
    use crate::db::ticket::Status;

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let store = Memory::new();
        let first = store.insert_ticket(&New::open("a".into())).await.unwrap();
        let second = store.insert_ticket(&New::open("b".into())).await.unwrap();
        assert_eq!(first, Id::from(1));
        assert_eq!(second, Id::from(2));
    }

    #[tokio::test]
    async fn does_not_reuse_deleted_ids() {
        let store = Memory::new();
        let id = store.insert_ticket(&New::open("a".into())).await.unwrap();
        assert_eq!(store.delete_ticket(id).await.unwrap(), 1);
        let next = store.insert_ticket(&New::open("b".into())).await.unwrap();
        assert_eq!(next, Id::from(2));
    }

    #[tokio::test]
    async fn lists_in_insertion_order() {
        let store = Memory::new();
        for description in ["one", "two", "three"] {
            store
                .insert_ticket(&New::open(description.into()))
                .await
                .unwrap();
        }
        let descriptions = store
            .list_tickets()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.description)
            .collect::<Vec<_>>();
        assert_eq!(descriptions, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn update_keeps_created_date() {
        let store = Memory::new();
        let id = store.insert_ticket(&New::open("a".into())).await.unwrap();
        let before = store.get_ticket_by_id(id).await.unwrap().unwrap();

        let affected = store
            .update_ticket(&Ticket {
                id,
                description: "b".into(),
                status: Status::Closed,
                created_date: OffsetDateTime::UNIX_EPOCH,
            })
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let after = store.get_ticket_by_id(id).await.unwrap().unwrap();
        assert_eq!(after.description, "b");
        assert_eq!(after.status, Status::Closed);
        assert_eq!(after.created_date, before.created_date);
    }

    #[tokio::test]
    async fn reports_absent_rows_as_zero_affected() {
        let store = Memory::new();
        let missing = Ticket {
            id: Id::from(99),
            description: "x".into(),
            status: Status::Open,
            created_date: OffsetDateTime::now_utc(),
        };
        assert_eq!(store.update_ticket(&missing).await.unwrap(), 0);
        assert_eq!(store.delete_ticket(missing.id).await.unwrap(), 0);
        assert_eq!(store.get_ticket_by_id(missing.id).await.unwrap(), None);
        assert!(store.list_tickets().await.unwrap().is_empty());
    }
}
