use std::error::Error as StdError;

use async_trait::async_trait;
use derive_more::Display;
use enum_utils::TryFromRepr;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tokio_postgres::{
    types::{
        accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql,
        Type,
    },
    Row,
};

use super::{Client, Error, Store};

#[derive(Clone, Debug, PartialEq)]
pub struct Ticket {
    pub id: Id,
    pub description: String,
    pub status: Status,
    pub created_date: OffsetDateTime,
}

/// Ticket that has not been assigned an id yet.
#[derive(Clone, Debug)]
pub struct New {
    pub description: String,
    pub status: Status,
    pub created_date: OffsetDateTime,
}

impl New {
    /// Opens a ticket created now.
    pub fn open(description: String) -> Self {
        // `TIMESTAMPTZ` keeps microseconds.
        let now = OffsetDateTime::now_utc();
        let created_date =
            now - Duration::nanoseconds(i64::from(now.nanosecond() % 1_000));
        Self {
            description,
            status: Status::Open,
            created_date,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(i32);

impl From<i32> for Id {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl FromSql<'_> for Id {
    accepts!(INT4);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        i32::from_sql(ty, raw).map(Self)
    }
}

impl ToSql for Id {
    accepts!(INT4);

    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.0.to_sql(ty, out)
    }
}

/// Serialized by name on the wire, by numeric repr in the database.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    TryFromRepr,
    PartialEq,
    Serialize,
)]
#[repr(u8)]
pub enum Status {
    #[default]
    #[serde(alias = "open", alias = "OPEN")]
    Open = 1,
    #[serde(alias = "closed", alias = "CLOSED")]
    Closed = 2,
}

impl FromSql<'_> for Status {
    accepts!(INT2);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        let repr = i16::from_sql(ty, raw)?;
        let repr = u8::try_from(repr)?;
        let status = Self::try_from(repr).map_err(|_| "invalid status")?;
        Ok(status)
    }
}

impl ToSql for Status {
    accepts!(INT2);

    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        let repr = i16::from((*self) as u8);
        repr.to_sql(ty, out)
    }
}

impl From<Row> for Ticket {
    fn from(row: Row) -> Self {
        Self {
            id: row.get("id"),
            description: row.get("description"),
            status: row.get("status"),
            created_date: row.get("created_date"),
        }
    }
}

impl Client {
    /// Creates the `tickets` table unless it already exists.
    pub async fn init_schema(&self) -> Result<(), Error> {
        const SQL: &str = "\
            CREATE TABLE IF NOT EXISTS tickets ( \
                id SERIAL PRIMARY KEY, \
                description TEXT NOT NULL, \
                status SMALLINT NOT NULL, \
                created_date TIMESTAMPTZ NOT NULL \
            )";
        Ok(self.0.batch_execute(SQL).await?)
    }
}

#[async_trait]
impl Store for Client {
    async fn list_tickets(&self) -> Result<Vec<Ticket>, Error> {
        const SQL: &str = "\
            SELECT id, description, status, created_date \
            FROM tickets \
            ORDER BY id";
        Ok(self
            .0
            .query(SQL, &[])
            .await?
            .into_iter()
            .map(Ticket::from)
            .collect())
    }

    async fn get_ticket_by_id(&self, id: Id) -> Result<Option<Ticket>, Error> {
        const SQL: &str = "\
            SELECT id, description, status, created_date \
            FROM tickets \
            WHERE id = $1";
        Ok(self.0.query_opt(SQL, &[&id]).await?.map(Ticket::from))
    }

    async fn insert_ticket(&self, ticket: &New) -> Result<Id, Error> {
        const SQL: &str = "\
            INSERT INTO tickets (description, status, created_date) \
            VALUES ($1, $2, $3) \
            RETURNING id";
        Ok(self
            .0
            .query_one(
                SQL,
                &[&ticket.description, &ticket.status, &ticket.created_date],
            )
            .await?
            .get("id"))
    }

    async fn update_ticket(&self, ticket: &Ticket) -> Result<u64, Error> {
        const SQL: &str = "\
            UPDATE tickets \
            SET description = $2, \
                status = $3 \
            WHERE id = $1";
        Ok(self
            .0
            .execute(SQL, &[&ticket.id, &ticket.description, &ticket.status])
            .await?)
    }

    async fn delete_ticket(&self, id: Id) -> Result<u64, Error> {
        const SQL: &str = "DELETE FROM tickets WHERE id = $1";
        Ok(self.0.execute(SQL, &[&id]).await?)
    }
}
