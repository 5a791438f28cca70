//! Repository layer for database operations.
//!
//! Every entity family gets a repository implementing the generic
//! [`Repository`] contract. Repositories are stateless; each call borrows
//! the connection of the ambient [`UnitOfWork`](uow::UnitOfWork)
//! transaction, never committing on its own. "Not found" is an absent
//! value, not an error; turning absence into a domain error is the
//! services' job.

pub mod events;
pub mod media;
pub mod museum;
pub mod uow;

use async_trait::async_trait;
use sqlx::PgConnection;

use crate::{
    error::AppResult,
    pagination::{Page, PageRequest},
};

pub use uow::UnitOfWork;

/// Generic per-entity data-access contract.
///
/// Concrete repositories add entity-specific inherent methods on top
/// (eager loads, single-field blob-reference updates).
#[async_trait]
pub trait Repository {
    /// The database record type
    type Entity: Send + Unpin;
    /// Payload accepted by `create`
    type Create: Send + Sync;
    /// Payload accepted by `update`; overwrites all payload fields
    type Update: Send + Sync;
    /// Entity-specific filters for `retrieve_all`
    type Filter: Send + Sync;

    /// Single lookup by primary key
    async fn retrieve(conn: &mut PgConnection, id: i32) -> AppResult<Option<Self::Entity>>;

    /// Paginated, filtered listing
    async fn retrieve_all(
        conn: &mut PgConnection,
        page: &PageRequest,
        filter: &Self::Filter,
    ) -> AppResult<Page<Self::Entity>>;

    /// Insert and return the persisted record, including generated id and
    /// defaults
    async fn create(conn: &mut PgConnection, data: &Self::Create) -> AppResult<Self::Entity>;

    /// Overwrite the payload fields of the record with the given id
    async fn update(
        conn: &mut PgConnection,
        id: i32,
        data: &Self::Update,
    ) -> AppResult<Option<Self::Entity>>;

    /// Remove by id; deleting an unknown id is a caller error checked
    /// upstream
    async fn delete(conn: &mut PgConnection, id: i32) -> AppResult<()>;

    /// Check existence by id
    async fn exists(conn: &mut PgConnection, id: i32) -> AppResult<bool>;
}
