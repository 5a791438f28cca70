//! Reusable service capabilities.
//!
//! Each trait pairs an abstract `*_instance` method — the only thing a
//! concrete service implements — with a provided public wrapper that adds
//! input validation and output-schema conversion. Services compose the
//! capabilities they need; operations with wider signatures (a parent id,
//! an upload payload, an outbox handle) are inherent methods on the
//! service following the same instance/wrapper split.
//!
//! `*_instance` methods talk to the unit of work and raise domain errors;
//! the wrappers never touch persistence.

use async_trait::async_trait;
use validator::Validate;

use crate::{
    error::AppResult,
    pagination::{Page, PageRequest},
    repository::UnitOfWork,
};

/// Single lookup by id, converted to the output schema
#[async_trait]
pub trait Retrieve: Send + Sync {
    type Entity: Send;
    type Out: From<Self::Entity> + Send;

    /// Fetch the raw record; absence is a domain error here
    async fn retrieve_instance(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<Self::Entity>;

    async fn retrieve(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<Self::Out> {
        let instance = self.retrieve_instance(uow, id).await?;
        Ok(Self::Out::from(instance))
    }
}

/// Paginated, filtered listing converted to the output schema
#[async_trait]
pub trait RetrieveAll: Send + Sync {
    type Entity: Send;
    type Filter: Send + Sync;
    type Out: From<Self::Entity> + Send;

    async fn retrieve_all_instances(
        &self,
        uow: &mut UnitOfWork,
        page: &PageRequest,
        filter: &Self::Filter,
    ) -> AppResult<Page<Self::Entity>>;

    async fn retrieve_all(
        &self,
        uow: &mut UnitOfWork,
        page: &PageRequest,
        filter: &Self::Filter,
    ) -> AppResult<Page<Self::Out>> {
        let page = self.retrieve_all_instances(uow, page, filter).await?;
        Ok(page.map(Self::Out::from))
    }
}

/// Validated creation returning the persisted record as output schema
#[async_trait]
pub trait Create: Send + Sync {
    type Entity: Send;
    type In: Validate + Send + Sync;
    type Out: From<Self::Entity> + Send;

    async fn create_instance(
        &self,
        uow: &mut UnitOfWork,
        item: &Self::In,
    ) -> AppResult<Self::Entity>;

    async fn create(&self, uow: &mut UnitOfWork, item: &Self::In) -> AppResult<Self::Out> {
        item.validate()?;
        let instance = self.create_instance(uow, item).await?;
        Ok(Self::Out::from(instance))
    }
}

/// Validated full-field update returning the stored record as output schema
#[async_trait]
pub trait Update: Send + Sync {
    type Entity: Send;
    type In: Validate + Send + Sync;
    type Out: From<Self::Entity> + Send;

    async fn update_instance(
        &self,
        uow: &mut UnitOfWork,
        id: i32,
        item: &Self::In,
    ) -> AppResult<Self::Entity>;

    async fn update(&self, uow: &mut UnitOfWork, id: i32, item: &Self::In) -> AppResult<Self::Out> {
        item.validate()?;
        let instance = self.update_instance(uow, id, item).await?;
        Ok(Self::Out::from(instance))
    }
}

/// Deletion by id; the concrete `delete_instance` is responsible for the
/// existence check
#[async_trait]
pub trait Delete: Send + Sync {
    async fn delete_instance(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<()>;

    async fn delete(&self, uow: &mut UnitOfWork, id: i32) -> AppResult<()> {
        self.delete_instance(uow, id).await
    }
}
