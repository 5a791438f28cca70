//! Unit of work: one transaction per request scope.

use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::error::AppResult;

/// Scoped transactional context backing all repository calls of one
/// request.
///
/// Exactly one physical transaction lives for the whole scope; dropping
/// the unit of work without [`commit`](Self::commit) rolls it back, so a
/// request cancelled mid-flight leaves no partial writes. The read-only
/// flavor rolls back even on a successful finish, so read paths can never
/// leave uncommitted state behind.
pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
    read_only: bool,
}

impl UnitOfWork {
    /// Begin a committing unit of work for a write path
    pub async fn begin(pool: &PgPool) -> AppResult<Self> {
        Ok(Self {
            tx: pool.begin().await?,
            read_only: false,
        })
    }

    /// Begin a read-only unit of work; it always rolls back on finish
    pub async fn begin_read_only(pool: &PgPool) -> AppResult<Self> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(Self {
            tx,
            read_only: true,
        })
    }

    /// Connection all repository calls in this scope run on
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    /// Finish the scope: persist all changes, or roll back when read-only
    pub async fn commit(self) -> AppResult<()> {
        if self.read_only {
            self.tx.rollback().await?;
        } else {
            self.tx.commit().await?;
        }
        Ok(())
    }

    /// Explicitly discard all changes
    pub async fn rollback(self) -> AppResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
