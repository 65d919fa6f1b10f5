// executor.rs
use std::sync::Arc;

use async_trait::async_trait;

/// Runs a complete SQL statement. The ORM never inspects what comes back.
#[async_trait]
pub trait Executor: Send + Sync {
    type Output: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn execute(&self, sql: &str) -> Result<Self::Output, Self::Error>;
}

#[async_trait]
impl<E> Executor for &E
where
    E: Executor + ?Sized,
{
    type Output = E::Output;
    type Error = E::Error;

    async fn execute(&self, sql: &str) -> Result<Self::Output, Self::Error> {
        (**self).execute(sql).await
    }
}

#[async_trait]
impl<E> Executor for Arc<E>
where
    E: Executor + ?Sized,
{
    type Output = E::Output;
    type Error = E::Error;

    async fn execute(&self, sql: &str) -> Result<Self::Output, Self::Error> {
        (**self).execute(sql).await
    }
}
