// src/handler.rs

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::Result;

pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Type-erased sync receive handler
///
/// Takes the value passed to `sync_send_to` and resolves to whatever the
/// receiver wants to hand back. Wrapped in Arc so a caller can clone it out
/// of the receiver record and run it without holding any lock.
pub(crate) type SyncHandler<M, R> = Arc<dyn Fn(M) -> BoxFuture<'static, Result<R>> + Send + Sync>;

/// Erase the concrete closure and future types of a handler.
pub(crate) fn wrap_handler<M, R, F, Fut>(handler: F) -> SyncHandler<M, R>
where
    F: Fn(M) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R>> + Send + 'static,
{
    // ---
    Arc::new(move |value: M| Box::pin(handler(value)) as BoxFuture<'static, Result<R>>)
}
