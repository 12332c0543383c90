//! Scoped transaction helper.
//!
//! Every exit path ends in commit or rollback: the closure's `Ok` commits,
//! its `Err` rolls back (with a diagnostic carrying the error value) and the
//! error is returned to the caller. A panic inside the closure unwinds
//! through the transaction, which rolls back when dropped, so partial writes
//! can never leak.

use futures::future::BoxFuture;
use sqlx::sqlite::SqlitePool;
use sqlx::SqliteConnection;
use tracing::warn;

/// Runs `f` inside a transaction, committing on `Ok` and rolling back on
/// `Err`
///
/// The error type only needs a `From<sqlx::Error>` conversion so `?` works
/// on statements inside the closure and on commit itself.
///
/// # Example
///
/// ```no_run
/// use dbkit::db::tx::with_transaction;
/// use dbkit::DbError;
/// use sqlx::sqlite::SqlitePool;
///
/// # async fn example(pool: &SqlitePool) -> Result<(), DbError> {
/// with_transaction(pool, |conn| {
///     Box::pin(async move {
///         sqlx::query("UPDATE account SET balance = balance - 10 WHERE id = 1")
///             .execute(&mut *conn)
///             .await?;
///         sqlx::query("UPDATE account SET balance = balance + 10 WHERE id = 2")
///             .execute(&mut *conn)
///             .await?;
///         Ok::<_, DbError>(())
///     })
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn with_transaction<T, E, F>(pool: &SqlitePool, f: F) -> Result<T, E>
where
    E: From<sqlx::Error> + std::fmt::Display,
    F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, E>>,
{
    let mut tx = pool.begin().await.map_err(E::from)?;

    match f(&mut *tx).await {
        Ok(value) => {
            tx.commit().await.map_err(E::from)?;
            Ok(value)
        }
        Err(err) => {
            warn!(error = %err, "transaction failed, rolling back");
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}
