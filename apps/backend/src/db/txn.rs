use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use futures_util::future::BoxFuture;
use sea_orm::{DatabaseTransaction, TransactionTrait};

use super::{require_db, txn_policy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// A transaction shared across one request, injected into request extensions.
/// Whoever inserted it owns commit/rollback.
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }

    pub fn from_req(req: &HttpRequest) -> Option<Self> {
        req.extensions().get::<SharedTxn>().cloned()
    }
}

/// Run `f` inside a database transaction.
///
/// 1) A `SharedTxn` in the request extensions is reused as-is (no commit/rollback here).
/// 2) Otherwise a new transaction is opened; `Err` rolls back, `Ok` follows the `TxnPolicy`.
pub async fn with_txn<R, F>(req: Option<&HttpRequest>, state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> BoxFuture<'a, Result<R, AppError>>,
{
    // Clone out of the extensions before awaiting so no RefCell borrow is held.
    let shared = req.and_then(SharedTxn::from_req);
    if let Some(shared) = shared {
        return f(shared.transaction()).await;
    }

    let db = require_db(state)?;
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            if txn_policy::current().keeps_writes() {
                txn.commit().await?;
            } else {
                txn.rollback().await?;
            }
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; the closure's error is what the caller needs.
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
