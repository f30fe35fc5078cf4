//! Commit policy for transactions opened by `with_txn`.
//!
//! Every route that touches the database (signup, login, profile edits and
//! all task reads and writes) goes through `with_txn`. The server never sets
//! a policy, so each successful handler commits. A test binary can switch to
//! `RollbackOnOk` from a `ctor` before the first request and run handlers
//! against real tables without the rows surviving the call.

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    CommitOnOk,
    /// Successful handlers see their own writes, then lose them.
    RollbackOnOk,
}

impl TxnPolicy {
    /// Whether a transaction whose closure returned `Ok` is committed.
    pub fn keeps_writes(self) -> bool {
        matches!(self, TxnPolicy::CommitOnOk)
    }
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// Fix the process-wide policy. It is set once; later calls are ignored, so
/// a policy cannot flip while requests are in flight.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}
