// Copyright (c) 2022 MASSA LABS <info@massa.net>

//! Structured trace events shared by the ledger crates.
//!
//! ```ignore
//! ledger_trace!("sync.rollback", { "from": 100, "to": 98 });
//! ```

/// Emits a `trace!` event tagged `ledger_trace:<event>` whose payload is a JSON object.
///
/// Callers must depend on `tracing` and `serde_json`.
#[macro_export]
macro_rules! ledger_trace {
    ($evt:expr, $params:tt) => {
        tracing::trace!("ledger_trace:{}:{}", $evt, serde_json::json!($params));
    };
}
