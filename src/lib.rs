//! Purpose: Concurrent ordered key-value tables with resumable traversal.
//! Exports: `core` (table storage, point access, traversal, rendering, errors).
//! Role: Library crate driven by lazy-sequence pipelines and direct callers.
//! Invariants: All shared state lives behind the cloneable `Table` handle.
//! Invariants: Operations are linearizable per key, never across keys.
pub mod core;
