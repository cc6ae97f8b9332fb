//! Worker-thread boundary contract (SPEC_FULL.md §4, "Worker transferables"): a value-level
//! description of the structured-cloneable subset, separate from the transport layer that would
//! actually move these across threads or processes (out of scope here; see spec.md's Non-goals).

mod transferable;

pub use transferable::{transferables, validate, TransferError, TransferableValue};
