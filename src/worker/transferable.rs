//! The structured-cloneable subset crossing a worker-thread boundary (SPEC_FULL.md §4, "Worker
//! transferables"). This is a value-level contract only: anything outside [`TransferableValue`]'s
//! variants is rejected at the type level, so [`validate`]'s only remaining runtime job is
//! recursive depth/cycle safety on the `Array`/`Map` variants.

use bytes::Bytes;
use std::collections::BTreeMap;
use thiserror::Error;

/// The structured-cloneable subset a value must fit to cross a worker boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum TransferableValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Bytes(Bytes),
    Array(Vec<TransferableValue>),
    Map(BTreeMap<String, TransferableValue>),
}

/// Recursion guard: a cycle is structurally impossible in this owned-tree representation, but an
/// adversarially deep one can still blow the stack, so `validate` bounds depth instead of
/// detecting cycles.
const MAX_DEPTH: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("transferable value at {path} exceeds the structured-clone depth limit ({max_depth})")]
pub struct TransferError {
    pub path: String,
    pub max_depth: usize,
}

/// Walks `value`, erroring with a path-qualified [`TransferError`] (`"$.items[2].name"`-style) if
/// it nests deeper than [`MAX_DEPTH`]. Any value outside the enum's variants cannot exist in a
/// `TransferableValue` in the first place, so this is the one runtime check this boundary needs.
pub fn validate(value: &TransferableValue) -> Result<(), TransferError> {
    walk(value, "$", 0)
}

fn walk(value: &TransferableValue, path: &str, depth: usize) -> Result<(), TransferError> {
    if depth > MAX_DEPTH {
        return Err(TransferError {
            path: path.to_string(),
            max_depth: MAX_DEPTH,
        });
    }
    match value {
        TransferableValue::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                walk(item, &format!("{path}[{index}]"), depth + 1)?;
            }
            Ok(())
        }
        TransferableValue::Map(entries) => {
            for (key, item) in entries {
                walk(item, &format!("{path}.{key}"), depth + 1)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Collects every owned `Bytes` buffer reachable from `value`, for handoff as the wire
/// transfer list. A `Bytes` produced purely by slicing another buffer in this value (sharing its
/// backing storage) is collected only once, at its owning node — `Bytes::clone` is a refcounted
/// view, not a copy, so listing both would describe the same underlying allocation twice.
pub fn transferables(value: &TransferableValue) -> Vec<Bytes> {
    let mut out: Vec<Bytes> = Vec::new();
    let mut seen: Vec<(usize, usize)> = Vec::new();
    collect(value, &mut out, &mut seen);
    out
}

fn collect(value: &TransferableValue, out: &mut Vec<Bytes>, seen: &mut Vec<(usize, usize)>) {
    match value {
        TransferableValue::Bytes(bytes) => {
            let start = bytes.as_ptr() as usize;
            let end = start + bytes.len();
            let already_covered = seen.iter().any(|&(s, e)| s <= start && end <= e);
            if !already_covered {
                seen.push((start, end));
                out.push(bytes.clone());
            }
        }
        TransferableValue::Array(items) => {
            for item in items {
                collect(item, out, seen);
            }
        }
        TransferableValue::Map(entries) => {
            for item in entries.values() {
                collect(item, out, seen);
            }
        }
        _ => {}
    }
}
