//! Reactive stream-processing core: backpressured pipelines, an operator set, and a
//! virtual-time scheduler for exercising their timing semantics.
//!
//! A pipeline is built from a [`stream::RxStream`] source, zero or more operators (each a
//! `FnOnce(RxStream<T>) -> RxStream<U>`) composed with [`stream::pipe`] or the [`pipe!`] macro,
//! and a sink (see [`sinks`]). Backpressure, cancellation, and error propagation all fall out of
//! the single [`stream::RxStream`]/[`stream::StageSender`] pair each stage is built from — see
//! that module's docs for how.

pub mod cancellation;
pub mod clock;
pub mod combine;
pub mod error;
pub mod fault;
pub mod operators;
pub mod scheduler;
pub mod sinks;
pub mod sources;
pub mod strategy;
pub mod stream;
pub mod subject;
pub mod sync;
pub mod worker;

pub use cancellation::Cancellation;
pub use clock::{Clock, SystemClock};
pub use error::{ErrorKind, Result, StreamError};
pub use stream::{pipe, RxStream, StageSender};
pub use strategy::Strategy;
pub use subject::{ReplaySubject, Subject};
