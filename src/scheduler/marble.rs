//! Marble diagram grammar (spec.md §5, "Marble diagram DSL").
//!
//! `-` advances one frame; any other non-special character emits a value (mapped through a
//! caller-supplied `char -> T`); `|` completes; `#` errors; `(...)` groups several events onto a
//! single frame; `^` marks a hot diagram's subscription point. One frame is [`FRAME`] — chosen as
//! 1ms so a paused `tokio` clock can advance through an entire diagram without any wall-clock
//! delay in tests.

use crate::error::{ErrorKind, StreamError};
use std::time::Duration;

pub const FRAME: Duration = Duration::from_millis(1);

/// One diagram event: a value, a terminal error, or completion.
pub enum Marble<T> {
    Next(T),
    Error(StreamError),
    Complete,
}

impl<T: PartialEq> PartialEq for Marble<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Marble::Next(a), Marble::Next(b)) => a == b,
            (Marble::Error(a), Marble::Error(b)) => a.kind() == b.kind() && a.message() == b.message(),
            (Marble::Complete, Marble::Complete) => true,
            _ => false,
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Marble<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Marble::Next(v) => f.debug_tuple("Next").field(v).finish(),
            Marble::Error(e) => f.debug_tuple("Error").field(&e.kind()).finish(),
            Marble::Complete => write!(f, "Complete"),
        }
    }
}

/// A [`Marble`] tagged with the frame it occurs on.
#[derive(Debug, PartialEq)]
pub struct TimedMarble<T> {
    pub frame: u64,
    pub marble: Marble<T>,
}

/// The result of parsing a diagram: its events in order, and the frame `^` appeared on, if any.
pub struct ParsedMarble<T> {
    pub events: Vec<TimedMarble<T>>,
    pub subscription_frame: Option<u64>,
}

/// Parses `diagram`, mapping each value symbol through `to_value`. Whitespace is ignored and
/// does not advance the frame counter, so diagrams can be aligned in source for readability.
pub fn parse<T>(diagram: &str, mut to_value: impl FnMut(char) -> T) -> ParsedMarble<T> {
    let mut frame: u64 = 0;
    let mut events = Vec::new();
    let mut subscription_frame = None;
    let mut in_group = false;
    for c in diagram.chars() {
        match c {
            ' ' | '\t' => continue,
            '-' => frame += 1,
            '(' => in_group = true,
            ')' => {
                in_group = false;
                frame += 1;
            }
            '^' => subscription_frame = Some(frame),
            '|' => {
                events.push(TimedMarble {
                    frame,
                    marble: Marble::Complete,
                });
                if !in_group {
                    frame += 1;
                }
            }
            '#' => {
                events.push(TimedMarble {
                    frame,
                    marble: Marble::Error(StreamError::new(ErrorKind::Source, "marble error marker")),
                });
                if !in_group {
                    frame += 1;
                }
            }
            other => {
                events.push(TimedMarble {
                    frame,
                    marble: Marble::Next(to_value(other)),
                });
                if !in_group {
                    frame += 1;
                }
            }
        }
    }
    ParsedMarble {
        events,
        subscription_frame,
    }
}
