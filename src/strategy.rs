/// Bounded-buffer policy shared by every stage (spec.md §3, "Strategy").
///
/// `high_water_mark` becomes the capacity of the stage's `tokio::sync::mpsc` channel: the
/// channel itself enforces "buffer length <= high_water_mark" and the producer suspending on a
/// full buffer, so no separate `desiredSize` bookkeeping is required (see SPEC_FULL.md §4.1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strategy {
    pub high_water_mark: usize,
}

pub const DEFAULT_HIGH_WATER_MARK: usize = 16;

impl Strategy {
    pub const fn new(high_water_mark: usize) -> Self {
        Self { high_water_mark }
    }

    /// `tokio::sync::mpsc::channel` requires capacity >= 1; a `high_water_mark` of 0 still means
    /// "no slack" so it is mapped onto the smallest real channel capacity.
    pub(crate) fn channel_capacity(&self) -> usize {
        self.high_water_mark.max(1)
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_WATER_MARK)
    }
}
