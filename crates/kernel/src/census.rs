//! Per-thread census of `World` instances.
//!
//! Every construction or copy of a world counts as one creation and every drop
//! as one release, so a harness can check that each world it built was released
//! exactly once.

use std::cell::Cell;

thread_local! {
    static CREATED: Cell<u64> = const { Cell::new(0) };
    static RELEASED: Cell<u64> = const { Cell::new(0) };
}

/// Worlds created on this thread so far.
pub fn created() -> u64 {
    CREATED.with(Cell::get)
}

/// Worlds released on this thread so far.
pub fn released() -> u64 {
    RELEASED.with(Cell::get)
}

/// Worlds created on this thread that have not been released yet.
pub fn live() -> i64 {
    created() as i64 - released() as i64
}

pub(crate) fn record_created() {
    CREATED.with(|c| c.set(c.get() + 1));
}

pub(crate) fn record_released() {
    RELEASED.with(|c| c.set(c.get() + 1));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_track_balance() {
        let base = live();
        record_created();
        record_created();
        assert_eq!(live(), base + 2);
        record_released();
        record_released();
        assert_eq!(live(), base);
    }
}
