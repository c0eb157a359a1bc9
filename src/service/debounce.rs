//! Debounced edits: coalesce rapid changes to the same cell.
//!
//! A [`Debouncer`] owns a registry of pending timers keyed by
//! `(row, field)`. Scheduling a key that already has a pending timer
//! replaces it, so a burst of keystrokes produces one recalculation.
//! The host event loop drives it by calling [`Debouncer::fire_due`].
//!
//! Debouncing only defers work. Running the recalculation directly gives
//! the same result as waiting for the timer.

use std::{
    collections::HashMap,
    fmt,
    time::{Duration, Instant},
};

use tracing::debug;

use crate::model::PortCallField;

/// Delay between the last edit to a cell and its recalculation.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Identifies one editable cell in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditKey {
    pub row: usize,
    pub field: PortCallField,
}

type Callback = Box<dyn FnOnce()>;

struct Timer {
    deadline: Instant,
    // Breaks deadline ties in scheduling order.
    seq: u64,
    callback: Callback,
}

/// Pending-edit registry with one timer per [`EditKey`].
pub struct Debouncer {
    delay: Duration,
    timers: HashMap<EditKey, Timer>,
    next_seq: u64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            timers: HashMap::new(),
            next_seq: 0,
        }
    }

    /// The delay applied when a schedule call does not supply one.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `callback` for `key`, replacing any pending timer for it.
    ///
    /// Returns `true` when a pending timer was replaced.
    pub fn debounced_update(
        &mut self,
        key: EditKey,
        delay: Option<Duration>,
        callback: impl FnOnce() + 'static,
    ) -> bool {
        self.debounced_update_at(key, delay, Instant::now(), callback)
    }

    /// [`Debouncer::debounced_update`] against an explicit clock reading.
    pub fn debounced_update_at(
        &mut self,
        key: EditKey,
        delay: Option<Duration>,
        now: Instant,
        callback: impl FnOnce() + 'static,
    ) -> bool {
        let deadline = now + delay.unwrap_or(self.delay);
        let seq = self.next_seq;
        self.next_seq += 1;

        let replaced = self
            .timers
            .insert(
                key,
                Timer {
                    deadline,
                    seq,
                    callback: Box::new(callback),
                },
            )
            .is_some();
        if replaced {
            debug!(row = key.row, field = %key.field, "coalesced pending edit");
        }
        replaced
    }

    /// Run every callback whose deadline has passed, earliest first.
    ///
    /// Returns how many fired.
    pub fn fire_due(&mut self, now: Instant) -> usize {
        let due: Vec<EditKey> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.deadline <= now)
            .map(|(key, _)| *key)
            .collect();
        self.run(due)
    }

    /// Run every pending callback immediately, earliest deadline first.
    pub fn flush(&mut self) -> usize {
        let all: Vec<EditKey> = self.timers.keys().copied().collect();
        self.run(all)
    }

    /// Drop the pending timer for `key`. Returns `true` if one existed.
    pub fn cancel(&mut self, key: EditKey) -> bool {
        self.timers.remove(&key).is_some()
    }

    /// Drop every pending timer without running it.
    pub fn cleanup(&mut self) {
        if !self.timers.is_empty() {
            debug!(dropped = self.timers.len(), "debouncer cleaned up");
        }
        self.timers.clear();
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// The earliest pending deadline, for a host loop deciding how long to sleep.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|timer| timer.deadline).min()
    }

    fn run(&mut self, keys: Vec<EditKey>) -> usize {
        let mut timers: Vec<Timer> = keys
            .into_iter()
            .filter_map(|key| self.timers.remove(&key))
            .collect();
        timers.sort_by_key(|timer| (timer.deadline, timer.seq));

        let fired = timers.len();
        for timer in timers {
            (timer.callback)();
        }
        fired
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.timers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{cell::RefCell, rc::Rc};

    fn key(row: usize, field: PortCallField) -> EditKey {
        EditKey { row, field }
    }

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnOnce()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |label: &'static str| -> Box<dyn FnOnce()> {
            let sink = Rc::clone(&sink);
            Box::new(move || sink.borrow_mut().push(label))
        };
        (log, make)
    }

    #[test]
    fn coalesces_edits_to_same_cell() {
        let (log, make) = recorder();
        let mut debouncer = Debouncer::default();
        let start = Instant::now();
        let cell = key(1, PortCallField::Speed);

        assert!(!debouncer.debounced_update_at(cell, None, start, make("14")));
        assert!(debouncer.debounced_update_at(
            cell,
            None,
            start + Duration::from_millis(100),
            make("15")
        ));
        assert_eq!(debouncer.pending(), 1);

        // The first deadline has passed, but it was replaced.
        assert_eq!(debouncer.fire_due(start + Duration::from_millis(550)), 0);
        assert_eq!(debouncer.fire_due(start + Duration::from_millis(600)), 1);
        assert_eq!(*log.borrow(), ["15"]);
        assert_eq!(debouncer.pending(), 0);
    }

    #[test]
    fn distinct_cells_fire_independently_in_deadline_order() {
        let (log, make) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(200));
        let start = Instant::now();

        debouncer.debounced_update_at(key(2, PortCallField::Distance), None, start, make("distance"));
        debouncer.debounced_update_at(
            key(1, PortCallField::Speed),
            Some(Duration::from_millis(50)),
            start,
            make("speed"),
        );
        assert_eq!(debouncer.next_deadline(), Some(start + Duration::from_millis(50)));

        assert_eq!(debouncer.fire_due(start + Duration::from_secs(1)), 2);
        assert_eq!(*log.borrow(), ["speed", "distance"]);
    }

    #[test]
    fn flush_runs_everything_in_scheduling_order() {
        let (log, make) = recorder();
        let mut debouncer = Debouncer::default();
        let start = Instant::now();

        debouncer.debounced_update_at(key(0, PortCallField::PortDays), None, start, make("a"));
        debouncer.debounced_update_at(key(1, PortCallField::PortDays), None, start, make("b"));
        debouncer.debounced_update_at(key(2, PortCallField::PortDays), None, start, make("c"));

        assert_eq!(debouncer.flush(), 3);
        assert_eq!(*log.borrow(), ["a", "b", "c"]);
    }

    #[test]
    fn cancel_and_cleanup_drop_without_running() {
        let (log, make) = recorder();
        let mut debouncer = Debouncer::default();
        let start = Instant::now();
        let speed = key(1, PortCallField::Speed);

        debouncer.debounced_update_at(speed, None, start, make("speed"));
        debouncer.debounced_update_at(key(1, PortCallField::Arrival), None, start, make("arrival"));

        assert!(debouncer.cancel(speed));
        assert!(!debouncer.cancel(speed));
        debouncer.cleanup();

        assert_eq!(debouncer.pending(), 0);
        assert_eq!(debouncer.flush(), 0);
        assert!(log.borrow().is_empty());
        assert_eq!(debouncer.next_deadline(), None);
    }
}
