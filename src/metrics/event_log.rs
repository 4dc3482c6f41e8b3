// Bounded event log
//
// Fixed-capacity ring buffer: once full, each append overwrites the oldest
// slot in place, so overflow never shifts or reallocates the storage.

use super::types::ExecutionEvent;

/// Default number of events retained in the rolling window
pub const DEFAULT_CAPACITY: usize = 1000;

#[derive(Debug, Clone)]
pub struct EventLog {
    slots: Vec<ExecutionEvent>,
    /// Index of the oldest event once the buffer has wrapped (0 before that)
    head: usize,
    capacity: usize,
}

impl EventLog {
    /// Create a log holding at most `capacity` events (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        }
    }

    /// Append at the tail, returning the evicted event if the log was full
    pub fn append(&mut self, event: ExecutionEvent) -> Option<ExecutionEvent> {
        if self.slots.len() < self.capacity {
            self.slots.push(event);
            return None;
        }

        let evicted = std::mem::replace(&mut self.slots[self.head], event);
        self.head = (self.head + 1) % self.capacity;
        Some(evicted)
    }

    /// Immutable, oldest-first view of the current contents
    pub fn snapshot(&self) -> EventSnapshot<'_> {
        let (newer, older) = self.slots.split_at(self.head);
        EventSnapshot { older, newer }
    }

    /// Most recently appended event
    pub fn last(&self) -> Option<&ExecutionEvent> {
        if self.slots.is_empty() {
            None
        } else if self.head == 0 {
            self.slots.last()
        } else {
            self.slots.get(self.head - 1)
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every event, keeping the capacity
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = 0;
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Point-in-time ordered view of an [`EventLog`]
///
/// Borrows the log, so the log cannot be appended to while a snapshot is
/// alive.
#[derive(Debug, Clone, Copy)]
pub struct EventSnapshot<'a> {
    older: &'a [ExecutionEvent],
    newer: &'a [ExecutionEvent],
}

impl<'a> EventSnapshot<'a> {
    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &'a ExecutionEvent> + Clone + 'a {
        let (older, newer) = (self.older, self.newer);
        older.iter().chain(newer.iter())
    }

    pub fn len(&self) -> usize {
        self.older.len() + self.newer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_vec(&self) -> Vec<ExecutionEvent> {
        self.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event(latency: f64) -> ExecutionEvent {
        ExecutionEvent::new("pattern", latency, true, Utc::now())
    }

    fn latencies(log: &EventLog) -> Vec<f64> {
        log.snapshot().iter().map(|e| e.latency_ms).collect()
    }

    #[test]
    fn test_empty_log() {
        let log = EventLog::new(3);
        assert!(log.is_empty());
        assert!(log.snapshot().is_empty());
        assert!(log.last().is_none());
    }

    #[test]
    fn test_append_below_capacity() {
        let mut log = EventLog::new(3);
        assert!(log.append(event(1.0)).is_none());
        assert!(log.append(event(2.0)).is_none());

        assert_eq!(log.len(), 2);
        assert_eq!(latencies(&log), vec![1.0, 2.0]);
        assert_eq!(log.last().unwrap().latency_ms, 2.0);
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut log = EventLog::new(3);
        for i in 1..=3 {
            log.append(event(i as f64));
        }

        let evicted = log.append(event(4.0)).unwrap();
        assert_eq!(evicted.latency_ms, 1.0);
        assert_eq!(log.len(), 3);
        assert_eq!(latencies(&log), vec![2.0, 3.0, 4.0]);
        assert_eq!(log.last().unwrap().latency_ms, 4.0);
    }

    #[test]
    fn test_wraps_multiple_times() {
        let mut log = EventLog::new(4);
        for i in 0..11 {
            log.append(event(i as f64));
        }

        assert_eq!(log.len(), 4);
        assert_eq!(latencies(&log), vec![7.0, 8.0, 9.0, 10.0]);
        assert_eq!(log.last().unwrap().latency_ms, 10.0);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut log = EventLog::new(0);
        assert_eq!(log.capacity(), 1);
        log.append(event(1.0));
        log.append(event(2.0));
        assert_eq!(latencies(&log), vec![2.0]);
    }

    #[test]
    fn test_clear() {
        let mut log = EventLog::new(2);
        for i in 0..5 {
            log.append(event(i as f64));
        }
        log.clear();
        assert!(log.is_empty());

        log.append(event(9.0));
        assert_eq!(latencies(&log), vec![9.0]);
    }
}
