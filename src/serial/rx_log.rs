use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::SystemTime;

/// Number of inbound chunks kept for display.
pub const RX_LOG_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RxRecord {
    pub received_at: SystemTime,
    /// Uppercase hex of the chunk
    pub hex: String,
}

/// Bounded, most-recent-last log of received chunks, shared with the reader thread.
#[derive(Debug)]
pub struct RxLog {
    capacity: usize,
    records: Mutex<VecDeque<RxRecord>>,
}

impl Default for RxLog {
    fn default() -> Self {
        Self::with_capacity(RX_LOG_CAPACITY)
    }
}

impl RxLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // A panicking holder cannot leave the deque half-updated, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, VecDeque<RxRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, hex: String) {
        let mut records = self.lock();
        while records.len() >= self.capacity {
            records.pop_front();
        }
        records.push_back(RxRecord {
            received_at: SystemTime::now(),
            hex,
        });
    }

    /// Copy of the current records, oldest first.
    pub fn snapshot(&self) -> Vec<RxRecord> {
        self.lock().iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<RxRecord> {
        self.lock().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_past_capacity() {
        let log = RxLog::new();
        for i in 0..11 {
            log.push(format!("{i:02X}"));
        }

        let hex: Vec<String> = log.snapshot().into_iter().map(|r| r.hex).collect();
        assert_eq!(hex.len(), RX_LOG_CAPACITY);
        assert_eq!(hex.first().unwrap(), "01");
        assert_eq!(hex.last().unwrap(), "0A");
    }

    #[test]
    fn zero_capacity_keeps_one() {
        let log = RxLog::with_capacity(0);
        log.push("AA".into());
        log.push("BB".into());
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().unwrap().hex, "BB");
    }
}
