use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::model::TodoId;

/// Hands out todo ids derived from the wall clock in milliseconds.
///
/// Ids are strictly increasing for the lifetime of the generator: when two
/// ids are requested within the same millisecond (or the clock steps
/// backwards) the previous id plus one is used instead.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> TodoId {
        self.next_at(Utc::now().timestamp_millis())
    }

    /// Makes sure every later id is greater than `id`.
    pub fn observe(&self, id: TodoId) {
        self.last.fetch_max(id, Ordering::SeqCst);
    }

    fn next_at(&self, now_ms: i64) -> TodoId {
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now_ms.max(last.saturating_add(1));
            match self
                .last
                .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return candidate,
                Err(current) => last = current,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn uses_clock_when_ahead() {
        let ids = IdGenerator::new();
        assert_eq!(ids.next_at(1_000), 1_000);
        assert_eq!(ids.next_at(2_000), 2_000);
    }

    #[test]
    fn same_tick_yields_distinct_ids() {
        let ids = IdGenerator::new();
        let a = ids.next_at(5_000);
        let b = ids.next_at(5_000);
        let c = ids.next_at(4_999);
        assert_eq!((a, b, c), (5_000, 5_001, 5_002));
    }

    #[test]
    fn observe_moves_past_adopted_ids() {
        let ids = IdGenerator::new();
        ids.observe(10_000);
        assert_eq!(ids.next_at(9_000), 10_001);
        ids.observe(5);
        assert_eq!(ids.next_at(9_000), 10_002);
    }

    #[test]
    fn concurrent_callers_never_collide() {
        let ids = Arc::new(IdGenerator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..500).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 4_000);
    }
}
