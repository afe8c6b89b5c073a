use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use todo_core::{ChangeListener, Todo};
use tokio::sync::{watch, Notify};

use crate::client::PeerClientTrait;

/// Counters for snapshots handled by the worker.
#[derive(Debug, Default)]
pub struct SyncStats {
    pushed: AtomicU64,
    failed: AtomicU64,
    coalesced: AtomicU64,
}

impl SyncStats {
    pub fn pushed(&self) -> u64 {
        self.pushed.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Snapshots replaced by a newer one before the worker picked them up.
    pub fn coalesced(&self) -> u64 {
        self.coalesced.load(Ordering::Relaxed)
    }
}

#[derive(Default)]
struct Outbox {
    pending: Option<(u64, Vec<Todo>)>,
    queued: u64,
}

struct Shared {
    outbox: Mutex<Outbox>,
    wake: Notify,
    /// Sequence number of the newest snapshot the worker has finished with.
    attempted: watch::Sender<u64>,
    stats: SyncStats,
}

/// Outbox for collection snapshots headed to the peer.
///
/// At most one snapshot waits at a time: queuing a new one replaces the
/// pending one, since each carries the whole collection. A single
/// background task pushes whatever is pending whenever it is woken.
#[derive(Clone)]
pub struct SyncDispatcher {
    shared: Arc<Shared>,
}

impl SyncDispatcher {
    pub fn spawn(peer: Arc<dyn PeerClientTrait>) -> Self {
        let (attempted, _) = watch::channel(0u64);
        let shared = Arc::new(Shared {
            outbox: Mutex::new(Outbox::default()),
            wake: Notify::new(),
            attempted,
            stats: SyncStats::default(),
        });
        let worker = Arc::clone(&shared);

        tokio::spawn(async move {
            loop {
                worker.wake.notified().await;

                loop {
                    let next = worker.outbox.lock().pending.take();
                    let Some((seq, todos)) = next else {
                        break;
                    };

                    match peer.push_todos(&todos).await {
                        Ok(()) => {
                            worker.stats.pushed.fetch_add(1, Ordering::Relaxed);
                            log::info!("Synced {} todos to peer", todos.len());
                        }
                        Err(e) => {
                            worker.stats.failed.fetch_add(1, Ordering::Relaxed);
                            log::error!("Failed to sync todos to peer: {}", e);
                        }
                    }

                    worker.attempted.send_replace(seq);
                }
            }
        });

        Self { shared }
    }

    pub fn enqueue(&self, todos: Vec<Todo>) {
        {
            let mut outbox = self.shared.outbox.lock();
            outbox.queued += 1;
            let seq = outbox.queued;
            if outbox.pending.replace((seq, todos)).is_some() {
                self.shared.stats.coalesced.fetch_add(1, Ordering::Relaxed);
                log::debug!("Replaced a pending sync snapshot");
            }
        }
        self.shared.wake.notify_one();
    }

    /// Waits until every snapshot queued before this call has been attempted
    /// or replaced by one that has.
    pub async fn flush(&self) {
        let target = self.shared.outbox.lock().queued;
        let mut attempted = self.shared.attempted.subscribe();
        let _ = attempted.wait_for(|seq| *seq >= target).await;
    }

    pub fn stats(&self) -> &SyncStats {
        &self.shared.stats
    }
}

impl ChangeListener for SyncDispatcher {
    fn collection_changed(&self, todos: &[Todo]) {
        self.enqueue(todos.to_vec());
    }
}
