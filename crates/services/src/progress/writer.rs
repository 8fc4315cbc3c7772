//! Single-flight, coalescing progress writes.
//!
//! At most one write per user is in flight. Maps submitted while a write is
//! running replace each other, and only the latest is written once the
//! in-flight write returns. Writes are never retried; failures are logged.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, warn};

use storage::repository::ProgressRepository;
use tracker_core::Clock;
use tracker_core::model::{CompletionMap, UserId};

#[derive(Default)]
struct Slot {
    pending: Option<CompletionMap>,
}

/// Held by a drain task. Dropping it gives back the in-flight count, and the
/// slot too when the task ends without emptying it (a panicking repository).
struct DrainGuard {
    user: UserId,
    slots: Arc<Mutex<HashMap<UserId, Slot>>>,
    in_flight: Arc<watch::Sender<usize>>,
    released: bool,
}

impl Drop for DrainGuard {
    fn drop(&mut self) {
        if !self.released {
            warn!(user = %self.user, "progress write aborted, dropping queued writes");
            self.slots
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&self.user);
        }
        self.in_flight.send_modify(|count| *count -= 1);
    }
}

#[derive(Clone)]
pub struct ProgressWriter {
    clock: Clock,
    repo: Arc<dyn ProgressRepository>,
    runtime: Handle,
    slots: Arc<Mutex<HashMap<UserId, Slot>>>,
    in_flight: Arc<watch::Sender<usize>>,
}

impl ProgressWriter {
    /// Writes are spawned on `runtime`, so callers need not be inside one.
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn ProgressRepository>, runtime: Handle) -> Self {
        let (in_flight, _) = watch::channel(0);
        Self {
            clock,
            repo,
            runtime,
            slots: Arc::new(Mutex::new(HashMap::new())),
            in_flight: Arc::new(in_flight),
        }
    }

    /// Queue `entries` as the next full-map write for `user`. Returns immediately.
    pub fn submit(&self, user: UserId, entries: CompletionMap) {
        {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(slot) = slots.get_mut(&user) {
                if slot.pending.replace(entries).is_some() {
                    debug!(user = %user, "coalesced pending progress write");
                }
                return;
            }
            slots.insert(user.clone(), Slot::default());
        }

        self.in_flight.send_modify(|count| *count += 1);
        let writer = self.clone();
        self.runtime.spawn(async move {
            writer.drain(user, entries).await;
        });
    }

    async fn drain(self, user: UserId, mut entries: CompletionMap) {
        let mut guard = DrainGuard {
            user: user.clone(),
            slots: Arc::clone(&self.slots),
            in_flight: Arc::clone(&self.in_flight),
            released: false,
        };
        loop {
            let at = self.clock.now();
            match self.repo.merge_progress(&user, &entries, at).await {
                Ok(()) => debug!(user = %user, entries = entries.len(), "progress written"),
                Err(err) => warn!(user = %user, error = %err, "progress write failed"),
            }

            let next = {
                let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
                let next = slots.get_mut(&user).and_then(|slot| slot.pending.take());
                if next.is_none() {
                    slots.remove(&user);
                    guard.released = true;
                }
                next
            };
            match next {
                Some(pending) => entries = pending,
                None => break,
            }
        }
    }

    /// Number of users with a write in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        *self.in_flight.borrow()
    }

    /// Resolves once no write is in flight.
    pub async fn idle(&self) {
        let mut receiver = self.in_flight.subscribe();
        let _ = receiver.wait_for(|count| *count == 0).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use storage::repository::{InMemoryRepository, ProgressRecord, StorageError};
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
    use tracker_core::model::ProblemKey;
    use tracker_core::time::fixed_clock;

    /// Records every write and can hold writes until released.
    #[derive(Clone, Default)]
    struct GatedRepo {
        inner: InMemoryRepository,
        writes: Arc<Mutex<Vec<CompletionMap>>>,
        gate: Arc<AsyncMutex<()>>,
    }

    impl GatedRepo {
        async fn hold(&self) -> OwnedMutexGuard<()> {
            Arc::clone(&self.gate).lock_owned().await
        }

        fn writes(&self) -> Vec<CompletionMap> {
            self.writes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProgressRepository for GatedRepo {
        async fn get_progress(
            &self,
            user: &UserId,
        ) -> Result<Option<ProgressRecord>, StorageError> {
            self.inner.get_progress(user).await
        }

        async fn merge_progress(
            &self,
            user: &UserId,
            entries: &CompletionMap,
            at: DateTime<Utc>,
        ) -> Result<(), StorageError> {
            let _open = self.gate.lock().await;
            self.writes.lock().unwrap().push(entries.clone());
            self.inner.merge_progress(user, entries, at).await
        }
    }

    fn map(keys: &[(usize, usize)]) -> CompletionMap {
        keys.iter()
            .map(|(s, p)| (ProblemKey::new(*s, *p), true))
            .collect()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn single_submit_writes_once() {
        let repo = GatedRepo::default();
        let writer = ProgressWriter::new(fixed_clock(), Arc::new(repo.clone()), Handle::current());

        writer.submit(user("u1"), map(&[(0, 2)]));
        writer.idle().await;

        assert_eq!(repo.writes(), vec![map(&[(0, 2)])]);
        assert_eq!(writer.in_flight(), 0);
    }

    #[tokio::test]
    async fn submits_during_flight_coalesce_to_latest() {
        let repo = GatedRepo::default();
        let writer = ProgressWriter::new(fixed_clock(), Arc::new(repo.clone()), Handle::current());

        let gate = repo.hold().await;
        writer.submit(user("u1"), map(&[(0, 0)]));
        tokio::task::yield_now().await;
        writer.submit(user("u1"), map(&[(0, 0), (0, 1)]));
        writer.submit(user("u1"), map(&[(0, 0), (0, 1), (0, 2)]));
        assert_eq!(writer.in_flight(), 1);
        drop(gate);

        writer.idle().await;

        assert_eq!(
            repo.writes(),
            vec![map(&[(0, 0)]), map(&[(0, 0), (0, 1), (0, 2)])]
        );
        let stored = repo.get_progress(&user("u1")).await.unwrap().unwrap();
        assert_eq!(stored.entries, map(&[(0, 0), (0, 1), (0, 2)]));
    }

    #[tokio::test]
    async fn users_do_not_share_a_slot() {
        let repo = GatedRepo::default();
        let writer = ProgressWriter::new(fixed_clock(), Arc::new(repo.clone()), Handle::current());

        let gate = repo.hold().await;
        writer.submit(user("a"), map(&[(0, 0)]));
        writer.submit(user("b"), map(&[(1, 1)]));
        assert_eq!(writer.in_flight(), 2);
        drop(gate);
        writer.idle().await;

        assert_eq!(repo.writes().len(), 2);
        assert!(repo.get_progress(&user("a")).await.unwrap().is_some());
        assert!(repo.get_progress(&user("b")).await.unwrap().is_some());
    }

    struct FailingRepo;

    #[async_trait]
    impl ProgressRepository for FailingRepo {
        async fn get_progress(
            &self,
            _user: &UserId,
        ) -> Result<Option<ProgressRecord>, StorageError> {
            Err(StorageError::Connection("offline".into()))
        }

        async fn merge_progress(
            &self,
            _user: &UserId,
            _entries: &CompletionMap,
            _at: DateTime<Utc>,
        ) -> Result<(), StorageError> {
            Err(StorageError::Connection("offline".into()))
        }
    }

    #[tokio::test]
    async fn failed_write_still_releases_slot() {
        let writer = ProgressWriter::new(fixed_clock(), Arc::new(FailingRepo), Handle::current());
        writer.submit(user("u1"), map(&[(0, 0)]));
        writer.idle().await;
        assert_eq!(writer.in_flight(), 0);

        writer.submit(user("u1"), map(&[(0, 1)]));
        writer.idle().await;
        assert_eq!(writer.in_flight(), 0);
    }

    /// Panics on the first write, then behaves like the in-memory store.
    #[derive(Clone, Default)]
    struct PanicOnceRepo {
        inner: InMemoryRepository,
        panicked: Arc<AtomicBool>,
    }

    #[async_trait]
    impl ProgressRepository for PanicOnceRepo {
        async fn get_progress(
            &self,
            user: &UserId,
        ) -> Result<Option<ProgressRecord>, StorageError> {
            self.inner.get_progress(user).await
        }

        async fn merge_progress(
            &self,
            user: &UserId,
            entries: &CompletionMap,
            at: DateTime<Utc>,
        ) -> Result<(), StorageError> {
            if !self.panicked.swap(true, Ordering::SeqCst) {
                panic!("storage driver crashed");
            }
            self.inner.merge_progress(user, entries, at).await
        }
    }

    #[tokio::test]
    async fn panicking_write_does_not_wedge_the_queue() {
        let repo = PanicOnceRepo::default();
        let writer = ProgressWriter::new(fixed_clock(), Arc::new(repo.clone()), Handle::current());

        writer.submit(user("u1"), map(&[(0, 0)]));
        writer.idle().await;
        assert_eq!(writer.in_flight(), 0);

        writer.submit(user("u1"), map(&[(0, 1)]));
        writer.idle().await;
        let stored = repo.get_progress(&user("u1")).await.unwrap().unwrap();
        assert_eq!(stored.entries, map(&[(0, 1)]));
    }
}
