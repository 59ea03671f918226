use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ll_core::SectionId;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

struct PendingSave {
    generation: u64,
    handle: AbortHandle,
}

/// Per-section debounce timers.
///
/// Scheduling a section replaces its pending job, so only the last job of a
/// burst runs. Sections never affect each other's timers.
pub struct AutosaveScheduler {
    delay: Duration,
    pending: Arc<Mutex<HashMap<SectionId, PendingSave>>>,
    generation: AtomicU64,
}

impl AutosaveScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `job` for `section` once the delay passes without another `schedule` call.
    pub async fn schedule<F>(&self, section: SectionId, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let pending = Arc::clone(&self.pending);
        let deadline = Instant::now() + self.delay;

        let mut guard = self.pending.lock().await;
        if let Some(existing) = guard.remove(&section) {
            existing.handle.abort();
            debug!(section = %section, "autosave timer reset");
        }

        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            {
                let mut guard = pending.lock().await;
                match guard.get(&section) {
                    Some(entry) if entry.generation == generation => {
                        guard.remove(&section);
                    }
                    _ => return,
                }
            }
            job.await;
        });

        guard.insert(
            section,
            PendingSave {
                generation,
                handle: handle.abort_handle(),
            },
        );
    }

    /// Drop the pending job for `section`. Returns whether one was pending.
    pub async fn cancel(&self, section: SectionId) -> bool {
        match self.pending.lock().await.remove(&section) {
            Some(entry) => {
                entry.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Drop every pending job and return the sections they belonged to.
    pub async fn cancel_all(&self) -> Vec<SectionId> {
        let mut guard = self.pending.lock().await;
        let mut sections: Vec<SectionId> = guard
            .drain()
            .map(|(section, entry)| {
                entry.handle.abort();
                section
            })
            .collect();
        sections.sort();
        sections
    }

    pub async fn pending_sections(&self) -> Vec<SectionId> {
        let mut sections: Vec<SectionId> = self.pending.lock().await.keys().copied().collect();
        sections.sort();
        sections
    }
}

impl Drop for AutosaveScheduler {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.pending.try_lock() {
            for (_, entry) in guard.drain() {
                entry.handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use tokio::time::advance;

    fn counter_job(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn job_runs_after_delay() {
        tokio::time::pause();
        let scheduler = AutosaveScheduler::new(Duration::from_millis(400));
        let runs = Arc::new(AtomicUsize::new(0));

        scheduler.schedule(SectionId::Licensure, counter_job(&runs)).await;
        assert_eq!(scheduler.pending_sections().await, vec![SectionId::Licensure]);

        advance(Duration::from_millis(399)).await;
        settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(scheduler.pending_sections().await.is_empty());
    }

    #[tokio::test]
    async fn rescheduling_resets_the_timer() {
        tokio::time::pause();
        let scheduler = AutosaveScheduler::new(Duration::from_millis(400));
        let runs = Arc::new(AtomicUsize::new(0));

        scheduler.schedule(SectionId::Licensure, counter_job(&runs)).await;
        advance(Duration::from_millis(300)).await;
        scheduler.schedule(SectionId::Licensure, counter_job(&runs)).await;
        advance(Duration::from_millis(300)).await;
        settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        advance(Duration::from_millis(100)).await;
        settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn sections_are_independent() {
        tokio::time::pause();
        let scheduler = AutosaveScheduler::new(Duration::from_millis(400));
        let runs = Arc::new(AtomicUsize::new(0));

        scheduler.schedule(SectionId::Licensure, counter_job(&runs)).await;
        scheduler
            .schedule(SectionId::Questionnaires, counter_job(&runs))
            .await;
        advance(Duration::from_millis(400)).await;
        settle().await;

        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn cancel_drops_the_job() {
        tokio::time::pause();
        let scheduler = AutosaveScheduler::new(Duration::from_millis(400));
        let runs = Arc::new(AtomicUsize::new(0));

        scheduler.schedule(SectionId::Licensure, counter_job(&runs)).await;
        scheduler
            .schedule(SectionId::DigitalSignature, counter_job(&runs))
            .await;
        assert!(scheduler.cancel(SectionId::Licensure).await);
        assert!(!scheduler.cancel(SectionId::Licensure).await);
        assert_eq!(
            scheduler.cancel_all().await,
            vec![SectionId::DigitalSignature]
        );

        advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }
}
