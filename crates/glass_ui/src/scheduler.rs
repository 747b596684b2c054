//! Cooperative frame and timeout scheduling.
//!
//! The host drives the scheduler from its event loop by calling
//! [`FrameScheduler::advance`] with the current timestamp once per display
//! frame. Every scheduled task hands back a [`TaskGuard`]; dropping or
//! cancelling the guard stops the task, so a component that goes away can
//! never leave a loop running against elements it no longer owns.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag. Cancelling is idempotent.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Creates a live token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the token. Safe to call any number of times.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns true once the token has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Identifier of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Owning handle of a scheduled task. Dropping it cancels the task.
#[derive(Debug)]
pub struct TaskGuard {
    id: TaskId,
    token: CancellationToken,
}

impl TaskGuard {
    /// Returns the task id.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Cancels the task. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns true once the task has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Returns a token observing the same cancellation flag.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[derive(Debug)]
enum TaskKind {
    /// Runs every frame, at most once per `interval_ms`.
    Frame {
        interval_ms: f64,
        last_run_ms: Option<f64>,
    },
    /// Runs once when `deadline_ms` is reached.
    Timeout { deadline_ms: f64 },
}

#[derive(Debug)]
struct Task {
    kind: TaskKind,
    token: CancellationToken,
}

/// Single-threaded scheduler for frame loops and one-shot timeouts.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    tasks: BTreeMap<TaskId, Task>,
    next_id: u64,
    now_ms: f64,
}

impl FrameScheduler {
    /// Creates an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the timestamp of the last [`FrameScheduler::advance`].
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Schedules a loop that fires on every frame, throttled to at most one
    /// run per `interval_ms`.
    pub fn request_frame_loop(&mut self, interval_ms: f64) -> TaskGuard {
        self.insert(TaskKind::Frame {
            interval_ms: interval_ms.max(0.0),
            last_run_ms: None,
        })
    }

    /// Schedules a task that fires once, `delay_ms` from now.
    pub fn set_timeout(&mut self, delay_ms: f64) -> TaskGuard {
        let deadline_ms = self.now_ms + delay_ms.max(0.0);
        self.insert(TaskKind::Timeout { deadline_ms })
    }

    /// Cancels and forgets a task. Unknown or already finished ids are
    /// ignored.
    pub fn cancel(&mut self, id: TaskId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.token.cancel();
            tracing::trace!("cancelled task {}", id.0);
        }
    }

    /// Returns true if the task is still pending and not cancelled.
    #[must_use]
    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.tasks
            .get(&id)
            .is_some_and(|task| !task.token.is_cancelled())
    }

    /// Returns the number of live frame loops.
    #[must_use]
    pub fn active_frame_loops(&self) -> usize {
        self.tasks
            .values()
            .filter(|task| matches!(task.kind, TaskKind::Frame { .. }) && !task.token.is_cancelled())
            .count()
    }

    /// Returns the number of live tasks of any kind.
    #[must_use]
    pub fn active_tasks(&self) -> usize {
        self.tasks
            .values()
            .filter(|task| !task.token.is_cancelled())
            .count()
    }

    /// Advances the clock and returns the tasks due at `now_ms`, in id order.
    ///
    /// Cancelled tasks are dropped without firing. Timeouts fire once and are
    /// removed; frame loops stay scheduled. Time never goes backwards.
    pub fn advance(&mut self, now_ms: f64) -> Vec<TaskId> {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;

        self.tasks.retain(|_, task| !task.token.is_cancelled());

        let mut due = Vec::new();
        let mut finished = Vec::new();
        for (&id, task) in &mut self.tasks {
            match &mut task.kind {
                TaskKind::Frame {
                    interval_ms,
                    last_run_ms,
                } => {
                    let ready = last_run_ms.map_or(true, |last| now - last >= *interval_ms);
                    if ready {
                        *last_run_ms = Some(now);
                        due.push(id);
                    }
                }
                TaskKind::Timeout { deadline_ms } => {
                    if now >= *deadline_ms {
                        due.push(id);
                        finished.push(id);
                    }
                }
            }
        }

        for id in finished {
            self.tasks.remove(&id);
        }
        due
    }

    fn insert(&mut self, kind: TaskKind) -> TaskGuard {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        let token = CancellationToken::new();
        self.tasks.insert(
            id,
            Task {
                kind,
                token: token.clone(),
            },
        );
        TaskGuard { id, token }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_loop_is_throttled() {
        let mut scheduler = FrameScheduler::new();
        let guard = scheduler.request_frame_loop(16.0);

        assert_eq!(scheduler.advance(0.0), vec![guard.id()]);
        assert!(scheduler.advance(8.0).is_empty());
        assert_eq!(scheduler.advance(16.0), vec![guard.id()]);
        assert!(scheduler.advance(20.0).is_empty());
        assert_eq!(scheduler.advance(40.0), vec![guard.id()]);
    }

    #[test]
    fn test_timeout_runs_once() {
        let mut scheduler = FrameScheduler::new();
        let guard = scheduler.set_timeout(40.0);

        assert!(scheduler.advance(39.0).is_empty());
        assert_eq!(scheduler.advance(40.0), vec![guard.id()]);
        assert!(scheduler.advance(80.0).is_empty());
        assert!(!scheduler.is_scheduled(guard.id()));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut scheduler = FrameScheduler::new();
        let guard = scheduler.request_frame_loop(16.0);

        guard.cancel();
        guard.cancel();
        scheduler.cancel(guard.id());
        scheduler.cancel(guard.id());

        assert!(scheduler.advance(100.0).is_empty());
        assert_eq!(scheduler.active_frame_loops(), 0);
    }

    #[test]
    fn test_dropping_guard_stops_loop() {
        let mut scheduler = FrameScheduler::new();
        {
            let _guard = scheduler.request_frame_loop(16.0);
            assert_eq!(scheduler.active_frame_loops(), 1);
        }
        assert_eq!(scheduler.active_frame_loops(), 0);
        assert!(scheduler.advance(16.0).is_empty());
    }

    #[test]
    fn test_cancelled_timeout_never_fires() {
        let mut scheduler = FrameScheduler::new();
        let guard = scheduler.set_timeout(10.0);
        let token = guard.token();
        drop(guard);

        assert!(token.is_cancelled());
        assert!(scheduler.advance(50.0).is_empty());
        assert_eq!(scheduler.active_tasks(), 0);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut scheduler = FrameScheduler::new();
        scheduler.advance(100.0);
        scheduler.advance(50.0);
        assert!((scheduler.now_ms() - 100.0).abs() < f64::EPSILON);

        let guard = scheduler.set_timeout(10.0);
        assert_eq!(scheduler.advance(110.0), vec![guard.id()]);
    }
}
