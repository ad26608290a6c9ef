use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::{interval_at, sleep_until, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::error::{PlatformError, Result};
use crate::platform::{FrameCallback, OnceCallback, RepeatCallback, TimerKind, TimerPlatform};

/// Default frame interval for animation frames (about 60 Hz)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Intervals shorter than this are clamped to it
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Stand-in deadline for delays too large to represent (about 30 years)
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Handle returned by [`TokioPlatform`] setters.
///
/// All four timer kinds draw from one id space, so ids never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Raw id of the handle
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Timer primitives backed by Tokio tasks.
///
/// Every scheduled callback runs in its own task; clearing a handle aborts the
/// task. Cancelling the token stops every pending callback and makes further
/// setter calls fail.
#[derive(Clone)]
pub struct TokioPlatform {
    /// Instance name for logging
    name: String,

    /// Time origin for animation frame timestamps
    origin: Instant,

    frame_interval: Duration,

    min_interval: Duration,

    /// Cancellation token for platform shutdown
    cancel_token: CancellationToken,

    tasks: Arc<TaskTable>,
}

/// Live tasks: handle id -> abort handle
#[derive(Default)]
struct TaskTable {
    next_id: AtomicU64,
    entries: Mutex<HashMap<u64, AbortHandle>>,
}

impl TaskTable {
    fn lock(&self) -> MutexGuard<'_, HashMap<u64, AbortHandle>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokioPlatform {
    /// Create a new TokioPlatform
    ///
    /// # Arguments
    /// * `name` - Platform instance name
    /// * `frame_interval` - Spacing of animation frame boundaries
    /// * `cancel_token` - Token that shuts the platform down
    pub fn new(name: String, frame_interval: Duration, cancel_token: CancellationToken) -> Self {
        let frame_interval = frame_interval.max(DEFAULT_MIN_INTERVAL);
        log::info!(
            "Timer platform '{}' started with {:?} frames",
            name,
            frame_interval
        );
        TokioPlatform {
            name,
            origin: Instant::now(),
            frame_interval,
            min_interval: DEFAULT_MIN_INTERVAL,
            cancel_token,
            tasks: Arc::new(TaskTable::default()),
        }
    }

    /// Clamp interval periods to at least `min_interval` (never below 1 ms)
    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval.max(DEFAULT_MIN_INTERVAL);
        self
    }

    /// Number of scheduled callbacks that have neither fired nor been cleared
    pub fn pending(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Whether the cancellation token has fired
    pub fn is_shut_down(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Stop every pending callback; later setter calls fail
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
        let aborted: Vec<_> = self.tasks.lock().drain().collect();
        for (_, task) in &aborted {
            task.abort();
        }
        log::info!(
            "Timer platform '{}' shut down, aborted {} pending timer(s)",
            self.name,
            aborted.len()
        );
    }

    fn spawn<F>(&self, kind: TimerKind, timer: F) -> Result<TimerHandle>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.cancel_token.is_cancelled() {
            return Err(PlatformError::ShutDown(self.name.clone()));
        }
        let runtime =
            Handle::try_current().map_err(|_| PlatformError::NoRuntime(kind.setter_name()))?;

        let id = self.tasks.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let cancel_token = self.cancel_token.clone();
        let tasks = self.tasks.clone();

        // Held across spawn so the task cannot deregister before it is registered
        let mut entries = self.tasks.lock();
        let task = runtime.spawn(async move {
            tokio::select! {
                _ = cancel_token.cancelled() => {}
                _ = timer => {}
            }
            tasks.lock().remove(&id);
        });
        entries.insert(id, task.abort_handle());

        log::debug!("'{}': scheduled {} #{}", self.name, kind, id);
        Ok(TimerHandle(id))
    }

    fn cancel(&self, kind: TimerKind, handle: &TimerHandle) {
        if let Some(task) = self.tasks.lock().remove(&handle.0) {
            task.abort();
            log::debug!("'{}': {} #{}", self.name, kind.clearer_name(), handle.0);
        }
    }

    /// Deadline `delay` after now, saturating far in the future
    fn deadline_after(delay: Duration) -> Instant {
        let now = Instant::now();
        now.checked_add(delay).unwrap_or_else(|| now + FAR_FUTURE)
    }

    /// Next frame boundary strictly after now, as (deadline, timestamp)
    fn next_frame(&self) -> (Instant, Duration) {
        let elapsed = Instant::now().saturating_duration_since(self.origin);
        let frame = self.frame_interval.as_nanos();
        let frames = elapsed.as_nanos() / frame + 1;
        let timestamp = Duration::from_nanos((frames * frame) as u64);
        (self.origin + timestamp, timestamp)
    }
}

impl TimerPlatform for TokioPlatform {
    type Handle = TimerHandle;
    type Error = PlatformError;

    fn set_timeout(&self, callback: OnceCallback, delay: Duration) -> Result<TimerHandle> {
        let deadline = Self::deadline_after(delay);
        self.spawn(TimerKind::Timeout, async move {
            sleep_until(deadline).await;
            callback();
        })
    }

    fn clear_timeout(&self, handle: &TimerHandle) {
        self.cancel(TimerKind::Timeout, handle)
    }

    fn set_interval(&self, mut callback: RepeatCallback, period: Duration) -> Result<TimerHandle> {
        let period = period.max(self.min_interval);
        let start = Self::deadline_after(period);
        self.spawn(TimerKind::Interval, async move {
            let mut ticker = interval_at(start, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                callback();
            }
        })
    }

    fn clear_interval(&self, handle: &TimerHandle) {
        self.cancel(TimerKind::Interval, handle)
    }

    fn set_immediate(&self, callback: OnceCallback) -> Result<TimerHandle> {
        self.spawn(TimerKind::Immediate, async move {
            callback();
        })
    }

    fn clear_immediate(&self, handle: &TimerHandle) {
        self.cancel(TimerKind::Immediate, handle)
    }

    fn request_animation_frame(&self, callback: FrameCallback) -> Result<TimerHandle> {
        let (deadline, timestamp) = self.next_frame();
        self.spawn(TimerKind::AnimationFrame, async move {
            sleep_until(deadline).await;
            callback(timestamp);
        })
    }

    fn cancel_animation_frame(&self, handle: &TimerHandle) {
        self.cancel(TimerKind::AnimationFrame, handle)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
