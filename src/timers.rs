use std::fmt;
use std::time::Duration;

use crate::platform::{TimerKind, TimerPlatform};
use crate::registry::TimerRegistry;

/// The eight decorated timer functions plus the registry of outstanding handles.
///
/// Every handle produced through a setter is tracked until it is cleared through
/// the matching clearer. Dropping `Timers` clears whatever is still outstanding.
pub struct Timers<P: TimerPlatform> {
    platform: P,
    registry: TimerRegistry<P::Handle>,
}

impl<P: TimerPlatform> Timers<P> {
    /// Empty registry over `platform`
    pub fn new(platform: P) -> Self {
        Timers {
            platform,
            registry: TimerRegistry::new(),
        }
    }

    /// Schedule `callback` once after `delay`
    pub fn set_timeout<F>(&mut self, callback: F, delay: Duration) -> Result<P::Handle, P::Error>
    where
        F: FnOnce() + Send + 'static,
    {
        let result = self.platform.set_timeout(Box::new(callback), delay);
        self.track(TimerKind::Timeout, result)
    }

    /// Clear a timeout and stop tracking it
    pub fn clear_timeout(&mut self, handle: &P::Handle) {
        self.untrack(TimerKind::Timeout, handle);
    }

    /// Schedule `callback` every `period`
    pub fn set_interval<F>(&mut self, callback: F, period: Duration) -> Result<P::Handle, P::Error>
    where
        F: FnMut() + Send + 'static,
    {
        let result = self.platform.set_interval(Box::new(callback), period);
        self.track(TimerKind::Interval, result)
    }

    /// Clear an interval and stop tracking it
    pub fn clear_interval(&mut self, handle: &P::Handle) {
        self.untrack(TimerKind::Interval, handle);
    }

    /// Schedule `callback` on the next turn of the event loop
    pub fn set_immediate<F>(&mut self, callback: F) -> Result<P::Handle, P::Error>
    where
        F: FnOnce() + Send + 'static,
    {
        let result = self.platform.set_immediate(Box::new(callback));
        self.track(TimerKind::Immediate, result)
    }

    /// Clear an immediate and stop tracking it
    pub fn clear_immediate(&mut self, handle: &P::Handle) {
        self.untrack(TimerKind::Immediate, handle);
    }

    /// Schedule `callback` for the next frame; it receives the frame timestamp
    pub fn request_animation_frame<F>(&mut self, callback: F) -> Result<P::Handle, P::Error>
    where
        F: FnOnce(Duration) + Send + 'static,
    {
        let result = self.platform.request_animation_frame(Box::new(callback));
        self.track(TimerKind::AnimationFrame, result)
    }

    /// Cancel an animation frame and stop tracking it
    pub fn cancel_animation_frame(&mut self, handle: &P::Handle) {
        self.untrack(TimerKind::AnimationFrame, handle);
    }

    /// Number of handles set through these functions and not yet cleared.
    ///
    /// Firing does not untrack a handle: a timeout, immediate or frame that has
    /// already run still counts until it is cleared or swept at teardown, so a
    /// component that keeps re-arming one-shot timers without clearing them
    /// grows this count.
    pub fn outstanding(&self) -> usize {
        self.registry.len()
    }

    /// Whether `handle` of `kind` is still outstanding
    pub fn is_tracked(&self, kind: TimerKind, handle: &P::Handle) -> bool {
        self.registry.contains(kind, handle)
    }

    /// The platform the functions schedule through
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Clear every outstanding handle with the primitive matching its kind.
    ///
    /// Returns the number of handles cleared.
    pub fn clear_all(&mut self) -> usize {
        let mut cleared = 0;
        for (kind, handle) in self.registry.drain() {
            log::debug!(
                "'{}': sweeping {} handle {:?}",
                self.platform.name(),
                kind,
                handle
            );
            self.platform.clear(kind, &handle);
            cleared += 1;
        }
        cleared
    }

    fn track(
        &mut self,
        kind: TimerKind,
        result: Result<P::Handle, P::Error>,
    ) -> Result<P::Handle, P::Error> {
        match result {
            Ok(handle) => {
                log::debug!(
                    "'{}': {} returned handle {:?}",
                    self.platform.name(),
                    kind.setter_name(),
                    handle
                );
                self.registry.insert(kind, handle.clone());
                Ok(handle)
            }
            Err(e) => {
                log::warn!("'{}': {} failed", self.platform.name(), kind.setter_name());
                Err(e)
            }
        }
    }

    // The platform is told to clear even when the handle is unknown here; it may
    // have been produced outside these functions.
    fn untrack(&mut self, kind: TimerKind, handle: &P::Handle) {
        self.platform.clear(kind, handle);
        if self.registry.remove(kind, handle) {
            log::debug!(
                "'{}': {} cleared handle {:?}",
                self.platform.name(),
                kind.clearer_name(),
                handle
            );
        }
    }
}

impl<P: TimerPlatform> Drop for Timers<P> {
    fn drop(&mut self) {
        if !self.registry.is_empty() {
            let cleared = self.clear_all();
            log::debug!("'{}': dropped with {} handle(s) outstanding", self.platform.name(), cleared);
        }
    }
}

impl<P: TimerPlatform> fmt::Debug for Timers<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timers")
            .field("platform", &self.platform.name())
            .field("outstanding", &self.registry.len())
            .finish()
    }
}
