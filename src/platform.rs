use std::fmt;
use std::hash::Hash;
use std::time::Duration;

/// Callback for one-shot timers (timeouts and immediates)
pub type OnceCallback = Box<dyn FnOnce() + Send + 'static>;

/// Callback for intervals, invoked on every tick
pub type RepeatCallback = Box<dyn FnMut() + Send + 'static>;

/// Callback for animation frames, invoked with the frame timestamp
pub type FrameCallback = Box<dyn FnOnce(Duration) + Send + 'static>;

/// Timer family of a handle. Selects the clear primitive that applies to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Timeout,
    Interval,
    Immediate,
    AnimationFrame,
}

impl TimerKind {
    pub const ALL: [TimerKind; 4] = [
        TimerKind::Timeout,
        TimerKind::Interval,
        TimerKind::Immediate,
        TimerKind::AnimationFrame,
    ];

    /// Name of the setter primitive for this kind
    pub fn setter_name(self) -> &'static str {
        match self {
            TimerKind::Timeout => "setTimeout",
            TimerKind::Interval => "setInterval",
            TimerKind::Immediate => "setImmediate",
            TimerKind::AnimationFrame => "requestAnimationFrame",
        }
    }

    /// Name of the matching clear primitive
    pub fn clearer_name(self) -> &'static str {
        match self {
            TimerKind::Timeout => "clearTimeout",
            TimerKind::Interval => "clearInterval",
            TimerKind::Immediate => "clearImmediate",
            TimerKind::AnimationFrame => "cancelAnimationFrame",
        }
    }
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.setter_name())
    }
}

/// The four setter/clearer pairs a guard schedules through.
///
/// Implementations are the platform boundary: they are assumed reliable and the
/// guard never wraps or intercepts their faults. A setter error reaches the
/// caller of the decorated setter unchanged.
pub trait TimerPlatform {
    /// Opaque handle returned by the setters
    type Handle: Clone + Eq + Hash + fmt::Debug;

    /// Fault raised by a setter
    type Error;

    fn set_timeout(&self, callback: OnceCallback, delay: Duration)
        -> Result<Self::Handle, Self::Error>;

    fn clear_timeout(&self, handle: &Self::Handle);

    fn set_interval(
        &self,
        callback: RepeatCallback,
        period: Duration,
    ) -> Result<Self::Handle, Self::Error>;

    fn clear_interval(&self, handle: &Self::Handle);

    fn set_immediate(&self, callback: OnceCallback) -> Result<Self::Handle, Self::Error>;

    fn clear_immediate(&self, handle: &Self::Handle);

    fn request_animation_frame(
        &self,
        callback: FrameCallback,
    ) -> Result<Self::Handle, Self::Error>;

    fn cancel_animation_frame(&self, handle: &Self::Handle);

    /// Short name used as a log prefix
    fn name(&self) -> &str {
        "platform"
    }

    /// Dispatch to the clear primitive matching `kind`
    fn clear(&self, kind: TimerKind, handle: &Self::Handle) {
        match kind {
            TimerKind::Timeout => self.clear_timeout(handle),
            TimerKind::Interval => self.clear_interval(handle),
            TimerKind::Immediate => self.clear_immediate(handle),
            TimerKind::AnimationFrame => self.cancel_animation_frame(handle),
        }
    }
}
