//! Recording platform for unit tests. Every primitive call is logged and
//! callbacks are kept so tests can fire them by hand.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use crate::platform::{FrameCallback, OnceCallback, RepeatCallback, TimerKind, TimerPlatform};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Set {
        kind: TimerKind,
        handle: u32,
        delay: Option<Duration>,
    },
    Clear {
        kind: TimerKind,
        handle: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Refused;

enum Stored {
    Once(OnceCallback),
    Repeat(RepeatCallback),
    Frame(FrameCallback),
}

#[derive(Default)]
struct Recorded {
    next_handle: u32,
    fixed_handle: Option<u32>,
    refuse_next: bool,
    calls: Vec<Call>,
    callbacks: HashMap<(TimerKind, u32), Stored>,
}

#[derive(Clone, Default)]
pub(crate) struct RecordingPlatform {
    state: Rc<RefCell<Recorded>>,
}

impl RecordingPlatform {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every setter returns `handle` from now on
    pub(crate) fn return_handle(&self, handle: u32) {
        self.state.borrow_mut().fixed_handle = Some(handle);
    }

    /// The next setter call fails with `Refused`
    pub(crate) fn refuse_next(&self) {
        self.state.borrow_mut().refuse_next = true;
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    /// Delays passed to the setter of `kind`, one entry per call
    pub(crate) fn sets_of(&self, kind: TimerKind) -> Vec<Option<Duration>> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Set { kind: k, delay, .. } if *k == kind => Some(*delay),
                _ => None,
            })
            .collect()
    }

    /// Handles passed to the clearer of `kind`, one entry per call
    pub(crate) fn clears_of(&self, kind: TimerKind) -> Vec<u32> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Clear { kind: k, handle } if *k == kind => Some(*handle),
                _ => None,
            })
            .collect()
    }

    /// Run the stored callback for a handle. Intervals stay armed.
    pub(crate) fn fire(&self, kind: TimerKind, handle: u32) -> bool {
        let stored = self.state.borrow_mut().callbacks.remove(&(kind, handle));
        match stored {
            Some(Stored::Once(callback)) => callback(),
            Some(Stored::Repeat(mut callback)) => {
                callback();
                self.state
                    .borrow_mut()
                    .callbacks
                    .insert((kind, handle), Stored::Repeat(callback));
            }
            Some(Stored::Frame(callback)) => callback(Duration::from_millis(16)),
            None => return false,
        }
        true
    }

    fn set(
        &self,
        kind: TimerKind,
        delay: Option<Duration>,
        callback: Stored,
    ) -> Result<u32, Refused> {
        let mut state = self.state.borrow_mut();
        if std::mem::take(&mut state.refuse_next) {
            return Err(Refused);
        }
        let handle = match state.fixed_handle {
            Some(handle) => handle,
            None => {
                state.next_handle += 1;
                state.next_handle
            }
        };
        state.calls.push(Call::Set {
            kind,
            handle,
            delay,
        });
        state.callbacks.insert((kind, handle), callback);
        Ok(handle)
    }

    fn clear_kind(&self, kind: TimerKind, handle: u32) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::Clear { kind, handle });
        state.callbacks.remove(&(kind, handle));
    }
}

impl TimerPlatform for RecordingPlatform {
    type Handle = u32;
    type Error = Refused;

    fn set_timeout(&self, callback: OnceCallback, delay: Duration) -> Result<u32, Refused> {
        self.set(TimerKind::Timeout, Some(delay), Stored::Once(callback))
    }

    fn clear_timeout(&self, handle: &u32) {
        self.clear_kind(TimerKind::Timeout, *handle)
    }

    fn set_interval(&self, callback: RepeatCallback, period: Duration) -> Result<u32, Refused> {
        self.set(TimerKind::Interval, Some(period), Stored::Repeat(callback))
    }

    fn clear_interval(&self, handle: &u32) {
        self.clear_kind(TimerKind::Interval, *handle)
    }

    fn set_immediate(&self, callback: OnceCallback) -> Result<u32, Refused> {
        self.set(TimerKind::Immediate, None, Stored::Once(callback))
    }

    fn clear_immediate(&self, handle: &u32) {
        self.clear_kind(TimerKind::Immediate, *handle)
    }

    fn request_animation_frame(&self, callback: FrameCallback) -> Result<u32, Refused> {
        self.set(TimerKind::AnimationFrame, None, Stored::Frame(callback))
    }

    fn cancel_animation_frame(&self, handle: &u32) {
        self.clear_kind(TimerKind::AnimationFrame, *handle)
    }

    fn name(&self) -> &str {
        "recording"
    }
}
