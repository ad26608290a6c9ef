use crate::platform::TimerPlatform;
use crate::timers::Timers;

/// A component whose timers are managed by a [`TimerGuard`].
///
/// The component receives its own props unchanged plus the eight timer
/// functions on [`Timers`], whether or not it uses them.
pub trait Component<P: TimerPlatform>: Sized {
    type Props;

    /// Construction hook. Timers scheduled here are tracked like any other.
    fn create(props: Self::Props, timers: &mut Timers<P>) -> Self;

    /// Destruction hook, run once before outstanding timers are swept
    fn will_unmount(&mut self, _timers: &mut Timers<P>) {}
}

/// Lifecycle of a [`TimerGuard`]; `Destroyed` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Destroyed,
}

/// Wraps one component instance and clears every timer it left outstanding when
/// the instance is torn down, either through [`TimerGuard::unmount`] or on drop.
pub struct TimerGuard<C, P>
where
    C: Component<P>,
    P: TimerPlatform,
{
    inner: C,
    timers: Timers<P>,
    state: Lifecycle,
}

impl<C, P> TimerGuard<C, P>
where
    C: Component<P>,
    P: TimerPlatform,
{
    /// Build an empty registry over `platform`, then construct the inner
    /// component with `props`.
    pub fn mount(platform: P, props: C::Props) -> Self {
        let mut timers = Timers::new(platform);
        let inner = C::create(props, &mut timers);
        log::info!(
            "'{}': mounted {} with {} timer(s) outstanding",
            timers.platform().name(),
            std::any::type_name::<C>(),
            timers.outstanding()
        );
        TimerGuard {
            inner,
            timers,
            state: Lifecycle::Active,
        }
    }

    /// The wrapped instance
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Mutable access to the wrapped instance
    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }

    /// Timer functions and registry owned by this guard
    pub fn timers(&self) -> &Timers<P> {
        &self.timers
    }

    /// Current lifecycle state
    pub fn state(&self) -> Lifecycle {
        self.state
    }

    /// Run work on the mounted component with access to its timer functions
    pub fn update<R>(&mut self, f: impl FnOnce(&mut C, &mut Timers<P>) -> R) -> R {
        f(&mut self.inner, &mut self.timers)
    }

    /// Tear the component down now.
    ///
    /// Returns the number of outstanding handles the sweep cleared.
    pub fn unmount(mut self) -> usize {
        self.teardown()
    }

    fn teardown(&mut self) -> usize {
        if self.state == Lifecycle::Destroyed {
            return 0;
        }
        self.inner.will_unmount(&mut self.timers);
        let cleared = self.timers.clear_all();
        self.state = Lifecycle::Destroyed;
        log::info!(
            "'{}': unmounted {}, cleared {} outstanding timer(s)",
            self.timers.platform().name(),
            std::any::type_name::<C>(),
            cleared
        );
        cleared
    }
}

impl<C, P> Drop for TimerGuard<C, P>
where
    C: Component<P>,
    P: TimerPlatform,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
