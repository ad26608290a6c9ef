//! # Timer Guard
//!
//! Scoped timer tracking for components. A component wrapped in a
//! [`TimerGuard`] schedules its timeouts, intervals, immediates and animation
//! frames through [`Timers`]; whatever it leaves outstanding is cleared when the
//! component is torn down.
//!
//! ## Features
//!
//! - **Automatic cleanup**: unmounting or dropping the guard clears every handle
//!   that was not cleared explicitly, each with the primitive matching its kind
//! - **No double clears**: explicitly cleared handles are forgotten immediately
//! - **Injected platform**: the four setter/clearer pairs come from a
//!   [`TimerPlatform`] implementation, so tests can substitute their own
//! - **Tokio backend**: [`TokioPlatform`] runs each timer as a Tokio task with
//!   graceful shutdown through a cancellation token
//!
//! ## Quick Start
//!
//! ```rust
//! use timer_guard::{CancellationToken, Component, Duration, TimerGuard, Timers, TokioPlatform};
//!
//! struct Blinker;
//!
//! impl Component<TokioPlatform> for Blinker {
//!     type Props = Duration;
//!
//!     fn create(period: Duration, timers: &mut Timers<TokioPlatform>) -> Self {
//!         if let Err(e) = timers.set_interval(|| println!("blink"), period) {
//!             eprintln!("blinker not started: {}", e);
//!         }
//!         Blinker
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let platform = TokioPlatform::new(
//!         "ui".to_string(),
//!         Duration::from_millis(16),  // frame interval
//!         CancellationToken::new(),
//!     );
//!
//!     let guard: TimerGuard<Blinker, _> =
//!         TimerGuard::mount(platform.clone(), Duration::from_millis(100));
//!     tokio::time::sleep(Duration::from_millis(350)).await;
//!
//!     // The interval is cleared here
//!     assert_eq!(guard.unmount(), 1);
//!     assert_eq!(platform.pending(), 0);
//! }
//! ```

mod error;
mod guard;
mod platform;
mod registry;
#[cfg(test)]
mod testing;
mod timers;
mod tokio_platform;

pub use error::{PlatformError, Result};
pub use guard::{Component, Lifecycle, TimerGuard};
pub use platform::{FrameCallback, OnceCallback, RepeatCallback, TimerKind, TimerPlatform};
pub use timers::Timers;
pub use tokio_platform::{
    TimerHandle, TokioPlatform, DEFAULT_FRAME_INTERVAL, DEFAULT_MIN_INTERVAL,
};

// Re-export commonly used types for convenience
pub use std::time::Duration;
pub use tokio_util::sync::CancellationToken;
