//! Basic usage example for the timer guard

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use timer_guard::{
    CancellationToken, Component, Duration, TimerGuard, TimerHandle, Timers, TokioPlatform,
};

/// Polls every period and shows a splash for its first frame
struct Dashboard {
    refreshes: Arc<AtomicUsize>,
    splash: Option<TimerHandle>,
}

impl Component<TokioPlatform> for Dashboard {
    type Props = Duration;

    fn create(period: Duration, timers: &mut Timers<TokioPlatform>) -> Self {
        let refreshes = Arc::new(AtomicUsize::new(0));

        let counter = refreshes.clone();
        if let Err(e) = timers.set_interval(
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                println!("Refresh #{}", n);
            },
            period,
        ) {
            log::warn!("Dashboard refresh not scheduled: {}", e);
        }

        let splash = timers
            .request_animation_frame(|at| println!("First frame at {:?}", at))
            .ok();

        // Would print after the dashboard is gone; cleared on unmount
        if let Err(e) = timers.set_timeout(
            || println!("This never prints"),
            Duration::from_secs(10),
        ) {
            log::warn!("Dashboard timeout not scheduled: {}", e);
        }

        Dashboard { refreshes, splash }
    }

    fn will_unmount(&mut self, timers: &mut Timers<TokioPlatform>) {
        if let Some(handle) = self.splash.take() {
            timers.cancel_animation_frame(&handle);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let cancel_token = CancellationToken::new();

    let platform = TokioPlatform::new(
        "example_platform".to_string(),
        Duration::from_millis(16), // frame interval
        cancel_token.clone(),
    );

    // Mount the component; it schedules its timers during construction
    let mut guard: TimerGuard<Dashboard, _> =
        TimerGuard::mount(platform.clone(), Duration::from_millis(250));
    println!(
        "Dashboard mounted with {} timer(s)",
        guard.timers().outstanding()
    );

    tokio::time::sleep(Duration::from_secs(1)).await;

    // Later work with access to the timer functions
    let handle = guard.update(|_, timers| {
        timers.set_immediate(|| println!("Immediate after first second"))
    })?;
    println!("Scheduled immediate {:?}", handle);

    tokio::time::sleep(Duration::from_millis(100)).await;

    let refreshes = guard.inner().refreshes.load(Ordering::SeqCst);
    let cleared = guard.unmount();
    println!(
        "Dashboard unmounted after {} refreshes, cleared {} timer(s)",
        refreshes, cleared
    );

    tokio::time::sleep(Duration::from_millis(500)).await;
    println!("Platform still tracks {} timer(s)", platform.pending());

    // Shutdown gracefully
    platform.shutdown();
    Ok(())
}
