use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pdfdesk_engine::{run_after, PeriodicTimer};

fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let handle = count.clone();
    (count, move || {
        handle.fetch_add(1, Ordering::SeqCst);
    })
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn ticks_once_per_period() {
    let (count, on_tick) = counter();
    let mut timer = PeriodicTimer::new();
    timer.start(Duration::from_millis(100), on_tick);
    assert!(timer.is_active());

    advance(50).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
    advance(1000).await;
    assert_eq!(count.load(Ordering::SeqCst), 10);
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_ticks_and_is_idempotent() {
    let (count, on_tick) = counter();
    let mut timer = PeriodicTimer::new();
    timer.start(Duration::from_millis(100), on_tick);

    advance(350).await;
    timer.cancel();
    timer.cancel();
    assert!(!timer.is_active());
    let seen = count.load(Ordering::SeqCst);
    assert_eq!(seen, 3);

    advance(1000).await;
    assert_eq!(count.load(Ordering::SeqCst), seen);
}

#[tokio::test(start_paused = true)]
async fn restart_replaces_running_timer() {
    let (first, first_tick) = counter();
    let (second, second_tick) = counter();
    let mut timer = PeriodicTimer::new();

    timer.start(Duration::from_millis(100), first_tick);
    advance(250).await;
    timer.start(Duration::from_millis(100), second_tick);
    advance(520).await;

    assert_eq!(first.load(Ordering::SeqCst), 2);
    assert_eq!(second.load(Ordering::SeqCst), 5);
}

#[tokio::test(start_paused = true)]
async fn dropping_timer_cancels_it() {
    let (count, on_tick) = counter();
    {
        let mut timer = PeriodicTimer::new();
        timer.start(Duration::from_millis(100), on_tick);
        advance(150).await;
    }
    advance(1000).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn run_after_fires_once_after_delay() {
    let (count, mut on_fire) = counter();
    run_after(Duration::from_millis(500), async move { on_fire() });

    advance(499).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
    advance(2).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
    advance(2000).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}
