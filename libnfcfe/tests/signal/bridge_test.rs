use std::thread;
use std::time::{Duration, Instant};

use libnfcfe::signal::{InterruptSignalBridge, WakeFlags};

#[test]
fn event_from_other_thread_wakes_worker() {
    let bridge = InterruptSignalBridge::new();
    bridge.register_current();
    let callback = bridge.engine_callback();

    let poster = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        callback();
    });
    let got = bridge.wait_any(WakeFlags::ENGINE_EVENT, None);
    poster.join().unwrap();

    assert_eq!(got, WakeFlags::ENGINE_EVENT);
    assert!(bridge.peek().is_empty());
}

#[test]
fn deadline_bounded_wait_times_out() {
    let bridge = InterruptSignalBridge::new();
    bridge.register_current();
    let started = Instant::now();
    let got = bridge.wait_any(
        WakeFlags::ENGINE_EVENT,
        Some(started + Duration::from_millis(30)),
    );
    assert!(got.is_empty());
    assert!(started.elapsed() >= Duration::from_millis(30));
}

#[test]
fn unmasked_flags_stay_pending() {
    let bridge = InterruptSignalBridge::new();
    bridge.register_current();
    bridge.on_timer_expired();
    bridge.request_stop();

    let got = bridge.wait_any(WakeFlags::STOP_REQUESTED, None);
    assert_eq!(got, WakeFlags::STOP_REQUESTED);
    assert_eq!(bridge.peek(), WakeFlags::TIMER_EXPIRED);
}

#[test]
fn many_posts_coalesce() {
    let bridge = InterruptSignalBridge::new();
    bridge.register_current();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let b = bridge.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    b.on_engine_event();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(bridge.take(WakeFlags::ALL), WakeFlags::ENGINE_EVENT);
    assert!(bridge.take(WakeFlags::ALL).is_empty());
}
