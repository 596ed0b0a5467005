use std::time::{Duration, Instant};

use cocktails::timer::{Phase, TimerController};

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[test]
fn full_countdown_emits_one_tick_per_second() {
    let t0 = Instant::now();
    let mut c = TimerController::new();
    c.start(125, t0);
    assert_eq!(c.phase(), Phase::Running);
    assert_eq!(c.formatted_time(), "02:05");

    let mut seen = Vec::new();
    for s in 1..=130 {
        let ticks = c.poll(t0 + secs(s));
        assert!(ticks.len() <= 1, "more than one tick at second {s}");
        seen.extend(ticks);
    }

    assert_eq!(seen.len(), 125);
    assert_eq!(seen.first(), Some(&124));
    assert_eq!(seen.last(), Some(&0));
    assert!(seen.windows(2).all(|w| w[1] + 1 == w[0]));
    assert_eq!(c.phase(), Phase::Finished);
    assert_eq!(c.remaining_seconds(), 0);
    assert!(!c.has_tick_source());
}

#[test]
fn late_poll_delivers_missed_ticks_in_order_without_going_negative() {
    let t0 = Instant::now();
    let mut c = TimerController::new();
    c.start(3, t0);
    assert_eq!(c.poll(t0 + secs(60)), vec![2, 1, 0]);
    assert_eq!(c.phase(), Phase::Finished);
    assert!(c.poll(t0 + secs(120)).is_empty());
}

#[test]
fn stop_then_resume_continues_from_saved_remainder() {
    let t0 = Instant::now();
    let mut c = TimerController::new();
    c.start(60, t0);
    c.poll(t0 + secs(20));
    assert_eq!(c.remaining_seconds(), 40);

    c.stop();
    assert_eq!(c.phase(), Phase::Paused);
    assert_eq!(c.resumable_seconds(), 40);
    assert!(!c.has_tick_source());
    assert!(c.poll(t0 + secs(100)).is_empty());
    assert_eq!(c.remaining_seconds(), 40);

    let t1 = t0 + secs(100);
    c.resume(t1);
    assert_eq!(c.phase(), Phase::Running);
    assert_eq!(c.remaining_seconds(), 40);
    assert_eq!(c.poll(t1 + secs(1)), vec![39]);
    assert_eq!(c.poll(t1 + secs(40)).last(), Some(&0));
    assert_eq!(c.phase(), Phase::Finished);
}

#[test]
fn stop_and_resume_are_noops_outside_their_phase() {
    let t0 = Instant::now();
    let mut c = TimerController::new();
    c.stop();
    assert_eq!(c.phase(), Phase::Idle);
    c.resume(t0);
    assert_eq!(c.phase(), Phase::Idle);

    c.start(5, t0);
    c.resume(t0);
    assert_eq!(c.remaining_seconds(), 5);
    c.stop();
    c.stop();
    assert_eq!(c.phase(), Phase::Paused);
    assert_eq!(c.resumable_seconds(), 5);
}

#[test]
fn interrupt_resets_from_every_phase() {
    let t0 = Instant::now();

    let mut running = TimerController::new();
    running.start(30, t0);

    let mut paused = TimerController::new();
    paused.start(30, t0);
    paused.poll(t0 + secs(3));
    paused.stop();

    let mut finished = TimerController::new();
    finished.start(2, t0);
    finished.poll(t0 + secs(2));
    assert_eq!(finished.phase(), Phase::Finished);

    for mut c in [running, paused, finished] {
        c.interrupt();
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.remaining_seconds(), 0);
        assert_eq!(c.resumable_seconds(), 0);
        assert!(!c.has_tick_source());
        assert!(c.poll(t0 + secs(1000)).is_empty());
        c.resume(t0);
        assert_eq!(c.phase(), Phase::Idle);
    }
}

#[test]
fn double_start_keeps_only_the_second_countdown() {
    let t0 = Instant::now();
    let mut c = TimerController::new();
    c.start(100, t0);
    c.start(10, t0 + Duration::from_millis(300));

    assert_eq!(c.remaining_seconds(), 10);
    assert_eq!(c.next_deadline(), Some(t0 + Duration::from_millis(1300)));
    // The first countdown would have ticked at t0+1s.
    assert!(c.poll(t0 + secs(1)).is_empty());

    let ticks = c.poll(t0 + Duration::from_millis(10_300));
    assert_eq!(ticks, (0..10).rev().collect::<Vec<u32>>());
    assert_eq!(c.phase(), Phase::Finished);
}

#[test]
fn zero_duration_start_is_ignored() {
    let t0 = Instant::now();
    let mut c = TimerController::new();
    c.start(0, t0);
    assert_eq!(c.phase(), Phase::Idle);
    assert!(!c.has_tick_source());
}

#[test]
fn restart_after_finish() {
    let t0 = Instant::now();
    let mut c = TimerController::new();
    c.start(1, t0);
    c.poll(t0 + secs(1));
    assert_eq!(c.phase(), Phase::Finished);
    c.start(2, t0 + secs(5));
    assert_eq!(c.phase(), Phase::Running);
    assert_eq!(c.formatted_time(), "00:02");
}
