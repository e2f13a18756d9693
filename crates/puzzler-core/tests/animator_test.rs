//! Integration tests for the tween scheduler.
//!
//! These drive [`Animator`] with a synthetic clock and a recording target that
//! counts how often tweens and callbacks touch it.

use puzzler_core::{Animator, AnimatorState, AnimatorStep, Easing, Point};
use web_time::{Duration, Instant};

#[derive(Debug, Default)]
struct Recorder {
    value: f64,
    position: Point,
    applies: u32,
    frames: Vec<f64>,
    completions: u32,
}

fn recording_animator(duration: Duration, easing: Easing) -> Animator<Recorder> {
    Animator::new(duration)
        .tween(0.0, 10.0, easing, |p: &mut Recorder, v| {
            p.value = v;
            p.applies += 1;
        })
        .on_frame(|p: &mut Recorder, progress| p.frames.push(progress))
        .on_complete(|p: &mut Recorder| p.completions += 1)
}

// ---------------------------------------------------------------------------
// Zero and tiny durations
// ---------------------------------------------------------------------------

#[test]
fn zero_duration_completes_on_first_tick() {
    let t0 = Instant::now();
    let mut rec = Recorder::default();
    let mut anim = recording_animator(Duration::ZERO, Easing::QuadraticOut);
    anim.start(t0);

    assert_eq!(anim.tick(&mut rec, t0), AnimatorStep::Completed);
    assert_eq!(rec.value, 10.0);
    assert_eq!(rec.applies, 1);
    assert_eq!(rec.frames, vec![1.0]);
    assert_eq!(rec.completions, 1);

    assert_eq!(anim.tick(&mut rec, t0 + Duration::from_secs(1)), AnimatorStep::Idle);
    assert_eq!(rec.applies, 1);
    assert_eq!(rec.completions, 1);
    assert_eq!(anim.state(), AnimatorState::Completed);
}

#[test]
fn sub_microsecond_duration_is_treated_as_zero() {
    let t0 = Instant::now();
    let mut rec = Recorder::default();
    let mut anim = recording_animator(Duration::from_nanos(10), Easing::Linear);
    anim.start(t0);
    assert_eq!(anim.progress(t0), 1.0);
    assert_eq!(anim.tick(&mut rec, t0), AnimatorStep::Completed);
    assert_eq!(rec.value, 10.0);
}

// ---------------------------------------------------------------------------
// Frame sequencing
// ---------------------------------------------------------------------------

#[test]
fn frames_report_linear_progress() {
    let t0 = Instant::now();
    let mut rec = Recorder::default();
    let mut anim = recording_animator(Duration::from_millis(400), Easing::QuadraticIn);
    anim.start(t0);

    for ms in [100, 200, 300] {
        let step = anim.tick(&mut rec, t0 + Duration::from_millis(ms));
        assert!(matches!(step, AnimatorStep::Running(_)), "{ms}ms: {step:?}");
    }
    assert_eq!(anim.tick(&mut rec, t0 + Duration::from_millis(400)), AnimatorStep::Completed);

    let expected = [0.25, 0.5, 0.75, 1.0];
    assert_eq!(rec.frames.len(), expected.len());
    for (got, want) in rec.frames.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "{got} != {want}");
    }
    assert_eq!(rec.frames.last(), Some(&1.0));
    assert_eq!(rec.applies, 4);
    assert_eq!(rec.completions, 1);
    assert_eq!(rec.value, 10.0);
}

#[test]
fn eased_value_at_midpoint() {
    let t0 = Instant::now();
    let mut rec = Recorder::default();
    let mut anim = recording_animator(Duration::from_millis(100), Easing::QuadraticIn);
    anim.start(t0);
    anim.tick(&mut rec, t0 + Duration::from_millis(50));
    assert!((rec.value - 2.5).abs() < 1e-9, "value = {}", rec.value);
}

#[test]
fn overshooting_curve_passes_beyond_target() {
    let t0 = Instant::now();
    let mut rec = Recorder::default();
    let mut peak = f64::MIN;
    let mut anim = recording_animator(Duration::from_millis(1000), Easing::BackOut);
    anim.start(t0);
    for ms in (0..1000).step_by(20) {
        anim.tick(&mut rec, t0 + Duration::from_millis(ms));
        peak = peak.max(rec.value);
    }
    assert!(peak > 10.0, "peak = {peak}");
    anim.tick(&mut rec, t0 + Duration::from_millis(1000));
    assert_eq!(rec.value, 10.0);
}

#[test]
fn late_tick_jumps_straight_to_completion() {
    let t0 = Instant::now();
    let mut rec = Recorder::default();
    let mut anim = recording_animator(Duration::from_millis(100), Easing::Linear);
    anim.start(t0);
    assert_eq!(anim.tick(&mut rec, t0 + Duration::from_secs(5)), AnimatorStep::Completed);
    assert_eq!(rec.frames, vec![1.0]);
    assert_eq!(rec.completions, 1);
}

// ---------------------------------------------------------------------------
// Several tweens, one target
// ---------------------------------------------------------------------------

#[test]
fn tweens_share_the_clock() {
    let t0 = Instant::now();
    let mut rec = Recorder::default();
    let mut anim = Animator::new(Duration::from_millis(200))
        .tween(0.0, 10.0, Easing::Linear, |p: &mut Recorder, v| p.value = v)
        .tween(
            Point::new(0.0, 0.0),
            Point::new(100.0, -50.0),
            Easing::Linear,
            |p: &mut Recorder, v| p.position = v,
        );
    assert_eq!(anim.len(), 2);
    anim.start(t0);

    anim.tick(&mut rec, t0 + Duration::from_millis(100));
    assert!((rec.value - 5.0).abs() < 1e-9);
    assert!((rec.position.x - 50.0).abs() < 1e-9);
    assert!((rec.position.y + 25.0).abs() < 1e-9);

    anim.tick(&mut rec, t0 + Duration::from_millis(200));
    assert_eq!(rec.value, 10.0);
    assert_eq!(rec.position, Point::new(100.0, -50.0));
    assert!(anim.is_empty());
}

#[test]
fn add_tween_in_place() {
    let t0 = Instant::now();
    let mut target = vec![0.0; 3];
    let mut anim: Animator<Vec<f64>> = Animator::new(Duration::from_millis(10));
    for i in 0..3 {
        let to = (i as f64 + 1.0) * 10.0;
        anim.add_tween(0.0, to, Easing::CubicInOut, move |t: &mut Vec<f64>, v| {
            if let Some(slot) = t.get_mut(i) {
                *slot = v;
            }
        });
    }
    anim.start(t0);
    assert_eq!(anim.tick(&mut target, t0 + Duration::from_millis(10)), AnimatorStep::Completed);
    assert_eq!(target, vec![10.0, 20.0, 30.0]);
}

#[test]
fn debug_omits_closures() {
    let anim = recording_animator(Duration::from_millis(5), Easing::Linear);
    let text = format!("{anim:?}");
    assert!(text.starts_with("Animator"));
    assert!(text.contains("tweens: 1"));
    assert!(text.contains("Pending"));
}
