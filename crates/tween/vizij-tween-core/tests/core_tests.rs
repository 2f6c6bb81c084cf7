use std::cell::{Cell, RefCell};
use std::rc::Rc;

use vizij_tween_core::{
    Change, Config, CoreEvent, EventKind, FrameTime, OwnerKey, Scheduler, TargetHandle,
    TweenError, TweenId, TweenMode, TweenValue,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn move_x(s: &mut Scheduler, owner: i64, to: f32, duration: f32) -> TweenId {
    s.allocate_vector(
        TweenMode::Position,
        [0.0; 3],
        [to, 0.0, 0.0],
        duration,
        false,
        OwnerKey(owner),
        TargetHandle(owner as u64),
    )
    .expect("vector mode")
}

fn last_x(changes: &[Change], tween: TweenId) -> Option<f32> {
    changes
        .iter()
        .rev()
        .find(|c| c.tween == tween)
        .and_then(|c| c.value.as_vec3())
        .map(|v| v[0])
}

fn completed(events: &[CoreEvent], tween: TweenId) -> bool {
    events
        .iter()
        .any(|e| matches!(e, CoreEvent::Completed { tween: t, .. } if *t == tween))
}

#[test]
/// it should terminate a single run once running time reaches the duration and free the slot
fn single_run_terminates_and_frees() {
    let mut s = Scheduler::default();
    let id = move_x(&mut s, 1, 10.0, 1.0);

    let out = s.advance(FrameTime::new(0.5));
    approx(last_x(&out.changes, id).expect("change"), 5.0, 1e-5);
    assert!(s.is_running(id));

    let out = s.advance(FrameTime::new(0.6));
    assert_eq!(last_x(&out.changes, id), Some(10.0));
    assert!(completed(&out.events, id));

    assert!(s.slot(id).is_none());
    assert_eq!(s.active_count(), 0);
    assert_eq!(s.slot_for_owner(OwnerKey(1)).index(), -1);
}

#[test]
/// it should end a ping-pong with loop_count = 1 exactly at the start position
fn ping_pong_ends_at_start() {
    let mut s = Scheduler::default();
    let id = move_x(&mut s, 1, 10.0, 1.0);
    s.set_loop(id, 1, true).expect("loop");

    let mut last = None;
    let mut done = false;
    let mut peak = 0.0f32;
    for _ in 0..40 {
        let out = s.advance(FrameTime::new(0.1));
        if let Some(x) = last_x(&out.changes, id) {
            peak = peak.max(x);
            last = Some(x);
        }
        if completed(&out.events, id) {
            done = true;
            break;
        }
    }
    assert!(done, "ping-pong never completed");
    assert_eq!(peak, 10.0);
    assert_eq!(last, Some(0.0));
}

#[test]
/// it should run a restart loop loop_count times and report each boundary
fn restart_loop_counts_boundaries() {
    let mut s = Scheduler::default();
    let id = move_x(&mut s, 1, 1.0, 0.5);
    s.set_loop(id, 3, false).expect("loop");

    let mut boundaries = 0;
    let mut frames = 0;
    while s.slot(id).is_some() && frames < 100 {
        let out = s.advance(FrameTime::new(0.25));
        boundaries += out
            .events
            .iter()
            .filter(|e| matches!(e, CoreEvent::LoopCompleted { .. }))
            .count();
        frames += 1;
    }
    assert_eq!(boundaries, 2);
    assert_eq!(frames, 6);
}

#[test]
/// it should grow the pool, keep every index and step all tweens to completion
fn pool_growth_keeps_all_tweens_steppable() {
    let mut s = Scheduler::new(Config {
        initial_capacity: 2,
        ..Config::default()
    });
    let ids: Vec<TweenId> = (0..5).map(|o| move_x(&mut s, o, o as f32, 1.0)).collect();
    assert_eq!(s.capacity(), 8);
    for (i, id) in ids.iter().enumerate() {
        assert_eq!(id.index as usize, i);
    }

    let out = s.advance(FrameTime::new(0.5));
    for (o, id) in ids.iter().enumerate() {
        approx(last_x(&out.changes, *id).expect("stepped"), o as f32 * 0.5, 1e-5);
    }
    let out = s.advance(FrameTime::new(0.5));
    for id in &ids {
        assert!(completed(&out.events, *id));
    }
}

#[test]
/// it should shrink back to the configured floor once idle, and only when enabled
fn shrink_when_idle() {
    for shrink in [true, false] {
        let mut s = Scheduler::new(Config {
            initial_capacity: 2,
            shrink_when_idle: shrink,
            ..Config::default()
        });
        for o in 0..5 {
            move_x(&mut s, o, 1.0, 0.1);
        }
        assert_eq!(s.capacity(), 8);
        s.advance(FrameTime::new(0.2));
        assert_eq!(s.active_count(), 0);
        assert_eq!(s.capacity(), if shrink { 2 } else { 8 });
    }
}

#[test]
/// it should reject a handle whose slot was freed and reused
fn stale_handle_after_reuse() {
    let mut s = Scheduler::default();
    let a = move_x(&mut s, 1, 1.0, 1.0);
    s.cancel(a, false).expect("cancel");
    let b = move_x(&mut s, 2, 1.0, 1.0);
    assert_eq!(a.index, b.index);
    assert_ne!(a.generation, b.generation);

    assert!(matches!(s.pause(a), Err(TweenError::StaleHandle(id)) if id == a));
    assert!(matches!(s.cancel(a, true), Err(TweenError::StaleHandle(_))));
    assert!(s.is_running(b));
    assert!(!s.is_paused(b));
}

#[test]
/// it should hold paused tweens still and continue from where they stopped
fn pause_and_resume() {
    let mut s = Scheduler::default();
    let id = move_x(&mut s, 1, 10.0, 1.0);
    s.advance(FrameTime::new(0.25));
    s.pause(id).expect("pause");
    assert!(s.is_paused(id));
    for _ in 0..5 {
        let out = s.advance(FrameTime::new(0.25));
        assert!(last_x(&out.changes, id).is_none());
    }
    s.resume(id, false).expect("resume");
    let out = s.advance(FrameTime::new(0.25));
    approx(last_x(&out.changes, id).expect("change"), 5.0, 1e-5);
}

#[test]
/// it should restart from the last value on a rebaselined resume
fn rebaselined_resume_has_no_jump() {
    let mut s = Scheduler::default();
    let id = move_x(&mut s, 1, 10.0, 1.0);
    s.advance(FrameTime::new(0.5));
    s.pause(id).expect("pause");
    s.advance(FrameTime::new(3.0));
    s.resume(id, true).expect("resume");

    let out = s.advance(FrameTime::new(0.5));
    approx(last_x(&out.changes, id).expect("change"), 7.5, 1e-5);
    let out = s.advance(FrameTime::new(0.5));
    assert_eq!(last_x(&out.changes, id), Some(10.0));
}

#[test]
/// it should keep a rebaselined return leg heading back to the start
fn rebaselined_return_leg_ends_at_start() {
    let mut s = Scheduler::default();
    let id = move_x(&mut s, 1, 10.0, 1.0);
    s.set_loop(id, 1, true).expect("loop");
    s.advance(FrameTime::new(1.0));
    let out = s.advance(FrameTime::new(0.25));
    approx(last_x(&out.changes, id).expect("change"), 7.5, 1e-5);

    s.pause(id).expect("pause");
    s.advance(FrameTime::new(1.0));
    s.resume(id, true).expect("resume");
    let out = s.advance(FrameTime::new(0.25));
    let x = last_x(&out.changes, id).expect("change");
    approx(x, 5.625, 1e-4);
    assert!(x < 7.5);

    let mut last = x;
    let mut done = false;
    for _ in 0..10 {
        let out = s.advance(FrameTime::new(0.25));
        if let Some(v) = last_x(&out.changes, id) {
            assert!(v <= last, "moved away from the start: {v} after {last}");
            last = v;
        }
        if completed(&out.events, id) {
            done = true;
            break;
        }
    }
    assert!(done);
    assert_eq!(last, 0.0);
}

#[test]
/// it should rebaseline only the current iteration of a restart loop
fn rebaselined_restart_loop_keeps_later_iterations() {
    let mut s = Scheduler::default();
    let id = move_x(&mut s, 1, 10.0, 1.0);
    s.set_loop(id, 3, false).expect("loop");
    s.advance(FrameTime::new(1.0));
    let out = s.advance(FrameTime::new(0.5));
    approx(last_x(&out.changes, id).expect("change"), 5.0, 1e-5);

    s.pause(id).expect("pause");
    s.resume(id, true).expect("resume");
    let out = s.advance(FrameTime::new(0.5));
    approx(last_x(&out.changes, id).expect("change"), 7.5, 1e-5);
    let out = s.advance(FrameTime::new(0.5));
    assert_eq!(last_x(&out.changes, id), Some(10.0));
    assert!(!completed(&out.events, id));

    // Third iteration starts from the allocated start again.
    let out = s.advance(FrameTime::new(0.25));
    approx(last_x(&out.changes, id).expect("change"), 2.5, 1e-5);
    let out = s.advance(FrameTime::new(0.75));
    assert_eq!(last_x(&out.changes, id), Some(10.0));
    assert!(completed(&out.events, id));
}

#[test]
/// it should act on every tween of an owner and report how many it touched
fn owner_operations_cover_all_slots() {
    let mut s = Scheduler::default();
    let a = move_x(&mut s, 7, 1.0, 1.0);
    let b = s.allocate_rotation(
        OwnerKey(7),
        TargetHandle(7),
        [0.0, 0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0],
        1.0,
        1.0,
        false,
    );
    let other = move_x(&mut s, 8, 1.0, 1.0);

    assert_eq!(s.find_owner(OwnerKey(7)), Some(a));
    assert_eq!(s.owner_tweens(OwnerKey(7)), vec![a, b]);
    assert_eq!(s.pause_owner(OwnerKey(7)), 2);
    assert!(s.is_paused(a) && s.is_paused(b));
    assert!(s.is_running(other));
    assert!(s.is_tweening(OwnerKey(7)));

    assert_eq!(s.cancel_owner(OwnerKey(7), false), 2);
    assert!(!s.is_tweening(OwnerKey(7)));
    assert!(s.find_owner(OwnerKey(7)).is_none());
    assert!(s.slot_for_owner(OwnerKey(7)).is_free());
    assert_eq!(s.cancel_all(false), 1);
    assert_eq!(s.active_count(), 0);
}

#[test]
/// it should write the end value when cancelled and fire Complete only when asked
fn cancel_callback_semantics() {
    for invoke in [false, true] {
        let mut s = Scheduler::default();
        let id = move_x(&mut s, 1, 4.0, 1.0);
        let complete = Rc::new(Cell::new(0));
        let last = Rc::new(Cell::new(0));
        let c = complete.clone();
        s.on_complete(id, move |_, _| c.set(c.get() + 1)).expect("on_complete");
        let f = last.clone();
        s.on_final(id, move |_, _| f.set(f.get() + 1)).expect("on_final");

        s.advance(FrameTime::new(0.25));
        s.cancel(id, invoke).expect("cancel");

        assert_eq!(complete.get(), u32::from(invoke));
        assert_eq!(last.get(), 1);
        assert_eq!(last_x(&s.outputs().changes, id), Some(4.0));
        assert!(s
            .outputs()
            .events
            .iter()
            .any(|e| matches!(e, CoreEvent::Cancelled { tween, .. } if *tween == id)));
        assert!(s.slot(id).is_none());

        // Nothing fires again later.
        s.advance(FrameTime::new(1.0));
        assert_eq!(last.get(), 1);
    }
}

#[test]
/// it should emit a pose for orbits and keep the distance to the pivot
fn orbit_half_turn() {
    let mut s = Scheduler::default();
    let id = s.allocate_orbit(
        OwnerKey(1),
        TargetHandle(1),
        vizij_tween_core::OrbitParams {
            position: [2.0, 0.0, 0.0],
            pivot: [1.0, 0.0, 0.0],
            axis: [0.0, 1.0, 0.0],
            angle: core::f32::consts::PI,
            ..Default::default()
        },
        1.0,
        false,
    );
    let out = s.advance(FrameTime::new(0.5));
    let change = out.changes.iter().find(|c| c.tween == id).expect("change");
    assert_eq!(change.mode, TweenMode::RotateAround);
    match change.value {
        TweenValue::Pose { position, .. } => {
            let d = ((position[0] - 1.0).powi(2) + position[2].powi(2)).sqrt();
            approx(d, 1.0, 1e-5);
        }
        other => panic!("unexpected value {other:?}"),
    }
    let out = s.advance(FrameTime::new(0.5));
    let end = out.latest_for(TargetHandle(1)).expect("change");
    let pos = end.value.as_vec3().expect("pose");
    approx(pos[0], 0.0, 1e-5);
    approx(pos[2], 0.0, 1e-5);
}

#[test]
/// it should emit rotations as unit quaternions and mark local-space changes
fn rotation_changes_are_unit_and_flag_local() {
    let mut s = Scheduler::default();
    let id = s.allocate_rotation(
        OwnerKey(1),
        TargetHandle(9),
        [0.0, 0.0, 0.0, 1.0],
        [0.0, 0.0, 2.0],
        core::f32::consts::PI,
        1.0,
        true,
    );
    let out = s.advance(FrameTime::new(0.5));
    let c = out.latest_for(TargetHandle(9)).expect("change");
    assert_eq!(c.tween, id);
    assert!(c.is_local);
    let q = c.value.as_quat().expect("quat");
    let n = (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt();
    approx(n, 1.0, 1e-5);
    // Quarter turn about z.
    approx(q[2], (core::f32::consts::FRAC_PI_4).sin(), 1e-5);
}

#[test]
/// it should reject out-of-range loop counts and speeds, and lock timing after the first step
fn setter_validation() {
    let mut s = Scheduler::default();
    let id = move_x(&mut s, 1, 1.0, 1.0);
    assert!(matches!(s.set_loop(id, 256, false), Err(TweenError::InvalidLoopCount(256))));
    assert!(matches!(s.set_speed(id, 1000), Err(TweenError::InvalidSpeed(1000))));
    assert!(matches!(s.set_ease_code(id, 200), Err(TweenError::UnknownEase(200))));
    assert!(matches!(
        s.set_to(id, TweenValue::Float(1.0)),
        Err(TweenError::ModeMismatch { .. })
    ));
    assert!(matches!(
        s.allocate_vector(
            TweenMode::Float,
            [0.0; 3],
            [1.0; 3],
            1.0,
            false,
            OwnerKey(1),
            TargetHandle(1)
        ),
        Err(TweenError::NotVectorMode(TweenMode::Float))
    ));

    s.set_loop(id, 255, true).expect("max loop count");
    s.set_speed(id, 255).expect("speed before start");
    s.advance(FrameTime::new(0.01));
    assert!(matches!(s.set_speed(id, 1), Err(TweenError::TimingLocked(_))));
}

#[test]
/// it should retarget a running vector tween
fn set_to_retargets() {
    let mut s = Scheduler::default();
    let id = move_x(&mut s, 1, 10.0, 1.0);
    s.set_to(id, TweenValue::Vec3([20.0, 0.0, 0.0])).expect("set_to");
    let out = s.advance(FrameTime::new(0.5));
    approx(last_x(&out.changes, id).expect("change"), 10.0, 1e-5);
}

#[test]
/// it should release storage on shutdown and stay usable afterwards
fn shutdown_releases_storage() {
    let mut s = Scheduler::default();
    let fired = Rc::new(Cell::new(false));
    let id = move_x(&mut s, 1, 1.0, 1.0);
    let f = fired.clone();
    s.on_final(id, move |_, _| f.set(true)).expect("on_final");
    s.shutdown();
    assert_eq!(s.capacity(), 0);
    assert_eq!(s.active_count(), 0);
    assert!(!fired.get());
    assert!(s.slot(id).is_none());

    let next = move_x(&mut s, 2, 1.0, 1.0);
    assert_ne!(next, id);
    assert_eq!(s.capacity(), Config::default().initial_capacity);
    let out = s.advance(FrameTime::new(0.5));
    assert!(last_x(&out.changes, next).is_some());
}

#[test]
/// it should record the event order: update first, then loop and completion events
fn event_order_per_frame() {
    let mut s = Scheduler::default();
    let id = move_x(&mut s, 1, 1.0, 1.0);
    s.set_loop(id, 2, false).expect("loop");
    s.set_complete_repeat_notify(id, true).expect("notify");

    let log: Rc<RefCell<Vec<EventKind>>> = Rc::default();
    for kind in [
        EventKind::Update,
        EventKind::Complete,
        EventKind::LoopCycle,
        EventKind::Final,
    ] {
        let l = log.clone();
        let record = move |_: &mut Scheduler, e: &vizij_tween_core::TweenEvent| {
            l.borrow_mut().push(e.kind)
        };
        match kind {
            EventKind::Update => s.on_update(id, record),
            EventKind::Complete => s.on_complete(id, record),
            EventKind::LoopCycle => s.on_loop(id, record),
            EventKind::Final => s.on_final(id, record),
        }
        .expect("register");
    }

    s.advance(FrameTime::new(1.0));
    s.advance(FrameTime::new(1.0));
    assert_eq!(
        *log.borrow(),
        vec![
            EventKind::Update,
            EventKind::Complete,
            EventKind::LoopCycle,
            EventKind::Update,
            EventKind::Complete,
            EventKind::Final,
        ]
    );
}
