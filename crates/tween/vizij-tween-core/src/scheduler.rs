//! Scheduler: owns the slot pool and drives every tween once per frame.
//!
//! Methods:
//! - new, allocate_*, set_*, pause/resume/cancel (by id, owner, or all)
//! - on_update/on_complete/on_loop/on_final
//! - advance (step) and update (commands → step), shutdown

use crate::callbacks::{Callback, CallbackRegistry, EventKind, TweenEvent};
use crate::config::Config;
use crate::easing::Ease;
use crate::error::{Result, TweenError};
use crate::ids::{OwnerKey, TargetHandle, TweenId};
use crate::inputs::{FrameTime, Inputs, TweenCommand};
use crate::outputs::{Change, CoreEvent, Outputs};
use crate::pool::{SlotInit, SlotPool};
use crate::scratch::Scratch;
use crate::slot::{OrbitParams, Payload, Slot, SlotFlags, TweenMode};
use crate::step::{self, Outcome};
use crate::value::TweenValue;

/// Events delivered to a slot whose handlers are currently out of the
/// registry (the slot finished from inside one of its own callbacks).
#[derive(Debug)]
struct Dispatch {
    id: TweenId,
    deferred: Vec<TweenEvent>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Finish {
    Completed,
    Cancelled { invoke_on_complete: bool },
}

#[derive(Debug)]
pub struct Scheduler {
    cfg: Config,
    pool: SlotPool,
    callbacks: CallbackRegistry,
    scratch: Scratch,
    outputs: Outputs,
    /// Outputs were handed to the host; the next write starts a fresh batch.
    outputs_delivered: bool,
    frame: u64,
    dispatching: Vec<Dispatch>,
    stepping: bool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Value to write for `slot`'s most recent step. Float tweens only reach callbacks.
fn slot_change(slot: &Slot) -> Option<Change> {
    if slot.mode == TweenMode::Float {
        return None;
    }
    Some(Change {
        tween: slot.id()?,
        owner: slot.owner,
        target: slot.target,
        mode: slot.mode,
        is_local: slot.flags.contains(SlotFlags::IS_LOCAL),
        value: slot.last_value?,
    })
}

fn event_value(slot: &Slot) -> f32 {
    match slot.last_value {
        Some(TweenValue::Float(v)) => v,
        _ => slot.last_tick,
    }
}

fn local_flag(is_local: bool) -> SlotFlags {
    if is_local {
        SlotFlags::IS_LOCAL
    } else {
        SlotFlags::empty()
    }
}

impl Scheduler {
    pub fn new(cfg: Config) -> Self {
        Self {
            pool: SlotPool::new(cfg.initial_capacity),
            callbacks: CallbackRegistry::new(),
            scratch: Scratch::new(&cfg),
            outputs: Outputs::default(),
            outputs_delivered: false,
            frame: 0,
            dispatching: Vec::new(),
            stepping: false,
            cfg,
        }
    }

    /// Like [`Self::new`] but rejects an invalid config.
    pub fn try_new(cfg: Config) -> Result<Self> {
        cfg.validate()?;
        Ok(Self::new(cfg))
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn slot(&self, id: TweenId) -> Option<&Slot> {
        self.pool.get(id)
    }

    /// Outputs of the last frame plus anything written since.
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    fn out(&mut self) -> &mut Outputs {
        if self.outputs_delivered {
            self.outputs.clear();
            self.outputs_delivered = false;
        }
        &mut self.outputs
    }

    fn live_mut(&mut self, id: TweenId) -> Result<&mut Slot> {
        self.pool.get_mut(id).ok_or(TweenError::StaleHandle(id))
    }

    fn allocate(&mut self, init: SlotInit) -> TweenId {
        let id = self.pool.allocate(init, self.frame);
        log::trace!("tween {id:?} allocated ({:?}, owner {:?})", init.mode, init.owner);
        id
    }

    // ----- allocation -----

    /// Interpolate a 3-vector property (position, scale, size...).
    #[allow(clippy::too_many_arguments)]
    pub fn allocate_vector(
        &mut self,
        mode: TweenMode,
        from: [f32; 3],
        to: [f32; 3],
        duration: f32,
        is_local: bool,
        owner: OwnerKey,
        target: TargetHandle,
    ) -> Result<TweenId> {
        if !mode.is_vector() {
            return Err(TweenError::NotVectorMode(mode));
        }
        Ok(self.allocate(SlotInit {
            mode,
            payload: Payload::Vector { from, to },
            duration,
            owner,
            target,
            flags: local_flag(is_local),
        }))
    }

    /// Scalar tween whose value is only delivered to `on_tick`.
    pub fn allocate_float<F>(
        &mut self,
        owner: OwnerKey,
        from: f32,
        to: f32,
        duration: f32,
        mut on_tick: F,
    ) -> TweenId
    where
        F: FnMut(&mut Scheduler, f32) + 'static,
    {
        let id = self.allocate(SlotInit {
            mode: TweenMode::Float,
            payload: Payload::Float { from, to },
            duration,
            owner,
            target: TargetHandle::default(),
            flags: SlotFlags::CALLBACK_ASSIGNED,
        });
        self.callbacks.register(
            id,
            EventKind::Update,
            Box::new(move |s: &mut Scheduler, ev: &TweenEvent| on_tick(s, ev.value)),
        );
        id
    }

    /// Rotate `angle` radians about `axis`, starting from `from_rotation`.
    #[allow(clippy::too_many_arguments)]
    pub fn allocate_rotation(
        &mut self,
        owner: OwnerKey,
        target: TargetHandle,
        from_rotation: [f32; 4],
        axis: [f32; 3],
        angle: f32,
        duration: f32,
        is_local: bool,
    ) -> TweenId {
        self.allocate(SlotInit {
            mode: TweenMode::Rotation,
            payload: Payload::Rotation {
                from: from_rotation,
                axis,
                angle,
            },
            duration,
            owner,
            target,
            flags: local_flag(is_local),
        })
    }

    /// Revolve a pose about a pivot.
    pub fn allocate_orbit(
        &mut self,
        owner: OwnerKey,
        target: TargetHandle,
        params: OrbitParams,
        duration: f32,
        is_local: bool,
    ) -> TweenId {
        self.allocate(SlotInit {
            mode: TweenMode::RotateAround,
            payload: Payload::Orbit(params),
            duration,
            owner,
            target,
            flags: local_flag(is_local),
        })
    }

    // ----- setters -----

    pub fn set_ease(&mut self, id: TweenId, ease: Ease) -> Result<()> {
        self.live_mut(id)?.ease = ease;
        Ok(())
    }

    /// Set the easing curve from its one-byte code.
    pub fn set_ease_code(&mut self, id: TweenId, code: u8) -> Result<()> {
        let ease = Ease::try_from(code)?;
        self.set_ease(id, ease)
    }

    /// Run `count` times in total (0 and 1 both mean once); with `ping_pong`
    /// each run goes out and back.
    pub fn set_loop(&mut self, id: TweenId, count: u32, ping_pong: bool) -> Result<()> {
        let count = u8::try_from(count).map_err(|_| TweenError::InvalidLoopCount(count))?;
        let slot = self.live_mut(id)?;
        slot.loop_count = count;
        slot.flags.set(SlotFlags::PING_PONG, ping_pong);
        Ok(())
    }

    /// Loop until cancelled.
    pub fn set_infinite_loop(&mut self, id: TweenId, ping_pong: bool) -> Result<()> {
        let slot = self.live_mut(id)?;
        slot.flags.insert(SlotFlags::INFINITE_LOOP);
        slot.flags.set(SlotFlags::PING_PONG, ping_pong);
        slot.loop_count = slot.loop_count.max(1);
        Ok(())
    }

    /// Switch to speed-based progress (`speed / 3` per second); 0 returns to
    /// duration-based. Only allowed before the first step.
    pub fn set_speed(&mut self, id: TweenId, speed: u32) -> Result<()> {
        let speed = u8::try_from(speed).map_err(|_| TweenError::InvalidSpeed(speed))?;
        let slot = self.live_mut(id)?;
        if slot.started {
            return Err(TweenError::TimingLocked(id));
        }
        slot.speed = speed;
        Ok(())
    }

    /// Advance with the host's unscaled delta.
    pub fn set_unscaled_time(&mut self, id: TweenId, enabled: bool) -> Result<()> {
        self.live_mut(id)?
            .flags
            .set(SlotFlags::UNSCALED_TIME, enabled);
        Ok(())
    }

    /// Fire `Complete` at loop boundaries too, not only at the end.
    pub fn set_complete_repeat_notify(&mut self, id: TweenId, enabled: bool) -> Result<()> {
        self.live_mut(id)?
            .flags
            .set(SlotFlags::COMPLETE_REPEAT_NOTIFY, enabled);
        Ok(())
    }

    /// Retarget a vector or float tween.
    pub fn set_to(&mut self, id: TweenId, value: TweenValue) -> Result<()> {
        let slot = self.live_mut(id)?;
        let mode = slot.mode;
        for payload in std::iter::once(&mut slot.payload).chain(slot.origin.as_mut()) {
            match (payload, value) {
                (Payload::Vector { to, .. }, TweenValue::Vec3(v)) => *to = v,
                (Payload::Float { to, .. }, TweenValue::Float(v)) => *to = v,
                _ => {
                    return Err(TweenError::ModeMismatch {
                        id,
                        actual: mode,
                        expected: "a vector or float tween with a matching value",
                    })
                }
            }
        }
        Ok(())
    }

    // ----- callbacks -----

    fn on(&mut self, id: TweenId, kind: EventKind, callback: Callback) -> Result<()> {
        self.live_mut(id)?
            .flags
            .insert(SlotFlags::CALLBACK_ASSIGNED);
        self.callbacks.register(id, kind, callback);
        Ok(())
    }

    pub fn on_update<F>(&mut self, id: TweenId, f: F) -> Result<()>
    where
        F: FnMut(&mut Scheduler, &TweenEvent) + 'static,
    {
        self.on(id, EventKind::Update, Box::new(f))
    }

    pub fn on_complete<F>(&mut self, id: TweenId, f: F) -> Result<()>
    where
        F: FnMut(&mut Scheduler, &TweenEvent) + 'static,
    {
        self.on(id, EventKind::Complete, Box::new(f))
    }

    pub fn on_loop<F>(&mut self, id: TweenId, f: F) -> Result<()>
    where
        F: FnMut(&mut Scheduler, &TweenEvent) + 'static,
    {
        self.on(id, EventKind::LoopCycle, Box::new(f))
    }

    /// Runs exactly once when the tween goes away, whether it completed or was cancelled.
    pub fn on_final<F>(&mut self, id: TweenId, f: F) -> Result<()>
    where
        F: FnMut(&mut Scheduler, &TweenEvent) + 'static,
    {
        self.on(id, EventKind::Final, Box::new(f))
    }

    // ----- control by id -----

    pub fn pause(&mut self, id: TweenId) -> Result<()> {
        self.live_mut(id)?.flags.insert(SlotFlags::PAUSED);
        Ok(())
    }

    /// Resume a paused tween. With `rebaseline` the remaining motion starts
    /// from the last produced value so there is no visible jump.
    pub fn resume(&mut self, id: TweenId, rebaseline: bool) -> Result<()> {
        let slot = self.live_mut(id)?;
        if !slot.is_paused() {
            return Ok(());
        }
        slot.flags.remove(SlotFlags::PAUSED);
        if rebaseline && slot.started {
            step::rebaseline(slot);
        }
        Ok(())
    }

    /// Stop now: write the end value, fire `Complete` if asked, then `Final`.
    pub fn cancel(&mut self, id: TweenId, invoke_on_complete: bool) -> Result<()> {
        if self.finish(id, Finish::Cancelled { invoke_on_complete }) {
            Ok(())
        } else {
            Err(TweenError::StaleHandle(id))
        }
    }

    pub fn is_running(&self, id: TweenId) -> bool {
        self.pool.get(id).is_some_and(|s| !s.is_paused())
    }

    pub fn is_paused(&self, id: TweenId) -> bool {
        self.pool.get(id).is_some_and(Slot::is_paused)
    }

    // ----- control by owner -----

    /// First live tween of `owner` in pool order.
    pub fn find_owner(&self, owner: OwnerKey) -> Option<TweenId> {
        self.pool.find_owner(owner)
    }

    /// Like [`Self::find_owner`]; a miss yields a free slot (index `-1`).
    pub fn slot_for_owner(&self, owner: OwnerKey) -> &Slot {
        self.pool.slot_for_owner(owner)
    }

    /// Whether `owner` has any live tween, paused or not.
    pub fn is_tweening(&self, owner: OwnerKey) -> bool {
        self.pool.find_owner(owner).is_some()
    }

    pub fn owner_tweens(&self, owner: OwnerKey) -> Vec<TweenId> {
        self.pool.owner_ids(owner).collect()
    }

    pub fn pause_owner(&mut self, owner: OwnerKey) -> usize {
        let ids = self.owner_tweens(owner);
        ids.into_iter().filter(|&id| self.pause(id).is_ok()).count()
    }

    pub fn resume_owner(&mut self, owner: OwnerKey, rebaseline: bool) -> usize {
        let ids = self.owner_tweens(owner);
        ids.into_iter()
            .filter(|&id| self.resume(id, rebaseline).is_ok())
            .count()
    }

    pub fn cancel_owner(&mut self, owner: OwnerKey, invoke_on_complete: bool) -> usize {
        let ids = self.owner_tweens(owner);
        // Callbacks of earlier tweens may cancel later ones; those are skipped.
        ids.into_iter()
            .filter(|&id| self.cancel(id, invoke_on_complete).is_ok())
            .count()
    }

    // ----- global control -----

    pub fn pause_all(&mut self) -> usize {
        let ids: Vec<TweenId> = self.pool.live_ids().collect();
        ids.into_iter().filter(|&id| self.pause(id).is_ok()).count()
    }

    pub fn resume_all(&mut self, rebaseline: bool) -> usize {
        let ids: Vec<TweenId> = self.pool.live_ids().collect();
        ids.into_iter()
            .filter(|&id| self.resume(id, rebaseline).is_ok())
            .count()
    }

    pub fn cancel_all(&mut self, invoke_on_complete: bool) -> usize {
        let ids: Vec<TweenId> = self.pool.live_ids().collect();
        ids.into_iter()
            .filter(|&id| self.cancel(id, invoke_on_complete).is_ok())
            .count()
    }

    // ----- frame driving -----

    fn apply_inputs(&mut self, inputs: Inputs) {
        for cmd in inputs.commands {
            let res = match cmd {
                TweenCommand::Pause { id } => self.pause(id),
                TweenCommand::Resume { id, rebaseline } => self.resume(id, rebaseline),
                TweenCommand::Cancel {
                    id,
                    invoke_on_complete,
                } => self.cancel(id, invoke_on_complete),
                TweenCommand::PauseOwner { owner } => {
                    self.pause_owner(owner);
                    Ok(())
                }
                TweenCommand::ResumeOwner { owner, rebaseline } => {
                    self.resume_owner(owner, rebaseline);
                    Ok(())
                }
                TweenCommand::CancelOwner {
                    owner,
                    invoke_on_complete,
                } => {
                    self.cancel_owner(owner, invoke_on_complete);
                    Ok(())
                }
                TweenCommand::PauseAll => {
                    self.pause_all();
                    Ok(())
                }
                TweenCommand::ResumeAll => {
                    self.resume_all(false);
                    Ok(())
                }
                TweenCommand::CancelAll { invoke_on_complete } => {
                    self.cancel_all(invoke_on_complete);
                    Ok(())
                }
                TweenCommand::SetEase { id, ease } => self.set_ease(id, ease),
                TweenCommand::SetLoop {
                    id,
                    count,
                    ping_pong,
                } => self.set_loop(id, count, ping_pong),
                TweenCommand::SetSpeed { id, speed } => self.set_speed(id, speed),
                TweenCommand::SetUnscaledTime { id, enabled } => {
                    self.set_unscaled_time(id, enabled)
                }
            };
            if let Err(e) = res {
                log::warn!("tween command rejected: {e}");
                self.out().push_event(CoreEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }

    /// Step every eligible tween once. Call exactly once per frame.
    pub fn advance(&mut self, time: FrameTime) -> &Outputs {
        if self.stepping {
            log::warn!("advance called from inside a tween callback; ignored");
            return &self.outputs;
        }
        self.out();
        self.step_frame(time);
        self.outputs_delivered = true;
        &self.outputs
    }

    /// Apply `inputs` in order, then step the frame.
    pub fn update(&mut self, time: FrameTime, inputs: Inputs) -> &Outputs {
        if self.stepping {
            log::warn!("update called from inside a tween callback; ignored");
            return &self.outputs;
        }
        self.out();
        self.apply_inputs(inputs);
        self.step_frame(time);
        self.outputs_delivered = true;
        &self.outputs
    }

    fn step_frame(&mut self, time: FrameTime) {
        let time = time.clamped(self.cfg.max_delta);
        self.frame += 1;
        let frame = self.frame;

        // Snapshot first: tweens allocated by callbacks wait for the next frame.
        self.scratch.begin_frame();
        let pool = &self.pool;
        self.scratch.eligible.extend(
            pool.active()
                .eligible(frame)
                .filter_map(|e| pool.slot_at(e.index).and_then(Slot::id)),
        );

        self.stepping = true;
        for i in 0..self.scratch.eligible.len() {
            let id = self.scratch.eligible[i];
            self.step_slot(id, &time);
        }
        self.stepping = false;

        if self.cfg.shrink_when_idle && self.pool.shrink_to_floor() {
            self.callbacks.clear();
        }
    }

    fn step_slot(&mut self, id: TweenId, time: &FrameTime) {
        let (result, change, owner) = {
            // Freed or reused earlier this frame.
            let Some(slot) = self.pool.get_mut(id) else {
                return;
            };
            if slot.is_paused() {
                return;
            }
            let result = step::step(slot, time);
            (result, slot_change(slot), slot.owner)
        };
        if let Some(change) = change {
            self.out().push_change(change);
        }
        let value = result.event_value();
        self.dispatch(id, EventKind::Update, value);

        let Some(loop_counter) = self.pool.get(id).map(Slot::loop_counter) else {
            // Cancelled from its own update handler.
            return;
        };
        match result.outcome {
            Outcome::Running => {}
            Outcome::LoopBoundary { notify_complete } => {
                self.out().push_event(CoreEvent::LoopCompleted {
                    tween: id,
                    owner,
                    loop_counter,
                });
                if notify_complete {
                    self.dispatch(id, EventKind::Complete, value);
                }
                self.dispatch(id, EventKind::LoopCycle, value);
            }
            Outcome::Finished => {
                self.finish(id, Finish::Completed);
            }
        }
    }

    /// Invoke the handlers of `id` for one event. Handlers are out of the
    /// registry while they run and go back only if the tween survived.
    fn dispatch(&mut self, id: TweenId, kind: EventKind, value: f32) {
        let owner = match self.pool.get(id) {
            Some(slot) if slot.flags.contains(SlotFlags::CALLBACK_ASSIGNED) => slot.owner,
            _ => return,
        };
        let Some(mut handlers) = self.callbacks.take(id) else {
            return;
        };
        let event = TweenEvent {
            id,
            owner,
            kind,
            value,
        };
        self.dispatching.push(Dispatch {
            id,
            deferred: Vec::new(),
        });
        handlers.invoke(self, &event);
        let deferred = self
            .dispatching
            .pop()
            .map(|d| d.deferred)
            .unwrap_or_default();
        for ev in &deferred {
            handlers.invoke(self, ev);
        }
        if self.pool.get(id).is_some() {
            self.callbacks.restore(id, handlers);
        }
    }

    /// Free `id` and deliver its terminal events. Returns `false` for stale handles.
    fn finish(&mut self, id: TweenId, how: Finish) -> bool {
        let (owner, value, has_callbacks, change) = {
            let Some(slot) = self.pool.get_mut(id) else {
                return false;
            };
            let change = if matches!(how, Finish::Cancelled { .. }) {
                step::snap_to_boundary(slot);
                slot_change(slot)
            } else {
                // Already written by the step that ended it.
                None
            };
            (
                slot.owner,
                event_value(slot),
                slot.flags.contains(SlotFlags::CALLBACK_ASSIGNED),
                change,
            )
        };
        if let Some(change) = change {
            self.out().push_change(change);
        }

        // Free before notifying so chained tweens can reuse the slot.
        self.pool.free(id.index);
        let handlers = self.callbacks.take(id);
        self.callbacks.detach(id.index);

        let (event, fire_complete) = match how {
            Finish::Completed => (CoreEvent::Completed { tween: id, owner }, true),
            Finish::Cancelled { invoke_on_complete } => (
                CoreEvent::Cancelled { tween: id, owner },
                invoke_on_complete,
            ),
        };
        log::trace!("tween {id:?} finished: {how:?}");
        self.out().push_event(event);

        if !has_callbacks {
            return true;
        }
        let complete = TweenEvent {
            id,
            owner,
            kind: EventKind::Complete,
            value,
        };
        let last = TweenEvent {
            kind: EventKind::Final,
            ..complete
        };
        match handlers {
            Some(mut handlers) => {
                if fire_complete {
                    handlers.invoke(self, &complete);
                }
                handlers.invoke(self, &last);
            }
            None => {
                // Finished from inside its own callback: deliver after it returns.
                if let Some(d) = self.dispatching.iter_mut().rev().find(|d| d.id == id) {
                    if fire_complete {
                        d.deferred.push(complete);
                    }
                    d.deferred.push(last);
                }
            }
        }
        true
    }

    /// Drop every tween and release storage. No callbacks run. The scheduler
    /// stays usable and regrows on the next allocation.
    pub fn shutdown(&mut self) {
        let live = self.pool.active_count();
        self.callbacks.clear();
        self.pool.release();
        self.scratch = Scratch::default();
        self.outputs = Outputs::default();
        self.outputs_delivered = false;
        self.dispatching.clear();
        log::debug!("tween scheduler shut down ({live} live tweens dropped)");
    }
}
