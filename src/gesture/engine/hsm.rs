use log::{debug, info};
use statig::prelude::*;

use super::{DispatchContext, GestureHsmEvent};
use crate::gesture::{
    config::TimingConfig,
    timers::Deadline,
    types::{
        Gesture, InteractionSession, PressSignal, RejectReason, SessionStateId, TapAccumulator,
    },
};

pub(super) struct GestureHsm {
    timing: TimingConfig,
    session: Option<InteractionSession>,
    taps: TapAccumulator,
    hold_timer: Deadline,
    tap_timer: Deadline,
    state_id: SessionStateId,
}

impl GestureHsm {
    pub(super) fn new(timing: TimingConfig) -> Self {
        Self {
            timing,
            session: None,
            taps: TapAccumulator::default(),
            hold_timer: Deadline::new(),
            tap_timer: Deadline::new(),
            state_id: SessionStateId::Idle,
        }
    }

    pub(super) fn state_id(&self) -> SessionStateId {
        self.state_id
    }

    pub(super) fn session(&self) -> Option<InteractionSession> {
        self.session
    }

    pub(super) fn pending_taps(&self) -> u8 {
        self.taps.pending_count
    }

    pub(super) fn hold_deadline_ms(&self) -> Option<u64> {
        self.hold_timer.at_ms()
    }

    pub(super) fn tap_deadline_ms(&self) -> Option<u64> {
        self.tap_timer.at_ms()
    }

    pub(super) fn next_deadline_ms(&self) -> Option<u64> {
        match (self.hold_timer.at_ms(), self.tap_timer.at_ms()) {
            (Some(hold), Some(tap)) => Some(hold.min(tap)),
            (hold, tap) => hold.or(tap),
        }
    }

    fn enter(&mut self, state_id: SessionStateId, state: State) -> Outcome<State> {
        self.state_id = state_id;
        Transition(state)
    }

    fn owns(&self, signal: &PressSignal) -> bool {
        self.session
            .is_some_and(|session| session.origin == signal.origin)
    }

    fn open_session(&mut self, context: &mut DispatchContext, signal: &PressSignal) {
        self.session = Some(InteractionSession {
            origin: signal.origin,
            source: signal.source,
            start_ms: signal.t_ms,
            holding: false,
        });
        self.hold_timer.arm(signal.t_ms, self.timing.hold_ms);
        context.session_opened = true;
    }

    fn close_session(&mut self) -> Option<InteractionSession> {
        self.hold_timer.cancel();
        self.session.take()
    }

    fn expire_tap_timer(&mut self, context: &mut DispatchContext, now_ms: u64) {
        if let Some(at_ms) = self.tap_timer.take_expired(now_ms) {
            self.taps.clear();
            info!("gesture: tap t_ms={}", at_ms);
            context.emit(Gesture::Tap);
        }
    }

    /// Returns true when the hold timer fired.
    fn expire_hold_timer(&mut self, context: &mut DispatchContext, now_ms: u64) -> bool {
        let Some(at_ms) = self.hold_timer.take_expired(now_ms) else {
            return false;
        };
        if let Some(session) = self.session.as_mut() {
            session.holding = true;
        }
        info!("gesture: hold t_ms={}", at_ms);
        context.emit(Gesture::Hold);
        true
    }

    /// Counts one completed short press towards Tap / DoubleTap.
    fn register_tap(
        &mut self,
        context: &mut DispatchContext,
        session: InteractionSession,
        release: &PressSignal,
    ) {
        self.taps.pending_count += 1;

        if self.taps.pending_count == 2 {
            let gap_ms = release.t_ms.saturating_sub(self.taps.last_tap_ms);
            if gap_ms < self.timing.min_double_tap_interval_ms {
                self.taps.pending_count = 1;
                debug!(
                    "gesture: spurious second tap gap_ms={} t_ms={}",
                    gap_ms, release.t_ms
                );
                context.reject(RejectReason::SpuriousSecondTap);
                return;
            }

            self.tap_timer.cancel();
            self.taps.clear();
            info!("gesture: double_tap t_ms={}", release.t_ms);
            context.emit(Gesture::DoubleTap);
            return;
        }

        self.taps.last_tap_ms = session.start_ms;
        self.tap_timer
            .arm(release.t_ms, self.timing.double_tap_window_ms);
    }
}

#[state_machine(initial = "State::idle()")]
impl GestureHsm {
    #[state(superstate = "surface")]
    fn idle(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::PressStart(signal) => {
                self.open_session(context, signal);
                self.enter(SessionStateId::Pressed, State::pressed())
            }
            GestureHsmEvent::PressEnd(_) | GestureHsmEvent::PressAbort(_) => {
                context.reject(RejectReason::NoSession);
                Handled
            }
            GestureHsmEvent::Tick { .. } | GestureHsmEvent::Reset => Super,
        }
    }

    #[state(superstate = "surface")]
    fn pressed(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Tick { now_ms } => {
                let hold_first = match (self.hold_timer.at_ms(), self.tap_timer.at_ms()) {
                    (Some(hold), Some(tap)) => hold < tap,
                    _ => true,
                };
                let held = if hold_first {
                    let held = self.expire_hold_timer(context, *now_ms);
                    self.expire_tap_timer(context, *now_ms);
                    held
                } else {
                    self.expire_tap_timer(context, *now_ms);
                    self.expire_hold_timer(context, *now_ms)
                };
                if held {
                    return self.enter(SessionStateId::Holding, State::holding());
                }
                Handled
            }
            GestureHsmEvent::PressStart(_) => {
                context.reject(RejectReason::SessionBusy);
                Handled
            }
            GestureHsmEvent::PressEnd(signal) => {
                if !self.owns(signal) {
                    context.reject(RejectReason::ForeignOrigin);
                    return Handled;
                }
                if let Some(session) = self.close_session() {
                    context.release_accepted = true;
                    self.register_tap(context, session, signal);
                }
                self.enter(SessionStateId::Idle, State::idle())
            }
            GestureHsmEvent::PressAbort(signal) => {
                if !self.owns(signal) {
                    context.reject(RejectReason::ForeignOrigin);
                    return Handled;
                }
                self.close_session();
                debug!("gesture: press aborted t_ms={}", signal.t_ms);
                self.enter(SessionStateId::Idle, State::idle())
            }
            GestureHsmEvent::Reset => Super,
        }
    }

    #[state(superstate = "surface")]
    fn holding(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::PressStart(_) => {
                context.reject(RejectReason::SessionBusy);
                Handled
            }
            GestureHsmEvent::PressEnd(signal) | GestureHsmEvent::PressAbort(signal) => {
                if !self.owns(signal) {
                    context.reject(RejectReason::ForeignOrigin);
                    return Handled;
                }
                self.close_session();
                if matches!(event, GestureHsmEvent::PressEnd(_)) {
                    context.release_accepted = true;
                }
                self.enter(SessionStateId::Idle, State::idle())
            }
            GestureHsmEvent::Tick { .. } | GestureHsmEvent::Reset => Super,
        }
    }

    #[superstate]
    fn surface(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Tick { now_ms } => {
                self.expire_tap_timer(context, *now_ms);
                Handled
            }
            GestureHsmEvent::Reset => {
                self.hold_timer.cancel();
                self.tap_timer.cancel();
                self.session = None;
                self.taps.clear();
                self.enter(SessionStateId::Idle, State::idle())
            }
            _ => Handled,
        }
    }
}
