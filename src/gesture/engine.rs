use log::debug;
use statig::blocking::IntoStateMachineExt as _;

mod hsm;

use hsm::GestureHsm;

use super::{
    admission::AdmissionFilter,
    config::{active_config, GestureConfig},
    trace::GestureTraceSample,
    types::{
        EventDisposition, Gesture, GestureBuffer, InteractionSession, PressPhase, PressSignal,
        RejectReason, SessionStateId, SourceKind,
    },
};

#[derive(Clone, Copy, Debug)]
enum GestureHsmEvent {
    Tick { now_ms: u64 },
    PressStart(PressSignal),
    PressEnd(PressSignal),
    PressAbort(PressSignal),
    Reset,
}

#[derive(Default)]
struct DispatchContext {
    gestures: GestureBuffer,
    reject_reason: RejectReason,
    session_opened: bool,
    release_accepted: bool,
}

impl DispatchContext {
    fn emit(&mut self, gesture: Gesture) {
        // Capacity exceeds what one step can resolve.
        let _ = self.gestures.push(gesture);
    }

    fn reject(&mut self, reason: RejectReason) {
        self.reject_reason = reason;
    }
}

#[derive(Clone, Debug, Default)]
pub struct GestureOutput {
    pub gestures: GestureBuffer,
    pub disposition: EventDisposition,
    pub trace: GestureTraceSample,
}

impl GestureOutput {
    pub fn contains(&self, gesture: Gesture) -> bool {
        self.gestures.contains(&gesture)
    }

    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }
}

/// Tap / double-tap / hold classifier for one pointing surface.
///
/// A pure reducer: it never reads a clock. Every call carries the current time,
/// and timers armed by earlier calls fire from the next call whose timestamp
/// reaches them, before that call's own event is applied.
pub struct GestureEngine {
    admission: AdmissionFilter,
    machine: statig::blocking::StateMachine<GestureHsm>,
    now_ms: u64,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new(active_config())
    }
}

impl GestureEngine {
    pub fn new(config: &'static GestureConfig) -> Self {
        Self {
            admission: AdmissionFilter::new(config.admission),
            machine: GestureHsm::new(config.timing).state_machine(),
            now_ms: 0,
        }
    }

    pub fn press_start(&mut self, signal: PressSignal) -> GestureOutput {
        self.handle_press(PressPhase::Start, signal)
    }

    pub fn press_end(&mut self, signal: PressSignal) -> GestureOutput {
        self.handle_press(PressPhase::End, signal)
    }

    pub fn press_abort(&mut self, signal: PressSignal) -> GestureOutput {
        self.handle_press(PressPhase::Abort, signal)
    }

    pub fn handle(&mut self, phase: PressPhase, signal: PressSignal) -> GestureOutput {
        self.handle_press(phase, signal)
    }

    /// Fires every timer due at or before `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> GestureOutput {
        let mut context = DispatchContext::default();
        self.advance(now_ms, &mut context);
        self.finish(context, EventDisposition::default())
    }

    /// Teardown: cancels both timers and drops any session and pending taps
    /// without resolving them.
    pub fn reset(&mut self, now_ms: u64) -> GestureOutput {
        self.now_ms = self.now_ms.max(now_ms);
        let mut context = DispatchContext::default();
        self.machine
            .handle_with_context(&GestureHsmEvent::Reset, &mut context);
        self.admission.reset();
        self.finish(context, EventDisposition::default())
    }

    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.machine.inner().next_deadline_ms()
    }

    pub fn pending_taps(&self) -> u8 {
        self.machine.inner().pending_taps()
    }

    pub fn session(&self) -> Option<InteractionSession> {
        self.machine.inner().session()
    }

    pub fn state_id(&self) -> SessionStateId {
        self.machine.inner().state_id()
    }

    fn advance(&mut self, now_ms: u64, context: &mut DispatchContext) -> u64 {
        let now_ms = self.now_ms.max(now_ms);
        self.now_ms = now_ms;
        self.machine
            .handle_with_context(&GestureHsmEvent::Tick { now_ms }, context);
        now_ms
    }

    fn handle_press(&mut self, phase: PressPhase, mut signal: PressSignal) -> GestureOutput {
        let mut context = DispatchContext::default();
        signal.t_ms = self.advance(signal.t_ms, &mut context);

        if let Err(reason) = self.admission.admit(phase, &signal) {
            debug!(
                "gesture: drop {:?} src={} origin={} t_ms={} reason={}",
                phase,
                signal.source.as_str(),
                signal.origin.0,
                signal.t_ms,
                reason.as_str()
            );
            context.reject(reason);
            return self.finish(context, EventDisposition::default());
        }

        let event = match phase {
            PressPhase::Start => GestureHsmEvent::PressStart(signal),
            PressPhase::End => GestureHsmEvent::PressEnd(signal),
            PressPhase::Abort => GestureHsmEvent::PressAbort(signal),
        };
        self.machine.handle_with_context(&event, &mut context);

        if context.session_opened {
            self.admission.session_opened();
        }
        if context.release_accepted {
            self.admission.release_accepted(&signal);
        }

        let disposition = match phase {
            PressPhase::Start | PressPhase::End => EventDisposition {
                stop_propagation: true,
                prevent_default: signal.source == SourceKind::Touch,
            },
            PressPhase::Abort => EventDisposition::default(),
        };
        self.finish(context, disposition)
    }

    fn finish(&self, context: DispatchContext, disposition: EventDisposition) -> GestureOutput {
        let hsm = self.machine.inner();
        GestureOutput {
            gestures: context.gestures,
            disposition,
            trace: GestureTraceSample {
                now_ms: self.now_ms,
                state_id: hsm.state_id(),
                reject_reason: context.reject_reason,
                pending_taps: hsm.pending_taps(),
                hold_deadline_ms: hsm.hold_deadline_ms(),
                tap_deadline_ms: hsm.tap_deadline_ms(),
            },
        }
    }
}
