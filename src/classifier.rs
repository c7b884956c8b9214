use alloc::boxed::Box;

use log::debug;

use crate::{
    event::InteractionEvent,
    gesture::{
        config::{active_config, GestureConfig, HapticConfig},
        trace::GestureTraceSample,
        types::{Gesture, HapticPattern, PressPhase},
        GestureEngine, GestureOutput,
    },
    haptics::{Haptics, NoHaptics},
};

type Callback<'a> = Box<dyn FnMut() + 'a>;

/// Callbacks for the three gestures. Any of them may be left unbound.
#[derive(Default)]
pub struct GestureHandlers<'a> {
    pub on_tap: Option<Callback<'a>>,
    pub on_double_tap: Option<Callback<'a>>,
    pub on_hold: Option<Callback<'a>>,
}

impl<'a> GestureHandlers<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_tap(mut self, callback: impl FnMut() + 'a) -> Self {
        self.on_tap = Some(Box::new(callback));
        self
    }

    pub fn on_double_tap(mut self, callback: impl FnMut() + 'a) -> Self {
        self.on_double_tap = Some(Box::new(callback));
        self
    }

    pub fn on_hold(mut self, callback: impl FnMut() + 'a) -> Self {
        self.on_hold = Some(Box::new(callback));
        self
    }
}

/// Binds a [`GestureEngine`] to caller callbacks and a haptic sink.
///
/// Entry points mirror the raw event hooks of a single button surface. Each
/// returns the decision trace for the event; nothing here ever fails.
pub struct GestureClassifier<'a, H: Haptics = NoHaptics> {
    engine: GestureEngine,
    handlers: GestureHandlers<'a>,
    haptics: H,
    patterns: HapticConfig,
}

impl<'a> GestureClassifier<'a, NoHaptics> {
    pub fn new(handlers: GestureHandlers<'a>) -> Self {
        Self::with_haptics(active_config(), handlers, NoHaptics)
    }
}

impl<'a, H: Haptics> GestureClassifier<'a, H> {
    pub fn with_haptics(
        config: &'static GestureConfig,
        handlers: GestureHandlers<'a>,
        haptics: H,
    ) -> Self {
        Self {
            engine: GestureEngine::new(config),
            handlers,
            haptics,
            patterns: config.haptics,
        }
    }

    pub fn on_press_start<E: InteractionEvent + ?Sized>(
        &mut self,
        event: &mut E,
    ) -> GestureTraceSample {
        self.dispatch_event(PressPhase::Start, event)
    }

    pub fn on_press_end<E: InteractionEvent + ?Sized>(
        &mut self,
        event: &mut E,
    ) -> GestureTraceSample {
        self.dispatch_event(PressPhase::End, event)
    }

    /// Platform cancel or the pointer leaving the surface.
    pub fn on_press_abort<E: InteractionEvent + ?Sized>(
        &mut self,
        event: &mut E,
    ) -> GestureTraceSample {
        self.dispatch_event(PressPhase::Abort, event)
    }

    /// Drive from the host loop, at the latest by [`Self::next_deadline_ms`].
    pub fn tick(&mut self, now_ms: u64) -> GestureTraceSample {
        let output = self.engine.tick(now_ms);
        self.deliver(&output);
        output.trace
    }

    /// Cancels both timers. Nothing pending fires afterwards.
    pub fn teardown(&mut self, now_ms: u64) {
        let _ = self.engine.reset(now_ms);
    }

    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.engine.next_deadline_ms()
    }

    pub fn engine(&self) -> &GestureEngine {
        &self.engine
    }

    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    fn dispatch_event<E: InteractionEvent + ?Sized>(
        &mut self,
        phase: PressPhase,
        event: &mut E,
    ) -> GestureTraceSample {
        let output = self.engine.handle(phase, event.signal());
        if output.disposition.stop_propagation {
            event.stop_propagation();
        }
        if output.disposition.prevent_default {
            event.prevent_default();
        }
        self.deliver(&output);
        output.trace
    }

    fn deliver(&mut self, output: &GestureOutput) {
        for gesture in output.gestures.iter() {
            match gesture {
                Gesture::Tap => self.fire_tap(),
                Gesture::DoubleTap => {
                    if self.handlers.on_double_tap.is_some() {
                        self.pulse(self.patterns.double_tap);
                        if let Some(callback) = self.handlers.on_double_tap.as_mut() {
                            callback();
                        }
                    } else {
                        self.fire_tap();
                        self.fire_tap();
                    }
                }
                Gesture::Hold => {
                    if self.handlers.on_hold.is_some() {
                        self.pulse(self.patterns.hold);
                        if let Some(callback) = self.handlers.on_hold.as_mut() {
                            callback();
                        }
                    }
                }
            }
        }
    }

    fn fire_tap(&mut self) {
        if self.handlers.on_tap.is_some() {
            self.pulse(self.patterns.tap);
            if let Some(callback) = self.handlers.on_tap.as_mut() {
                callback();
            }
        }
    }

    fn pulse(&mut self, pattern: HapticPattern) {
        if let Err(err) = self.haptics.vibrate(pattern) {
            debug!("gesture: haptic dropped err={}", err);
        }
    }
}

#[cfg(test)]
mod tests;
