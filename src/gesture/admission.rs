use super::{
    config::AdmissionConfig,
    types::{PressPhase, PressSignal, RejectReason, SourceKind},
};

/// Remembers the last touch-origin event so compatibility mouse events can be dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmulationGuard {
    last_touch_ms: Option<u64>,
}

impl EmulationGuard {
    pub fn observe(&mut self, signal: &PressSignal) {
        if signal.source == SourceKind::Touch {
            self.last_touch_ms = Some(signal.t_ms);
        }
    }

    pub fn last_touch_ms(&self) -> Option<u64> {
        self.last_touch_ms
    }

    fn is_emulated(&self, signal: &PressSignal, window_ms: u64) -> bool {
        signal.source == SourceKind::Mouse
            && self
                .last_touch_ms
                .is_some_and(|last| signal.t_ms.saturating_sub(last) < window_ms)
    }
}

/// Last release that closed a session, used to drop redundant reports of it.
#[derive(Clone, Copy, Debug, Default)]
pub struct DuplicateGuard {
    last_release: Option<(u64, SourceKind)>,
}

impl DuplicateGuard {
    pub fn record(&mut self, signal: &PressSignal) {
        self.last_release = Some((signal.t_ms, signal.source));
    }

    pub fn clear(&mut self) {
        self.last_release = None;
    }

    fn is_duplicate(&self, signal: &PressSignal, window_ms: u64) -> bool {
        self.last_release.is_some_and(|(t_ms, source)| {
            source == signal.source && signal.t_ms.saturating_sub(t_ms) < window_ms
        })
    }
}

type Guard = fn(&AdmissionFilter, PressPhase, &PressSignal) -> Result<(), RejectReason>;

/// Evaluated in order; the first failing guard decides the rejection.
const PIPELINE: [Guard; 3] = [primary_contact, emulated_mouse, duplicate_release];

fn primary_contact(
    _filter: &AdmissionFilter,
    _phase: PressPhase,
    signal: &PressSignal,
) -> Result<(), RejectReason> {
    if signal.primary {
        Ok(())
    } else {
        Err(RejectReason::SecondaryContact)
    }
}

fn emulated_mouse(
    filter: &AdmissionFilter,
    _phase: PressPhase,
    signal: &PressSignal,
) -> Result<(), RejectReason> {
    if filter
        .emulation
        .is_emulated(signal, filter.config.emulated_mouse_window_ms)
    {
        Err(RejectReason::EmulatedMouse)
    } else {
        Ok(())
    }
}

fn duplicate_release(
    filter: &AdmissionFilter,
    phase: PressPhase,
    signal: &PressSignal,
) -> Result<(), RejectReason> {
    if phase == PressPhase::End
        && filter
            .duplicates
            .is_duplicate(signal, filter.config.duplicate_release_window_ms)
    {
        Err(RejectReason::DuplicateRelease)
    } else {
        Ok(())
    }
}

pub struct AdmissionFilter {
    config: AdmissionConfig,
    emulation: EmulationGuard,
    duplicates: DuplicateGuard,
}

impl AdmissionFilter {
    pub fn new(config: AdmissionConfig) -> Self {
        Self {
            config,
            emulation: EmulationGuard::default(),
            duplicates: DuplicateGuard::default(),
        }
    }

    /// Records the event with the emulation guard, then runs the guard pipeline.
    pub fn admit(&mut self, phase: PressPhase, signal: &PressSignal) -> Result<(), RejectReason> {
        self.emulation.observe(signal);
        let filter: &Self = self;
        PIPELINE
            .iter()
            .try_for_each(|guard| guard(filter, phase, signal))
    }

    pub fn session_opened(&mut self) {
        self.duplicates.clear();
    }

    pub fn release_accepted(&mut self, signal: &PressSignal) {
        self.duplicates.record(signal);
    }

    pub fn reset(&mut self) {
        self.emulation = EmulationGuard::default();
        self.duplicates.clear();
    }
}

#[cfg(test)]
mod tests;
