use crate::gesture::types::{OriginToken, PressSignal, SourceKind};

/// Inbound interaction event as delivered by the platform input layer.
pub trait InteractionEvent {
    fn t_ms(&self) -> u64;
    fn origin(&self) -> OriginToken;
    fn source(&self) -> SourceKind;
    fn is_primary(&self) -> bool;
    fn stop_propagation(&mut self);
    fn prevent_default(&mut self);

    fn signal(&self) -> PressSignal {
        PressSignal {
            t_ms: self.t_ms(),
            origin: self.origin(),
            source: self.source(),
            primary: self.is_primary(),
        }
    }
}

/// Plain event value; records which suppression calls the classifier made.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PressEvent {
    pub signal: PressSignal,
    pub propagation_stopped: bool,
    pub default_prevented: bool,
}

impl PressEvent {
    pub const fn new(signal: PressSignal) -> Self {
        Self {
            signal,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// `identifier` is the platform touch id; only the first finger down is primary.
    pub const fn touch(t_ms: u64, identifier: u32, primary: bool) -> Self {
        Self::new(PressSignal {
            t_ms,
            origin: OriginToken(identifier),
            source: SourceKind::Touch,
            primary,
        })
    }

    /// Only the main button (`0`) drives the classifier.
    pub const fn mouse(t_ms: u64, button: u8) -> Self {
        Self::new(PressSignal {
            t_ms,
            origin: OriginToken(0),
            source: SourceKind::Mouse,
            primary: button == 0,
        })
    }

    pub const fn pointer(t_ms: u64, pointer_id: u32, is_primary: bool) -> Self {
        Self::new(PressSignal {
            t_ms,
            origin: OriginToken(pointer_id),
            source: SourceKind::Pointer,
            primary: is_primary,
        })
    }
}

impl InteractionEvent for PressEvent {
    fn t_ms(&self) -> u64 {
        self.signal.t_ms
    }

    fn origin(&self) -> OriginToken {
        self.signal.origin
    }

    fn source(&self) -> SourceKind {
        self.signal.source
    }

    fn is_primary(&self) -> bool {
        self.signal.primary
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn signal(&self) -> PressSignal {
        self.signal
    }
}
