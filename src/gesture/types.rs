/// Which event backend reported an interaction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum SourceKind {
    Touch = 1,
    Mouse = 2,
    Pointer = 3,
}

impl SourceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Touch => "touch",
            Self::Mouse => "mouse",
            Self::Pointer => "pointer",
        }
    }
}

/// Identifies one physical contact (finger, mouse, stylus) for the lifetime of a press.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct OriginToken(pub u32);

/// Timestamped, tagged view of an inbound interaction event.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PressSignal {
    pub t_ms: u64,
    pub origin: OriginToken,
    pub source: SourceKind,
    pub primary: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PressPhase {
    Start,
    End,
    Abort,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Gesture {
    Tap = 1,
    DoubleTap = 2,
    Hold = 3,
}

impl Gesture {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::DoubleTap => "double_tap",
            Self::Hold => "hold",
        }
    }
}

/// Vibration pattern in milliseconds, alternating on/off starting with on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HapticPattern(pub &'static [u16]);

impl HapticPattern {
    pub const fn pulses(&self) -> &'static [u16] {
        self.0
    }
}

/// What the host should do with the inbound event after classification.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EventDisposition {
    pub stop_propagation: bool,
    pub prevent_default: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum RejectReason {
    #[default]
    None = 0,
    SecondaryContact = 1,
    EmulatedMouse = 2,
    DuplicateRelease = 3,
    SessionBusy = 4,
    NoSession = 5,
    ForeignOrigin = 6,
    SpuriousSecondTap = 7,
}

impl RejectReason {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::SecondaryContact => "secondary_contact",
            Self::EmulatedMouse => "emulated_mouse",
            Self::DuplicateRelease => "duplicate_release",
            Self::SessionBusy => "session_busy",
            Self::NoSession => "no_session",
            Self::ForeignOrigin => "foreign_origin",
            Self::SpuriousSecondTap => "spurious_second_tap",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(u8)]
pub enum SessionStateId {
    #[default]
    Idle = 0,
    Pressed = 1,
    Holding = 2,
}

impl SessionStateId {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// One physical press-to-release cycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InteractionSession {
    pub origin: OriginToken,
    pub source: SourceKind,
    pub start_ms: u64,
    pub holding: bool,
}

/// Short presses waiting to resolve into a Tap or DoubleTap.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TapAccumulator {
    pub pending_count: u8,
    /// Press-start time of the first pending tap.
    pub last_tap_ms: u64,
}

impl TapAccumulator {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub const MAX_GESTURES_PER_STEP: usize = 4;

pub type GestureBuffer = heapless::Vec<Gesture, MAX_GESTURES_PER_STEP>;
