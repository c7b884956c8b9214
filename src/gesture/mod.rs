pub mod admission;
pub mod config;
pub mod engine;
pub mod timers;
pub mod trace;
pub mod types;

pub use engine::{GestureEngine, GestureOutput};
pub use trace::GestureTraceSample;
pub use types::{
    EventDisposition, Gesture, HapticPattern, OriginToken, PressPhase, PressSignal, RejectReason,
    SessionStateId, SourceKind,
};
