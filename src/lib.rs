//! Single-button gesture classification for the clock face: tap, double-tap and
//! hold, resolved from a noisy stream of touch, mouse and pointer events.

#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod classifier;
pub mod event;
pub mod gesture;
pub mod haptics;

pub use classifier::{GestureClassifier, GestureHandlers};
pub use event::{InteractionEvent, PressEvent};
pub use gesture::{Gesture, GestureEngine, GestureOutput, SourceKind};
pub use haptics::{HapticError, Haptics, NoHaptics};
