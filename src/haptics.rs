use core::fmt;

use crate::gesture::types::HapticPattern;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HapticError {
    Unavailable,
    Rejected,
    Busy,
}

impl fmt::Display for HapticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("haptics unavailable"),
            Self::Rejected => f.write_str("vibration pattern rejected"),
            Self::Busy => f.write_str("haptic driver busy"),
        }
    }
}

/// Platform vibration capability. Fire-and-forget: implementations must not block.
pub trait Haptics {
    fn vibrate(&mut self, pattern: HapticPattern) -> Result<(), HapticError>;
}

/// For surfaces without a vibration motor.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn vibrate(&mut self, _pattern: HapticPattern) -> Result<(), HapticError> {
        Ok(())
    }
}

impl<H: Haptics> Haptics for Option<H> {
    fn vibrate(&mut self, pattern: HapticPattern) -> Result<(), HapticError> {
        match self {
            Some(haptics) => haptics.vibrate(pattern),
            None => Err(HapticError::Unavailable),
        }
    }
}
