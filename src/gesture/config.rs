use super::types::HapticPattern;

#[derive(Clone, Copy, Debug)]
pub struct TimingConfig {
    pub hold_ms: u64,
    pub double_tap_window_ms: u64,
    pub min_double_tap_interval_ms: u64,
}

#[derive(Clone, Copy, Debug)]
pub struct AdmissionConfig {
    pub emulated_mouse_window_ms: u64,
    pub duplicate_release_window_ms: u64,
}

#[derive(Clone, Copy, Debug)]
pub struct HapticConfig {
    pub tap: HapticPattern,
    pub double_tap: HapticPattern,
    pub hold: HapticPattern,
}

#[derive(Clone, Copy, Debug)]
pub struct GestureConfig {
    pub timing: TimingConfig,
    pub admission: AdmissionConfig,
    pub haptics: HapticConfig,
}

include!(concat!(env!("OUT_DIR"), "/gesture_config.rs"));

pub fn active_config() -> &'static GestureConfig {
    &GESTURE_CONFIG
}
