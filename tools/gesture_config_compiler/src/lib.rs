//! Compiles `config/gestures.toml` into the `GESTURE_CONFIG` static consumed by
//! the gesture classifier. Runs from the root `build.rs`, so every error has to
//! carry enough context to be read straight out of a failed cargo build.

use std::{fmt, fs, path::Path};

use serde::Deserialize;

pub const MAX_HAPTIC_PATTERN_LEN: usize = 8;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GesturesFile {
    pub timing: TimingSection,
    pub admission: AdmissionSection,
    pub haptics: HapticsSection,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TimingSection {
    pub hold_ms: u64,
    pub double_tap_window_ms: u64,
    pub min_double_tap_interval_ms: u64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AdmissionSection {
    pub emulated_mouse_window_ms: u64,
    pub duplicate_release_window_ms: u64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HapticsSection {
    pub tap: Vec<u16>,
    pub double_tap: Vec<u16>,
    pub hold: Vec<u16>,
}

#[derive(Debug)]
pub enum ConfigCompilerError {
    Io(String),
    Parse(String),
    Validation(String),
}

impl fmt::Display for ConfigCompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigCompilerError {}

pub fn parse_gestures_str(source: &str) -> Result<GesturesFile, ConfigCompilerError> {
    toml::from_str(source).map_err(|e| ConfigCompilerError::Parse(e.to_string()))
}

pub fn parse_gestures_file(path: &Path) -> Result<GesturesFile, ConfigCompilerError> {
    let source = fs::read_to_string(path)
        .map_err(|e| ConfigCompilerError::Io(format!("{}: {e}", path.display())))?;
    parse_gestures_str(&source)
}

pub fn validate_config(config: &GesturesFile) -> Result<(), ConfigCompilerError> {
    let timing = &config.timing;
    let admission = &config.admission;

    let positive = [
        ("timing.hold_ms", timing.hold_ms),
        ("timing.double_tap_window_ms", timing.double_tap_window_ms),
        (
            "timing.min_double_tap_interval_ms",
            timing.min_double_tap_interval_ms,
        ),
        (
            "admission.emulated_mouse_window_ms",
            admission.emulated_mouse_window_ms,
        ),
        (
            "admission.duplicate_release_window_ms",
            admission.duplicate_release_window_ms,
        ),
    ];
    for (name, value) in positive {
        if value == 0 {
            return Err(ConfigCompilerError::Validation(format!(
                "{name} must be > 0"
            )));
        }
    }

    if timing.min_double_tap_interval_ms >= timing.double_tap_window_ms {
        return Err(ConfigCompilerError::Validation(
            "timing.min_double_tap_interval_ms must be < timing.double_tap_window_ms".into(),
        ));
    }
    if timing.double_tap_window_ms >= timing.hold_ms {
        return Err(ConfigCompilerError::Validation(
            "timing.double_tap_window_ms must be < timing.hold_ms".into(),
        ));
    }

    let patterns = [
        ("haptics.tap", &config.haptics.tap),
        ("haptics.double_tap", &config.haptics.double_tap),
        ("haptics.hold", &config.haptics.hold),
    ];
    for (name, pattern) in patterns {
        if pattern.is_empty() || pattern.len() > MAX_HAPTIC_PATTERN_LEN {
            return Err(ConfigCompilerError::Validation(format!(
                "{name} must contain 1..={MAX_HAPTIC_PATTERN_LEN} entries"
            )));
        }
        if pattern.iter().any(|&ms| ms == 0) {
            return Err(ConfigCompilerError::Validation(format!(
                "{name} entries must be positive durations"
            )));
        }
    }

    Ok(())
}

fn render_pattern(pattern: &[u16]) -> String {
    let items: Vec<String> = pattern.iter().map(u16::to_string).collect();
    format!("HapticPattern(&[{}])", items.join(", "))
}

pub fn render_generated_config(config: &GesturesFile) -> String {
    let timing = &config.timing;
    let admission = &config.admission;
    let haptics = &config.haptics;

    let mut out = String::new();
    out.push_str("// @generated by gesture_config_compiler. Do not edit.\n");
    out.push_str("pub static GESTURE_CONFIG: GestureConfig = GestureConfig {\n");
    out.push_str("    timing: TimingConfig {\n");
    out.push_str(&format!("        hold_ms: {},\n", timing.hold_ms));
    out.push_str(&format!(
        "        double_tap_window_ms: {},\n",
        timing.double_tap_window_ms
    ));
    out.push_str(&format!(
        "        min_double_tap_interval_ms: {},\n",
        timing.min_double_tap_interval_ms
    ));
    out.push_str("    },\n");
    out.push_str("    admission: AdmissionConfig {\n");
    out.push_str(&format!(
        "        emulated_mouse_window_ms: {},\n",
        admission.emulated_mouse_window_ms
    ));
    out.push_str(&format!(
        "        duplicate_release_window_ms: {},\n",
        admission.duplicate_release_window_ms
    ));
    out.push_str("    },\n");
    out.push_str("    haptics: HapticConfig {\n");
    out.push_str(&format!("        tap: {},\n", render_pattern(&haptics.tap)));
    out.push_str(&format!(
        "        double_tap: {},\n",
        render_pattern(&haptics.double_tap)
    ));
    out.push_str(&format!("        hold: {},\n", render_pattern(&haptics.hold)));
    out.push_str("    },\n");
    out.push_str("};\n");
    out
}

pub fn generate_from_path(path: &Path) -> Result<String, ConfigCompilerError> {
    let config = parse_gestures_file(path)?;
    validate_config(&config)?;
    Ok(render_generated_config(&config))
}
