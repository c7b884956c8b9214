use core::cell::{Cell, RefCell};

use super::*;
use crate::{event::PressEvent, haptics::HapticError};

#[derive(Default)]
struct RecordingHaptics {
    patterns: std::vec::Vec<&'static [u16]>,
    fail: bool,
}

impl Haptics for RecordingHaptics {
    fn vibrate(&mut self, pattern: HapticPattern) -> Result<(), HapticError> {
        self.patterns.push(pattern.pulses());
        if self.fail {
            Err(HapticError::Busy)
        } else {
            Ok(())
        }
    }
}

fn tap_pair<H: Haptics>(classifier: &mut GestureClassifier<'_, H>) {
    classifier.on_press_start(&mut PressEvent::touch(0, 1, true));
    classifier.on_press_end(&mut PressEvent::touch(50, 1, true));
    classifier.on_press_start(&mut PressEvent::touch(100, 2, true));
    classifier.on_press_end(&mut PressEvent::touch(250, 2, true));
    classifier.tick(2_000);
}

#[test]
fn tap_invokes_callback_with_light_pulse() {
    let taps = Cell::new(0);
    let handlers = GestureHandlers::new().on_tap(|| taps.set(taps.get() + 1));
    let mut classifier =
        GestureClassifier::with_haptics(active_config(), handlers, RecordingHaptics::default());

    classifier.on_press_start(&mut PressEvent::touch(0, 1, true));
    classifier.on_press_end(&mut PressEvent::touch(50, 1, true));
    assert_eq!(classifier.next_deadline_ms(), Some(350));
    classifier.tick(350);

    assert_eq!(taps.get(), 1);
    assert_eq!(classifier.haptics().patterns, std::vec![&[10u16][..]]);
}

#[test]
fn double_tap_uses_distinct_pattern() {
    let log = RefCell::new(std::vec::Vec::new());
    let handlers = GestureHandlers::new()
        .on_tap(|| log.borrow_mut().push("tap"))
        .on_double_tap(|| log.borrow_mut().push("double"));
    let mut classifier =
        GestureClassifier::with_haptics(active_config(), handlers, RecordingHaptics::default());

    tap_pair(&mut classifier);

    assert_eq!(classifier.haptics().patterns, std::vec![&[10u16, 50, 10][..]]);
    drop(classifier);
    assert_eq!(log.into_inner(), std::vec!["double"]);
}

#[test]
fn missing_double_tap_handler_falls_back_to_two_taps() {
    let taps = Cell::new(0);
    let handlers = GestureHandlers::new().on_tap(|| taps.set(taps.get() + 1));
    let mut classifier =
        GestureClassifier::with_haptics(active_config(), handlers, RecordingHaptics::default());

    tap_pair(&mut classifier);

    assert_eq!(taps.get(), 2);
    assert_eq!(
        classifier.haptics().patterns,
        std::vec![&[10u16][..], &[10u16][..]]
    );
}

#[test]
fn hold_invokes_callback_once() {
    let holds = Cell::new(0);
    let taps = Cell::new(0);
    let handlers = GestureHandlers::new()
        .on_tap(|| taps.set(taps.get() + 1))
        .on_hold(|| holds.set(holds.get() + 1));
    let mut classifier =
        GestureClassifier::with_haptics(active_config(), handlers, RecordingHaptics::default());

    classifier.on_press_start(&mut PressEvent::pointer(0, 3, true));
    classifier.tick(1_000);
    classifier.on_press_end(&mut PressEvent::pointer(1_200, 3, true));
    classifier.tick(3_000);

    assert_eq!(holds.get(), 1);
    assert_eq!(taps.get(), 0);
    assert_eq!(classifier.haptics().patterns, std::vec![&[50u16][..]]);
}

#[test]
fn haptic_failure_does_not_block_callbacks() {
    let taps = Cell::new(0);
    let handlers = GestureHandlers::new().on_tap(|| taps.set(taps.get() + 1));
    let haptics = RecordingHaptics {
        fail: true,
        ..RecordingHaptics::default()
    };
    let mut classifier = GestureClassifier::with_haptics(active_config(), handlers, haptics);

    classifier.on_press_start(&mut PressEvent::mouse(0, 0));
    classifier.on_press_end(&mut PressEvent::mouse(50, 0));
    classifier.tick(400);

    assert_eq!(taps.get(), 1);
}

#[test]
fn unbound_handlers_skip_haptics() {
    let mut classifier = GestureClassifier::with_haptics(
        active_config(),
        GestureHandlers::new(),
        RecordingHaptics::default(),
    );

    tap_pair(&mut classifier);
    classifier.on_press_start(&mut PressEvent::touch(3_000, 4, true));
    classifier.tick(4_500);

    assert!(classifier.haptics().patterns.is_empty());
}

#[test]
fn absent_haptics_still_classify() {
    let taps = Cell::new(0);
    let handlers = GestureHandlers::new().on_tap(|| taps.set(taps.get() + 1));
    let mut classifier =
        GestureClassifier::with_haptics(active_config(), handlers, None::<RecordingHaptics>);

    classifier.on_press_start(&mut PressEvent::touch(0, 1, true));
    classifier.on_press_end(&mut PressEvent::touch(50, 1, true));
    classifier.tick(350);

    assert_eq!(taps.get(), 1);
}

#[test]
fn admitted_touch_events_are_suppressed() {
    let mut classifier = GestureClassifier::new(GestureHandlers::new());

    let mut down = PressEvent::touch(0, 1, true);
    classifier.on_press_start(&mut down);
    assert!(down.propagation_stopped);
    assert!(down.default_prevented);

    let mut ghost = PressEvent::mouse(20, 0);
    classifier.on_press_start(&mut ghost);
    assert!(!ghost.propagation_stopped);
    assert!(!ghost.default_prevented);

    let mut cancel = PressEvent::touch(30, 1, true);
    classifier.on_press_abort(&mut cancel);
    assert!(!cancel.default_prevented);
}

#[test]
fn non_primary_mouse_button_is_ignored() {
    let taps = Cell::new(0);
    let handlers = GestureHandlers::new().on_tap(|| taps.set(taps.get() + 1));
    let mut classifier = GestureClassifier::new(handlers);

    let trace = classifier.on_press_start(&mut PressEvent::mouse(0, 2));
    assert_eq!(
        trace.reject_reason,
        crate::gesture::types::RejectReason::SecondaryContact
    );
    classifier.on_press_end(&mut PressEvent::mouse(50, 2));
    classifier.tick(1_000);

    assert_eq!(taps.get(), 0);
}

#[test]
fn teardown_cancels_pending_tap() {
    let taps = Cell::new(0);
    let handlers = GestureHandlers::new().on_tap(|| taps.set(taps.get() + 1));
    let mut classifier = GestureClassifier::new(handlers);

    classifier.on_press_start(&mut PressEvent::touch(0, 1, true));
    classifier.on_press_end(&mut PressEvent::touch(50, 1, true));
    classifier.teardown(100);
    classifier.tick(1_000);

    assert_eq!(taps.get(), 0);
    assert_eq!(classifier.next_deadline_ms(), None);
}
