use super::*;
use crate::gesture::types::OriginToken;

fn cfg() -> AdmissionConfig {
    AdmissionConfig {
        emulated_mouse_window_ms: 700,
        duplicate_release_window_ms: 120,
    }
}

fn signal(t_ms: u64, source: SourceKind) -> PressSignal {
    PressSignal {
        t_ms,
        origin: OriginToken(1),
        source,
        primary: true,
    }
}

#[test]
fn secondary_contact_is_rejected_first() {
    let mut filter = AdmissionFilter::new(cfg());
    let mut second_finger = signal(0, SourceKind::Touch);
    second_finger.primary = false;

    assert_eq!(
        filter.admit(PressPhase::Start, &second_finger),
        Err(RejectReason::SecondaryContact)
    );
}

#[test]
fn mouse_inside_touch_window_is_emulated() {
    let mut filter = AdmissionFilter::new(cfg());
    assert_eq!(filter.admit(PressPhase::Start, &signal(0, SourceKind::Touch)), Ok(()));

    assert_eq!(
        filter.admit(PressPhase::Start, &signal(699, SourceKind::Mouse)),
        Err(RejectReason::EmulatedMouse)
    );
    assert_eq!(filter.admit(PressPhase::Start, &signal(700, SourceKind::Mouse)), Ok(()));
}

#[test]
fn rejected_touch_still_refreshes_emulation_window() {
    let mut filter = AdmissionFilter::new(cfg());
    let mut second_finger = signal(500, SourceKind::Touch);
    second_finger.primary = false;
    let _ = filter.admit(PressPhase::Start, &second_finger);

    assert_eq!(
        filter.admit(PressPhase::End, &signal(1_000, SourceKind::Mouse)),
        Err(RejectReason::EmulatedMouse)
    );
}

#[test]
fn pointer_events_are_never_treated_as_emulation() {
    let mut filter = AdmissionFilter::new(cfg());
    let _ = filter.admit(PressPhase::Start, &signal(0, SourceKind::Touch));
    assert_eq!(filter.admit(PressPhase::Start, &signal(10, SourceKind::Pointer)), Ok(()));
}

#[test]
fn same_kind_release_inside_window_is_duplicate() {
    let mut filter = AdmissionFilter::new(cfg());
    filter.release_accepted(&signal(50, SourceKind::Mouse));

    assert_eq!(
        filter.admit(PressPhase::End, &signal(60, SourceKind::Mouse)),
        Err(RejectReason::DuplicateRelease)
    );
    assert_eq!(filter.admit(PressPhase::End, &signal(170, SourceKind::Mouse)), Ok(()));
    assert_eq!(filter.admit(PressPhase::End, &signal(60, SourceKind::Pointer)), Ok(()));
}

#[test]
fn duplicate_guard_only_applies_to_releases() {
    let mut filter = AdmissionFilter::new(cfg());
    filter.release_accepted(&signal(50, SourceKind::Mouse));
    assert_eq!(filter.admit(PressPhase::Start, &signal(60, SourceKind::Mouse)), Ok(()));
    assert_eq!(filter.admit(PressPhase::Abort, &signal(61, SourceKind::Mouse)), Ok(()));
}

#[test]
fn new_session_clears_duplicate_record() {
    let mut filter = AdmissionFilter::new(cfg());
    filter.release_accepted(&signal(50, SourceKind::Touch));
    filter.session_opened();
    assert_eq!(filter.admit(PressPhase::End, &signal(100, SourceKind::Touch)), Ok(()));
}
