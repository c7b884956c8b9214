use crate::gesture::types::{RejectReason, SessionStateId};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GestureTraceSample {
    pub now_ms: u64,
    pub state_id: SessionStateId,
    pub reject_reason: RejectReason,
    pub pending_taps: u8,
    pub hold_deadline_ms: Option<u64>,
    pub tap_deadline_ms: Option<u64>,
}
