use std::sync::atomic::{AtomicU8, Ordering};

/// Index lifecycle state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[repr(u8)]
pub enum IndexState {
    Uninitialized = 0,
    Loading = 1,
    Ready = 2,
    Error = 3,
}

impl IndexState {
    pub fn load(atomic: &AtomicU8) -> Self {
        match atomic.load(Ordering::Acquire) {
            1 => Self::Loading,
            2 => Self::Ready,
            3 => Self::Error,
            _ => Self::Uninitialized,
        }
    }

    pub fn store(self, atomic: &AtomicU8) {
        atomic.store(self as u8, Ordering::Release);
    }

    /// Moves to `Loading` unless a load is already running. Returns whether
    /// the caller now owns the load.
    pub fn begin_loading(atomic: &AtomicU8) -> bool {
        atomic
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (current != Self::Loading as u8).then_some(Self::Loading as u8)
            })
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_atomic() {
        let atomic = AtomicU8::new(0);
        assert_eq!(IndexState::load(&atomic), IndexState::Uninitialized);
        for state in [IndexState::Loading, IndexState::Ready, IndexState::Error] {
            state.store(&atomic);
            assert_eq!(IndexState::load(&atomic), state);
        }
    }

    #[test]
    fn only_one_caller_begins_loading() {
        let atomic = AtomicU8::new(IndexState::Ready as u8);
        assert!(IndexState::begin_loading(&atomic));
        assert!(!IndexState::begin_loading(&atomic));
        assert_eq!(IndexState::load(&atomic), IndexState::Loading);

        IndexState::Error.store(&atomic);
        assert!(IndexState::begin_loading(&atomic));
    }
}
