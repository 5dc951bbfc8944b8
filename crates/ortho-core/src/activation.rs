//! Process-wide on/off switch gating automatic correction.

use std::sync::atomic::{AtomicBool, Ordering};

/// Whether corrections are currently applied.
///
/// Starts active. Shared between concurrently running handlers, so every
/// access goes through an atomic.
#[derive(Debug)]
pub struct Activation {
    active: AtomicBool,
}

impl Activation {
    pub fn new() -> Self {
        Self {
            active: AtomicBool::new(true),
        }
    }

    pub fn activate(&self) {
        self.active.store(true, Ordering::SeqCst);
    }

    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Default for Activation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_starts_active() {
        assert!(Activation::new().is_active());
        assert!(Activation::default().is_active());
    }

    #[test]
    fn test_deactivate_then_activate() {
        let state = Activation::new();
        state.deactivate();
        assert!(!state.is_active());
        state.activate();
        assert!(state.is_active());
    }

    #[test]
    fn test_repeated_transitions_are_idempotent() {
        let state = Activation::new();
        state.activate();
        state.activate();
        assert!(state.is_active());
        state.deactivate();
        state.deactivate();
        assert!(!state.is_active());
    }

    #[test]
    fn test_reads_do_not_mutate() {
        let state = Activation::new();
        state.deactivate();
        for _ in 0..10 {
            assert!(!state.is_active());
        }
    }

    #[test]
    fn test_shared_across_threads() {
        let state = Arc::new(Activation::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let state = Arc::clone(&state);
                std::thread::spawn(move || {
                    if i % 2 == 0 {
                        state.deactivate();
                    } else {
                        let _ = state.is_active();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert!(!state.is_active());
    }
}
