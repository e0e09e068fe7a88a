//! Host-side lifecycle sequencing for module instances.
//!
//! The boundary contract assumes the host never calls `process` on an
//! unprepared instance; this tracker is where the host upholds that. A bad
//! sequence is trapped here, before anything crosses into the module.

use crate::error::HostError;

/// Lifecycle states of a module instance, as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, no processing buffers allocated yet.
    Unprepared,
    /// `prepare` has run; `process` may be called block-periodically.
    Prepared,
    /// Instance destroyed; nothing may be called.
    Released,
}

/// Tracks the valid call sequence for one instance.
#[derive(Debug)]
pub struct LifecycleTracker {
    state: Lifecycle,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self {
            state: Lifecycle::Unprepared,
        }
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    /// `prepare` is valid from any live state and re-entrant between
    /// playback sessions.
    pub fn on_prepare(&mut self) -> Result<(), HostError> {
        match self.state {
            Lifecycle::Released => Err(HostError::InvalidState("prepare after release")),
            _ => {
                self.state = Lifecycle::Prepared;
                Ok(())
            }
        }
    }

    /// `process` is only valid while prepared.
    pub fn on_process(&self) -> Result<(), HostError> {
        match self.state {
            Lifecycle::Prepared => Ok(()),
            Lifecycle::Unprepared => Err(HostError::InvalidState("process before prepare")),
            Lifecycle::Released => Err(HostError::InvalidState("process after release")),
        }
    }

    /// `release` transitions back to unprepared; a later `prepare` may
    /// start a new session.
    pub fn on_release(&mut self) -> Result<(), HostError> {
        match self.state {
            Lifecycle::Released => Err(HostError::InvalidState("release after release")),
            _ => {
                self.state = Lifecycle::Unprepared;
                Ok(())
            }
        }
    }

    /// Terminal transition taken when the instance is destroyed.
    pub fn retire(&mut self) {
        self.state = Lifecycle::Released;
    }
}

impl Default for LifecycleTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_before_prepare_is_trapped() {
        let tracker = LifecycleTracker::new();
        assert!(matches!(
            tracker.on_process(),
            Err(HostError::InvalidState(_))
        ));
    }

    #[test]
    fn normal_session_sequence() {
        let mut tracker = LifecycleTracker::new();
        tracker.on_prepare().unwrap();
        tracker.on_process().unwrap();
        tracker.on_process().unwrap();
        tracker.on_release().unwrap();
        assert_eq!(tracker.state(), Lifecycle::Unprepared);
    }

    #[test]
    fn prepare_is_reentrant_between_sessions() {
        let mut tracker = LifecycleTracker::new();
        tracker.on_prepare().unwrap();
        tracker.on_release().unwrap();
        tracker.on_prepare().unwrap();
        assert_eq!(tracker.state(), Lifecycle::Prepared);
    }

    #[test]
    fn nothing_is_valid_after_retirement() {
        let mut tracker = LifecycleTracker::new();
        tracker.on_prepare().unwrap();
        tracker.retire();
        assert!(tracker.on_prepare().is_err());
        assert!(tracker.on_process().is_err());
        assert!(tracker.on_release().is_err());
    }
}
