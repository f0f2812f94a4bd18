//! The session state machine.
//!
//! Transitions live in one pure function so the guard rules are data, not
//! scattered conditionals. The one non-obvious row: a `Failure` observed
//! while `Connected` is suppressed. Once media is flowing, a spurious
//! transport callback must not override a healthy call, so only `Stop`
//! leaves `Connected`.

/// Public lifecycle state of the interview session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    Connecting,
    Connected,
    Error,
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::Idle
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StateEvent {
    Start,
    HandshakeComplete,
    Failure,
    Stop,
}

pub(crate) fn transition(status: SessionStatus, event: StateEvent) -> SessionStatus {
    use SessionStatus::*;
    use StateEvent::*;

    match (status, event) {
        (Idle, Start) | (Error, Start) => Connecting,
        (Connecting, HandshakeComplete) => Connected,
        (Connecting, Failure) => Error,
        // Suppressed: an established call outranks late error callbacks.
        (Connected, Failure) => Connected,
        (_, Stop) => Idle,
        (current, _) => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SessionStatus::*;
    use StateEvent::*;

    #[test]
    fn start_leaves_idle_and_error_only() {
        assert_eq!(transition(Idle, Start), Connecting);
        assert_eq!(transition(Error, Start), Connecting);
        assert_eq!(transition(Connecting, Start), Connecting);
        assert_eq!(transition(Connected, Start), Connected);
    }

    #[test]
    fn handshake_completion_requires_connecting() {
        assert_eq!(transition(Connecting, HandshakeComplete), Connected);
        assert_eq!(transition(Idle, HandshakeComplete), Idle);
        assert_eq!(transition(Error, HandshakeComplete), Error);
        // No edge from error back to connected without a fresh start.
        assert_eq!(transition(Connected, HandshakeComplete), Connected);
    }

    #[test]
    fn failure_is_suppressed_once_connected() {
        assert_eq!(transition(Connecting, Failure), Error);
        assert_eq!(transition(Connected, Failure), Connected);
        assert_eq!(transition(Idle, Failure), Idle);
        assert_eq!(transition(Error, Failure), Error);
    }

    #[test]
    fn stop_converges_every_state_to_idle() {
        for status in [Idle, Connecting, Connected, Error] {
            assert_eq!(transition(status, Stop), Idle);
        }
    }

    #[test]
    fn transitions_stay_within_the_defined_states() {
        let states = [Idle, Connecting, Connected, Error];
        let events = [Start, HandshakeComplete, Failure, Stop];
        for status in states {
            for event in events {
                assert!(states.contains(&transition(status, event)));
            }
        }
    }
}
