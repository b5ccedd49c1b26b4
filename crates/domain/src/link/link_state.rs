/// Lifecycle state of the broker link as tracked by the sync controller.
///
/// `Ended` is terminal: it is entered on explicit close or process shutdown
/// and never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Not connected, no active connection attempt
    Disconnected,
    /// Waiting for the transport to (re-)establish the connection
    Connecting,
    /// Successfully connected and synchronizing
    Connected,
    /// Shut down, nothing will be processed anymore
    Ended,
}

impl LinkState {
    /// Check if currently connected
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Check if the terminal state was reached
    pub fn is_ended(&self) -> bool {
        matches!(self, Self::Ended)
    }

    /// Transition to connecting state
    pub fn to_connecting(&self) -> Result<Self, &'static str> {
        match self {
            Self::Disconnected | Self::Connecting | Self::Connected => Ok(Self::Connecting),
            Self::Ended => Err("Cannot reconnect an ended link"),
        }
    }

    /// Transition to connected state
    pub fn to_connected(&self) -> Result<Self, &'static str> {
        match self {
            // A fresh handshake while we still believe we are connected is
            // a transport-level reconnect; re-entry is valid.
            Self::Connecting | Self::Connected => Ok(Self::Connected),
            Self::Disconnected => Err("Can only complete connection from Connecting state"),
            Self::Ended => Err("Cannot reconnect an ended link"),
        }
    }

    /// Transition to the terminal state
    pub fn to_ended(&self) -> Self {
        Self::Ended
    }
}

impl Default for LinkState {
    fn default() -> Self {
        Self::Disconnected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_disconnected() {
        let state = LinkState::default();
        assert_eq!(state, LinkState::Disconnected);
        assert!(!state.is_connected());
        assert!(!state.is_ended());
    }

    #[test]
    fn test_transition_disconnected_to_connecting() {
        let next = LinkState::Disconnected.to_connecting().unwrap();
        assert_eq!(next, LinkState::Connecting);
    }

    #[test]
    fn test_transition_connecting_to_connected() {
        let next = LinkState::Connecting.to_connected().unwrap();
        assert_eq!(next, LinkState::Connected);
        assert!(next.is_connected());
    }

    #[test]
    fn test_reconnect_cycle() {
        // Connected -> transport drops -> Connecting -> handshake -> Connected
        let state = LinkState::Connected.to_connecting().unwrap();
        assert_eq!(state, LinkState::Connecting);
        assert_eq!(state.to_connected().unwrap(), LinkState::Connected);
    }

    #[test]
    fn test_reentry_while_connected_is_valid() {
        assert_eq!(
            LinkState::Connected.to_connected().unwrap(),
            LinkState::Connected
        );
    }

    #[test]
    fn test_cannot_connect_from_disconnected() {
        assert!(LinkState::Disconnected.to_connected().is_err());
    }

    #[test]
    fn test_ended_is_terminal() {
        let state = LinkState::Connected.to_ended();
        assert!(state.is_ended());
        assert!(state.to_connecting().is_err());
        assert!(state.to_connected().is_err());
    }
}
