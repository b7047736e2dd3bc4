//! Bluetooth glyph visibility and the disconnect alert

/// Bluetooth link snapshot delivered by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectivityState {
    pub connected: bool,
}

impl ConnectivityState {
    pub const CONNECTED: Self = Self { connected: true };
    pub const DISCONNECTED: Self = Self { connected: false };
}

impl From<bool> for ConnectivityState {
    fn from(connected: bool) -> Self {
        Self { connected }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Vibration pattern requested from the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HapticAlert {
    DoublePulse,
}

impl HapticAlert {
    /// Number of motor pulses in the pattern
    pub fn pulses(self) -> u8 {
        match self {
            Self::DoublePulse => 2,
        }
    }
}

/// When the disconnect alert fires
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertPolicy {
    /// On every disconnected notification, repeated ones included
    #[default]
    EveryDisconnect,
    /// Only when a known connected link goes down
    OnTransition,
}

/// Result of a connectivity event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectivityUpdate {
    pub icon: Visibility,
    pub alert: Option<HapticAlert>,
}

/// Connected/disconnected state machine for one watchface.
///
/// Starts unknown; the first update is the host's startup peek.
#[derive(Clone, Debug)]
pub struct ConnectivityIndicator {
    policy: AlertPolicy,
    state: Option<ConnectivityState>,
}

impl ConnectivityIndicator {
    pub fn new(policy: AlertPolicy) -> Self {
        Self {
            policy,
            state: None,
        }
    }

    /// Last state reported by the host, if any
    pub fn state(&self) -> Option<ConnectivityState> {
        self.state
    }

    pub fn visibility(&self) -> Option<Visibility> {
        self.state.map(visibility)
    }

    pub fn update(&mut self, state: ConnectivityState) -> ConnectivityUpdate {
        let previous = self.state.replace(state);

        let alert = match (state.connected, self.policy) {
            (true, _) => None,
            (false, AlertPolicy::EveryDisconnect) => Some(HapticAlert::DoublePulse),
            (false, AlertPolicy::OnTransition) => {
                if previous == Some(ConnectivityState::CONNECTED) {
                    Some(HapticAlert::DoublePulse)
                } else {
                    None
                }
            }
        };

        if previous != Some(state) {
            debug!("Bluetooth link changed: connected = {}", state.connected);
        }

        ConnectivityUpdate {
            icon: visibility(state),
            alert,
        }
    }
}

fn visibility(state: ConnectivityState) -> Visibility {
    if state.connected {
        Visibility::Visible
    } else {
        Visibility::Hidden
    }
}
