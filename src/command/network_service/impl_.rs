use super::types::SignalLevel;

/// <rssi> reported when the signal is not known or not detectable.
pub const RSSI_UNKNOWN: u8 = 99;

impl SignalLevel {
    /// Classify an <rssi> code. Codes outside the 07.07 range fall back to
    /// [`SignalLevel::None`].
    #[must_use]
    pub fn from_rssi(rssi: u8) -> Self {
        match rssi {
            0 => Self::None,
            1 => Self::Weak,
            2..=30 => Self::Fair,
            31 => Self::Good,
            RSSI_UNKNOWN => Self::NoConnection,
            _ => Self::None,
        }
    }

    /// Numeric code, -1 for no connection up to 3 for a good signal.
    #[must_use]
    pub fn code(self) -> i8 {
        match self {
            Self::NoConnection => -1,
            Self::None => 0,
            Self::Weak => 1,
            Self::Fair => 2,
            Self::Good => 3,
        }
    }

    #[must_use]
    pub fn is_usable(self) -> bool {
        self >= Self::Weak
    }
}
