//! Argument and parameter types used by Network service Commands and Responses

/// Coarse classification of the `+CSQ` <rssi> code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalLevel {
    /// • 99: not known or not detectable
    NoConnection,
    /// • 0: -113 dBm or less
    None,
    /// • 1: -111 dBm
    Weak,
    /// • 2..30: -109 dBm to -53 dBm
    Fair,
    /// • 31: -51 dBm or greater
    Good,
}
