//! Responses for Network service Commands
use super::types::SignalLevel;
use crate::error::Error;
use crate::scanner;

const SIGNAL_QUALITY_PREFIX: &[u8] = b"+CSQ:";

/// 8.5 Signal quality +CSQ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalQuality {
    pub rssi: u8,
    pub ber: Option<u8>,
}

impl SignalQuality {
    /// Parse `+CSQ: <rssi>,<ber>` out of a captured answer.
    ///
    /// <rssi> is the token between the first space and the first comma.
    /// Anything captured before the `+CSQ:` prefix, such as a command echo,
    /// is skipped.
    pub fn parse(window: &[u8]) -> Result<Self, Error> {
        let answer = match scanner::find(window, SIGNAL_QUALITY_PREFIX) {
            Some(at) => &window[at..],
            None => window,
        };

        let rssi = scanner::between(answer, b' ', b',')
            .and_then(parse_number)
            .ok_or(Error::MalformedResponse)?;

        let ber = scanner::after(answer, b',').and_then(|rest| {
            let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
            parse_number(&rest[..digits])
        });

        Ok(Self { rssi, ber })
    }

    #[must_use]
    pub fn level(&self) -> SignalLevel {
        SignalLevel::from_rssi(self.rssi)
    }
}

fn parse_number(token: &[u8]) -> Option<u8> {
    core::str::from_utf8(token.trim_ascii()).ok()?.parse().ok()
}
