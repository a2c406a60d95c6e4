//! Argument and parameter types used by Short Messages Service Commands and Responses
use atat::atat_derive::AtatEnum;

/// Input and output format of messages
#[derive(Debug, Clone, PartialEq, Eq, AtatEnum)]
pub enum MessageFormat {
    /// • 0: PDU mode
    Pdu = 0,
    /// • 1: text mode
    Text = 1,
}

/// Storage index of a received message, as announced by `+CMTI`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MessageId(u16);

impl MessageId {
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u16 {
        self.0
    }

    /// Parse the leading decimal digits of `token`, after any whitespace.
    pub fn parse(token: &[u8]) -> Option<Self> {
        let token = token.trim_ascii_start();
        let digits = token.iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return None;
        }
        core::str::from_utf8(&token[..digits])
            .ok()?
            .parse()
            .ok()
            .map(Self)
    }
}
