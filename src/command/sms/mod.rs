//! ### 3 - Short Messages Service (GSM 07.05, text mode)

pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;
use types::MessageFormat;

use super::NoResponse;

/// Ends the message body and makes the modem transmit it (Ctrl-Z).
pub const SUBMIT: u8 = 0x1A;
/// Aborts message body entry (Esc).
pub const ESCAPE: u8 = 0x1B;
/// Longest body accepted in a single text message.
pub const MAX_PAYLOAD_LEN: usize = 160;

/// 3.2.3 Message format +CMGF
///
/// Selects whether messages are handled as PDUs or as text.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGF", NoResponse)]
pub struct SetMessageFormat {
    #[at_arg(position = 0)]
    pub format: MessageFormat,
}

/// 3.5.1 Send message +CMGS
///
/// In text mode the modem answers with a `>` prompt; the body follows,
/// terminated by [`SUBMIT`].
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGS", NoResponse)]
pub struct SendMessage<'a> {
    /// Destination address, see [`crate::config::MAX_DESTINATION_LEN`]
    #[at_arg(position = 0, len = 32)]
    pub destination: &'a str,
}

/// 3.4.3 Read message +CMGR
///
/// Returns the message stored at <index> as
/// `+CMGR: <stat>,<oa>,[<alpha>],<scts>` followed by the body on its own
/// line.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMGR", NoResponse)]
pub struct ReadMessage {
    #[at_arg(position = 0)]
    pub index: u16,
}
