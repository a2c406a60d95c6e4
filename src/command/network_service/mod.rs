//! ### 8 - Mobile termination control and status: signal quality

mod impl_;
pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;

use super::NoResponse;

/// 8.5 Signal quality +CSQ
///
/// Returns the received signal strength indication <rssi> and the channel
/// bit error rate <ber>, as `+CSQ: <rssi>,<ber>`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CSQ", NoResponse)]
pub struct GetSignalQuality;
