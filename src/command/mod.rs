//! AT commands for GSM/GPRS modems\
//! Following GSM 07.07 (3GPP TS 27.007) for general and network commands and
//! GSM 07.05 (3GPP TS 27.005) for short messages.

pub mod network_service;
pub mod sms;

use atat::atat_derive::{AtatCmd, AtatResp};

/// Answers are read from the response buffer, never through `atat`.
#[derive(Clone, AtatResp)]
pub struct NoResponse;

#[derive(Clone, AtatCmd)]
#[at_cmd("", NoResponse)]
pub struct AT;
