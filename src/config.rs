use embassy_time::Duration;

/// Longest destination number accepted in `AT+CMGS`.
pub const MAX_DESTINATION_LEN: usize = 32;

pub trait ModemConfig {
    /// Time the modem needs to process a command before its answer is
    /// captured.
    const SETTLE_TIME: Duration = Duration::from_millis(500);
    /// Wait between `AT+CMGS` and the message body, while the modem prints
    /// its `>` prompt.
    const PROMPT_TIME: Duration = Duration::from_millis(500);
    /// Wait between the submit byte and capturing the send result.
    const SUBMIT_TIME: Duration = Duration::from_millis(500);
    /// Delay between two polls for a new message notification.
    const POLL_INTERVAL: Duration = Duration::from_millis(500);

    /// Phone number outgoing messages are sent to, in international format
    /// (`+<country><area><subscriber>`). Passed to the modem as is.
    fn destination(&self) -> &str;
}

/// [`ModemConfig`] with the default timings.
#[derive(Debug, Clone)]
pub struct Config<'a> {
    destination: &'a str,
}

impl<'a> Config<'a> {
    pub const fn new(destination: &'a str) -> Self {
        Self { destination }
    }
}

impl ModemConfig for Config<'_> {
    fn destination(&self) -> &str {
        self.destination
    }
}
