use embedded_io::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// The modem did not answer `AT` with `OK`.
    ModemAbsent,
    /// A command was sent but the captured answer did not start with `OK`.
    CommandRejected,
    /// An expected delimiter or field was missing from the captured answer.
    MalformedResponse,
    /// No new message notification arrived before the deadline.
    Timeout,
    /// The caller aborted the wait for a new message.
    Cancelled,
    /// The answer did not fit the response buffer, so part of it was lost.
    ResponseTruncated,
    /// The serialized command does not fit the command buffer.
    CommandTooLong,
    /// The SMS payload exceeds a single text message.
    PayloadTooLong,
    /// The SMS payload contains the submit or escape control byte.
    InvalidPayload,

    // Transport errors
    Io(ErrorKind),
}

impl From<ErrorKind> for Error {
    fn from(e: ErrorKind) -> Self {
        Self::Io(e)
    }
}
