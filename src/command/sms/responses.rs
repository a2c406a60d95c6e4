//! Responses and unsolicited results for Short Messages Service Commands
use core::str::FromStr;

use heapless::String;

use super::types::MessageId;
use crate::buffer::RESPONSE_CAPACITY;
use crate::error::Error;
use crate::scanner;

/// Prefix of the new message indication.
pub const NEW_MESSAGE_MARKER: &[u8] = b"+CMTI:";
/// Storage the indication must point at.
pub const SIM_STORAGE: &[u8] = b"\"SM";
/// Prefix of the read message answer.
pub const READ_MESSAGE_PREFIX: &[u8] = b"+CMGR:";

/// `<stat>`, `<oa>` and `[<alpha>]` precede the timestamp.
const METADATA_FIELDS: usize = 3;

/// New message indication `+CMTI: "SM",<index>`.
///
/// Returns the announced storage index, or `None` if `window` holds no such
/// indication (yet).
pub fn new_message_index(window: &[u8]) -> Option<MessageId> {
    let at = scanner::find(window, NEW_MESSAGE_MARKER)?;
    let urc = &window[at..];

    let comma = scanner::index_of(urc, b',')? as isize;
    let storage = scanner::slice(urc, NEW_MESSAGE_MARKER.len() as isize, comma - 1);
    if !storage.trim_ascii_start().starts_with(SIM_STORAGE) {
        return None;
    }

    MessageId::parse(scanner::slice(urc, comma + 1, urc.len() as isize))
}

/// Every `+CMTI` indication in `window`, in arrival order.
pub fn new_message_indices(window: &[u8]) -> impl Iterator<Item = MessageId> + '_ {
    let mut rest = window;
    core::iter::from_fn(move || loop {
        let at = scanner::find(rest, NEW_MESSAGE_MARKER)?;
        let urc = &rest[at..];
        rest = &urc[NEW_MESSAGE_MARKER.len()..];
        if let Some(id) = new_message_index(urc) {
            return Some(id);
        }
    })
}

/// Line break between the `+CMGR` header and the body.
const LINE_BREAK: &[u8] = b"\r\n";
/// Blank line and final result code closing a `+CMGR` answer.
const STATUS_TRAILER: &[u8] = b"\r\n\r\nOK";

/// Body of a `+CMGR` answer, with every metadata field stripped.
///
/// The answer looks like
/// `+CMGR: "REC UNREAD","+5511999999999",,"24/01/01,00:00:00+00"\r\n<body>\r\n\r\nOK\r\n`.
/// The three leading fields are skipped, then the timestamp up to its UTC
/// offset sign and closing quote, then the single line break ending the
/// header. The body runs up to the last `\r\n\r\nOK`, so it may itself be
/// empty or hold line breaks. Without a final result code it runs to the end
/// of the window, minus one trailing line break.
pub fn message_body(window: &[u8]) -> Result<&[u8], Error> {
    let mut rest = match scanner::find(window, READ_MESSAGE_PREFIX) {
        Some(at) => &window[at..],
        None => window,
    };

    for _ in 0..METADATA_FIELDS {
        rest = scanner::after(rest, b',').ok_or(Error::MalformedResponse)?;
    }

    let offset = scanner::index_of_any(rest, b"+-").ok_or(Error::MalformedResponse)?;
    rest = scanner::slice(rest, offset as isize + 1, rest.len() as isize);
    rest = scanner::after(rest, b'"').ok_or(Error::MalformedResponse)?;

    rest = match rest.strip_prefix(LINE_BREAK) {
        Some(body) => body,
        None => rest.strip_prefix(b"\n").unwrap_or(rest),
    };

    let body = match scanner::rfind(rest, STATUS_TRAILER) {
        Some(end) => &rest[..end],
        None => rest.strip_suffix(LINE_BREAK).unwrap_or(rest),
    };
    Ok(body)
}

/// Text of a received message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage<const N: usize = RESPONSE_CAPACITY> {
    body: String<N>,
}

impl<const N: usize> IncomingMessage<N> {
    /// Extract the body from a captured `+CMGR` answer.
    pub fn from_response(window: &[u8]) -> Result<Self, Error> {
        Self::from_body(message_body(window)?)
    }

    pub fn from_body(body: &[u8]) -> Result<Self, Error> {
        let text = core::str::from_utf8(body).map_err(|_| Error::MalformedResponse)?;
        let body = String::try_from(text).map_err(|_| Error::MalformedResponse)?;
        Ok(Self { body })
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }

    pub fn into_inner(self) -> String<N> {
        self.body
    }

    /// Parse the body as a number, ignoring surrounding whitespace.
    pub fn parse<F: FromStr>(&self) -> Result<F, Error> {
        self.body.trim().parse().map_err(|_| Error::MalformedResponse)
    }
}

impl<const N: usize> AsRef<str> for IncomingMessage<N> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
