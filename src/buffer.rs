//! Fixed capacity capture buffer for one command/response cycle.

use crate::asynch::channel::{CommandChannel, Transport};
use crate::error::Error;

/// Default number of bytes kept per exchange.
pub const RESPONSE_CAPACITY: usize = 99;

/// Value every position holds after a reset.
pub const SENTINEL: u8 = 0x00;

/// What happens to bytes arriving after the buffer is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverflowPolicy {
    /// The cursor wraps around and overwrites the oldest bytes, starting at
    /// position 0.
    Wrap,
    /// The first `N` bytes are kept; later bytes are still drained from the
    /// transport but dropped.
    #[default]
    Truncate,
}

pub struct ResponseBuffer<const N: usize = RESPONSE_CAPACITY> {
    storage: [u8; N],
    cursor: usize,
    filled: usize,
    overflowed: usize,
    policy: OverflowPolicy,
}

impl<const N: usize> Default for ResponseBuffer<N> {
    fn default() -> Self {
        Self::new(OverflowPolicy::default())
    }
}

impl<const N: usize> ResponseBuffer<N> {
    pub const fn new(policy: OverflowPolicy) -> Self {
        Self {
            storage: [SENTINEL; N],
            cursor: 0,
            filled: 0,
            overflowed: 0,
            policy,
        }
    }

    pub fn reset(&mut self) {
        self.storage.fill(SENTINEL);
        self.cursor = 0;
        self.filled = 0;
        self.overflowed = 0;
    }

    /// Like [`Self::reset`], but a trailing line still missing its line feed
    /// is moved to the front and kept, so the next capture can complete it.
    ///
    /// Nothing is kept once the buffer has overflowed, or when the unfinished
    /// line fills the whole buffer.
    pub fn reset_keeping_partial_line(&mut self) {
        let keep = match self.overflowed {
            0 => partial_line_len(self.as_bytes()),
            _ => 0,
        };
        if keep == 0 || keep == N {
            self.reset();
            return;
        }

        let start = self.filled - keep;
        self.storage.copy_within(start..self.filled, 0);
        self.storage[keep..].fill(SENTINEL);
        self.cursor = keep;
        self.filled = keep;
        self.overflowed = 0;
    }

    /// Store one byte at the cursor. Returns `false` if the byte was dropped
    /// or overwrote an earlier one.
    pub fn push(&mut self, byte: u8) -> bool {
        if N == 0 {
            self.overflowed += 1;
            return false;
        }

        match self.policy {
            OverflowPolicy::Wrap => {
                let fresh = self.filled < N;
                self.storage[self.cursor] = byte;
                self.cursor = (self.cursor + 1) % N;
                if fresh {
                    self.filled += 1;
                } else {
                    self.overflowed += 1;
                }
                fresh
            }
            OverflowPolicy::Truncate => {
                if self.filled < N {
                    self.storage[self.cursor] = byte;
                    self.cursor += 1;
                    self.filled += 1;
                    true
                } else {
                    self.overflowed += 1;
                    false
                }
            }
        }
    }

    /// Move every byte the channel has ready into the buffer.
    ///
    /// Returns as soon as the channel reports nothing pending, without
    /// waiting for more. The return value counts every byte taken from the
    /// transport, stored or not.
    pub async fn capture<T: Transport>(
        &mut self,
        channel: &mut CommandChannel<T>,
    ) -> Result<usize, Error> {
        let mut consumed = 0;
        while channel.bytes_available()? {
            match channel.read_byte().await? {
                Some(byte) => {
                    self.push(byte);
                    consumed += 1;
                }
                None => break,
            }
        }
        Ok(consumed)
    }

    /// The captured bytes. Once a [`OverflowPolicy::Wrap`] buffer has wrapped
    /// this is the whole storage, in storage order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.filled]
    }

    /// The captured bytes up to and including the last line feed.
    pub fn complete_lines(&self) -> &[u8] {
        let bytes = self.as_bytes();
        &bytes[..bytes.len() - partial_line_len(bytes)]
    }

    /// Raw storage, including the sentinel bytes past the captured window.
    pub fn window(&self) -> &[u8; N] {
        &self.storage
    }

    /// `true` iff the answer starts with `OK`.
    pub fn is_ok(&self) -> bool {
        self.as_bytes().starts_with(b"OK")
    }

    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bytes dropped or overwritten since the last reset.
    pub fn overflowed(&self) -> usize {
        self.overflowed
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }
}

fn partial_line_len(bytes: &[u8]) -> usize {
    bytes.iter().rev().take_while(|b| **b != b'\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::MockSerial;
    use embassy_futures::block_on;

    fn filled<const N: usize>(policy: OverflowPolicy, bytes: &[u8]) -> ResponseBuffer<N> {
        let mut buffer = ResponseBuffer::<N>::new(policy);
        for &b in bytes {
            buffer.push(b);
        }
        buffer
    }

    #[test]
    fn reset_fills_with_sentinel() {
        let mut buffer: ResponseBuffer<8> = filled(OverflowPolicy::Truncate, b"OK\r\n");
        assert_eq!(buffer.len(), 4);

        buffer.reset();
        assert!(buffer.is_empty());
        assert_eq!(buffer.window(), &[SENTINEL; 8]);
        assert_eq!(buffer.as_bytes(), b"");
    }

    #[test]
    fn is_ok_checks_leading_pair() {
        assert!(filled::<8>(OverflowPolicy::Truncate, b"OK\r\n").is_ok());
        assert!(filled::<8>(OverflowPolicy::Truncate, b"OK").is_ok());
        assert!(!filled::<8>(OverflowPolicy::Truncate, b"ERROR\r\n").is_ok());
        assert!(!filled::<8>(OverflowPolicy::Truncate, b"\r\nOK\r\n").is_ok());
        assert!(!filled::<8>(OverflowPolicy::Truncate, b"O").is_ok());
        assert!(!ResponseBuffer::<8>::default().is_ok());
    }

    #[test]
    fn truncate_keeps_first_bytes() {
        let buffer: ResponseBuffer<4> = filled(OverflowPolicy::Truncate, b"OK\r\nERROR");
        assert_eq!(buffer.as_bytes(), b"OK\r\n");
        assert_eq!(buffer.overflowed(), 5);
        assert!(buffer.is_ok());
    }

    #[test]
    fn wrap_overwrites_oldest() {
        let buffer: ResponseBuffer<4> = filled(OverflowPolicy::Wrap, b"OK\r\nERROR");
        // "ERRO" lands on 0..4, then "R" on position 0 again
        assert_eq!(buffer.as_bytes(), b"RRRO");
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.overflowed(), 5);
        assert!(!buffer.is_ok());
    }

    #[test]
    fn wrap_within_capacity_behaves_like_truncate() {
        let wrap: ResponseBuffer<8> = filled(OverflowPolicy::Wrap, b"OK\r\n");
        let truncate: ResponseBuffer<8> = filled(OverflowPolicy::Truncate, b"OK\r\n");
        assert_eq!(wrap.as_bytes(), truncate.as_bytes());
        assert_eq!(wrap.overflowed(), 0);
    }

    #[test]
    fn partial_line_survives_reset() {
        let mut buffer: ResponseBuffer<32> =
            filled(OverflowPolicy::Truncate, b"RING\r\n+CMTI: \"SM\",");
        assert_eq!(buffer.complete_lines(), b"RING\r\n");

        buffer.reset_keeping_partial_line();
        assert_eq!(buffer.as_bytes(), b"+CMTI: \"SM\",");
        assert_eq!(buffer.window()[12], SENTINEL);

        buffer.push(b'3');
        buffer.push(b'\r');
        buffer.push(b'\n');
        assert_eq!(buffer.complete_lines(), b"+CMTI: \"SM\",3\r\n");

        buffer.reset_keeping_partial_line();
        assert!(buffer.is_empty());
    }

    #[test]
    fn partial_line_dropped_after_overflow() {
        let mut buffer: ResponseBuffer<4> = filled(OverflowPolicy::Truncate, b"\nabcd");
        buffer.reset_keeping_partial_line();
        assert!(buffer.is_empty());

        let mut buffer: ResponseBuffer<4> = filled(OverflowPolicy::Truncate, b"abcd");
        assert_eq!(buffer.complete_lines(), b"");
        buffer.reset_keeping_partial_line();
        assert!(buffer.is_empty());
    }

    #[test]
    fn capture_drains_pending_bytes() {
        let mut channel = CommandChannel::new(MockSerial::new().pending(b"+CSQ: 21,99\r\n"));
        let mut buffer = ResponseBuffer::<8>::new(OverflowPolicy::Truncate);

        let consumed = block_on(buffer.capture(&mut channel)).unwrap();
        assert_eq!(consumed, 13);
        assert_eq!(buffer.as_bytes(), b"+CSQ: 21");
        assert_eq!(buffer.overflowed(), 5);
        assert_eq!(channel.release().unread(), 0);
    }

    #[test]
    fn capture_returns_when_idle() {
        let mut channel = CommandChannel::new(MockSerial::new());
        let mut buffer = ResponseBuffer::<8>::default();

        assert_eq!(block_on(buffer.capture(&mut channel)).unwrap(), 0);
        assert!(buffer.is_empty());
    }
}
