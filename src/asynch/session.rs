use atat::AtatCmd;
use embassy_time::{Duration, Timer};
use heapless::Deque;

use super::channel::{CommandChannel, Transport};
use crate::buffer::{OverflowPolicy, ResponseBuffer, RESPONSE_CAPACITY};
use crate::command::sms::{responses::new_message_indices, types::MessageId, SUBMIT};
use crate::error::Error;
use crate::fmt::ascii;

/// New message indications held until the caller asks for them.
pub const MAX_PENDING_MESSAGES: usize = 8;

/// One command/response exchange at a time over a [`CommandChannel`].
///
/// Every exchange starts from a freshly reset [`ResponseBuffer`], so nothing
/// captured for one command leaks into the next. `+CMTI` indications found in
/// any capture are queued, whatever command they arrived with.
pub struct AtSession<T: Transport, const N: usize = RESPONSE_CAPACITY> {
    channel: CommandChannel<T>,
    buffer: ResponseBuffer<N>,
    new_messages: Deque<MessageId, MAX_PENDING_MESSAGES>,
}

impl<T: Transport, const N: usize> AtSession<T, N> {
    pub fn new(transport: T, policy: OverflowPolicy) -> Self {
        Self {
            channel: CommandChannel::new(transport),
            buffer: ResponseBuffer::new(policy),
            new_messages: Deque::new(),
        }
    }

    /// Send `cmd`, give the modem `settle` to answer, then capture whatever
    /// it has sent.
    pub async fn exchange<Cmd: AtatCmd>(
        &mut self,
        cmd: &Cmd,
        settle: Duration,
    ) -> Result<&ResponseBuffer<N>, Error> {
        self.buffer.reset();
        self.channel.send(cmd).await?;
        Timer::after(settle).await;
        self.capture().await
    }

    /// Write a message body followed by the submit byte, wait `settle` and
    /// capture the outcome.
    pub async fn submit(
        &mut self,
        payload: &[u8],
        settle: Duration,
    ) -> Result<&ResponseBuffer<N>, Error> {
        self.buffer.reset();
        self.channel.send_raw(payload).await?;
        self.channel.send_byte(SUBMIT).await?;
        Timer::after(settle).await;
        self.capture().await
    }

    /// Capture pending unsolicited output without sending anything.
    ///
    /// A line left unfinished by the previous poll is kept at the front of
    /// the buffer and completed by this one.
    pub async fn poll(&mut self) -> Result<&ResponseBuffer<N>, Error> {
        self.buffer.reset_keeping_partial_line();
        self.capture().await
    }

    /// Oldest new message indication not handed out yet.
    pub fn take_new_message(&mut self) -> Option<MessageId> {
        self.new_messages.pop_front()
    }

    async fn capture(&mut self) -> Result<&ResponseBuffer<N>, Error> {
        let consumed = self.buffer.capture(&mut self.channel).await?;
        if consumed > 0 {
            trace!("Captured {} bytes: {}", consumed, ascii(self.buffer.as_bytes()));
        }
        if self.buffer.overflowed() > 0 {
            warn!(
                "Response exceeded {} bytes, {} bytes {}",
                N,
                self.buffer.overflowed(),
                match self.buffer.policy() {
                    OverflowPolicy::Wrap => "overwritten",
                    OverflowPolicy::Truncate => "dropped",
                }
            );
        }
        for id in new_message_indices(self.buffer.complete_lines()) {
            if self.new_messages.push_back(id).is_err() {
                warn!("Too many unread messages, index {} dropped", id.index());
            }
        }
        Ok(&self.buffer)
    }

    pub fn buffer(&self) -> &ResponseBuffer<N> {
        &self.buffer
    }

    pub fn release(self) -> T {
        self.channel.release()
    }
}
