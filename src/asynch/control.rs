use core::fmt::Write as _;
use core::future::Future;

use embassy_futures::select::{select, Either};
use embassy_time::{with_timeout, Duration, Timer};
use heapless::String;

use crate::{
    buffer::RESPONSE_CAPACITY,
    command::{
        network_service::{responses::SignalQuality, types::SignalLevel, GetSignalQuality},
        sms::{
            responses::IncomingMessage,
            types::{MessageFormat, MessageId},
            ReadMessage, SendMessage, SetMessageFormat, ESCAPE, MAX_PAYLOAD_LEN, SUBMIT,
        },
        AT,
    },
    config::{ModemConfig, MAX_DESTINATION_LEN},
    error::Error,
    fmt::ascii,
};

use super::{channel::Transport, AtHandle, State};

type Payload = String<MAX_PAYLOAD_LEN>;

fn format_payload(args: core::fmt::Arguments<'_>) -> Result<Payload, Error> {
    let mut payload = Payload::new();
    payload.write_fmt(args).map_err(|_| Error::PayloadTooLong)?;
    Ok(payload)
}

/// Presence, signal and SMS operations on a modem.
pub struct Control<'d, T: Transport, C: ModemConfig, const N: usize = RESPONSE_CAPACITY> {
    at: AtHandle<'d, T, N>,
    config: C,
}

impl<'d, T: Transport, C: ModemConfig, const N: usize> Control<'d, T, C, N> {
    pub fn new(state: &'d State<T, N>, config: C) -> Self {
        Self {
            at: state.handle(),
            config,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// `true` if the modem answers `AT` with `OK`.
    pub async fn probe_presence(&self) -> Result<bool, Error> {
        let mut at = self.at.lock().await;
        let present = at.exchange(&AT, C::SETTLE_TIME).await?.is_ok();
        if !present {
            warn!("No answer to AT, modem absent");
        }
        Ok(present)
    }

    pub async fn require_presence(&self) -> Result<(), Error> {
        if self.probe_presence().await? {
            Ok(())
        } else {
            Err(Error::ModemAbsent)
        }
    }

    /// Raw `+CSQ` figures.
    pub async fn signal_quality(&self) -> Result<SignalQuality, Error> {
        let mut at = self.at.lock().await;
        let answer = at.exchange(&GetSignalQuality, C::SETTLE_TIME).await?;
        SignalQuality::parse(answer.as_bytes())
    }

    /// Classified signal level. An answer without a readable <rssi> counts
    /// as [`SignalLevel::None`].
    pub async fn probe_signal(&self) -> Result<SignalLevel, Error> {
        let level = match self.signal_quality().await {
            Ok(quality) => quality.level(),
            Err(Error::MalformedResponse) => {
                warn!("Unreadable signal quality answer");
                SignalLevel::None
            }
            Err(e) => return Err(e),
        };
        debug!("Signal level: {:?}", level);
        Ok(level)
    }

    /// Send `text` as an SMS to the configured destination.
    pub async fn send_text(&self, text: &str) -> Result<(), Error> {
        if text.len() > MAX_PAYLOAD_LEN {
            return Err(Error::PayloadTooLong);
        }
        self.send_payload(text.as_bytes()).await
    }

    /// Send `value` in decimal notation.
    pub async fn send_int(&self, value: i32) -> Result<(), Error> {
        let payload = format_payload(format_args!("{}", value))?;
        self.send_payload(payload.as_bytes()).await
    }

    /// Send `value` with six decimals.
    pub async fn send_float(&self, value: f32) -> Result<(), Error> {
        let payload = format_payload(format_args!("{:.6}", value))?;
        self.send_payload(payload.as_bytes()).await
    }

    /// Switch to text mode, address the destination, then submit `payload`.
    ///
    /// Nothing past `AT+CMGF=1` is written if the modem rejects text mode;
    /// the payload is dropped and not retried.
    async fn send_payload(&self, payload: &[u8]) -> Result<(), Error> {
        if payload.iter().any(|b| *b == SUBMIT || *b == ESCAPE) {
            return Err(Error::InvalidPayload);
        }
        let destination = self.config.destination();
        if destination.len() > MAX_DESTINATION_LEN {
            return Err(Error::CommandTooLong);
        }

        let mut at = self.at.lock().await;

        let text_mode = SetMessageFormat {
            format: MessageFormat::Text,
        };
        if !at.exchange(&text_mode, C::SETTLE_TIME).await?.is_ok() {
            error!("Text mode rejected, message dropped");
            return Err(Error::CommandRejected);
        }

        // Whatever arrives here is the `>` prompt, discarded by the submit.
        at.exchange(&SendMessage { destination }, C::PROMPT_TIME)
            .await?;

        let answer = at.submit(payload, C::SUBMIT_TIME).await?;
        if answer.is_ok() {
            info!("Message sent to {}", destination);
            Ok(())
        } else {
            error!("Message rejected: {}", ascii(answer.as_bytes()));
            Err(Error::CommandRejected)
        }
    }

    /// Look once for a new message indication. `Ok(None)` means nothing has
    /// arrived yet.
    ///
    /// Indications the modem sent along with the answer to an earlier command
    /// are returned here too, oldest first.
    pub async fn check_for_message(&self) -> Result<Option<MessageId>, Error> {
        let mut at = self.at.lock().await;
        at.poll().await?;
        Ok(at.take_new_message())
    }

    /// Poll until a new message indication arrives. Never gives up on its
    /// own; see [`Self::receive_text`] for a bounded wait.
    pub async fn wait_for_message(&self) -> Result<MessageId, Error> {
        loop {
            if let Some(id) = self.check_for_message().await? {
                debug!("New message at index {}", id.index());
                return Ok(id);
            }
            Timer::after(C::POLL_INTERVAL).await;
        }
    }

    /// Fetch the message stored at `id` and strip its metadata.
    ///
    /// Fails with [`Error::ResponseTruncated`] if the answer did not fit the
    /// response buffer, rather than returning part of the body.
    pub async fn read_message(&self, id: MessageId) -> Result<IncomingMessage<N>, Error> {
        let mut at = self.at.lock().await;
        let answer = at
            .exchange(&ReadMessage { index: id.index() }, C::SETTLE_TIME)
            .await?;
        if answer.overflowed() > 0 {
            error!("Message {} does not fit {} bytes", id.index(), N);
            return Err(Error::ResponseTruncated);
        }
        IncomingMessage::from_response(answer.as_bytes())
    }

    /// Wait up to `timeout` for a new message, then read it.
    pub async fn receive_text(&self, timeout: Duration) -> Result<IncomingMessage<N>, Error> {
        let id = with_timeout(timeout, self.wait_for_message())
            .await
            .map_err(|_| Error::Timeout)??;
        self.read_message(id).await
    }

    /// Wait for a new message until `cancel` completes, then read it.
    pub async fn receive_text_until<F: Future>(
        &self,
        cancel: F,
    ) -> Result<IncomingMessage<N>, Error> {
        match select(self.wait_for_message(), cancel).await {
            Either::First(id) => self.read_message(id?).await,
            Either::Second(_) => Err(Error::Cancelled),
        }
    }

    pub async fn receive_int(&self, timeout: Duration) -> Result<i32, Error> {
        self.receive_text(timeout).await?.parse()
    }

    pub async fn receive_float(&self, timeout: Duration) -> Result<f32, Error> {
        self.receive_text(timeout).await?.parse()
    }
}
