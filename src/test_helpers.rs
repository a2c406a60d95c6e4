use core::convert::Infallible;
use std::collections::VecDeque;
use std::sync::Once;
use std::vec::Vec;

use embassy_time::Duration;

use crate::config::ModemConfig;
use crate::command::sms::SUBMIT;

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .is_test(true)
            .try_init();
    });
}

/// Scripted serial port.
///
/// - `pending` bytes are readable right away.
/// - `reply` chunks are queued and released, one per trigger, each time a
///   line feed or the submit byte is written.
/// - `unsolicited` chunks are released one at a time whenever a readiness
///   check finds nothing pending, so each shows up on the following capture.
#[derive(Debug, Default)]
pub struct MockSerial {
    written: Vec<u8>,
    rx: VecDeque<u8>,
    replies: VecDeque<Vec<u8>>,
    unsolicited: VecDeque<Vec<u8>>,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(mut self, bytes: &[u8]) -> Self {
        self.rx.extend(bytes.iter().copied());
        self
    }

    pub fn reply(mut self, bytes: &[u8]) -> Self {
        self.replies.push_back(bytes.to_vec());
        self
    }

    pub fn unsolicited(mut self, bytes: &[u8]) -> Self {
        self.unsolicited.push_back(bytes.to_vec());
        self
    }

    pub fn written(&self) -> &[u8] {
        &self.written
    }

    pub fn unread(&self) -> usize {
        self.rx.len()
    }

    pub fn replies_left(&self) -> usize {
        self.replies.len()
    }
}

impl embedded_io::ErrorType for MockSerial {
    type Error = Infallible;
}

impl embedded_io::ReadReady for MockSerial {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        if !self.rx.is_empty() {
            return Ok(true);
        }
        if let Some(chunk) = self.unsolicited.pop_front() {
            self.rx.extend(chunk);
        }
        Ok(false)
    }
}

impl embedded_io_async::Read for MockSerial {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut n = 0;
        while n < buf.len() {
            match self.rx.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl embedded_io_async::Write for MockSerial {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        for &b in buf {
            self.written.push(b);
            if b == b'\n' || b == SUBMIT {
                if let Some(reply) = self.replies.pop_front() {
                    self.rx.extend(reply);
                }
            }
        }
        Ok(buf.len())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub const DESTINATION: &str = "+5511999999999";

/// Configuration without any delays, so tests run at full speed.
#[derive(Debug, Clone)]
pub struct TestConfig;

impl ModemConfig for TestConfig {
    const SETTLE_TIME: Duration = Duration::from_ticks(0);
    const PROMPT_TIME: Duration = Duration::from_ticks(0);
    const SUBMIT_TIME: Duration = Duration::from_ticks(0);
    const POLL_INTERVAL: Duration = Duration::from_millis(1);

    fn destination(&self) -> &str {
        DESTINATION
    }
}
