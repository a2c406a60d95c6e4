use atat::AtatCmd;
use embedded_io::ReadReady;
use embedded_io_async::{Read, Write};

use crate::error::Error;
use crate::fmt::ascii;

/// Largest serialized command line, terminator included.
pub const COMMAND_BUFFER_LEN: usize = 128;

/// Serial link to the modem.
pub trait Transport: Read + Write + ReadReady {}

impl<T: Read + Write + ReadReady> Transport for T {}

fn io<E: embedded_io::Error>(e: E) -> Error {
    Error::Io(e.kind())
}

pub struct CommandChannel<T: Transport> {
    transport: T,
    buf: [u8; COMMAND_BUFFER_LEN],
}

impl<T: Transport> CommandChannel<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            buf: [0; COMMAND_BUFFER_LEN],
        }
    }

    /// Serialize `cmd` as `AT<cmd>[=<args>]\r\n` and write it out.
    pub async fn send<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<(), Error> {
        if Cmd::MAX_LEN > self.buf.len() {
            return Err(Error::CommandTooLong);
        }

        let len = cmd.write(&mut self.buf);
        debug!("Sending command: {}", ascii(&self.buf[..len]).trim_end());

        self.transport.write_all(&self.buf[..len]).await.map_err(io)?;
        self.transport.flush().await.map_err(io)
    }

    /// Write bytes as they are, without any framing.
    pub async fn send_raw(&mut self, bytes: &[u8]) -> Result<(), Error> {
        trace!("Sending {} raw bytes", bytes.len());
        self.transport.write_all(bytes).await.map_err(io)?;
        self.transport.flush().await.map_err(io)
    }

    pub async fn send_byte(&mut self, byte: u8) -> Result<(), Error> {
        self.send_raw(&[byte]).await
    }

    /// Non-blocking check for pending inbound bytes.
    pub fn bytes_available(&mut self) -> Result<bool, Error> {
        self.transport.read_ready().map_err(io)
    }

    /// Read a single byte, `None` once the stream has ended.
    pub async fn read_byte(&mut self) -> Result<Option<u8>, Error> {
        let mut byte = [0u8; 1];
        match self.transport.read(&mut byte).await.map_err(io)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    pub fn release(self) -> T {
        self.transport
    }
}
