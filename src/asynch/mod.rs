pub mod channel;
pub mod control;
pub mod session;

use embassy_sync::{
    blocking_mutex::raw::NoopRawMutex,
    mutex::{Mutex, MutexGuard},
};

use crate::buffer::{OverflowPolicy, RESPONSE_CAPACITY};
use channel::Transport;
use session::AtSession;

pub use control::Control;

pub struct AtHandle<'d, T: Transport, const N: usize>(&'d Mutex<NoopRawMutex, AtSession<T, N>>);

impl<'d, T: Transport, const N: usize> AtHandle<'d, T, N> {
    async fn lock(&self) -> MutexGuard<'d, NoopRawMutex, AtSession<T, N>> {
        self.0.lock().await
    }
}

/// Owner of the serial link and the response buffer.
///
/// Any number of [`Control`] handles can borrow the same state; their
/// exchanges are serialized.
pub struct State<T: Transport, const N: usize = RESPONSE_CAPACITY> {
    session: Mutex<NoopRawMutex, AtSession<T, N>>,
}

impl<T: Transport> State<T> {
    /// State with the default buffer capacity and overflow policy.
    pub fn new(transport: T) -> Self {
        Self::with_policy(transport, OverflowPolicy::default())
    }
}

impl<T: Transport, const N: usize> State<T, N> {
    pub fn with_policy(transport: T, policy: OverflowPolicy) -> Self {
        Self {
            session: Mutex::new(AtSession::new(transport, policy)),
        }
    }

    pub(crate) fn handle(&self) -> AtHandle<'_, T, N> {
        AtHandle(&self.session)
    }

    /// Give the serial link back.
    pub fn release(self) -> T {
        self.session.into_inner().release()
    }
}
