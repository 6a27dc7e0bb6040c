//! Advance signal channel

use crossbeam::channel::{self, Receiver, Sender, TryRecvError};

/// A payload-free "advance" intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceSignal;

/// Sending half, handed to whatever produces input
#[derive(Debug, Clone)]
pub struct AdvanceSender {
    tx: Sender<AdvanceSignal>,
}

impl AdvanceSender {
    /// Queue one advance signal
    ///
    /// Returns false if the port has been dropped.
    pub fn press(&self) -> bool {
        self.tx.send(AdvanceSignal).is_ok()
    }
}

/// Receiving half, polled by the engine each tick
#[derive(Debug)]
pub struct InputPort {
    tx: Sender<AdvanceSignal>,
    rx: Receiver<AdvanceSignal>,
}

impl Default for InputPort {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort {
    /// Create a port with an unbounded queue
    pub fn new() -> Self {
        let (tx, rx) = channel::unbounded();
        Self { tx, rx }
    }

    /// Get a sender for this port
    pub fn sender(&self) -> AdvanceSender {
        AdvanceSender {
            tx: self.tx.clone(),
        }
    }

    /// Queue a signal directly
    pub fn press(&self) -> bool {
        self.tx.send(AdvanceSignal).is_ok()
    }

    /// Take the next pending signal
    pub fn poll(&self) -> Option<AdvanceSignal> {
        match self.rx.try_recv() {
            Ok(signal) => Some(signal),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Number of pending signals
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Take the signals queued so far and return how many were taken
    ///
    /// Signals sent while this runs are left for the next call.
    pub fn take_pending(&self) -> usize {
        let queued = self.rx.len();
        (0..queued).take_while(|_| self.poll().is_some()).count()
    }

    /// Discard all pending signals
    pub fn clear(&self) {
        self.take_pending();
    }
}
