use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex,
};

use tokio_util::sync::CancellationToken;

/// Issued to a request when it starts; checked again when it completes.
#[derive(Debug, Clone)]
pub struct Ticket {
    seq: u64,
    cancel: CancellationToken,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Resolves once a newer ticket has superseded this one and aborting is
    /// enabled.
    pub async fn superseded(&self) {
        self.cancel.cancelled().await
    }
}

/// Monotonic sequence for one kind of request. Only the holder of the most
/// recently issued ticket may write its result.
#[derive(Debug)]
pub struct LatestWins {
    latest: AtomicU64,
    abort_superseded: bool,
    in_flight: Mutex<Option<CancellationToken>>,
}

impl LatestWins {
    pub fn new(abort_superseded: bool) -> Self {
        Self {
            latest: AtomicU64::new(0),
            abort_superseded,
            in_flight: Mutex::new(None),
        }
    }

    pub fn issue(&self) -> Ticket {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let cancel = CancellationToken::new();

        if self.abort_superseded {
            let mut in_flight = self
                .in_flight
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(previous) = in_flight.replace(cancel.clone()) {
                previous.cancel();
            }
        }

        Ticket { seq, cancel }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.seq
    }
}
