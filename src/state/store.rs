use tokio::sync::watch;

use super::shared_state::SharedState;

/// Cloneable handle to the session's [`SharedState`].
///
/// Every write goes through the watch channel's lock, so a closure passed to
/// [`update_if`](Store::update_if) sees and mutates the state without any
/// other write interleaving.
#[derive(Clone)]
pub struct Store {
    sender: watch::Sender<SharedState>,
}

impl Store {
    pub fn new(initial: SharedState) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    pub fn snapshot(&self) -> SharedState {
        self.sender.borrow().clone()
    }

    /// Reads the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&SharedState) -> R) -> R {
        f(&self.sender.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<SharedState> {
        self.sender.subscribe()
    }

    /// Runs `f` atomically against the state. Subscribers are only notified
    /// when `f` returns true.
    pub fn update_if(&self, f: impl FnOnce(&mut SharedState) -> bool) -> bool {
        self.sender.send_if_modified(f)
    }

    pub fn update(&self, f: impl FnOnce(&mut SharedState)) {
        self.sender.send_modify(f);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(SharedState::default())
    }
}
