use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Host is serving; `wait` blocks
    Held,
    /// Shutdown was requested; terminal
    Released,
}

/// One-shot gate tying "the service is logically done" to "the host may exit".
///
/// The gate starts `Held`. The first `release` moves it to `Released` and wakes
/// every waiter; later releases change nothing and return `false`. A waiter
/// that arrives after the release returns immediately, so the order of
/// `release` and `wait` never matters.
#[derive(Clone, Debug)]
pub struct LifecycleGate {
    state_tx: Arc<watch::Sender<GateState>>,
}

impl LifecycleGate {
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(GateState::Held);
        Self {
            state_tx: Arc::new(state_tx),
        }
    }

    /// Release the gate. Returns `true` only for the call that performed the
    /// transition.
    pub fn release(&self) -> bool {
        self.state_tx.send_if_modified(|state| match state {
            GateState::Held => {
                *state = GateState::Released;
                true
            }
            GateState::Released => false,
        })
    }

    /// Wait until the gate has been released
    pub async fn wait(&self) {
        let mut state_rx = self.state_tx.subscribe();
        // The sender lives as long as `self`, so this cannot observe a closed channel
        let _ = state_rx
            .wait_for(|state| *state == GateState::Released)
            .await;
    }

    pub fn state(&self) -> GateState {
        *self.state_tx.borrow()
    }

    pub fn is_released(&self) -> bool {
        self.state() == GateState::Released
    }
}

impl Default for LifecycleGate {
    fn default() -> Self {
        Self::new()
    }
}
