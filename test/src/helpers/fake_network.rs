use std::{cell::Cell, rc::Rc, time::Duration};

use rollcall_shared::Network;

/// A link switched on and off by the test. Reconnect attempts succeed only
/// when allowed.
#[derive(Clone)]
pub struct FakeNetwork {
    connected: Rc<Cell<bool>>,
    reconnect_succeeds: Rc<Cell<bool>>,
    reconnect_attempts: Rc<Cell<usize>>,
}

impl FakeNetwork {
    pub fn connected() -> Self {
        Self {
            connected: Rc::new(Cell::new(true)),
            reconnect_succeeds: Rc::new(Cell::new(true)),
            reconnect_attempts: Rc::new(Cell::new(0)),
        }
    }

    pub fn disconnected() -> Self {
        let network = Self::connected();
        network.go_offline();
        network
    }

    /// Drop the link and keep it down
    pub fn go_offline(&self) {
        self.connected.set(false);
        self.reconnect_succeeds.set(false);
    }

    pub fn go_online(&self) {
        self.connected.set(true);
        self.reconnect_succeeds.set(true);
    }

    pub fn reconnect_attempts(&self) -> usize {
        self.reconnect_attempts.get()
    }
}

impl Network for FakeNetwork {
    fn is_connected(&self) -> bool {
        self.connected.get()
    }

    fn reconnect(&mut self, _timeout: Duration) -> bool {
        self.reconnect_attempts.set(self.reconnect_attempts.get() + 1);
        if self.reconnect_succeeds.get() {
            self.connected.set(true);
        }
        self.connected.get()
    }
}
