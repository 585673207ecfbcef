//! In-memory display server for exercising lock requests without X.

use std::cell::{Cell, RefCell};

use x11rb::errors::ConnectError;

use crate::modifier::{DeviceClass, Error, LockState, ModifierController, ModifierMask};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Open,
    SetLock {
        device: DeviceClass,
        mask: ModifierMask,
        state: LockState,
    },
    Close,
}

/// Records every call and keeps a locked-modifier mask the way a server
/// would.
#[derive(Debug, Default)]
pub struct MockServer {
    calls: RefCell<Vec<Call>>,
    locked: Cell<ModifierMask>,
    unreachable: bool,
}

impl MockServer {
    pub fn with_locked(locked: ModifierMask) -> Self {
        Self {
            locked: Cell::new(locked),
            ..Default::default()
        }
    }

    /// A server that refuses every connection.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn locked(&self) -> ModifierMask {
        self.locked.get()
    }
}

impl ModifierController for MockServer {
    type Handle = ();

    fn open(&self) -> Result<(), Error> {
        self.calls.borrow_mut().push(Call::Open);

        if self.unreachable {
            Err(Error::Connect {
                e: ConnectError::IoError(std::io::ErrorKind::ConnectionRefused.into()),
                display: ":mock".into(),
            })
        } else {
            Ok(())
        }
    }

    fn set_lock(
        &self,
        _handle: &mut (),
        device: DeviceClass,
        mask: ModifierMask,
        state: LockState,
    ) -> Result<(), Error> {
        self.calls
            .borrow_mut()
            .push(Call::SetLock { device, mask, state });

        let untouched = self.locked.get().bits() & !mask.bits();
        self.locked
            .set(ModifierMask::from(untouched | state.values(mask).bits()));
        Ok(())
    }

    fn close(&self, _handle: ()) -> Result<(), Error> {
        self.calls.borrow_mut().push(Call::Close);
        Ok(())
    }
}
