//! Keyboard modifier lock state on the display server.
//!
//! The rest of the crate only ever calls [`toggle`]; the raw connection lives
//! behind a [`ModifierController`] and never escapes it.

use std::fmt::Display;

use x11rb::protocol::{xkb, xproto::ModMask};

pub use crate::modifier::{error::Error, x11::X11};

mod error;
#[cfg(test)]
pub(crate) mod mock;
mod x11;

/// The XKB device a lock request applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceClass(xkb::ID);

impl DeviceClass {
    /// The server's logical core keyboard, rather than any physical device.
    pub const CORE_KEYBOARD: Self = Self(xkb::ID::USE_CORE_KBD);

    /// The `DeviceSpec` sent on the wire.
    pub fn spec(self) -> xkb::DeviceSpec {
        self.0.into()
    }
}

/// A set of core modifier bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifierMask(ModMask);

impl ModifierMask {
    /// Caps Lock.
    pub const LOCK: Self = Self(ModMask::LOCK);

    pub fn none() -> Self {
        Self(ModMask::from(0u16))
    }

    pub fn mod_mask(self) -> ModMask {
        self.0
    }

    pub fn bits(self) -> u16 {
        self.0.into()
    }

    pub fn contains(self, other: Self) -> bool {
        self.bits() & other.bits() == other.bits()
    }
}

impl Default for ModifierMask {
    fn default() -> Self {
        Self::none()
    }
}

impl From<ModMask> for ModifierMask {
    fn from(mask: ModMask) -> Self {
        Self(mask)
    }
}

impl From<u16> for ModifierMask {
    fn from(bits: u16) -> Self {
        Self(ModMask::from(bits))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Locked,
    Unlocked,
}

impl LockState {
    /// The value bits to send for `mask` in this state.
    pub fn values(self, mask: ModifierMask) -> ModifierMask {
        match self {
            Self::Locked => mask,
            Self::Unlocked => ModifierMask::none(),
        }
    }
}

impl From<bool> for LockState {
    fn from(locked: bool) -> Self {
        if locked { Self::Locked } else { Self::Unlocked }
    }
}

impl Display for LockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Locked => "locked",
                Self::Unlocked => "unlocked",
            }
        )
    }
}

/// The capability set a display server exposes for forcing modifier locks.
pub trait ModifierController {
    /// An open connection to the server.
    type Handle;

    fn open(&self) -> Result<Self::Handle, Error>;

    /// Forces every modifier in `mask` on `device` into `state`.
    fn set_lock(
        &self,
        handle: &mut Self::Handle,
        device: DeviceClass,
        mask: ModifierMask,
        state: LockState,
    ) -> Result<(), Error>;

    fn close(&self, handle: Self::Handle) -> Result<(), Error>;
}

/// Forces Caps Lock on the core keyboard into `state`.
///
/// The connection is opened and closed within this call. The resulting lock
/// state is global to the server and outlives this process.
#[tracing::instrument(level = "DEBUG", skip(controller), err)]
pub fn toggle<C>(controller: &C, state: LockState) -> Result<(), Error>
where
    C: ModifierController,
{
    let mut handle = controller.open()?;
    controller.set_lock(
        &mut handle,
        DeviceClass::CORE_KEYBOARD,
        ModifierMask::LOCK,
        state,
    )?;
    controller.close(handle)?;

    tracing::info!(%state, "caps lock set");
    Ok(())
}
