use x11rb::{
    connection::{Connection, RequestConnection},
    protocol::xkb::{self, ConnectionExt as _},
    rust_connection::RustConnection,
};

use crate::modifier::{DeviceClass, Error, LockState, ModifierController, ModifierMask};

/// XKB version requested from the server; `LatchLockState` has been there
/// since 1.0.
const XKB_MAJOR: u16 = 1;
const XKB_MINOR: u16 = 0;

/// Lock control through the X Keyboard extension.
#[derive(Debug, Default)]
pub struct X11 {
    /// Display name, or `None` for `$DISPLAY`.
    display: Option<String>,
}

impl X11 {
    pub fn new(display: Option<String>) -> Self {
        Self { display }
    }

    fn display_name(&self) -> String {
        match &self.display {
            Some(name) => name.clone(),
            None => std::env::var("DISPLAY").unwrap_or_else(|_| "(unset $DISPLAY)".into()),
        }
    }
}

impl ModifierController for X11 {
    type Handle = RustConnection;

    #[tracing::instrument(level = "DEBUG", err)]
    fn open(&self) -> Result<RustConnection, Error> {
        let (conn, _screen) =
            RustConnection::connect(self.display.as_deref()).map_err(|e| Error::Connect {
                e,
                display: self.display_name(),
            })?;

        // The extension must be negotiated before any XKB request is valid.
        if conn.extension_information(xkb::X11_EXTENSION_NAME)?.is_none() {
            return Err(Error::XkbMissing);
        }
        let reply = conn.xkb_use_extension(XKB_MAJOR, XKB_MINOR)?.reply()?;
        if !reply.supported {
            return Err(Error::XkbUnsupported {
                major: reply.server_major,
                minor: reply.server_minor,
            });
        }

        tracing::debug!(
            major = reply.server_major,
            minor = reply.server_minor,
            "XKEYBOARD negotiated"
        );
        Ok(conn)
    }

    #[tracing::instrument(level = "DEBUG", skip(self, conn), err)]
    fn set_lock(
        &self,
        conn: &mut RustConnection,
        device: DeviceClass,
        mask: ModifierMask,
        state: LockState,
    ) -> Result<(), Error> {
        // Only the lock half of the request is used: group and latch state
        // are left untouched.
        conn.xkb_latch_lock_state(
            device.spec(),
            mask.mod_mask(),
            state.values(mask).mod_mask(),
            false,
            xkb::Group::M1,
            ModifierMask::none().mod_mask(),
            false,
            0,
        )?
        .check()?;

        Ok(())
    }

    fn close(&self, conn: RustConnection) -> Result<(), Error> {
        conn.flush()?;
        drop(conn);

        Ok(())
    }
}
