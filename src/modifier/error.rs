use x11rb::errors::{ConnectError, ConnectionError, ReplyError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot open display {display}: {e}")]
    Connect {
        #[source]
        e: ConnectError,
        display: String,
    },

    #[error("sending request to display: {0}")]
    Connection(#[from] ConnectionError),

    #[error("display rejected request: {0}")]
    Reply(#[from] ReplyError),

    #[error("display does not support the XKEYBOARD extension")]
    XkbMissing,

    #[error("display only offers XKEYBOARD {major}.{minor}")]
    XkbUnsupported { major: u16, minor: u16 },
}
