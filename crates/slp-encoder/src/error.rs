use slp_wire::WireError;

/// Errors that can occur while encoding an SLP message.
///
/// These are mistakes in how a message was described, not runtime
/// conditions. The encoder reports them instead of truncating or
/// splitting anything.
///
/// Error hierarchy:
///
/// ```text
///   EncodeError
///   ├── DatagramTooLarge ← message cannot travel as one UDP datagram
///   └── Wire(WireError)  ← from slp-wire (e.g. FieldOverflow)
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("message is {size} bytes, a single datagram holds at most {limit}")]
    DatagramTooLarge { size: usize, limit: usize },

    #[error(transparent)]
    Wire(#[from] WireError),
}
