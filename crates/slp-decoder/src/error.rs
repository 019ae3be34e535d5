use slp_wire::{FunctionId, WireError};

/// SLP error code for a request that could not be parsed.
pub const PARSE_ERROR: u16 = 2;

/// SLP error code for a request carrying an unsupported version.
pub const VER_NOT_SUPPORTED: u16 = 9;

/// SLP error code for a well-formed header naming an unhandled function.
pub const MSG_NOT_SUPPORTED: u16 = 14;

/// Reasons the reference parser rejects a request.
///
/// ```text
/// ┌─────────────────────┬──────────────────────────────────────┬──────┐
/// │ Variant             │ Cause                                │ Code │
/// ├─────────────────────┼──────────────────────────────────────┼──────┤
/// │ UnsupportedVersion  │ version byte is not 2                │ 9    │
/// │ InvalidHeader       │ < 14 bytes, or tag runs past the end │ 2    │
/// │ InvalidFunction     │ function id outside 1..=11           │ 2    │
/// │ UnsupportedFunction │ valid id, but not SrvRqst/SrvTypeRqst│ 14   │
/// │ BodyTooShort        │ below the minimum request size       │ 2    │
/// │ InvalidField        │ a body length prefix runs past input │ 2    │
/// └─────────────────────┴──────────────────────────────────────┴──────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unsupported SLP version {version}")]
    UnsupportedVersion { version: u8 },

    #[error("invalid header: {0}")]
    InvalidHeader(WireError),

    #[error("invalid function id {id:#04X}")]
    InvalidFunction { id: u8 },

    #[error("{} messages are not handled", function.name())]
    UnsupportedFunction { function: FunctionId },

    #[error("{} is {len} bytes, at least {min} required", function.name())]
    BodyTooShort {
        function: FunctionId,
        len: usize,
        min: usize,
    },

    #[error("invalid body field: {0}")]
    InvalidField(WireError),
}

impl DecodeError {
    /// The SLP error code a conforming responder would put in its reply.
    pub fn error_code(&self) -> u16 {
        match self {
            Self::UnsupportedVersion { .. } => VER_NOT_SUPPORTED,
            Self::UnsupportedFunction { .. } => MSG_NOT_SUPPORTED,
            Self::InvalidHeader(_)
            | Self::InvalidFunction { .. }
            | Self::BodyTooShort { .. }
            | Self::InvalidField(_) => PARSE_ERROR,
        }
    }
}
