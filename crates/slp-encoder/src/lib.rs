#![warn(clippy::pedantic)]

pub mod error;
pub mod message;

pub use error::EncodeError;
pub use message::{MAX_DATAGRAM_SIZE, SlpMessage};
