#![warn(clippy::pedantic)]

pub mod decoder;
pub mod error;

pub use decoder::{DecodedMessage, SlpDecoder};
pub use error::DecodeError;
