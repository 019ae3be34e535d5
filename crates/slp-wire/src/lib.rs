#![warn(clippy::pedantic)]

pub mod body;
pub mod error;
pub mod field;
pub mod function;
pub mod header;

pub use body::{Body, SrvRqst, SrvTypeRqst};
pub use error::WireError;
pub use field::LengthPrefixed;
pub use function::FunctionId;
pub use header::{HeaderFlags, LengthWidth, SlpHeader};
