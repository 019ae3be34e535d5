#![warn(clippy::pedantic)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod sequencer;
pub mod transport;

pub use catalog::{Catalog, EncodedCase, TestCase};
pub use config::{HarnessConfig, SLP_PORT};
pub use error::HarnessError;
pub use sequencer::{CaseOutcome, CaseReport, RunReport, SequenceEvent, Sequencer};
pub use transport::{Transport, UdpTransport};
