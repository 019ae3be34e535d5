use std::io;

use tokio::time::sleep;

use crate::catalog::{Catalog, EncodedCase};
use crate::transport::Transport;

/// Progress notifications emitted while a catalog runs.
///
/// For every case the sequencer emits `Starting`, then exactly one of
/// `Sent` or `Failed`, then waits out the case's delay:
///
/// ```text
///   Starting(0) → Sent(0)   → [delay 0]
///   Starting(1) → Failed(1) → [delay 1]
///   Starting(2) → Sent(2)   → [delay 2]
///   ...
/// ```
#[derive(Debug)]
pub enum SequenceEvent<'a> {
    /// About to hand the case to the transport.
    Starting { index: usize, case: &'a EncodedCase },

    /// The transport accepted `bytes` bytes.
    Sent {
        index: usize,
        case: &'a EncodedCase,
        bytes: usize,
    },

    /// The transport refused the datagram. The run continues.
    Failed {
        index: usize,
        case: &'a EncodedCase,
        error: &'a io::Error,
    },
}

/// What happened to one case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaseOutcome {
    Sent { bytes: usize },
    Failed { reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseReport {
    pub name: String,
    pub outcome: CaseOutcome,
}

/// Per-case outcomes of one run, in catalog order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub cases: Vec<CaseReport>,
}

impl RunReport {
    pub fn sent(&self) -> usize {
        self.cases
            .iter()
            .filter(|c| matches!(c.outcome, CaseOutcome::Sent { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.cases.len() - self.sent()
    }
}

/// Sends every case of a catalog once, in order, pausing between cases.
///
/// Each step is: announce, send one datagram, sleep for the case's delay.
/// Nothing is read back from the target and no case is retried. A send
/// error is recorded against its case and the next case still runs, so a
/// single run always attempts the whole catalog.
///
/// The sequencer owns its transport; dropping the sequencer releases it.
pub struct Sequencer<T> {
    transport: T,
}

impl<T: Transport> Sequencer<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Run the catalog without observing progress.
    pub async fn run(&self, catalog: &Catalog) -> RunReport {
        self.run_with(catalog, |_| {}).await
    }

    /// Run the catalog, calling `on_event` as each case starts and ends.
    pub async fn run_with<F>(&self, catalog: &Catalog, mut on_event: F) -> RunReport
    where
        F: FnMut(SequenceEvent<'_>),
    {
        tracing::info!(cases = catalog.len(), "sequence started");
        let mut report = RunReport::default();

        for (index, case) in catalog.iter().enumerate() {
            on_event(SequenceEvent::Starting { index, case });

            let outcome = match self.transport.send(&case.datagram).await {
                Ok(bytes) => {
                    tracing::debug!(index, case = %case.name, bytes, "case sent");
                    on_event(SequenceEvent::Sent { index, case, bytes });
                    CaseOutcome::Sent { bytes }
                }
                Err(error) => {
                    tracing::warn!(index, case = %case.name, %error, "send failed");
                    on_event(SequenceEvent::Failed {
                        index,
                        case,
                        error: &error,
                    });
                    CaseOutcome::Failed {
                        reason: error.to_string(),
                    }
                }
            };
            report.cases.push(CaseReport {
                name: case.name.clone(),
                outcome,
            });

            if !case.delay.is_zero() {
                sleep(case.delay).await;
            }
        }

        tracing::info!(
            sent = report.sent(),
            failed = report.failed(),
            "sequence finished"
        );
        report
    }
}
