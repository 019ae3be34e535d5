/// Implementation of `slp-probe run`.
///
/// Builds the catalog, resolves the target once, opens one datagram socket
/// and hands the catalog to the sequencer. Each case is announced on stdout
/// just before it is sent:
///
/// ```text
/// Target: 10.0.0.7:427 (7 cases)
/// [1/7] Invalid Lang Tag Length, large payload
/// [2/7] Large Lang Tag Length, large payload
///       ✗ send failed: Network is unreachable (os error 101)
/// ...
/// [7/7] slptool findsrvs service:obmc_console
/// Done: 6 sent, 1 failed
/// ```
///
/// Send failures are reported and skipped; the command still exits 0 once
/// the catalog is exhausted. Judging the target's behaviour is left to
/// whoever is watching it.
use anyhow::{Context, Result};
use slp_harness::{Catalog, HarnessConfig, SequenceEvent, Sequencer, UdpTransport};

use crate::RunArgs;

pub fn run(args: &RunArgs) -> Result<()> {
    let catalog = Catalog::standard().context("building case catalog")?;
    let config = HarnessConfig::for_host(args.host.as_str());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting runtime")?;

    runtime.block_on(async {
        tracing::debug!(host = %config.host, port = config.port, "resolving target");
        let target = config.resolve().await?;
        let transport = UdpTransport::open(target).await?;
        println!("Target: {target} ({} cases)", catalog.len());

        let total = catalog.len();
        let sequencer = Sequencer::new(transport);
        let report = sequencer
            .run_with(&catalog, |event| match event {
                SequenceEvent::Starting { index, case } => {
                    println!("[{}/{total}] {}", index + 1, case.name);
                }
                SequenceEvent::Sent { .. } => {}
                SequenceEvent::Failed { error, .. } => {
                    println!("      ✗ send failed: {error}");
                }
            })
            .await;

        println!("Done: {} sent, {} failed", report.sent(), report.failed());
        Ok::<(), anyhow::Error>(())
    })
}
