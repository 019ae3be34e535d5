/// Implementation of `slp-probe list`.
///
/// ```text
///  #  Function     Bytes  Delay  Name
///  1  SrvTypeRqst  65014     3s  Invalid Lang Tag Length, large payload
///  ...
///  7  SrvRqst         53     0s  slptool findsrvs service:obmc_console
/// ```
use anyhow::{Context, Result};
use slp_harness::{Catalog, EncodedCase};

pub fn run() -> Result<()> {
    let catalog = Catalog::standard().context("building case catalog")?;

    println!("{}", header());
    for (i, case) in catalog.iter().enumerate() {
        println!("{}", row(i + 1, case));
    }
    Ok(())
}

fn header() -> String {
    format!(" #  {:<11}  {:>5}  {:>5}  Name", "Function", "Bytes", "Delay")
}

fn row(number: usize, case: &EncodedCase) -> String {
    format!(
        "{:>2}  {:<11}  {:>5}  {:>4}s  {}",
        number,
        case.function.name(),
        case.datagram.len(),
        case.delay.as_secs(),
        case.name
    )
}
