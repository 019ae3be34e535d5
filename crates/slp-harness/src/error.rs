use slp_encoder::EncodeError;

/// Errors that stop a run before the first case is sent.
///
/// Per-case transport failures are not errors at this level: they are
/// recorded as [`CaseOutcome::Failed`](crate::CaseOutcome::Failed) and
/// the run continues.
///
/// ```text
/// ┌───────────┬──────────────────────────────────────────────────┐
/// │ Variant   │ Cause                                            │
/// ├───────────┼──────────────────────────────────────────────────┤
/// │ Catalog   │ A case field is wider than its wire width        │
/// │ Resolve   │ Target host lookup failed                        │
/// │ NoAddress │ Lookup succeeded but returned no address         │
/// │ Bind      │ Local datagram socket could not be opened        │
/// └───────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("case {case:?} cannot be encoded: {source}")]
    Catalog {
        case: String,
        #[source]
        source: EncodeError,
    },

    #[error("cannot resolve target {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("target {host} resolved to no address")]
    NoAddress { host: String },

    #[error("cannot open datagram socket: {0}")]
    Bind(#[source] std::io::Error),
}
