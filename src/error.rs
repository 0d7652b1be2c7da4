use thiserror::Error;

/// Fatal errors surfaced to the caller.
///
/// Malformed time-codes and infeasible blocks are *not* represented here:
/// per spec they recover in place (a zero-duration intervention, a degenerate
/// take) with a logged warning rather than aborting the pipeline. Empty
/// input after speaker filtering is likewise not an error; it simply
/// produces an empty result.
#[derive(Debug, Error)]
pub enum TakeError {
    #[error("missing required column: {0}")]
    MissingColumn(String),
}
