/// Classification for retry policy.
///
/// Used by the snapshot fetcher to decide whether an error is transient.
///
/// | Class | Retried? |
/// |-------|----------|
/// | `Never` | No, the error is returned as-is |
/// | `WithBackoff` | Yes, after an exponentially growing delay, up to the policy limit |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - non-success response, transport fault, or bad payload.
    Never,

    /// Retry after a backoff delay.
    ///
    /// Used for rate limiting (429). Once the retry budget is spent the
    /// fetcher escalates the error to a plain fetch failure.
    WithBackoff,
}
