/// Classification for retry policy.
///
/// Used by the resilience layer to decide what to do with a failed attempt.
///
/// | Class | Retry? | Record Circuit Breaker Failure? |
/// |-------|--------|--------------------------------|
/// | `Never` | No | No |
/// | `WithBackoff` | Yes, after the configured wait | Yes |
/// | `CircuitOpen` | No (fail fast) | No (already recorded) |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - missing series or undecodable payload.
    Never,

    /// Transient failure (rate limiting, timeout, server error, transport error).
    WithBackoff,

    /// Circuit breaker is open for this provider.
    CircuitOpen,
}
