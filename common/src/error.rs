use thiserror::Error;

/// Hard failures a probe run can surface to its caller.
///
/// Individual hosts that time out, refuse, or fail to resolve are never
/// errors. They are silently absent from the result.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The platform cannot issue non-blocking reachability checks.
    ///
    /// Raised before any check goes out; a run that got past the capability
    /// gate always returns a result.
    #[error("platform cannot issue non-blocking reachability checks: {reason}")]
    PlatformUnsupported { reason: String },
}
