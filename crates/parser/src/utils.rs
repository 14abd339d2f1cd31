//! Small helpers used across the crate.

/// Returns early with `$error` if `$predicate` does not hold.
///
/// Like `assert!`, but for recoverable failures.
///
/// # Example
///
/// ```ignore
/// ensure!(!port.is_empty(), UrlError::Incomplete);
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
