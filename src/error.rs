#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
use core::num::TryFromIntError;

pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by shape, slice and array operations.
///
/// Every operation validates its arguments before it mutates anything, so a
/// returned error leaves the receiver untouched.
#[derive(Clone, Debug, Eq, Hash, PartialEq, thiserror::Error)]
pub enum Error {
    /// An argument is malformed or incompatible with the receiver: a zero
    /// slice step, an unparsable slice string, inconsistent nested literals,
    /// mismatched shapes or too many indices.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An index or axis lies outside the bounds of the axis it addresses.
    #[error("out of range: {0}")]
    OutOfRange(String),
}

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::debug!(%msg, "rejected argument");
        Self::InvalidArgument(msg)
    }

    pub(crate) fn out_of_range(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::debug!(%msg, "rejected index");
        Self::OutOfRange(msg)
    }
}

impl From<TryFromIntError> for Error {
    fn from(e: TryFromIntError) -> Self {
        Self::invalid_argument(e.to_string())
    }
}
