use thiserror::Error;

/// Error returned by the strict lookups [`HashMap::at`] and
/// [`HashMap::at_mut`] when the key is absent.
///
/// [`HashMap::at`]: crate::HashMap::at
/// [`HashMap::at_mut`]: crate::HashMap::at_mut
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("key not present in hash map")]
pub struct OutOfRange;
