use thiserror::Error;

/// Error returned when building a shape out of an untyped list of coordinates.
#[non_exhaustive]
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum InitError {
    #[error("Expected {expected} coordinates, got {found}.")]
    Arity { expected: usize, found: usize },
    #[error("Radius must be positive.")]
    NegativeRadius,
}

/// Checks that `values` holds exactly `N` coordinates.
pub(crate) fn expect_arity<S: Copy, const N: usize>(values: &[S]) -> Result<[S; N], InitError> {
    <[S; N]>::try_from(values).map_err(|_| InitError::Arity {
        expected: N,
        found: values.len(),
    })
}
