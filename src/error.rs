use std::collections::TryReserveError;
use std::fmt;
use thiserror::Error;

/// Failures reported by the fallible operations of a [`List`](crate::List).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// The index is outside the range accepted by the operation.
    #[error("index {index} is out of range for a list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// The node arena could not grow.
    #[error("failed to allocate a list node")]
    AllocFailed(#[from] TryReserveError),
    /// The copy callback of [`List::try_duplicate_with`](crate::List::try_duplicate_with)
    /// gave up on the element at `index`.
    #[error("failed to copy the element at index {index}")]
    CopyFailed { index: usize },
}

/// An insertion that did not happen.
///
/// The list is left untouched and the element is handed back, so nothing is
/// lost on failure.
///
/// # Examples
///
/// ```
/// use dlist::{List, ListError};
///
/// let mut list = List::new();
/// list.insert_last(1).unwrap();
///
/// let err = list.insert(3, 2).unwrap_err();
/// assert_eq!(err.kind(), &ListError::IndexOutOfRange { index: 3, len: 1 });
/// assert_eq!(err.into_element(), 2);
/// assert_eq!(list.len(), 1);
/// ```
#[derive(Error)]
#[error("cannot insert element: {kind}")]
pub struct InsertError<T> {
    element: T,
    #[source]
    kind: ListError,
}

impl<T> InsertError<T> {
    pub(crate) fn new(element: T, kind: ListError) -> Self {
        Self { element, kind }
    }

    /// The reason the insertion failed.
    pub fn kind(&self) -> &ListError {
        &self.kind
    }

    /// Takes back the element that was not inserted.
    pub fn into_element(self) -> T {
        self.element
    }
}

// Not derived: the element is opaque and need not be `Debug`.
impl<T> fmt::Debug for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertError")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
