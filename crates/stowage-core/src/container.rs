//! Core container struct and identity sequencing.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use stowage_common::constants::FIRST_CONTAINER_ID;
use stowage_common::error::Result;
use stowage_common::types::{ContainerId, ContainerSize};

/// Monotonic source of container identities.
///
/// Every successful construction draws exactly one id. Ids are never
/// rewound or reused, even when the container is later rejected by a stack.
/// One sequence serves the whole process and is reached through
/// [`IdSequence::process`]; no other sequence can be built outside this
/// module, so two containers never share an id.
#[derive(Debug)]
pub struct IdSequence {
    next: AtomicU64,
}

static PROCESS_IDS: IdSequence = IdSequence::starting_at(FIRST_CONTAINER_ID);

impl IdSequence {
    /// Returns the process-wide sequence, whose first id is `1`.
    #[must_use]
    pub fn process() -> &'static Self {
        &PROCESS_IDS
    }

    pub(crate) const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Draws the next id.
    pub fn next_id(&self) -> ContainerId {
        ContainerId::new(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the id the next draw will produce, without drawing it.
    ///
    /// Other threads may draw in between, so treat the result as a lower
    /// bound.
    #[must_use]
    pub fn peek(&self) -> ContainerId {
        ContainerId::new(self.next.load(Ordering::Relaxed))
    }
}

/// A shipping container.
///
/// Contents are opaque; nothing in the yard ever inspects them. Two
/// containers are equal only if they are the same container, regardless of
/// size or contents.
pub struct Container<T> {
    id: ContainerId,
    size: ContainerSize,
    contents: T,
}

impl<T> Container<T> {
    /// Creates a container of the given length in meters.
    ///
    /// # Errors
    ///
    /// Returns [`StowageError::InvalidSize`](stowage_common::error::StowageError::InvalidSize)
    /// if `length` is not canonical. No id is drawn in that case.
    pub fn new(ids: &IdSequence, length: f64, contents: T) -> Result<Self> {
        let size = ContainerSize::new(length)?;
        Ok(Self::with_size(ids, size, contents))
    }

    /// Creates a container of an already validated size.
    pub fn with_size(ids: &IdSequence, size: ContainerSize, contents: T) -> Self {
        Self {
            id: ids.next_id(),
            size,
            contents,
        }
    }

    /// Creates a container from a loosely typed length.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` for non-numeric lengths (booleans included)
    /// and `InvalidSize` for numbers that are not canonical.
    pub fn from_value(ids: &IdSequence, length: &Value, contents: T) -> Result<Self> {
        let size = ContainerSize::from_value(length)?;
        Ok(Self::with_size(ids, size, contents))
    }

    /// Returns the container's identity.
    #[must_use]
    pub const fn id(&self) -> ContainerId {
        self.id
    }

    /// Returns the container's size.
    #[must_use]
    pub const fn size(&self) -> ContainerSize {
        self.size
    }

    /// Returns `true` if this is a short container.
    #[must_use]
    pub const fn is_short(&self) -> bool {
        self.size.is_short()
    }

    /// Returns the contents.
    #[must_use]
    pub const fn contents(&self) -> &T {
        &self.contents
    }

    /// Consumes the container and returns its contents.
    pub fn into_contents(self) -> T {
        self.contents
    }
}

// Only the identity is printed; contents may be sensitive or unprintable.
impl<T> fmt::Debug for Container<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Container").field(&self.id.get()).finish()
    }
}

impl<T> fmt::Display for Container<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container {}", self.id)
    }
}

impl<T> PartialEq for Container<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Container<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stowage_common::error::StowageError;

    #[test]
    fn ids_start_at_one_and_increase() {
        let ids = IdSequence::starting_at(FIRST_CONTAINER_ID);
        let a = Container::new(&ids, 2.59, ()).unwrap();
        let b = Container::new(&ids, 6.06, ()).unwrap();
        assert_eq!(a.id().get(), 1);
        assert_eq!(b.id().get(), 2);
    }

    #[test]
    fn invalid_length_draws_no_id() {
        let ids = IdSequence::starting_at(FIRST_CONTAINER_ID);
        assert!(Container::new(&ids, 1.0, ()).is_err());
        assert_eq!(ids.peek().get(), 1);
    }

    #[test]
    fn contents_are_kept_verbatim() {
        let ids = IdSequence::process();
        let c = Container::new(ids, 2.59, vec![1, 2, 3]).unwrap();
        assert_eq!(c.contents(), &vec![1, 2, 3]);
        assert_eq!(c.into_contents(), vec![1, 2, 3]);
    }

    #[test]
    fn is_short_follows_size() {
        let ids = IdSequence::process();
        assert!(Container::new(ids, 2.59, "").unwrap().is_short());
        assert!(!Container::new(ids, 6.06, "").unwrap().is_short());
    }

    #[test]
    fn identical_size_and_contents_are_still_distinct() {
        let ids = IdSequence::process();
        let a = Container::new(ids, 6.06, "grain").unwrap();
        let b = Container::new(ids, 6.06, "grain").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn process_sequence_only_moves_forward() {
        let ids = IdSequence::process();
        let a = Container::new(ids, 2.59, ()).unwrap();
        let b = Container::new(ids, 2.59, ()).unwrap();
        assert!(b.id() > a.id());
        assert!(ids.peek() > b.id());
    }

    #[test]
    fn debug_shows_only_identity() {
        let ids = IdSequence::starting_at(41);
        let c = Container::new(&ids, 6.06, "secret manifest").unwrap();
        let printed = format!("{c:?}");
        assert_eq!(printed, "Container(41)");
        assert!(!printed.contains("secret"));
    }

    #[test]
    fn boolean_length_is_type_mismatch() {
        let ids = IdSequence::process();
        let result = Container::from_value(ids, &json!(true), ());
        assert!(matches!(result, Err(StowageError::TypeMismatch { .. })));
    }

    #[test]
    fn string_length_is_type_mismatch() {
        let ids = IdSequence::process();
        let result = Container::from_value(ids, &json!("1"), ());
        assert!(matches!(result, Err(StowageError::TypeMismatch { .. })));
    }

    #[test]
    fn integer_length_is_invalid_size() {
        let ids = IdSequence::process();
        let result = Container::from_value(ids, &json!(10), ());
        assert!(matches!(result, Err(StowageError::InvalidSize { .. })));
    }
}
