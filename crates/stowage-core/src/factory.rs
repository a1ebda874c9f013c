//! Construction of containers by symbolic size name.

use serde_json::Value;
use stowage_common::error::Result;
use stowage_common::types::ContainerSize;

use crate::container::{Container, IdSequence};

/// Builds containers from the process-wide identity sequence.
///
/// Factories are cheap handles; every factory draws from the same
/// sequence, so containers from different factories never share an id.
#[derive(Debug, Clone, Copy)]
pub struct ContainerFactory {
    ids: &'static IdSequence,
}

impl ContainerFactory {
    /// Creates a factory drawing from [`IdSequence::process`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            ids: IdSequence::process(),
        }
    }

    /// Returns the identity sequence, for constructing containers directly.
    #[must_use]
    pub const fn ids(&self) -> &'static IdSequence {
        self.ids
    }

    /// Creates a container of the given size.
    pub fn create<T>(&self, contents: T, size: ContainerSize) -> Container<T> {
        Container::with_size(self.ids, size, contents)
    }

    /// Creates a long container.
    pub fn long<T>(&self, contents: T) -> Container<T> {
        self.create(contents, ContainerSize::Long)
    }

    /// Creates a short container.
    pub fn short<T>(&self, contents: T) -> Container<T> {
        self.create(contents, ContainerSize::Short)
    }

    /// Creates a container by size name, `"long"` when no name is given.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSizeExpression` for any name other than `"long"` or
    /// `"short"`.
    pub fn create_named<T>(&self, contents: T, name: Option<&str>) -> Result<Container<T>> {
        let size = match name {
            Some(name) => name.parse()?,
            None => ContainerSize::default(),
        };
        Ok(self.create(contents, size))
    }

    /// Creates a container from a loosely typed size name.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if the name is not a string and
    /// `InvalidSizeExpression` for an unknown name.
    pub fn create_from_value<T>(&self, contents: T, name: &Value) -> Result<Container<T>> {
        let size = ContainerSize::from_name_value(name)?;
        Ok(self.create(contents, size))
    }
}

impl Default for ContainerFactory {
    fn default() -> Self {
        Self::new()
    }
}
