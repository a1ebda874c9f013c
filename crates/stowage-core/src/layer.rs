//! Stack layers.
//!
//! A long container occupies the whole footprint of a layer. Two short
//! containers may share one layer side by side, but a short and a long
//! container never do.

use stowage_common::constants::MAX_SHORTS_PER_LAYER;
use stowage_common::error::{Result, StowageError};
use stowage_common::types::{ContainerId, ContainerSize};

use crate::container::Container;

/// One tier of a container stack.
#[derive(Debug, PartialEq, Eq)]
pub enum Layer<T> {
    /// A single long container.
    Long(Container<T>),
    /// One short container, with room for a second one beside it.
    Short(Container<T>, Option<Container<T>>),
}

// A layer always holds at least one container.
#[allow(clippy::len_without_is_empty)]
impl<T> Layer<T> {
    /// Returns the size shared by every container in this layer.
    #[must_use]
    pub const fn size(&self) -> ContainerSize {
        match self {
            Self::Long(_) => ContainerSize::Long,
            Self::Short(..) => ContainerSize::Short,
        }
    }

    /// Returns `false` only when the layer holds a lone short container.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        !matches!(self, Self::Short(_, None))
    }

    /// Returns `true` for a layer of two short containers.
    #[must_use]
    pub const fn is_pair(&self) -> bool {
        matches!(self, Self::Short(_, Some(_)))
    }

    /// Returns the number of containers in the layer.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Long(_) | Self::Short(_, None) => 1,
            Self::Short(_, Some(_)) => 2,
        }
    }

    /// Iterates over the containers in insertion order.
    pub fn containers(&self) -> impl Iterator<Item = &Container<T>> {
        let (first, second) = match self {
            Self::Long(c) => (c, None),
            Self::Short(first, second) => (first, second.as_ref()),
        };
        std::iter::once(first).chain(second)
    }

    /// Returns the most recently added container, the one a single
    /// removal takes.
    #[must_use]
    pub const fn latest(&self) -> &Container<T> {
        match self {
            Self::Long(c) | Self::Short(c, None) | Self::Short(_, Some(c)) => c,
        }
    }

    /// Returns the ids of the containers in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<ContainerId> {
        self.containers().map(Container::id).collect()
    }

    /// Returns `true` if the given container sits in this layer.
    #[must_use]
    pub fn contains(&self, id: ContainerId) -> bool {
        self.containers().any(|c| c.id() == id)
    }

    /// Consumes the layer and returns its containers in insertion order.
    pub fn into_containers(self) -> Vec<Container<T>> {
        match self {
            Self::Long(c) => vec![c],
            Self::Short(first, second) => std::iter::once(first).chain(second).collect(),
        }
    }
}

impl<T> TryFrom<Vec<Container<T>>> for Layer<T> {
    type Error = StowageError;

    fn try_from(containers: Vec<Container<T>>) -> Result<Self> {
        let size = validate_layer(&containers)?;
        let mut containers = containers.into_iter();
        match (size, containers.next()) {
            (ContainerSize::Long, Some(c)) => Ok(Self::Long(c)),
            (ContainerSize::Short, Some(first)) => Ok(Self::Short(first, containers.next())),
            (_, None) => Err(StowageError::LayerExpected {
                found: "an empty layer",
            }),
        }
    }
}

/// What a caller hands to [`ContainerStack::add`](crate::stack::ContainerStack::add).
///
/// Only [`Placement::Layer`] is accepted. A bare container is rejected so
/// that callers state explicitly which containers travel together.
#[derive(Debug)]
pub enum Placement<T> {
    /// A single container that was not wrapped in a layer.
    Single(Container<T>),
    /// An ordered list of containers forming one layer.
    Layer(Vec<Container<T>>),
}

impl<T> Placement<T> {
    /// Unwraps the layer's containers.
    ///
    /// # Errors
    ///
    /// Returns [`StowageError::LayerExpected`] for [`Placement::Single`].
    pub fn into_containers(self) -> Result<Vec<Container<T>>> {
        match self {
            Self::Single(_) => Err(StowageError::LayerExpected {
                found: "a single container",
            }),
            Self::Layer(containers) => Ok(containers),
        }
    }
}

impl<T> From<Container<T>> for Placement<T> {
    fn from(container: Container<T>) -> Self {
        Self::Single(container)
    }
}

impl<T> From<Vec<Container<T>>> for Placement<T> {
    fn from(containers: Vec<Container<T>>) -> Self {
        Self::Layer(containers)
    }
}

/// Checks that `containers` can form one layer and returns its size.
///
/// # Errors
///
/// Returns `LayerExpected` for an empty list and `SizeConflict` for mixed
/// sizes or too many containers.
pub fn validate_layer<T>(containers: &[Container<T>]) -> Result<ContainerSize> {
    let Some(first) = containers.first() else {
        return Err(StowageError::LayerExpected {
            found: "an empty layer",
        });
    };
    let size = first.size();
    if containers.iter().any(|c| c.size() != size) {
        return Err(StowageError::SizeConflict {
            reason: format!(
                "a layer can't mix {} and {} containers",
                ContainerSize::Long,
                ContainerSize::Short
            ),
        });
    }
    let capacity = if size.is_short() { MAX_SHORTS_PER_LAYER } else { 1 };
    if containers.len() > capacity {
        return Err(StowageError::SizeConflict {
            reason: format!(
                "a layer holds at most {capacity} {size} container(s), got {}",
                containers.len()
            ),
        });
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::ContainerFactory;

    #[test]
    fn single_long_forms_full_layer() {
        let factory = ContainerFactory::new();
        let layer = Layer::try_from(vec![factory.long(())]).unwrap();
        assert_eq!(layer.size(), ContainerSize::Long);
        assert!(layer.is_full());
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn single_short_is_not_full() {
        let factory = ContainerFactory::new();
        let layer = Layer::try_from(vec![factory.short(())]).unwrap();
        assert!(!layer.is_full());
        assert!(!layer.is_pair());
    }

    #[test]
    fn two_shorts_keep_insertion_order() {
        let factory = ContainerFactory::new();
        let a = factory.short(());
        let b = factory.short(());
        let expected = vec![a.id(), b.id()];
        let layer = Layer::try_from(vec![a, b]).unwrap();
        assert!(layer.is_full());
        assert!(layer.is_pair());
        assert_eq!(layer.ids(), expected);
    }

    #[test]
    fn empty_list_is_layer_expected() {
        let result = Layer::<()>::try_from(Vec::new());
        assert!(matches!(result, Err(StowageError::LayerExpected { .. })));
    }

    #[test]
    fn mixed_sizes_conflict() {
        let factory = ContainerFactory::new();
        let result = Layer::try_from(vec![factory.short(()), factory.long(())]);
        assert!(matches!(result, Err(StowageError::SizeConflict { .. })));
    }

    #[test]
    fn two_longs_conflict() {
        let factory = ContainerFactory::new();
        let result = Layer::try_from(vec![factory.long(()), factory.long(())]);
        assert!(matches!(result, Err(StowageError::SizeConflict { .. })));
    }

    #[test]
    fn three_shorts_conflict() {
        let factory = ContainerFactory::new();
        let shorts = (0..3).map(|_| factory.short(())).collect::<Vec<_>>();
        assert!(matches!(
            Layer::try_from(shorts),
            Err(StowageError::SizeConflict { .. })
        ));
    }

    #[test]
    fn single_placement_is_layer_expected() {
        let factory = ContainerFactory::new();
        let placement = Placement::from(factory.long(()));
        assert!(matches!(
            placement.into_containers(),
            Err(StowageError::LayerExpected {
                found: "a single container"
            })
        ));
    }

    #[test]
    fn into_containers_preserves_order() {
        let factory = ContainerFactory::new();
        let a = factory.short(());
        let b = factory.short(());
        let (ida, idb) = (a.id(), b.id());
        let layer = Layer::Short(a, Some(b));
        let ids: Vec<_> = layer.into_containers().iter().map(Container::id).collect();
        assert_eq!(ids, vec![ida, idb]);
    }
}
