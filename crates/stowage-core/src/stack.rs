//! The layered container stack.
//!
//! Containers are added and removed a layer at a time, with two exceptions
//! for short containers: a lone short container on top can be joined by a
//! second one, and a pair of short containers can be peeled one at a time.
//! Every operation is all-or-nothing; a failed add or remove leaves the
//! stack untouched.

use stowage_common::config::StackConfig;
use stowage_common::constants::DEFAULT_MAX_HEIGHT;
use stowage_common::error::{Result, StowageError};
use stowage_common::types::{ContainerId, ContainerSize};

use crate::container::Container;
use crate::layer::{Layer, Placement, validate_layer};

/// How much of the top layer [`ContainerStack::remove`] takes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemoveMode {
    /// Take the whole top layer, except from a pair of short containers,
    /// where only the most recently added one is taken.
    #[default]
    Top,
    /// Take both containers of a short pair.
    Pair,
}

#[derive(Debug)]
enum StackState<T> {
    Empty,
    /// Bottom to top; never empty.
    Layers(Vec<Layer<T>>),
}

enum AddPlan {
    NewLayer,
    JoinTop,
}

/// A vertical stack of container layers with a bounded height.
#[derive(Debug)]
pub struct ContainerStack<T> {
    state: StackState<T>,
    max_height: usize,
}

impl<T> ContainerStack<T> {
    /// Creates an empty stack with the default height bound of 10 layers.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: StackState::Empty,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }

    /// Creates an empty stack holding at most `max_height` layers.
    ///
    /// # Errors
    ///
    /// Returns [`StowageError::InvalidMaxHeight`] if `max_height` is zero.
    pub const fn with_max_height(max_height: usize) -> Result<Self> {
        if max_height == 0 {
            return Err(StowageError::InvalidMaxHeight);
        }
        Ok(Self {
            state: StackState::Empty,
            max_height,
        })
    }

    /// Creates an empty stack from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StowageError::InvalidMaxHeight`] if the configured height
    /// is zero.
    pub const fn from_config(config: &StackConfig) -> Result<Self> {
        Self::with_max_height(config.max_height)
    }

    /// Returns the configured height bound.
    #[must_use]
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Returns the number of layers.
    #[must_use]
    pub fn height(&self) -> usize {
        self.layers().len()
    }

    /// Returns the number of containers across all layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers().iter().map(Layer::len).sum()
    }

    /// Returns `true` if the stack holds no containers.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.state, StackState::Empty)
    }

    /// Returns `false` only when the top layer holds a lone short container.
    ///
    /// An empty stack counts as having a full top layer: the next container
    /// must start a new layer.
    #[must_use]
    pub fn is_top_layer_full(&self) -> bool {
        self.top_layer().is_none_or(Layer::is_full)
    }

    /// Returns `true` once every layer is in use.
    #[must_use]
    pub fn max_height_reached(&self) -> bool {
        self.height() == self.max_height
    }

    /// Returns `true` if no container of any size can be added.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.max_height_reached() && self.is_top_layer_full()
    }

    /// Returns the layers, bottom first.
    #[must_use]
    pub fn layers(&self) -> &[Layer<T>] {
        match &self.state {
            StackState::Empty => &[],
            StackState::Layers(layers) => layers.as_slice(),
        }
    }

    /// Returns the top layer, if any.
    #[must_use]
    pub fn top_layer(&self) -> Option<&Layer<T>> {
        self.layers().last()
    }

    /// Returns the container ids of every layer, bottom first.
    #[must_use]
    pub fn layout(&self) -> Vec<Vec<ContainerId>> {
        self.layers().iter().map(Layer::ids).collect()
    }

    /// Returns `true` if the given container sits anywhere in the stack.
    #[must_use]
    pub fn contains(&self, id: ContainerId) -> bool {
        self.layers().iter().any(|layer| layer.contains(id))
    }

    /// Checks whether `incoming` could be added, without adding it.
    ///
    /// # Errors
    ///
    /// Returns the same error [`add`](Self::add) would return.
    pub fn check_add(&self, incoming: &[Container<T>]) -> Result<()> {
        self.plan_add(incoming).map(|_| ())
    }

    /// Adds a layer of containers on top of the stack.
    ///
    /// A single short container joins a lone short container on top;
    /// anything else starts a new layer. On error the placement is dropped
    /// and the stack is unchanged; use [`check_add`](Self::check_add) first
    /// to keep ownership of rejected containers.
    ///
    /// # Errors
    ///
    /// - `LayerExpected` if given a bare container or an empty list.
    /// - `SizeConflict` if the containers cannot form one layer, or cannot
    ///   share the top layer with the short container already there.
    /// - `StackTooTall` if the stack is full.
    pub fn add(&mut self, placement: impl Into<Placement<T>>) -> Result<()> {
        let containers = placement.into().into_containers()?;
        match self.plan_add(&containers)? {
            AddPlan::NewLayer => {
                let layer = Layer::try_from(containers)?;
                tracing::debug!(
                    ids = ?layer.ids(),
                    height = self.height() + 1,
                    "layer added"
                );
                self.push_layer(layer);
            }
            AddPlan::JoinTop => {
                let mut containers = containers.into_iter();
                match (containers.next(), containers.next()) {
                    (Some(second), None) => self.join_top(second)?,
                    _ => return Err(join_conflict()),
                }
            }
        }
        Ok(())
    }

    /// Adds a single container as a layer of its own, or beside a lone
    /// short container on top.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    pub fn push(&mut self, container: Container<T>) -> Result<()> {
        self.add(vec![container])
    }

    /// Removes containers from the top of the stack.
    ///
    /// Returns the removed containers in their original insertion order.
    ///
    /// # Errors
    ///
    /// - `StackEmpty` if there is nothing to remove.
    /// - `LayerHalfFull` if a pair is requested from a lone short container.
    /// - `PairExpected` if a pair is requested from a long container.
    pub fn remove(&mut self, mode: RemoveMode) -> Result<Vec<Container<T>>> {
        let StackState::Layers(layers) = &mut self.state else {
            return Err(StowageError::StackEmpty);
        };
        match (mode, layers.last_mut()) {
            (_, None) => return Err(StowageError::StackEmpty),
            (RemoveMode::Pair, Some(Layer::Short(_, None))) => {
                return Err(StowageError::LayerHalfFull);
            }
            (RemoveMode::Pair, Some(Layer::Long(_))) => return Err(StowageError::PairExpected),
            (RemoveMode::Top, Some(Layer::Short(_, second @ Some(_)))) => {
                let peeled: Vec<_> = second.take().into_iter().collect();
                tracing::debug!(ids = ?ids_of(&peeled), "short container peeled from pair");
                return Ok(peeled);
            }
            _ => {}
        }

        let Some(layer) = layers.pop() else {
            return Err(StowageError::StackEmpty);
        };
        if layers.is_empty() {
            self.state = StackState::Empty;
        }
        let removed = layer.into_containers();
        tracing::debug!(
            ids = ?ids_of(&removed),
            height = self.height(),
            "layer removed"
        );
        Ok(removed)
    }

    /// Removes the single container [`RemoveMode::Top`] takes.
    ///
    /// # Errors
    ///
    /// Returns `StackEmpty` if there is nothing to remove.
    pub fn pop(&mut self) -> Result<Container<T>> {
        self.remove(RemoveMode::Top)?
            .pop()
            .ok_or(StowageError::StackEmpty)
    }

    fn plan_add(&self, incoming: &[Container<T>]) -> Result<AddPlan> {
        let size = validate_layer(incoming)?;
        if self.is_full() {
            return Err(StowageError::StackTooTall {
                max_height: self.max_height,
            });
        }
        if self.is_top_layer_full() {
            return Ok(AddPlan::NewLayer);
        }
        match (size, incoming.len()) {
            (ContainerSize::Short, 1) => Ok(AddPlan::JoinTop),
            (ContainerSize::Short, n) => Err(StowageError::SizeConflict {
                reason: format!(
                    "top layer has room for one more {} container, got {n}",
                    ContainerSize::Short
                ),
            }),
            (ContainerSize::Long, _) => Err(StowageError::SizeConflict {
                reason: format!(
                    "can't stack a {} container beside a {} container",
                    ContainerSize::Long,
                    ContainerSize::Short
                ),
            }),
        }
    }

    /// Places `second` beside the lone short container on top. Fails
    /// without touching the stack if the top layer has no free slot.
    fn join_top(&mut self, second: Container<T>) -> Result<()> {
        if !second.is_short() {
            return Err(join_conflict());
        }
        let Some(Layer::Short(first, slot @ None)) = self.top_layer_mut() else {
            return Err(join_conflict());
        };
        tracing::debug!(
            first = %first.id(),
            second = %second.id(),
            "short container joined top layer"
        );
        *slot = Some(second);
        Ok(())
    }

    fn top_layer_mut(&mut self) -> Option<&mut Layer<T>> {
        match &mut self.state {
            StackState::Empty => None,
            StackState::Layers(layers) => layers.last_mut(),
        }
    }

    fn push_layer(&mut self, layer: Layer<T>) {
        if let StackState::Layers(layers) = &mut self.state {
            layers.push(layer);
        } else {
            self.state = StackState::Layers(vec![layer]);
        }
    }
}

impl<T> Default for ContainerStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn ids_of<T>(containers: &[Container<T>]) -> Vec<ContainerId> {
    containers.iter().map(Container::id).collect()
}

fn join_conflict() -> StowageError {
    StowageError::SizeConflict {
        reason: format!(
            "the top layer only has room for one more {} container",
            ContainerSize::Short
        ),
    }
}
