//! A crane that transfers single containers between stacks and its spreader.
//!
//! A pickup lowers the spreader onto the stack, couples, and lifts; only
//! then does the container leave the stack. A put-down lowers and
//! decouples; only then does the container join the stack. Both transfers
//! are validated before the first step starts, so a transfer that would
//! fail costs no time and changes nothing.

use std::future::Future;
use std::time::Duration;

use stowage_common::config::CraneConfig;
use stowage_common::constants::{
    COUPLING_TIME, DECOUPLING_TIME, DEFAULT_LIFT_TIME_MS, DEFAULT_LOWER_TIME_MS,
};
use stowage_common::error::{Result, StowageError};
use stowage_core::container::Container;
use stowage_core::stack::ContainerStack;
use tokio::time::Instant;

use crate::hoist::Hoist;
use crate::kind::CraneKind;
use crate::report::{TransferKind, TransferReport};

/// Per-crane hoisting durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CraneTimings {
    /// Time to hoist the spreader clear of the stack.
    pub lift_time: Duration,
    /// Time to lower the spreader onto the stack.
    pub lower_time: Duration,
}

impl Default for CraneTimings {
    fn default() -> Self {
        Self {
            lift_time: Duration::from_millis(DEFAULT_LIFT_TIME_MS),
            lower_time: Duration::from_millis(DEFAULT_LOWER_TIME_MS),
        }
    }
}

impl From<&CraneConfig> for CraneTimings {
    fn from(config: &CraneConfig) -> Self {
        Self {
            lift_time: config.lift_time(),
            lower_time: config.lower_time(),
        }
    }
}

/// A crane holding at most one container at a time.
#[derive(Debug)]
pub struct Crane<T> {
    kind: CraneKind,
    timings: CraneTimings,
    coupled: Option<Container<T>>,
}

impl<T> Crane<T> {
    /// Creates an empty yard crane with default timings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timings(CraneTimings::default())
    }

    /// Creates an empty yard crane with the given timings.
    #[must_use]
    pub const fn with_timings(timings: CraneTimings) -> Self {
        Self {
            kind: CraneKind::Yard,
            timings,
            coupled: None,
        }
    }

    /// Creates an empty yard crane from configuration.
    #[must_use]
    pub fn from_config(config: &CraneConfig) -> Self {
        Self::with_timings(config.into())
    }

    /// Sets the crane's kind.
    #[must_use]
    pub const fn kind_of(mut self, kind: CraneKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the crane's kind.
    #[must_use]
    pub const fn kind(&self) -> CraneKind {
        self.kind
    }

    /// Returns the crane's timings.
    #[must_use]
    pub const fn timings(&self) -> CraneTimings {
        self.timings
    }

    /// Returns the container on the spreader, if any.
    #[must_use]
    pub const fn coupled_container(&self) -> Option<&Container<T>> {
        self.coupled.as_ref()
    }

    /// Returns `true` while the crane holds a container.
    #[must_use]
    pub const fn is_coupled(&self) -> bool {
        self.coupled.is_some()
    }

    /// Shortest time a pickup can take.
    #[must_use]
    pub fn pickup_time(&self) -> Duration {
        self.timings.lower_time + COUPLING_TIME + self.timings.lift_time
    }

    /// Shortest time a put-down can take.
    #[must_use]
    pub fn put_down_time(&self) -> Duration {
        self.timings.lower_time + DECOUPLING_TIME
    }

    /// Takes the most recently added container off the top of `stack`.
    ///
    /// Steps: lower, couple, lift. The container moves from the stack onto
    /// the spreader only after the lift completes.
    ///
    /// # Errors
    ///
    /// Returns `CraneOccupied` if the crane already holds a container and
    /// `StackEmpty` if there is nothing to pick up. Neither the crane nor
    /// the stack is touched in those cases.
    pub async fn pickup(&mut self, stack: &mut ContainerStack<T>) -> Result<TransferReport> {
        if let Some(held) = &self.coupled {
            return Err(StowageError::CraneOccupied { held: held.id() });
        }
        let Some(top) = stack.top_layer() else {
            return Err(StowageError::StackEmpty);
        };
        let target = top.latest().id();
        tracing::debug!(crane = %self.kind, container = %target, "pickup started");

        let started_at = chrono::Utc::now();
        let clock = Instant::now();
        self.lower().await;
        self.couple().await;
        self.lift().await;

        let container = stack.pop()?;
        let report = self.report(&container, TransferKind::Pickup, started_at, clock);
        self.coupled = Some(container);
        tracing::info!(
            crane = %self.kind,
            container = %report.container,
            elapsed = ?report.elapsed,
            "container picked up"
        );
        Ok(report)
    }

    /// Sets the held container down on top of `stack`.
    ///
    /// Steps: lower, decouple. The container moves from the spreader onto
    /// the stack only after decoupling completes.
    ///
    /// # Errors
    ///
    /// Returns `CraneEmpty` if the crane holds nothing, or whatever error
    /// [`ContainerStack::add`] would raise for the held container. Neither
    /// the crane nor the stack is touched in those cases.
    pub async fn put_down(&mut self, stack: &mut ContainerStack<T>) -> Result<TransferReport> {
        let Some(held) = &self.coupled else {
            return Err(StowageError::CraneEmpty);
        };
        stack.check_add(std::slice::from_ref(held))?;
        tracing::debug!(crane = %self.kind, container = %held.id(), "put-down started");

        let started_at = chrono::Utc::now();
        let clock = Instant::now();
        self.lower().await;
        self.decouple().await;

        let container = self.coupled.take().ok_or(StowageError::CraneEmpty)?;
        if let Err(err) = stack.check_add(std::slice::from_ref(&container)) {
            self.coupled = Some(container);
            return Err(err);
        }
        let report = self.report(&container, TransferKind::PutDown, started_at, clock);
        // Repeats the check that just passed; `stack` is exclusively borrowed.
        stack.push(container)?;
        tracing::info!(
            crane = %self.kind,
            container = %report.container,
            elapsed = ?report.elapsed,
            "container put down"
        );
        Ok(report)
    }

    fn report(
        &self,
        container: &Container<T>,
        kind: TransferKind,
        started_at: chrono::DateTime<chrono::Utc>,
        clock: Instant,
    ) -> TransferReport {
        TransferReport {
            container: container.id(),
            kind,
            crane: self.kind,
            started_at,
            elapsed: clock.elapsed(),
        }
    }
}

impl<T> Default for Crane<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Hoist for Crane<T> {
    fn couple(&self) -> impl Future<Output = ()> + Send {
        step(self.kind, "couple", COUPLING_TIME)
    }

    fn decouple(&self) -> impl Future<Output = ()> + Send {
        step(self.kind, "decouple", DECOUPLING_TIME)
    }

    fn lift(&self) -> impl Future<Output = ()> + Send {
        step(self.kind, "lift", self.timings.lift_time)
    }

    fn lower(&self) -> impl Future<Output = ()> + Send {
        step(self.kind, "lower", self.timings.lower_time)
    }
}

async fn step(kind: CraneKind, name: &'static str, duration: Duration) {
    tracing::debug!(crane = %kind, step = name, ?duration, "crane step");
    tokio::time::sleep(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use stowage_core::factory::ContainerFactory;

    #[test]
    fn default_timings_are_one_hundred_millis() {
        let crane = Crane::<()>::new();
        assert_eq!(crane.timings().lift_time, Duration::from_millis(100));
        assert_eq!(crane.timings().lower_time, Duration::from_millis(100));
        assert_eq!(crane.pickup_time(), Duration::from_millis(300));
        assert_eq!(crane.put_down_time(), Duration::from_millis(200));
    }

    #[test]
    fn timings_follow_config() {
        let config = CraneConfig {
            lift_time_ms: 40,
            lower_time_ms: 60,
        };
        let crane = Crane::<()>::from_config(&config);
        assert_eq!(crane.pickup_time(), Duration::from_millis(200));
    }

    #[test]
    fn new_crane_holds_nothing() {
        let crane = Crane::<()>::new().kind_of(CraneKind::BoatLoading);
        assert!(crane.coupled_container().is_none());
        assert_eq!(crane.kind(), CraneKind::BoatLoading);
    }

    #[tokio::test(start_paused = true)]
    async fn pickup_moves_top_container_onto_crane() {
        let factory = ContainerFactory::new();
        let mut stack = ContainerStack::new();
        let container = factory.long("steel");
        let id = container.id();
        stack.push(container).unwrap();

        let mut crane = Crane::new();
        let report = crane.pickup(&mut stack).await.unwrap();

        assert_eq!(report.container, id);
        assert_eq!(report.kind, TransferKind::Pickup);
        assert_eq!(crane.coupled_container().map(Container::id), Some(id));
        assert!(stack.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn pickup_takes_at_least_lower_couple_and_lift() {
        let factory = ContainerFactory::new();
        let mut stack = ContainerStack::new();
        stack.push(factory.short(())).unwrap();

        let mut crane = Crane::with_timings(CraneTimings {
            lift_time: Duration::from_millis(250),
            lower_time: Duration::from_millis(150),
        });
        let start = Instant::now();
        let report = crane.pickup(&mut stack).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(500));
        assert!(report.elapsed >= crane.pickup_time());
    }

    #[tokio::test(start_paused = true)]
    async fn pickup_from_pair_takes_only_latest_short() {
        let factory = ContainerFactory::new();
        let mut stack = ContainerStack::new();
        let a = factory.short(());
        let b = factory.short(());
        let (ida, idb) = (a.id(), b.id());
        stack.push(a).unwrap();
        stack.push(b).unwrap();

        let mut crane = Crane::new();
        let _ = crane.pickup(&mut stack).await.unwrap();

        assert_eq!(crane.coupled_container().map(Container::id), Some(idb));
        assert_eq!(stack.layout(), vec![vec![ida]]);
    }

    #[tokio::test(start_paused = true)]
    async fn pickup_from_empty_stack_costs_no_time() {
        let mut stack = ContainerStack::<()>::new();
        let mut crane = Crane::new();
        let start = Instant::now();

        let result = crane.pickup(&mut stack).await;

        assert!(matches!(result, Err(StowageError::StackEmpty)));
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(!crane.is_coupled());
    }

    #[tokio::test(start_paused = true)]
    async fn pickup_while_coupled_is_rejected() {
        let factory = ContainerFactory::new();
        let mut stack = ContainerStack::new();
        stack.push(factory.long(())).unwrap();
        stack.push(factory.long(())).unwrap();

        let mut crane = Crane::new();
        let first = crane.pickup(&mut stack).await.unwrap();
        let result = crane.pickup(&mut stack).await;

        assert!(matches!(
            result,
            Err(StowageError::CraneOccupied { held }) if held == first.container
        ));
        assert_eq!(stack.height(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn put_down_moves_container_onto_stack() {
        let factory = ContainerFactory::new();
        let mut source = ContainerStack::new();
        let mut target = ContainerStack::new();
        let container = factory.long(());
        let id = container.id();
        source.push(container).unwrap();

        let mut crane = Crane::new();
        let _ = crane.pickup(&mut source).await.unwrap();
        let start = Instant::now();
        let report = crane.put_down(&mut target).await.unwrap();

        assert!(start.elapsed() >= crane.put_down_time());
        assert_eq!(report.kind, TransferKind::PutDown);
        assert!(crane.coupled_container().is_none());
        assert_eq!(target.layout(), vec![vec![id]]);
    }

    #[tokio::test(start_paused = true)]
    async fn put_down_without_container_is_rejected() {
        let mut stack = ContainerStack::<()>::new();
        let mut crane = Crane::new();
        assert!(matches!(
            crane.put_down(&mut stack).await,
            Err(StowageError::CraneEmpty)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn put_down_conflict_keeps_container_on_crane() {
        let factory = ContainerFactory::new();
        let mut source = ContainerStack::new();
        let mut target = ContainerStack::new();
        let long = factory.long(());
        let long_id = long.id();
        source.push(long).unwrap();
        target.push(factory.short(())).unwrap();

        let mut crane = Crane::new();
        let _ = crane.pickup(&mut source).await.unwrap();
        let start = Instant::now();
        let result = crane.put_down(&mut target).await;

        assert!(matches!(result, Err(StowageError::SizeConflict { .. })));
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(crane.coupled_container().map(Container::id), Some(long_id));
        assert_eq!(target.len(), 1);
    }
}
