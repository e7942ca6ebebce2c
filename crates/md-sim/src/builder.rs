//! Fluent builder for constructing a [`Mall`].

use md_core::Layout;
use md_grid::{GatedCoordinator, LockCoordinator, LockStrategy};

use crate::{Mall, SimError, SimResult};

/// Fluent builder for [`Mall<C>`].
///
/// # Inputs
///
/// | Method                 | Default                         |
/// |------------------------|---------------------------------|
/// | `.layout(l)`           | *(required)*                    |
/// | `.parse_layout(text)`  | alternative to `.layout`        |
/// | `.coordinator(c)`      | [`GatedCoordinator`]            |
/// | `.strategy(s)`         | runtime-selected coordinator    |
///
/// # Example
///
/// ```rust,ignore
/// let mall = MallBuilder::new()
///     .parse_layout("XXXX\n----\nXXXX\n----")?
///     .coordinator(OrderedCoordinator)
///     .build()?;
/// let log = mall.run(&mut NoopObserver)?;
/// ```
pub struct MallBuilder<C: LockCoordinator> {
    layout:      Option<Layout>,
    coordinator: C,
}

impl MallBuilder<GatedCoordinator> {
    pub fn new() -> Self {
        Self {
            layout:      None,
            coordinator: GatedCoordinator::new(),
        }
    }
}

impl Default for MallBuilder<GatedCoordinator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: LockCoordinator> MallBuilder<C> {
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Parse the `X` / `-` text form and use it as the layout.
    pub fn parse_layout(self, text: &str) -> SimResult<Self> {
        let layout = Layout::parse(text)?;
        Ok(self.layout(layout))
    }

    /// Swap in a different coordinator type.
    pub fn coordinator<C2: LockCoordinator>(self, coordinator: C2) -> MallBuilder<C2> {
        MallBuilder {
            layout: self.layout,
            coordinator,
        }
    }

    /// Pick the coordinator at runtime.
    pub fn strategy(self, strategy: LockStrategy) -> MallBuilder<Box<dyn LockCoordinator>> {
        self.coordinator(strategy.coordinator())
    }

    pub fn build(self) -> SimResult<Mall<C>> {
        let layout = self
            .layout
            .ok_or_else(|| SimError::Config("no starting layout supplied".to_owned()))?;
        Ok(Mall::new(layout, self.coordinator))
    }
}
