//! Simulation observer trait for progress reporting and data collection.

use md_core::{EventLog, Layout, MoveEvent};

/// Callbacks invoked by [`Mall::run`][crate::Mall::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// `on_event` runs on the collector thread, once per event in arrival
/// order, which is why `Mall::run` requires the observer to be `Send`.
///
/// # Example: event printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_event(&mut self, event: &MoveEvent) {
///         println!("{event}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before any worker is spawned.
    fn on_sim_start(&mut self, _layout: &Layout, _dwellers: usize) {}

    /// Called for every event as the collector receives it.
    fn on_event(&mut self, _event: &MoveEvent) {}

    /// Called once after every worker and the collector have finished.
    fn on_sim_end(&mut self, _log: &EventLog) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
