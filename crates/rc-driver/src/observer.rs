//! Controller observer trait for telemetry and logging.

use rc_core::Tick;

use crate::DriverOutput;

/// Callbacks invoked by
/// [`DriverController::update_all_with`][crate::DriverController::update_all_with].
///
/// Hooks run sequentially after every car has been evaluated, in ascending
/// `CarId` order, so an observer sees the same sequence with or without the
/// `parallel` feature.
///
/// # Example: intent counter
///
/// ```rust,ignore
/// struct Overtakes(usize);
///
/// impl DriverObserver for Overtakes {
///     fn on_decision(&mut self, _tick: Tick, out: &DriverOutput) {
///         if out.decision.base_intent.is_overtake() {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait DriverObserver {
    /// Called once per tick before any car is evaluated.
    fn on_tick_start(&mut self, _tick: Tick, _drivers: usize) {}

    /// Called once per evaluated AI car.
    fn on_decision(&mut self, _tick: Tick, _output: &DriverOutput) {}

    /// `evaluated` is the number of AI cars that produced an output.
    fn on_tick_end(&mut self, _tick: Tick, _evaluated: usize) {}
}

/// A [`DriverObserver`] that does nothing.
pub struct NoopObserver;

impl DriverObserver for NoopObserver {}
