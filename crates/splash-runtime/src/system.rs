//! Runtime system trait

use splash_core::Result;

/// A system that can be ticked by the frame loop
///
/// Systems are updated once per frame in registration order.
pub trait RuntimeSystem {
    /// Called once when the system is first registered
    fn initialize(&mut self) -> Result<()>;

    /// Called once per frame with the seconds elapsed since the previous frame
    fn update(&mut self, dt: f64) -> Result<()>;

    /// Called when the system is being shut down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
