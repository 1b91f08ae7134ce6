//! Ticks registered systems once per frame

use crate::clock::FrameClock;
use crate::system::RuntimeSystem;
use splash_core::Result;

/// Owns the frame clock and the systems it drives
pub struct SystemRunner {
    pub clock: FrameClock,
    systems: Vec<Box<dyn RuntimeSystem>>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self {
            clock: FrameClock::new(),
            systems: Vec::new(),
        }
    }

    /// Initialize `system` and append it to the update order
    pub fn register(&mut self, mut system: Box<dyn RuntimeSystem>) -> Result<()> {
        system.initialize()?;
        log::debug!(target: "splash::runtime", "registered system `{}`", system.name());
        self.systems.push(system);
        Ok(())
    }

    /// Tick the wall clock and update every system
    pub fn frame(&mut self) -> Result<f64> {
        let dt = self.clock.tick();
        self.update_all(dt)?;
        Ok(dt)
    }

    /// Tick the clock by an explicit delta and update every system
    pub fn frame_with(&mut self, elapsed: f64) -> Result<f64> {
        let dt = self.clock.tick_with(elapsed);
        self.update_all(dt)?;
        Ok(dt)
    }

    fn update_all(&mut self, dt: f64) -> Result<()> {
        for system in &mut self.systems {
            system.update(dt).inspect_err(|e| {
                log::warn!(target: "splash::runtime", "system `{}` failed: {e}", system.name());
            })?;
        }
        Ok(())
    }

    /// Shut every system down in reverse registration order
    pub fn shutdown(&mut self) -> Result<()> {
        for mut system in self.systems.drain(..).rev() {
            system.shutdown()?;
        }
        Ok(())
    }

    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}
