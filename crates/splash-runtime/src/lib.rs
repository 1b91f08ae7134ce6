//! Splash Runtime - Frame loop infrastructure
//!
//! Provides the pieces that drive simulation once per rendered frame:
//! - `FrameClock` — variable-delta wall clock with a frame-time clamp
//! - `RuntimeSystem` — trait for systems ticked by the frame loop
//! - `SystemRunner` — ticks the clock and every registered system in order

mod clock;
mod runner;
mod system;

pub use clock::FrameClock;
pub use runner::SystemRunner;
pub use system::RuntimeSystem;
