//! Splash Core - Foundational types for the Splash particle engine
//!
//! This crate provides the types every other Splash crate depends on:
//! - `BurstId` - Identifiers for spawned particle bursts
//! - `Vec3`, `Color` - Spatial and color values
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{Result, SplashError};
pub use id::BurstId;
pub use types::{Color, Vec3};
