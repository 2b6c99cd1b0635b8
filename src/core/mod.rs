/*!
 * Core Module
 * Shared types used across the simulator
 */

pub mod types;

pub use types::{Address, Pid, Size};
