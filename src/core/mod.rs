//! Core navigation engine: axis model, gesture classification, snap
//! resolution, spring animation and the controller that ties them together.
//!
//! Nothing in this module depends on any TUI or rendering crate, and nothing
//! in it performs I/O.

pub mod axis;
pub mod gesture;
pub mod grid;
pub mod nav;
pub mod projection;
pub mod snap;
pub mod spring;
