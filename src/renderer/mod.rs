//! Render-facing view of the simulation
//!
//! The draw layer (window, shaders, mesh buffers) lives outside this crate.
//! After each tick it reads one `RenderInstance` per entity and nothing else.

pub mod instance;

pub use instance::{RenderInstance, model_matrix, snapshot};
