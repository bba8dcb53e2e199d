//! Core identifiers and value types shared across the pipeline.

mod artifact;
mod stage;
mod turn;

pub use artifact::{Artifact, CodeModule};
pub use stage::{Role, RunStatus, Stage};
pub use turn::Turn;
