//! Procedural authoring for the island surface and the sky backdrop.

pub mod island;
pub mod sky;

pub use island::*;
pub use sky::*;
