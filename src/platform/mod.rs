//! Platform abstraction layer
//!
//! The simulation polls input through `InputSource`; the browser host feeds
//! key events into a `KeyboardInput`.

pub mod input;

pub use input::{InputSource, KeyboardInput};
