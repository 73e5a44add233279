//! CLI library for testing purposes

pub mod inputs;

pub use inputs::{InputSpec, load_input, load_inputs, parse_input_spec};
