//! Rendering helpers shared by the demonstration programs.
//!
//! Numerics live in [`fdspace`]; this crate only turns arrays into pictures.

pub mod plot;
