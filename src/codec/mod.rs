//! Image file formats.

pub mod bmp;

pub use bmp::{decode, encode};
