//! HSLA colors and their conversion to and from RGBA.
//!
//! Any type implementing [`Color`] can be turned into an [`Hsla`] through
//! [`HslaModel`] or [`Hsla::from_color`], and every [`Hsla`] is itself a
//! [`Color`].

mod color;
mod hsla;
mod parse;

pub use color::{Color, HslaModel, Model, Rgba, expand, narrow};
pub use hsla::Hsla;
pub use parse::ParseHslaError;
