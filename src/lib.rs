// src/lib.rs
//! Layout descriptions driving the `tessel-layout` demo binary.

pub mod description;

pub use description::{build, parse, DemoWidget, Node, Scene};
