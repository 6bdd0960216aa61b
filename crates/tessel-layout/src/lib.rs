// crates/tessel-layout/src/lib.rs
//! Constraint-based container layout.
//!
//! A [`Sizer`] measures its items bottom-up ([`Sizer::min_size`]) and then
//! distributes the rectangle it is given top-down ([`Sizer::set_dimension`]).
//! The arrangement rule is picked by [`SizerKind`].

pub mod box_sizer;
pub mod distribute;
pub mod flags;
pub mod flex_grid;
pub mod grid;
pub mod grid_bag;
pub mod item;
pub mod policy;
pub mod sizer;
pub mod wrap;

#[cfg(test)]
mod test_support;

pub use box_sizer::*;
pub use flags::*;
pub use flex_grid::{FlexGridLayout, FlexibleDirection, GrowableAxis, NonFlexibleGrowMode};
pub use grid::*;
pub use grid_bag::{CellSpan, GridBagLayout, GridPosition, GridSpan, DEFAULT_EMPTY_CELL_SIZE};
pub use item::*;
pub use policy::*;
pub use sizer::{Sizer, SizerId, SizerKind};
pub use wrap::*;

pub use tessel_core::{LayoutConfig, LayoutError, Orientation, Point, Rect, Result, Size, Widget, WidgetRef};
