// crates/tessel-layout/src/grid.rs
//! Uniform grid: every cell has the size of the largest item.

use tessel_core::{LayoutError, Orientation, Rect, Result, Size};
use tracing::warn;

use crate::sizer::LayoutStrategy;
use crate::{Sizer, SizerItem, SizerKind};

/// Row/column parameters of a grid. A zero count is derived from the item count.
#[derive(Debug, Clone)]
pub struct GridLayout {
    rows: usize,
    cols: usize,
    hgap: i32,
    vgap: i32,
}

impl GridLayout {
    /// Fails when both counts are zero or a gap is negative.
    pub fn new(rows: usize, cols: usize, gap: Size) -> Result<Self> {
        if rows == 0 && cols == 0 {
            return Err(LayoutError::InvalidArgument {
                name: "rows and cols",
                value: 0,
            });
        }
        let mut grid = Self::unbounded(gap)?;
        grid.rows = rows;
        grid.cols = cols;
        Ok(grid)
    }

    /// Grid whose shape is decided by item placement rather than by counts.
    pub(crate) fn unbounded(gap: Size) -> Result<Self> {
        let gap = LayoutError::check_size("gap", gap)?;
        Ok(Self {
            rows: 0,
            cols: 0,
            hgap: gap.width,
            vgap: gap.height,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn hgap(&self) -> i32 {
        self.hgap
    }

    pub fn vgap(&self) -> i32 {
        self.vgap
    }

    /// Gap between tracks laid out along `axis`: columns for horizontal, rows for vertical.
    pub fn gap(&self, axis: Orientation) -> i32 {
        match axis {
            Orientation::Horizontal => self.hgap,
            Orientation::Vertical => self.vgap,
        }
    }

    /// Rows and columns actually used for `count` items.
    ///
    /// When both counts are fixed and the items do not fit, extra rows are added.
    pub fn effective_rows_cols(&self, count: usize) -> (usize, usize) {
        match (self.rows, self.cols) {
            (0, 0) => (0, 0),
            (rows, 0) => (rows, count.div_ceil(rows)),
            (0, cols) => (count.div_ceil(cols), cols),
            (rows, cols) if count > rows * cols => (count.div_ceil(cols), cols),
            (rows, cols) => (rows, cols),
        }
    }

    fn overflows(&self, count: usize) -> bool {
        self.rows > 0 && self.cols > 0 && count > self.rows * self.cols
    }
}

/// Sum of `count` tracks of `track` pixels with `gap` between neighbours.
fn span(count: usize, track: i32, gap: i32) -> i32 {
    if count == 0 {
        0
    } else {
        count as i32 * track + (count as i32 - 1) * gap
    }
}

impl LayoutStrategy for GridLayout {
    fn calc_min(&self, items: &[SizerItem]) -> Size {
        let (rows, cols) = self.effective_rows_cols(items.len());
        if rows == 0 || cols == 0 {
            return Size::ZERO;
        }
        let cell = items
            .iter()
            .map(SizerItem::contribution)
            .fold(Size::ZERO, Size::max);
        Size::new(
            span(cols, cell.width, self.hgap),
            span(rows, cell.height, self.vgap),
        )
    }

    fn arrange(&mut self, items: &mut [SizerItem], rect: Rect) {
        let (rows, cols) = self.effective_rows_cols(items.len());
        if rows == 0 || cols == 0 {
            return;
        }
        if self.overflows(items.len()) {
            warn!(
                rows = self.rows,
                cols = self.cols,
                items = items.len(),
                "too many items for grid, adding rows"
            );
        }

        let width = ((rect.width() - (cols as i32 - 1) * self.hgap) / cols as i32).max(0);
        let height = ((rect.height() - (rows as i32 - 1) * self.vgap) / rows as i32).max(0);
        for (index, item) in items.iter_mut().enumerate() {
            let (row, col) = ((index / cols) as i32, (index % cols) as i32);
            let cell = Rect::new(
                rect.x() + col * (width + self.hgap),
                rect.y() + row * (height + self.vgap),
                width,
                height,
            );
            if item.is_shown() {
                item.set_dimension(cell, None);
            } else if item.takes_space() {
                item.reserve(cell);
            }
        }
    }
}

impl Sizer {
    /// Uniform grid. A zero `rows` or `cols` is derived from the item count.
    pub fn new_grid(rows: usize, cols: usize, gap: Size) -> Result<Self> {
        Ok(Sizer::new(SizerKind::Grid(GridLayout::new(rows, cols, gap)?)))
    }

    /// Configured row count of grid kinds.
    pub fn rows(&self) -> Option<usize> {
        self.kind.grid().map(GridLayout::rows)
    }

    pub fn cols(&self) -> Option<usize> {
        self.kind.grid().map(GridLayout::cols)
    }

    pub fn hgap(&self) -> Option<i32> {
        self.kind.grid().map(GridLayout::hgap)
    }

    pub fn vgap(&self) -> Option<i32> {
        self.kind.grid().map(GridLayout::vgap)
    }

    /// Rows and columns in use right now, for every grid kind.
    pub fn effective_rows_cols(&self) -> Option<(usize, usize)> {
        match &self.kind {
            SizerKind::Grid(grid) => Some(grid.effective_rows_cols(self.items.len())),
            SizerKind::FlexGrid(flex) => Some(flex.grid.effective_rows_cols(self.items.len())),
            SizerKind::GridBag(_) => Some(crate::grid_bag::dimensions(&self.items)),
            _ => None,
        }
    }

    pub fn effective_rows_count(&self) -> Option<usize> {
        self.effective_rows_cols().map(|(rows, _)| rows)
    }

    pub fn effective_cols_count(&self) -> Option<usize> {
        self.effective_rows_cols().map(|(_, cols)| cols)
    }

    /// Returns `Ok(false)` for non-grid kinds. Both counts can't become zero.
    pub fn set_rows(&mut self, rows: usize) -> Result<bool> {
        self.update_grid(|grid| {
            if rows == 0 && grid.cols == 0 {
                return Err(LayoutError::InvalidArgument { name: "rows", value: 0 });
            }
            grid.rows = rows;
            Ok(())
        })
    }

    pub fn set_cols(&mut self, cols: usize) -> Result<bool> {
        self.update_grid(|grid| {
            if cols == 0 && grid.rows == 0 {
                return Err(LayoutError::InvalidArgument { name: "cols", value: 0 });
            }
            grid.cols = cols;
            Ok(())
        })
    }

    pub fn set_hgap(&mut self, gap: i32) -> Result<bool> {
        let gap = LayoutError::check_non_negative("hgap", gap)?;
        self.update_grid(|grid| {
            grid.hgap = gap;
            Ok(())
        })
    }

    pub fn set_vgap(&mut self, gap: i32) -> Result<bool> {
        let gap = LayoutError::check_non_negative("vgap", gap)?;
        self.update_grid(|grid| {
            grid.vgap = gap;
            Ok(())
        })
    }

    fn update_grid(&mut self, update: impl FnOnce(&mut GridLayout) -> Result<()>) -> Result<bool> {
        let Some(grid) = self.kind.grid_mut() else {
            return Ok(false);
        };
        update(grid)?;
        self.invalidate();
        Ok(true)
    }
}
