// crates/tessel-layout/src/grid_bag.rs
//! Grid with explicit cell positions and spans.

use serde::{Deserialize, Serialize};
use tessel_core::{LayoutError, Orientation, Point, Rect, Result, Size};

use crate::distribute::split_by_weight;
use crate::flex_grid::{span_extent, track_total, Track};
use crate::sizer::LayoutStrategy;
use crate::{FlexGridLayout, GridLayout, ItemContent, ItemTarget, LayoutPolicy, Sizer, SizerItem, SizerKind};

/// Size given to rows and columns no item touches.
pub const DEFAULT_EMPTY_CELL_SIZE: Size = Size::new(10, 20);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Number of rows and columns an item covers, at least one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSpan {
    rows: usize,
    cols: usize,
}

impl Default for GridSpan {
    fn default() -> Self {
        Self { rows: 1, cols: 1 }
    }
}

impl GridSpan {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 {
            return Err(LayoutError::InvalidArgument { name: "row span", value: 0 });
        }
        if cols == 0 {
            return Err(LayoutError::InvalidArgument { name: "col span", value: 0 });
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}

/// Cells covered by a grid-bag item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CellSpan {
    pub position: GridPosition,
    pub span: GridSpan,
}

impl CellSpan {
    pub fn new(position: GridPosition, span: GridSpan) -> Self {
        Self { position, span }
    }

    /// One past the last covered row.
    pub fn end_row(&self) -> usize {
        self.position.row + self.span.rows
    }

    pub fn end_col(&self) -> usize {
        self.position.col + self.span.cols
    }

    pub fn contains(&self, position: GridPosition) -> bool {
        (self.position.row..self.end_row()).contains(&position.row)
            && (self.position.col..self.end_col()).contains(&position.col)
    }

    pub fn intersects(&self, other: &CellSpan) -> bool {
        self.position.row < other.end_row()
            && other.position.row < self.end_row()
            && self.position.col < other.end_col()
            && other.position.col < self.end_col()
    }
}

#[derive(Debug, Clone)]
pub struct GridBagLayout {
    pub(crate) flex: FlexGridLayout,
    empty_cell_size: Size,
}

impl GridBagLayout {
    pub fn new(gap: Size) -> Result<Self> {
        Ok(Self {
            flex: FlexGridLayout::new(GridLayout::unbounded(gap)?),
            empty_cell_size: DEFAULT_EMPTY_CELL_SIZE,
        })
    }

    pub fn empty_cell_size(&self) -> Size {
        self.empty_cell_size
    }

    /// Measures rows and columns from the placed items.
    ///
    /// Every row and column starts at the empty cell size and only grows, so
    /// placing an item can never shrink the grid. Items are fitted narrowest
    /// span first; a spanning item short of space spreads the shortfall evenly
    /// over the tracks it covers.
    fn measure(&self, items: &[SizerItem]) -> (Vec<Track>, Vec<Track>) {
        let (rows, cols) = dimensions(items);
        let mut row_tracks: Vec<Track> = vec![Some(self.empty_cell_size.height); rows];
        let mut col_tracks: Vec<Track> = vec![Some(self.empty_cell_size.width); cols];

        let placed: Vec<(CellSpan, Size)> = items
            .iter()
            .filter(|item| item.takes_space())
            .filter_map(|item| Some((item.placement()?, item.min_size_with_border())))
            .collect();
        let mut row_spans: Vec<Demand> = placed
            .iter()
            .map(|(cell, size)| Demand::new(cell.position.row, cell.span.rows, size.height))
            .collect();
        let mut col_spans: Vec<Demand> = placed
            .iter()
            .map(|(cell, size)| Demand::new(cell.position.col, cell.span.cols, size.width))
            .collect();
        fit_demands(&mut row_tracks, &mut row_spans, self.flex.grid.vgap());
        fit_demands(&mut col_tracks, &mut col_spans, self.flex.grid.hgap());
        (row_tracks, col_tracks)
    }
}

/// Extent one item asks of the tracks `start..start + len`.
struct Demand {
    start: usize,
    len: usize,
    need: i32,
}

impl Demand {
    fn new(start: usize, len: usize, need: i32) -> Self {
        Self { start, len, need }
    }
}

fn fit_demands(tracks: &mut [Track], demands: &mut [Demand], gap: i32) {
    // Stable: items of equal span keep insertion order.
    demands.sort_by_key(|demand| demand.len);
    for demand in demands.iter() {
        let covered = span_extent(tracks, demand.start, demand.len, gap);
        if demand.need <= covered {
            continue;
        }
        let end = (demand.start + demand.len).min(tracks.len());
        let shown: Vec<usize> = (demand.start..end).filter(|&index| tracks[index].is_some()).collect();
        let shares = split_by_weight(demand.need - covered, &vec![1; shown.len()]);
        for (index, share) in shown.into_iter().zip(shares) {
            tracks[index] = tracks[index].map(|size| size + share);
        }
    }
}

/// Rows and columns needed to hold every placed item.
pub(crate) fn dimensions(items: &[SizerItem]) -> (usize, usize) {
    items
        .iter()
        .filter_map(SizerItem::placement)
        .fold((0, 0), |(rows, cols), cell| {
            (rows.max(cell.end_row()), cols.max(cell.end_col()))
        })
}

fn find_at_position(items: &[SizerItem], position: GridPosition) -> Option<usize> {
    items
        .iter()
        .position(|item| item.placement().is_some_and(|cell| cell.contains(position)))
}

impl LayoutStrategy for GridBagLayout {
    fn calc_min(&self, items: &[SizerItem]) -> Size {
        let (rows, cols) = self.measure(items);
        Size::new(
            track_total(&cols, self.flex.grid.hgap()),
            track_total(&rows, self.flex.grid.vgap()),
        )
    }

    fn arrange(&mut self, items: &mut [SizerItem], rect: Rect) {
        let (rows, cols) = self.measure(items);
        self.flex.place_tracks(rows, cols, rect);
        for item in items.iter_mut() {
            let Some(cell) = item.placement() else {
                continue;
            };
            let rect = self.flex.span_rect(
                cell.position.row,
                cell.position.col,
                cell.span.rows,
                cell.span.cols,
            );
            if item.is_shown() {
                item.set_dimension(rect, None);
            } else if item.takes_space() {
                item.reserve(rect);
            }
        }
    }

    fn find_item_at_point(&self, items: &[SizerItem], point: Point) -> Option<usize> {
        let (row, col) = self.flex.cell_at_point(point)?;
        items.iter().position(|item| {
            item.is_shown()
                && item
                    .placement()
                    .is_some_and(|cell| cell.contains(GridPosition::new(row, col)))
        })
    }
}

impl Sizer {
    pub fn new_grid_bag(gap: Size) -> Result<Self> {
        Ok(Sizer::new(SizerKind::GridBag(GridBagLayout::new(gap)?)))
    }

    /// Adds an item at a cell. Overlaps are not rejected; use
    /// [`Sizer::check_span_for_intersection`] first when they matter.
    pub fn add_at(
        &mut self,
        content: impl Into<ItemContent>,
        position: GridPosition,
        span: GridSpan,
        policy: &LayoutPolicy,
    ) -> Result<&mut SizerItem> {
        let mut item = SizerItem::with_policy(content, policy)?;
        item.set_placement(Some(CellSpan::new(position, span)));
        self.add_item(item)
    }

    pub fn item_position<'a>(&self, target: impl Into<ItemTarget<'a>>) -> Option<GridPosition> {
        Some(self.get_item(target, false)?.placement()?.position)
    }

    pub fn item_span<'a>(&self, target: impl Into<ItemTarget<'a>>) -> Option<GridSpan> {
        Some(self.get_item(target, false)?.placement()?.span)
    }

    /// Moves an item. Fails without change when it is absent or would overlap another item.
    pub fn set_item_position<'a>(
        &mut self,
        target: impl Into<ItemTarget<'a>>,
        position: GridPosition,
    ) -> bool {
        let target = target.into();
        let span = self.item_span(target).unwrap_or_default();
        self.set_item_placement(target, CellSpan::new(position, span))
    }

    pub fn set_item_span<'a>(&mut self, target: impl Into<ItemTarget<'a>>, span: GridSpan) -> bool {
        let target = target.into();
        let Some(position) = self.item_position(target) else {
            return false;
        };
        self.set_item_placement(target, CellSpan::new(position, span))
    }

    fn set_item_placement(&mut self, target: ItemTarget<'_>, cell: CellSpan) -> bool {
        if self.get_item(target, false).is_none()
            || self.check_span_for_intersection(cell, Some(target))
        {
            return false;
        }
        match self.get_item_mut(target, false) {
            Some(item) => {
                item.set_placement(Some(cell));
                true
            }
            None => false,
        }
    }

    /// Item covering `position`, hidden or not.
    pub fn find_item_at_position(&self, position: GridPosition) -> Option<&SizerItem> {
        self.items.get(find_at_position(&self.items, position)?)
    }

    /// Whether the target overlaps any visible placed item other than itself and `exclude`.
    pub fn check_for_intersection<'a>(
        &self,
        target: impl Into<ItemTarget<'a>>,
        exclude: Option<ItemTarget<'_>>,
    ) -> bool {
        let target = target.into();
        let Some(item) = self.get_item(target, false) else {
            return false;
        };
        let Some(cell) = item.placement() else {
            return false;
        };
        let excluded = exclude.and_then(|exclude| self.get_item(exclude, false));
        self.span_overlaps(cell, |other| {
            std::ptr::eq(other, item) || excluded.is_some_and(|excluded| std::ptr::eq(other, excluded))
        })
    }

    /// Whether `cell` overlaps any visible placed item other than `exclude`.
    pub fn check_span_for_intersection(&self, cell: CellSpan, exclude: Option<ItemTarget<'_>>) -> bool {
        let excluded = exclude.and_then(|exclude| self.get_item(exclude, false));
        self.span_overlaps(cell, |other| excluded.is_some_and(|excluded| std::ptr::eq(other, excluded)))
    }

    fn span_overlaps(&self, cell: CellSpan, skip: impl Fn(&SizerItem) -> bool) -> bool {
        self.items.iter().any(|other| {
            !skip(other)
                && other.is_shown()
                && other.placement().is_some_and(|placed| placed.intersects(&cell))
        })
    }

    /// Size of one cell after the last arrange pass.
    pub fn cell_size(&self, row: usize, col: usize) -> Option<Size> {
        let SizerKind::GridBag(bag) = &self.kind else {
            return None;
        };
        let (heights, widths) = (bag.flex.row_heights(), bag.flex.col_widths());
        Some(Size::new(*widths.get(col)?, *heights.get(row)?))
    }

    pub fn empty_cell_size(&self) -> Option<Size> {
        match &self.kind {
            SizerKind::GridBag(bag) => Some(bag.empty_cell_size),
            _ => None,
        }
    }

    /// Returns `Ok(false)` for kinds other than grid bag.
    pub fn set_empty_cell_size(&mut self, size: Size) -> Result<bool> {
        let size = LayoutError::check_size("empty cell size", size)?;
        let SizerKind::GridBag(bag) = &mut self.kind else {
            return Ok(false);
        };
        bag.empty_cell_size = size;
        self.invalidate();
        Ok(true)
    }

    /// Gap along `axis` for every grid kind.
    pub fn gap(&self, axis: Orientation) -> Option<i32> {
        self.kind.grid().map(|grid| grid.gap(axis))
    }
}
