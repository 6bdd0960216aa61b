// crates/tessel-layout/src/flex_grid.rs
//! Grid with independently sized rows and columns and growable tracks.

use serde::{Deserialize, Serialize};
use tessel_core::{Orientation, Point, Rect, Result, Size};
use tracing::trace;

use crate::distribute::apply_delta;
use crate::sizer::LayoutStrategy;
use crate::{GridLayout, Sizer, SizerItem, SizerKind};

/// Size of a row or column. `None` is a collapsed track: it holds no visible
/// item, takes no space and has no gap next to it.
pub(crate) type Track = Option<i32>;

/// Axes along which growable tracks take extra space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexibleDirection {
    Horizontal,
    Vertical,
    #[default]
    Both,
}

impl FlexibleDirection {
    fn includes(self, axis: Orientation) -> bool {
        match self {
            FlexibleDirection::Both => true,
            FlexibleDirection::Horizontal => axis == Orientation::Horizontal,
            FlexibleDirection::Vertical => axis == Orientation::Vertical,
        }
    }
}

/// How extra space is handled along an axis that is not flexible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonFlexibleGrowMode {
    /// Tracks keep their minimal size.
    None,
    /// Growable tracks share the extra space equally, ignoring proportions.
    #[default]
    Uniform,
    /// Every track shares the extra space equally.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowableAxis {
    pub index: usize,
    pub proportion: i32,
}

#[derive(Debug, Clone)]
pub struct FlexGridLayout {
    pub(crate) grid: GridLayout,
    direction: FlexibleDirection,
    grow_mode: NonFlexibleGrowMode,
    growable_rows: Vec<GrowableAxis>,
    growable_cols: Vec<GrowableAxis>,
    rows: Vec<Track>,
    cols: Vec<Track>,
    row_offsets: Vec<i32>,
    col_offsets: Vec<i32>,
}

impl FlexGridLayout {
    pub fn new(grid: GridLayout) -> Self {
        Self {
            grid,
            direction: FlexibleDirection::default(),
            grow_mode: NonFlexibleGrowMode::default(),
            growable_rows: Vec::new(),
            growable_cols: Vec::new(),
            rows: Vec::new(),
            cols: Vec::new(),
            row_offsets: Vec::new(),
            col_offsets: Vec::new(),
        }
    }

    pub fn direction(&self) -> FlexibleDirection {
        self.direction
    }

    pub fn grow_mode(&self) -> NonFlexibleGrowMode {
        self.grow_mode
    }

    /// Growable tracks along `axis`: columns for horizontal, rows for vertical.
    pub fn growables(&self, axis: Orientation) -> &[GrowableAxis] {
        match axis {
            Orientation::Horizontal => &self.growable_cols,
            Orientation::Vertical => &self.growable_rows,
        }
    }

    fn growables_mut(&mut self, axis: Orientation) -> &mut Vec<GrowableAxis> {
        match axis {
            Orientation::Horizontal => &mut self.growable_cols,
            Orientation::Vertical => &mut self.growable_rows,
        }
    }

    /// Registers a growable track. Registering an index again replaces its proportion.
    pub fn add_growable(&mut self, axis: Orientation, index: usize, proportion: i32) {
        let growables = self.growables_mut(axis);
        match growables.iter_mut().find(|growable| growable.index == index) {
            Some(growable) => growable.proportion = proportion,
            None => growables.push(GrowableAxis { index, proportion }),
        }
    }

    pub fn remove_growable(&mut self, axis: Orientation, index: usize) -> bool {
        let growables = self.growables_mut(axis);
        let before = growables.len();
        growables.retain(|growable| growable.index != index);
        growables.len() != before
    }

    pub fn is_growable(&self, axis: Orientation, index: usize) -> bool {
        self.growables(axis).iter().any(|growable| growable.index == index)
    }

    /// Row heights and column widths of the last measure, one track per cell line.
    fn measure(&self, items: &[SizerItem]) -> (Vec<Track>, Vec<Track>) {
        let (rows, cols) = self.grid.effective_rows_cols(items.len());
        let mut heights = vec![None; rows];
        let mut widths = vec![None; cols];
        if cols == 0 {
            return (heights, widths);
        }
        for (index, item) in items.iter().enumerate() {
            let (row, col) = (index / cols, index % cols);
            if row >= rows || !item.takes_space() {
                continue;
            }
            let size = item.min_size_with_border();
            raise(&mut heights[row], size.height);
            raise(&mut widths[col], size.width);
        }
        (heights, widths)
    }

    /// Hands the difference between `extent` and the tracks' total to the
    /// tracks allowed to change along `axis`.
    pub(crate) fn adjust_for_growables(&self, tracks: &mut [Track], extent: i32, axis: Orientation) {
        let delta = extent - track_total(tracks, self.grid.gap(axis));
        if delta == 0 {
            return;
        }

        let mut weights = vec![0; tracks.len()];
        let growables = self.growables(axis);
        let visible = |index: usize| tracks.get(index).is_some_and(Option::is_some);
        if self.direction.includes(axis) {
            for growable in growables.iter().filter(|g| visible(g.index)) {
                weights[growable.index] = growable.proportion;
            }
            if weights.iter().all(|weight| *weight == 0) {
                for growable in growables.iter().filter(|g| visible(g.index)) {
                    weights[growable.index] = 1;
                }
            }
        } else {
            match self.grow_mode {
                NonFlexibleGrowMode::None => {}
                NonFlexibleGrowMode::Uniform => {
                    for growable in growables.iter().filter(|g| visible(g.index)) {
                        weights[growable.index] = 1;
                    }
                }
                NonFlexibleGrowMode::All => weights.fill(1),
            }
        }

        let shown: Vec<usize> = (0..tracks.len()).filter(|&index| visible(index)).collect();
        let mut sizes: Vec<i32> = shown.iter().filter_map(|&index| tracks[index]).collect();
        let shown_weights: Vec<i32> = shown.iter().map(|&index| weights[index]).collect();
        apply_delta(&mut sizes, &shown_weights, delta);
        for (&index, size) in shown.iter().zip(sizes) {
            tracks[index] = Some(size);
        }
    }

    /// Fits measured tracks into `rect` and records where each track starts.
    pub(crate) fn place_tracks(&mut self, mut rows: Vec<Track>, mut cols: Vec<Track>, rect: Rect) {
        self.adjust_for_growables(&mut rows, rect.height(), Orientation::Vertical);
        self.adjust_for_growables(&mut cols, rect.width(), Orientation::Horizontal);
        self.row_offsets = offsets(&rows, rect.y(), self.grid.vgap());
        self.col_offsets = offsets(&cols, rect.x(), self.grid.hgap());
        trace!(?rows, ?cols, "placed grid tracks");
        self.rows = rows;
        self.cols = cols;
    }

    /// Box covering `row_span` rows and `col_span` columns from `(row, col)`, gaps included.
    pub(crate) fn span_rect(&self, row: usize, col: usize, row_span: usize, col_span: usize) -> Rect {
        let x = self.col_offsets.get(col).copied().unwrap_or_default();
        let y = self.row_offsets.get(row).copied().unwrap_or_default();
        Rect::new(
            x,
            y,
            span_extent(&self.cols, col, col_span, self.grid.hgap()),
            span_extent(&self.rows, row, row_span, self.grid.vgap()),
        )
    }

    /// Row and column under `point`, skipping collapsed tracks and gaps.
    pub(crate) fn cell_at_point(&self, point: Point) -> Option<(usize, usize)> {
        let row = track_at(&self.rows, &self.row_offsets, point.y)?;
        let col = track_at(&self.cols, &self.col_offsets, point.x)?;
        Some((row, col))
    }

    pub fn row_heights(&self) -> Vec<i32> {
        self.rows.iter().map(|track| track.unwrap_or(0)).collect()
    }

    pub fn col_widths(&self) -> Vec<i32> {
        self.cols.iter().map(|track| track.unwrap_or(0)).collect()
    }
}

fn raise(track: &mut Track, value: i32) {
    *track = Some(track.unwrap_or(0).max(value));
}

/// Total extent of the visible tracks plus the gaps between them.
pub(crate) fn track_total(tracks: &[Track], gap: i32) -> i32 {
    let visible = tracks.iter().flatten().count() as i32;
    tracks.iter().flatten().sum::<i32>() + (visible - 1).max(0) * gap
}

pub(crate) fn span_extent(tracks: &[Track], start: usize, len: usize, gap: i32) -> i32 {
    let end = (start + len).min(tracks.len());
    tracks.get(start..end).map_or(0, |span| track_total(span, gap))
}

fn offsets(tracks: &[Track], origin: i32, gap: i32) -> Vec<i32> {
    let mut pos = origin;
    tracks
        .iter()
        .map(|track| {
            let at = pos;
            if let Some(size) = track {
                pos += size + gap;
            }
            at
        })
        .collect()
}

fn track_at(tracks: &[Track], offsets: &[i32], pos: i32) -> Option<usize> {
    tracks
        .iter()
        .zip(offsets)
        .position(|(track, &start)| track.is_some_and(|size| pos >= start && pos < start + size))
}

impl LayoutStrategy for FlexGridLayout {
    fn calc_min(&self, items: &[SizerItem]) -> Size {
        let (rows, cols) = self.measure(items);
        Size::new(
            track_total(&cols, self.grid.hgap()),
            track_total(&rows, self.grid.vgap()),
        )
    }

    fn arrange(&mut self, items: &mut [SizerItem], rect: Rect) {
        let (rows, cols) = self.measure(items);
        let col_count = cols.len();
        self.place_tracks(rows, cols, rect);
        if col_count == 0 {
            return;
        }
        for (index, item) in items.iter_mut().enumerate() {
            let cell = self.span_rect(index / col_count, index % col_count, 1, 1);
            if item.is_shown() {
                item.set_dimension(cell, None);
            } else if item.takes_space() {
                item.reserve(cell);
            }
        }
    }

    fn find_item_at_point(&self, items: &[SizerItem], point: Point) -> Option<usize> {
        let (row, col) = self.cell_at_point(point)?;
        let index = row * self.cols.len() + col;
        items.get(index).filter(|item| item.is_shown()).map(|_| index)
    }
}

impl Sizer {
    pub fn new_flex_grid(rows: usize, cols: usize, gap: Size) -> Result<Self> {
        let grid = GridLayout::new(rows, cols, gap)?;
        Ok(Sizer::new(SizerKind::FlexGrid(FlexGridLayout::new(grid))))
    }

    /// Returns false for kinds without growable tracks. Fails on a negative proportion.
    pub fn add_growable_row(&mut self, index: usize, proportion: i32) -> Result<bool> {
        self.add_growable(Orientation::Vertical, index, proportion)
    }

    pub fn add_growable_col(&mut self, index: usize, proportion: i32) -> Result<bool> {
        self.add_growable(Orientation::Horizontal, index, proportion)
    }

    fn add_growable(&mut self, axis: Orientation, index: usize, proportion: i32) -> Result<bool> {
        tessel_core::LayoutError::check_non_negative("proportion", proportion)?;
        Ok(self.update_flex(|flex| {
            flex.add_growable(axis, index, proportion);
            true
        }))
    }

    pub fn remove_growable_row(&mut self, index: usize) -> bool {
        self.update_flex(|flex| flex.remove_growable(Orientation::Vertical, index))
    }

    pub fn remove_growable_col(&mut self, index: usize) -> bool {
        self.update_flex(|flex| flex.remove_growable(Orientation::Horizontal, index))
    }

    pub fn is_row_growable(&self, index: usize) -> bool {
        self.kind
            .flex()
            .is_some_and(|flex| flex.is_growable(Orientation::Vertical, index))
    }

    pub fn is_col_growable(&self, index: usize) -> bool {
        self.kind
            .flex()
            .is_some_and(|flex| flex.is_growable(Orientation::Horizontal, index))
    }

    pub fn flexible_direction(&self) -> Option<FlexibleDirection> {
        self.kind.flex().map(FlexGridLayout::direction)
    }

    pub fn set_flexible_direction(&mut self, direction: FlexibleDirection) -> bool {
        self.update_flex(|flex| {
            flex.direction = direction;
            true
        })
    }

    pub fn non_flexible_grow_mode(&self) -> Option<NonFlexibleGrowMode> {
        self.kind.flex().map(FlexGridLayout::grow_mode)
    }

    pub fn set_non_flexible_grow_mode(&mut self, mode: NonFlexibleGrowMode) -> bool {
        self.update_flex(|flex| {
            flex.grow_mode = mode;
            true
        })
    }

    /// Row heights computed by the last arrange pass. Empty for kinds without tracks.
    pub fn row_heights(&self) -> Vec<i32> {
        self.kind.flex().map(FlexGridLayout::row_heights).unwrap_or_default()
    }

    pub fn col_widths(&self) -> Vec<i32> {
        self.kind.flex().map(FlexGridLayout::col_widths).unwrap_or_default()
    }

    fn update_flex(&mut self, update: impl FnOnce(&mut FlexGridLayout) -> bool) -> bool {
        let changed = self.kind.flex_mut().is_some_and(update);
        if changed {
            self.invalidate();
        }
        changed
    }
}
