// crates/tessel-layout/src/wrap.rs
//! Linear container that starts a new line when the current one is full.

use tessel_core::{Orientation, Rect, Size};
use tracing::trace;

use crate::distribute::apply_delta;
use crate::sizer::LayoutStrategy;
use crate::{Sizer, SizerItem, SizerKind, WrapFlags};

#[derive(Debug, Clone)]
pub struct WrapLayout {
    orientation: Orientation,
    flags: WrapFlags,
    /// Main-axis extent lines are broken at, once known.
    extent_hint: Option<i32>,
    line_count: usize,
}

/// Result of breaking items into lines.
struct Lines {
    lines: Vec<Vec<usize>>,
    /// Leading spacers removed from the start of a line.
    dropped: Vec<usize>,
}

impl WrapLayout {
    pub fn new(orientation: Orientation, flags: WrapFlags) -> Self {
        Self {
            orientation,
            flags,
            extent_hint: None,
            line_count: 0,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub(crate) fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.extent_hint = None;
    }

    pub fn flags(&self) -> WrapFlags {
        self.flags
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Remembers the main extent of a new rectangle. Returns true when it changed.
    pub(crate) fn track_extent(&mut self, size: Size) -> bool {
        let extent = self.orientation.main(size);
        if extent <= 0 || self.extent_hint == Some(extent) {
            return false;
        }
        self.extent_hint = Some(extent);
        true
    }

    fn break_lines(&self, items: &[SizerItem], extent: i32) -> Lines {
        let o = self.orientation;
        let remove_leading = self.flags.contains(WrapFlags::REMOVE_LEADING_SPACES);
        let mut lines = Vec::new();
        let mut dropped = Vec::new();
        let mut line: Vec<usize> = Vec::new();
        let mut used = 0;

        for (index, item) in items.iter().enumerate() {
            if !item.takes_space() {
                continue;
            }
            let main = o.main(item.min_size_with_border());
            if !line.is_empty() && used + main > extent {
                lines.push(std::mem::take(&mut line));
                used = 0;
            }
            if remove_leading && line.is_empty() && !lines.is_empty() && item.is_spacer() {
                dropped.push(index);
                continue;
            }
            line.push(index);
            used += main;
        }
        if !line.is_empty() {
            lines.push(line);
        }
        Lines { lines, dropped }
    }

    /// Main and cross extent of one line at minimal size.
    fn line_size(&self, items: &[SizerItem], line: &[usize]) -> (i32, i32) {
        let o = self.orientation;
        line.iter()
            .map(|&index| items[index].min_size_with_border())
            .fold((0, 0), |(main, cross), size| {
                (main + o.main(size), cross.max(o.cross(size)))
            })
    }
}

impl LayoutStrategy for WrapLayout {
    fn calc_min(&self, items: &[SizerItem]) -> Size {
        let o = self.orientation;
        let Some(extent) = self.extent_hint else {
            // Nothing known about the available space yet: a single line.
            let (main, cross) = items
                .iter()
                .map(SizerItem::contribution)
                .fold((0, 0), |(main, cross), size| {
                    (main + o.main(size), cross.max(o.cross(size)))
                });
            return o.size(main, cross);
        };

        let (main, cross) = self
            .break_lines(items, extent)
            .lines
            .iter()
            .map(|line| self.line_size(items, line))
            .fold((0, 0), |(main, cross), (line_main, line_cross)| {
                (main.max(line_main), cross + line_cross)
            });
        o.size(main, cross)
    }

    fn arrange(&mut self, items: &mut [SizerItem], rect: Rect) {
        let o = self.orientation;
        let extent = o.main(rect.size);
        let Lines { lines, dropped } = self.break_lines(items, extent);
        self.line_count = lines.len();
        trace!(lines = lines.len(), extent, "wrapped items");

        let main_origin = o.main_of_point(rect.origin);
        let mut cross_pos = o.other().main_of_point(rect.origin);
        for index in dropped {
            items[index].reserve(o.rect(main_origin, cross_pos, 0, 0));
        }

        for line in &lines {
            let (line_main, cross) = self.line_size(items, line);
            let mut sizes: Vec<i32> = line
                .iter()
                .map(|&index| o.main(items[index].min_size_with_border()))
                .collect();
            let mut weights: Vec<i32> = line.iter().map(|&index| items[index].proportion()).collect();
            let delta = extent - line_main;
            if delta > 0
                && self.flags.contains(WrapFlags::EXTEND_LAST_ON_EACH_LINE)
                && weights.iter().all(|weight| *weight == 0)
            {
                if let Some(last) = weights.last_mut() {
                    *last = 1;
                }
            }
            apply_delta(&mut sizes, &weights, delta);

            let mut pos = main_origin;
            for (&index, &main) in line.iter().zip(&sizes) {
                let cell = o.rect(pos, cross_pos, main, cross);
                let item = &mut items[index];
                if item.is_shown() {
                    item.set_dimension(cell, Some(o));
                } else {
                    item.reserve(cell);
                }
                pos += main;
            }
            cross_pos += cross;
        }
    }

    fn inform_first_direction(
        &mut self,
        _items: &mut [SizerItem],
        direction: Orientation,
        size: i32,
        _available_other: i32,
    ) -> bool {
        if direction != self.orientation || size <= 0 {
            return false;
        }
        let changed = self.extent_hint != Some(size);
        self.extent_hint = Some(size);
        changed
    }
}

impl Sizer {
    pub fn new_wrap(orientation: Orientation, flags: WrapFlags) -> Self {
        Sizer::new(SizerKind::Wrap(WrapLayout::new(orientation, flags)))
    }

    pub fn wrap_flags(&self) -> Option<WrapFlags> {
        match &self.kind {
            SizerKind::Wrap(wrap) => Some(wrap.flags),
            _ => None,
        }
    }

    pub fn set_wrap_flags(&mut self, flags: WrapFlags) -> bool {
        let SizerKind::Wrap(wrap) = &mut self.kind else {
            return false;
        };
        wrap.flags = flags;
        self.invalidate();
        true
    }

    /// Number of lines produced by the last arrange pass.
    pub fn line_count(&self) -> Option<usize> {
        match &self.kind {
            SizerKind::Wrap(wrap) => Some(wrap.line_count),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_widget, TestHandle};

    fn row_of(sizer: &mut Sizer, count: usize) -> Vec<TestHandle> {
        let policy = sizer.policy();
        let widgets: Vec<TestHandle> = (0..count).map(|_| test_widget(30, 10)).collect();
        for widget in &widgets {
            sizer.add(widget.widget(), &policy).unwrap();
        }
        widgets
    }

    #[test]
    fn test_single_line_until_extent_known() {
        let mut sizer = Sizer::new_wrap(Orientation::Horizontal, WrapFlags::default());
        row_of(&mut sizer, 3);
        assert_eq!(sizer.min_size(), Size::new(90, 10));
    }

    #[test]
    fn test_wraps_and_extends_last_item() {
        let mut sizer = Sizer::new_wrap(Orientation::Horizontal, WrapFlags::default());
        let widgets = row_of(&mut sizer, 3);

        sizer.set_dimension(Rect::new(0, 0, 70, 20));
        assert_eq!(sizer.line_count(), Some(2));
        assert_eq!(widgets[1].bounds(), Rect::new(30, 0, 40, 10));
        assert_eq!(widgets[2].bounds(), Rect::new(0, 10, 70, 10));
        assert_eq!(sizer.min_size(), Size::new(60, 20));
    }

    #[test]
    fn test_without_extend_last() {
        let mut sizer = Sizer::new_wrap(Orientation::Horizontal, WrapFlags::empty());
        let widgets = row_of(&mut sizer, 3);

        sizer.set_dimension(Rect::new(0, 0, 70, 20));
        assert_eq!(widgets[1].bounds(), Rect::new(30, 0, 30, 10));
    }

    #[test]
    fn test_leading_spacers_removed() {
        let a = test_widget(30, 10);
        let b = test_widget(30, 10);
        let mut sizer = Sizer::new_wrap(Orientation::Horizontal, WrapFlags::default());
        let policy = sizer.policy();
        sizer.add(a.widget(), &policy).unwrap();
        sizer.add_spacer(10).unwrap();
        sizer.add(b.widget(), &policy).unwrap();

        sizer.set_dimension(Rect::new(0, 0, 35, 40));
        assert_eq!(sizer.line_count(), Some(2));
        assert_eq!(sizer.items()[1].rect().size, Size::ZERO);
        assert_eq!(b.bounds().y(), 10);

        assert!(sizer.set_wrap_flags(WrapFlags::EXTEND_LAST_ON_EACH_LINE));
        sizer.set_dimension(Rect::new(0, 0, 35, 40));
        assert_eq!(sizer.line_count(), Some(3));
        assert_eq!(b.bounds().y(), 20);
    }

    #[test]
    fn test_box_parent_informs_width() {
        let mut wrap = Sizer::new_wrap(Orientation::Horizontal, WrapFlags::default());
        let widgets = row_of(&mut wrap, 3);
        let mut outer = Sizer::vertical();
        let policy = outer.policy().expand();
        outer.add(wrap, &policy).unwrap();
        assert_eq!(outer.min_size(), Size::new(90, 10));

        outer.set_dimension(Rect::new(0, 0, 70, 100));
        assert_eq!(widgets[2].bounds().y(), 10);
        assert_eq!(outer.min_size(), Size::new(60, 20));
    }

    #[test]
    fn test_inform_ignores_other_axis() {
        let mut sizer = Sizer::new_wrap(Orientation::Horizontal, WrapFlags::default());
        row_of(&mut sizer, 3);
        assert!(!sizer.inform_first_direction(Orientation::Vertical, 20, 100));
        assert!(sizer.inform_first_direction(Orientation::Horizontal, 40, 100));
        assert!(!sizer.inform_first_direction(Orientation::Horizontal, 40, 100));
        assert_eq!(sizer.min_size(), Size::new(30, 30));
    }
}
