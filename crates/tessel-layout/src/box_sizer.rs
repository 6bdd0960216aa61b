// crates/tessel-layout/src/box_sizer.rs
//! Linear container: items in a single row or column.

use tessel_core::{Orientation, Rect, Size};

use crate::distribute::apply_delta;
use crate::sizer::LayoutStrategy;
use crate::{Sizer, SizerItem, SizerKind};

#[derive(Debug, Clone)]
pub struct BoxLayout {
    orientation: Orientation,
}

impl BoxLayout {
    pub fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

impl LayoutStrategy for BoxLayout {
    fn calc_min(&self, items: &[SizerItem]) -> Size {
        let o = self.orientation;
        let (main, cross) = items
            .iter()
            .map(SizerItem::contribution)
            .fold((0, 0), |(main, cross), size| {
                (main + o.main(size), cross.max(o.cross(size)))
            });
        o.size(main, cross)
    }

    fn arrange(&mut self, items: &mut [SizerItem], rect: Rect) {
        let o = self.orientation;
        let main_extent = o.main(rect.size);
        let cross_extent = o.cross(rect.size);

        // The cross extent is known up front: wrapping children need it to measure.
        for item in items.iter_mut().filter(|item| item.is_shown()) {
            item.inform_first_direction(o.other(), cross_extent, main_extent);
        }

        let slots: Vec<usize> = (0..items.len())
            .filter(|&index| items[index].takes_space())
            .collect();
        let mut sizes: Vec<i32> = slots
            .iter()
            .map(|&index| o.main(items[index].min_size_with_border()))
            .collect();
        let weights: Vec<i32> = slots
            .iter()
            .map(|&index| items[index].proportion())
            .collect();
        let delta = main_extent - sizes.iter().sum::<i32>();
        apply_delta(&mut sizes, &weights, delta);

        let mut pos = o.main_of_point(rect.origin);
        let cross_pos = o.other().main_of_point(rect.origin);
        for (&index, &main) in slots.iter().zip(&sizes) {
            let cell = o.rect(pos, cross_pos, main, cross_extent);
            let item = &mut items[index];
            if item.is_shown() {
                item.set_dimension(cell, Some(o));
            } else {
                item.reserve(cell);
            }
            pos += main;
        }
    }

    fn inform_first_direction(
        &mut self,
        items: &mut [SizerItem],
        direction: Orientation,
        size: i32,
        available_other: i32,
    ) -> bool {
        if direction != self.orientation.other() {
            return false;
        }
        items.iter_mut().fold(false, |changed, item| {
            item.inform_first_direction(direction, size, available_other) || changed
        })
    }
}

impl Sizer {
    pub fn new_box(orientation: Orientation) -> Self {
        Sizer::new(SizerKind::Box(BoxLayout::new(orientation)))
    }

    pub fn horizontal() -> Self {
        Self::new_box(Orientation::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new_box(Orientation::Vertical)
    }

    /// Primary axis of box and wrap containers.
    pub fn orientation(&self) -> Option<Orientation> {
        match &self.kind {
            SizerKind::Box(layout) => Some(layout.orientation),
            SizerKind::Wrap(layout) => Some(layout.orientation()),
            _ => None,
        }
    }

    /// Returns false for kinds without an orientation.
    pub fn set_orientation(&mut self, orientation: Orientation) -> bool {
        let changed = match &mut self.kind {
            SizerKind::Box(layout) => {
                layout.orientation = orientation;
                true
            }
            SizerKind::Wrap(layout) => {
                layout.set_orientation(orientation);
                true
            }
            _ => false,
        };
        if changed {
            self.invalidate();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_widget;
    use crate::SizerFlags;

    #[test]
    fn test_min_size_sums_main_and_maxes_cross() {
        let a = test_widget(10, 30);
        let b = test_widget(20, 10);
        let mut sizer = Sizer::horizontal();
        let policy = sizer.policy();
        sizer.add(a.widget(), &policy).unwrap();
        sizer
            .add(b.widget(), &policy.border_px(SizerFlags::BORDER_LEFT, 4))
            .unwrap();

        assert_eq!(sizer.min_size(), Size::new(34, 30));
    }

    #[test]
    fn test_proportional_distribution() {
        let widgets = [test_widget(10, 10), test_widget(10, 10), test_widget(10, 10)];
        let mut sizer = Sizer::horizontal();
        for (proportion, widget) in widgets.iter().enumerate() {
            let policy = sizer.policy().proportion(proportion as i32);
            sizer.add(widget.widget(), &policy).unwrap();
        }

        sizer.set_dimension(Rect::new(0, 0, 70, 10));
        let widths: Vec<i32> = widgets.iter().map(|w| w.bounds().width()).collect();
        assert_eq!(widths, vec![10, 24, 36]);
        assert_eq!(widgets[2].bounds().x(), 34);
    }

    #[test]
    fn test_cross_axis_alignment_and_expand() {
        let a = test_widget(10, 10);
        let b = test_widget(10, 10);
        let mut sizer = Sizer::vertical();
        let policy = sizer.policy();
        sizer.add(a.widget(), &policy.center()).unwrap();
        sizer.add(b.widget(), &policy.expand()).unwrap();

        sizer.set_dimension(Rect::new(5, 5, 50, 40));
        assert_eq!(a.bounds(), Rect::new(25, 5, 10, 10));
        assert_eq!(b.bounds(), Rect::new(5, 15, 50, 10));
    }

    #[test]
    fn test_deficit_shrinks_items() {
        let a = test_widget(30, 10);
        let b = test_widget(10, 10);
        let mut sizer = Sizer::horizontal();
        let policy = sizer.policy();
        sizer.add(a.widget(), &policy).unwrap();
        sizer.add(b.widget(), &policy).unwrap();

        sizer.set_dimension(Rect::new(0, 0, 20, 10));
        assert_eq!(a.bounds().width(), 15);
        assert_eq!(b.bounds().width(), 5);
        assert_eq!(b.bounds().x(), 15);
    }

    #[test]
    fn test_hidden_items_and_reserved_space() {
        let a = test_widget(10, 10);
        let b = test_widget(10, 10);
        let c = test_widget(10, 10);
        let mut sizer = Sizer::horizontal();
        let policy = sizer.policy();
        sizer.add(a.widget(), &policy).unwrap();
        sizer
            .add(b.widget(), &policy.reserve_space_even_if_hidden())
            .unwrap();
        sizer.add(c.widget(), &policy).unwrap();

        sizer.hide(b.widget(), false);
        assert_eq!(sizer.min_size(), Size::new(30, 10));
        sizer.set_dimension(Rect::new(0, 0, 30, 10));
        assert_eq!(c.bounds().x(), 20);

        sizer.hide(a.widget(), false);
        assert_eq!(sizer.min_size(), Size::new(20, 10));
        sizer.set_dimension(Rect::new(0, 0, 20, 10));
        assert_eq!(c.bounds().x(), 10);
    }

    #[test]
    fn test_stretch_spacer_pushes_items_apart() {
        let a = test_widget(10, 10);
        let b = test_widget(10, 10);
        let mut sizer = Sizer::horizontal();
        let policy = sizer.policy();
        sizer.add(a.widget(), &policy).unwrap();
        sizer.add_stretch_spacer(1).unwrap();
        sizer.add(b.widget(), &policy).unwrap();

        sizer.set_dimension(Rect::new(0, 0, 100, 10));
        assert_eq!(b.bounds().x(), 90);
    }

    #[test]
    fn test_set_orientation() {
        let mut sizer = Sizer::horizontal();
        assert!(sizer.set_orientation(Orientation::Vertical));
        assert_eq!(sizer.orientation(), Some(Orientation::Vertical));

        let mut grid = Sizer::new_grid(1, 1, Size::ZERO).unwrap();
        assert!(!grid.set_orientation(Orientation::Vertical));
        assert_eq!(grid.orientation(), None);
    }
}
