// crates/tessel-layout/tests/layout_properties.rs
use std::cell::RefCell;
use std::rc::Rc;

use tessel_layout::{
    CellSpan, GridPosition, GridSpan, ItemContent, LayoutPolicy, Orientation, Rect, Size, Sizer,
    SizerFlags, Widget, WidgetRef, WrapFlags,
};

#[derive(Debug)]
struct Probe {
    natural: Size,
    bounds: Rect,
    visible: bool,
    placements: usize,
}

impl Widget for Probe {
    fn natural_size(&self) -> Size {
        self.natural
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.placements += 1;
    }

    fn current_size(&self) -> Size {
        self.bounds.size
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

struct Handle {
    probe: Rc<RefCell<Probe>>,
    widget: WidgetRef,
}

impl Handle {
    fn new(width: i32, height: i32) -> Self {
        let probe = Rc::new(RefCell::new(Probe {
            natural: Size::new(width, height),
            bounds: Rect::default(),
            visible: true,
            placements: 0,
        }));
        let widget: WidgetRef = probe.clone();
        Self { probe, widget }
    }

    fn bounds(&self) -> Rect {
        self.probe.borrow().bounds
    }
}

fn nested_tree() -> (Sizer, Vec<Handle>) {
    let handles: Vec<Handle> = (0..6).map(|i| Handle::new(10 + i * 3, 8 + i)).collect();
    let policy = LayoutPolicy::new();

    let mut grid = Sizer::new_flex_grid(0, 2, Size::new(2, 2)).unwrap();
    grid.add_growable_col(1, 1).unwrap();
    for handle in &handles[..4] {
        grid.add(&handle.widget, &policy.expand()).unwrap();
    }

    let mut wrap = Sizer::new_wrap(Orientation::Horizontal, WrapFlags::default());
    wrap.add(&handles[4].widget, &policy).unwrap();
    wrap.add(&handles[5].widget, &policy).unwrap();

    let mut root = Sizer::vertical();
    root.add(grid, &policy.proportion(1).expand().border_all()).unwrap();
    root.add(wrap, &policy.expand()).unwrap();
    (root, handles)
}

#[test]
fn test_min_size_grows_with_children() {
    let (mut root, handles) = nested_tree();
    let before = root.min_size();

    handles[0].probe.borrow_mut().natural = Size::new(200, 100);
    root.invalidate_tree();
    let after = root.min_size();
    assert!(after.width >= before.width);
    assert!(after.height >= before.height);

    let extra = Handle::new(5, 5);
    let policy = root.policy();
    root.add(&extra.widget, &policy).unwrap();
    let grown = root.min_size();
    assert!(grown.width >= after.width && grown.height >= after.height);
}

#[test]
fn test_grid_bag_min_size_grows_with_items() {
    let mut bag = Sizer::new_grid_bag(Size::new(2, 3)).unwrap();
    let policy = LayoutPolicy::new();
    let placements = [
        (30, 30, GridPosition::new(1, 1), true),
        (5, 5, GridPosition::new(0, 0), true),
        (4, 4, GridPosition::new(3, 0), false),
        (1, 1, GridPosition::new(2, 2), true),
    ];

    let mut handles = Vec::new();
    let mut previous = bag.min_size();
    for (width, height, position, shown) in placements {
        let handle = Handle::new(width, height);
        bag.add_at(&handle.widget, position, GridSpan::default(), &policy)
            .unwrap();
        if !shown {
            bag.hide(&handle.widget, false);
        }
        let min = bag.min_size();
        assert!(min.width >= previous.width, "{min:?} < {previous:?}");
        assert!(min.height >= previous.height, "{min:?} < {previous:?}");
        previous = min;
        handles.push(handle);
    }

    // Items without a cell are refused rather than silently dropped.
    let loose = Handle::new(8, 8);
    assert!(bag.add(&loose.widget, &policy).is_err());
    assert_eq!(bag.min_size(), previous);
}

#[test]
fn test_arrange_is_idempotent() {
    let (mut root, handles) = nested_tree();
    let rect = Rect::new(0, 0, 120, 90);

    root.set_dimension(rect);
    let first: Vec<Rect> = handles.iter().map(Handle::bounds).collect();
    root.set_dimension(rect);
    let second: Vec<Rect> = handles.iter().map(Handle::bounds).collect();
    root.layout();
    let third: Vec<Rect> = handles.iter().map(Handle::bounds).collect();

    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn test_box_proportions() {
    let handles: Vec<Handle> = (0..3).map(|_| Handle::new(10, 10)).collect();
    let mut sizer = Sizer::horizontal();
    for (proportion, handle) in handles.iter().enumerate() {
        sizer
            .add(&handle.widget, &LayoutPolicy::new().proportion(proportion as i32))
            .unwrap();
    }
    sizer.set_dimension(Rect::new(0, 0, 70, 10));

    let widths: Vec<i32> = handles.iter().map(|h| h.bounds().width()).collect();
    assert_eq!(widths, vec![10, 24, 36]);
}

#[test]
fn test_grid_rows_follow_item_count() {
    let mut grid = Sizer::new_grid(0, 2, Size::new(3, 4)).unwrap();
    let handles: Vec<Handle> = (0..4).map(|_| Handle::new(12, 7)).collect();
    for handle in &handles {
        grid.add(&handle.widget, &LayoutPolicy::new()).unwrap();
    }

    assert_eq!(grid.effective_rows_count(), Some(2));
    assert_eq!(grid.effective_cols_count(), Some(2));
    assert_eq!(grid.calc_min(), Size::new(2 * 12 + 3, 2 * 7 + 4));
}

#[test]
fn test_flex_grid_growable_col() {
    let mut grid = Sizer::new_flex_grid(0, 2, Size::ZERO).unwrap();
    let handles: Vec<Handle> = (0..2).map(|_| Handle::new(20, 10)).collect();
    for handle in &handles {
        grid.add(&handle.widget, &LayoutPolicy::new().expand()).unwrap();
    }
    grid.add_growable_col(1, 1).unwrap();

    let min = grid.min_size();
    grid.set_dimension(Rect::from_parts(tessel_layout::Point::ZERO, min.grow(35, 0)));
    assert_eq!(grid.col_widths(), vec![20, 55]);
    assert_eq!(handles[1].bounds(), Rect::new(20, 0, 55, 10));
}

#[test]
fn test_grid_bag_intersection() {
    let mut bag = Sizer::new_grid_bag(Size::ZERO).unwrap();
    let wide = Handle::new(10, 10);
    bag.add_at(
        &wide.widget,
        GridPosition::new(0, 0),
        GridSpan::new(1, 2).unwrap(),
        &LayoutPolicy::new(),
    )
    .unwrap();

    let probe = CellSpan::new(GridPosition::new(0, 1), GridSpan::default());
    assert!(bag.check_span_for_intersection(probe, None));
    let below = CellSpan::new(GridPosition::new(1, 1), GridSpan::default());
    assert!(!bag.check_span_for_intersection(below, None));
}

#[test]
fn test_reserved_hidden_item_keeps_contribution() {
    let reserved = Handle::new(30, 12);
    let mut sizer = Sizer::vertical();
    sizer
        .add(
            &reserved.widget,
            &LayoutPolicy::new().reserve_space_even_if_hidden(),
        )
        .unwrap();
    let shown_min = sizer.min_size();

    assert!(sizer.hide(&reserved.widget, false));
    assert_eq!(sizer.min_size(), shown_min);
    let placements = reserved.probe.borrow().placements;
    sizer.set_dimension(Rect::new(0, 0, 30, 12));
    assert_eq!(reserved.probe.borrow().placements, placements);
}

#[test]
fn test_detached_widget_is_forgotten() {
    let handle = Handle::new(10, 10);
    let mut sizer = Sizer::vertical();
    sizer.add(&handle.widget, &LayoutPolicy::new()).unwrap();

    let content = sizer.detach(&handle.widget);
    assert!(matches!(content, Some(ItemContent::Widget(_))));
    assert!(sizer.get_item(&handle.widget, true).is_none());
    assert!(!sizer.is_shown(&handle.widget));

    // The widget itself is untouched and can join another container.
    let mut other = Sizer::horizontal();
    other.add(&handle.widget, &LayoutPolicy::new()).unwrap();
    other.set_dimension(Rect::new(0, 0, 10, 10));
    assert_eq!(handle.bounds(), Rect::new(0, 0, 10, 10));
}

#[test]
fn test_borders_and_alignment_in_cell() {
    let handle = Handle::new(10, 10);
    let mut sizer = Sizer::vertical();
    sizer
        .add(
            &handle.widget,
            &LayoutPolicy::new()
                .border_px(SizerFlags::BORDER_ALL, 3)
                .right(),
        )
        .unwrap();
    assert_eq!(sizer.min_size(), Size::new(16, 16));

    sizer.set_dimension(Rect::new(0, 0, 40, 16));
    assert_eq!(handle.bounds(), Rect::new(27, 3, 10, 10));
}
