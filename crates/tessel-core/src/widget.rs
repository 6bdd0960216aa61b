// crates/tessel-core/src/widget.rs
use std::cell::RefCell;
use std::rc::Rc;

use crate::{Point, Rect, Size};

/// A leaf element laid out by containers but owned elsewhere.
///
/// Containers only query sizes and push the final bounds back; they never
/// create or destroy widgets.
pub trait Widget {
    /// Size the widget would like to have given its content.
    fn natural_size(&self) -> Size;

    /// Receives the box computed by the layout pass.
    fn set_bounds(&mut self, bounds: Rect);

    fn current_size(&self) -> Size;

    fn is_visible(&self) -> bool {
        true
    }

    fn set_visible(&mut self, _visible: bool) {}

    fn position(&self) -> Point {
        Point::ZERO
    }

    /// Adds decorations (title bar, frame) around a client area.
    fn client_to_window_size(&self, client: Size) -> Size {
        client
    }

    fn set_min_window_size(&mut self, _size: Size) {}

    /// Scrollable widgets use this to learn the extent of their content.
    fn set_virtual_size(&mut self, _size: Size) {}
}

/// Shared, non-owning handle a container keeps to a widget.
pub type WidgetRef = Rc<RefCell<dyn Widget>>;

/// Wraps a concrete widget into a handle usable by containers.
pub fn widget_ref<W: Widget + 'static>(widget: W) -> WidgetRef {
    Rc::new(RefCell::new(widget))
}

/// Identity comparison: two handles are the same widget when they point to the same allocation.
pub fn same_widget(a: &WidgetRef, b: &WidgetRef) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Label {
        size: Size,
    }

    impl Widget for Label {
        fn natural_size(&self) -> Size {
            self.size
        }

        fn set_bounds(&mut self, bounds: Rect) {
            self.size = bounds.size;
        }

        fn current_size(&self) -> Size {
            self.size
        }
    }

    #[test]
    fn test_widget_identity() {
        let a = widget_ref(Label { size: Size::new(1, 1) });
        let b = widget_ref(Label { size: Size::new(1, 1) });
        let a2 = a.clone();

        assert!(same_widget(&a, &a2));
        assert!(!same_widget(&a, &b));
        assert!(a.borrow().is_visible());
    }
}
