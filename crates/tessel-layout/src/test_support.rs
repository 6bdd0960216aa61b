// crates/tessel-layout/src/test_support.rs
use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use tessel_core::{Rect, Size, Widget, WidgetRef};

/// Widget that records what the layout pass pushes into it.
#[derive(Debug, Default)]
pub struct TestWidget {
    pub natural: Size,
    pub current: Size,
    pub visible: bool,
    pub bounds: Rect,
    pub min_window_size: Option<Size>,
    pub virtual_size: Option<Size>,
}

impl Widget for TestWidget {
    fn natural_size(&self) -> Size {
        self.natural
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.current = bounds.size;
    }

    fn current_size(&self) -> Size {
        self.current
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_min_window_size(&mut self, size: Size) {
        self.min_window_size = Some(size);
    }

    fn set_virtual_size(&mut self, size: Size) {
        self.virtual_size = Some(size);
    }
}

/// Keeps both the concrete state and the type-erased handle containers see.
pub struct TestHandle {
    state: Rc<RefCell<TestWidget>>,
    widget: WidgetRef,
}

impl TestHandle {
    pub fn widget(&self) -> &WidgetRef {
        &self.widget
    }

    pub fn state(&self) -> RefMut<'_, TestWidget> {
        self.state.borrow_mut()
    }

    pub fn bounds(&self) -> Rect {
        self.state.borrow().bounds
    }
}

pub fn test_widget(width: i32, height: i32) -> TestHandle {
    let state = Rc::new(RefCell::new(TestWidget {
        natural: Size::new(width, height),
        visible: true,
        ..TestWidget::default()
    }));
    let widget: WidgetRef = state.clone();
    TestHandle { state, widget }
}
