// crates/tessel-layout/src/sizer.rs

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

use tessel_core::{
    LayoutConfig, LayoutError, Orientation, Point, Rect, Result, Size, WidgetRef,
};
use tracing::debug;

use crate::{
    BoxLayout, FlexGridLayout, GridBagLayout, GridLayout, ItemContent, ItemTarget, LayoutPolicy,
    SizerItem, WrapLayout,
};

static NEXT_SIZER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a container, stable for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SizerId(u64);

impl SizerId {
    fn next() -> Self {
        SizerId(NEXT_SIZER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Kind-specific half of the two-phase layout algorithm.
pub(crate) trait LayoutStrategy {
    /// Folds the items' contributions into the container's minimal size.
    fn calc_min(&self, items: &[SizerItem]) -> Size;

    /// Distributes `rect` among the items and places them.
    fn arrange(&mut self, items: &mut [SizerItem], rect: Rect);

    /// Takes a size hint along `direction` before measuring. Returns true when
    /// the hint changed the minimal size.
    fn inform_first_direction(
        &mut self,
        _items: &mut [SizerItem],
        _direction: Orientation,
        _size: i32,
        _available_other: i32,
    ) -> bool {
        false
    }

    fn find_item_at_point(&self, items: &[SizerItem], point: Point) -> Option<usize> {
        items
            .iter()
            .position(|item| item.is_shown() && item.rect().contains(point))
    }
}

/// The closed set of container kinds.
#[derive(Debug, Clone)]
pub enum SizerKind {
    Box(BoxLayout),
    Grid(GridLayout),
    FlexGrid(FlexGridLayout),
    GridBag(GridBagLayout),
    Wrap(WrapLayout),
}

impl SizerKind {
    pub fn name(&self) -> &'static str {
        match self {
            SizerKind::Box(_) => "box",
            SizerKind::Grid(_) => "grid",
            SizerKind::FlexGrid(_) => "flex_grid",
            SizerKind::GridBag(_) => "grid_bag",
            SizerKind::Wrap(_) => "wrap",
        }
    }

    fn strategy(&self) -> &dyn LayoutStrategy {
        match self {
            SizerKind::Box(layout) => layout,
            SizerKind::Grid(layout) => layout,
            SizerKind::FlexGrid(layout) => layout,
            SizerKind::GridBag(layout) => layout,
            SizerKind::Wrap(layout) => layout,
        }
    }

    fn strategy_mut(&mut self) -> &mut dyn LayoutStrategy {
        match self {
            SizerKind::Box(layout) => layout,
            SizerKind::Grid(layout) => layout,
            SizerKind::FlexGrid(layout) => layout,
            SizerKind::GridBag(layout) => layout,
            SizerKind::Wrap(layout) => layout,
        }
    }

    /// Row/column parameters shared by every grid kind.
    pub(crate) fn grid(&self) -> Option<&GridLayout> {
        match self {
            SizerKind::Grid(grid) => Some(grid),
            SizerKind::FlexGrid(flex) => Some(&flex.grid),
            SizerKind::GridBag(bag) => Some(&bag.flex.grid),
            _ => None,
        }
    }

    pub(crate) fn grid_mut(&mut self) -> Option<&mut GridLayout> {
        match self {
            SizerKind::Grid(grid) => Some(grid),
            SizerKind::FlexGrid(flex) => Some(&mut flex.grid),
            SizerKind::GridBag(bag) => Some(&mut bag.flex.grid),
            _ => None,
        }
    }

    /// Growable-track behaviour, owned directly by FlexGrid and delegated to by GridBag.
    pub(crate) fn flex(&self) -> Option<&FlexGridLayout> {
        match self {
            SizerKind::FlexGrid(flex) => Some(flex),
            SizerKind::GridBag(bag) => Some(&bag.flex),
            _ => None,
        }
    }

    pub(crate) fn flex_mut(&mut self) -> Option<&mut FlexGridLayout> {
        match self {
            SizerKind::FlexGrid(flex) => Some(flex),
            SizerKind::GridBag(bag) => Some(&mut bag.flex),
            _ => None,
        }
    }
}

/// A layout container: an ordered list of items arranged by one of the kinds.
#[derive(Debug)]
pub struct Sizer {
    id: SizerId,
    pub(crate) kind: SizerKind,
    pub(crate) items: Vec<SizerItem>,
    min_size_floor: Size,
    cached_min: Cell<Option<Size>>,
    rect: Rect,
    config: LayoutConfig,
}

impl Sizer {
    pub fn new(kind: SizerKind) -> Self {
        Self {
            id: SizerId::next(),
            kind,
            items: Vec::new(),
            min_size_floor: Size::ZERO,
            cached_min: Cell::new(None),
            rect: Rect::default(),
            config: LayoutConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    pub fn id(&self) -> SizerId {
        self.id
    }

    pub fn kind(&self) -> &SizerKind {
        &self.kind
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// A fresh policy whose default border follows this container's configuration.
    pub fn policy(&self) -> LayoutPolicy {
        LayoutPolicy::with_config(self.config)
    }

    pub fn items(&self) -> &[SizerItem] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // Structure

    pub fn add(
        &mut self,
        content: impl Into<ItemContent>,
        policy: &LayoutPolicy,
    ) -> Result<&mut SizerItem> {
        let index = self.items.len();
        self.insert(index, content, policy)
    }

    pub fn insert(
        &mut self,
        index: usize,
        content: impl Into<ItemContent>,
        policy: &LayoutPolicy,
    ) -> Result<&mut SizerItem> {
        let item = SizerItem::with_policy(content, policy)?;
        self.insert_item(index, item)
    }

    pub fn prepend(
        &mut self,
        content: impl Into<ItemContent>,
        policy: &LayoutPolicy,
    ) -> Result<&mut SizerItem> {
        self.insert(0, content, policy)
    }

    pub fn add_item(&mut self, item: SizerItem) -> Result<&mut SizerItem> {
        let index = self.items.len();
        self.insert_item(index, item)
    }

    /// Grid bags only take items that carry a cell; see [`Sizer::add_at`].
    pub fn insert_item(&mut self, index: usize, item: SizerItem) -> Result<&mut SizerItem> {
        if index > self.items.len() {
            return Err(LayoutError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        if matches!(self.kind, SizerKind::GridBag(_)) && item.placement().is_none() {
            return Err(LayoutError::InvalidArgument {
                name: "grid bag item without position",
                value: index as i32,
            });
        }
        self.invalidate();
        self.items.insert(index, item);
        Ok(&mut self.items[index])
    }

    pub fn prepend_item(&mut self, item: SizerItem) -> Result<&mut SizerItem> {
        self.insert_item(0, item)
    }

    /// Fixed square spacer.
    pub fn add_spacer(&mut self, size: i32) -> Result<&mut SizerItem> {
        let index = self.items.len();
        self.insert_spacer(index, size)
    }

    /// Empty spacer that only soaks up extra space.
    pub fn add_stretch_spacer(&mut self, proportion: i32) -> Result<&mut SizerItem> {
        let index = self.items.len();
        self.insert_stretch_spacer(index, proportion)
    }

    pub fn insert_spacer(&mut self, index: usize, size: i32) -> Result<&mut SizerItem> {
        let policy = self.policy();
        self.insert(index, Size::square(size), &policy)
    }

    pub fn insert_stretch_spacer(
        &mut self,
        index: usize,
        proportion: i32,
    ) -> Result<&mut SizerItem> {
        let policy = self.policy().proportion(proportion);
        self.insert(index, Size::ZERO, &policy)
    }

    pub fn prepend_spacer(&mut self, size: i32) -> Result<&mut SizerItem> {
        self.insert_spacer(0, size)
    }

    pub fn prepend_stretch_spacer(&mut self, proportion: i32) -> Result<&mut SizerItem> {
        self.insert_stretch_spacer(0, proportion)
    }

    /// Removes an item and drops what it owns. Widgets are only released.
    pub fn remove<'a>(&mut self, target: impl Into<ItemTarget<'a>>) -> bool {
        self.take(&target.into()).is_some()
    }

    /// Removes an item and hands its content back to the caller.
    pub fn detach<'a>(&mut self, target: impl Into<ItemTarget<'a>>) -> Option<ItemContent> {
        self.take(&target.into()).map(SizerItem::into_content)
    }

    fn take(&mut self, target: &ItemTarget<'_>) -> Option<SizerItem> {
        let index = self.index_of(target)?;
        self.invalidate();
        Some(self.items.remove(index))
    }

    /// Swaps the content of an item, keeping its layout policy.
    pub fn replace<'a>(
        &mut self,
        old: impl Into<ItemTarget<'a>>,
        new: impl Into<ItemContent>,
        recursive: bool,
    ) -> bool {
        match self.get_item_mut(old, recursive) {
            Some(item) => {
                item.replace_content(new.into());
                true
            }
            None => false,
        }
    }

    /// Swaps a whole item. A replacement without a cell keeps the old one.
    pub fn replace_item(&mut self, index: usize, mut item: SizerItem) -> bool {
        match self.items.get_mut(index) {
            Some(slot) => {
                if item.placement().is_none() {
                    item.set_placement(slot.placement());
                }
                *slot = item;
                self.invalidate();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.invalidate();
        self.items.clear();
    }

    // Lookup

    fn index_of(&self, target: &ItemTarget<'_>) -> Option<usize> {
        match target {
            ItemTarget::Index(index) => (*index < self.items.len()).then_some(*index),
            _ => self.items.iter().position(|item| item.matches(target)),
        }
    }

    /// Index path from this container down to the target item.
    fn path_of(&self, target: &ItemTarget<'_>, recursive: bool) -> Option<Vec<usize>> {
        if let Some(index) = self.index_of(target) {
            return Some(vec![index]);
        }
        if !recursive || matches!(target, ItemTarget::Index(_)) {
            return None;
        }
        self.items.iter().enumerate().find_map(|(index, item)| {
            let mut path = item.sizer()?.path_of(target, true)?;
            path.insert(0, index);
            Some(path)
        })
    }

    fn item_at_path(&self, path: &[usize]) -> Option<&SizerItem> {
        let (first, rest) = path.split_first()?;
        let item = self.items.get(*first)?;
        if rest.is_empty() {
            Some(item)
        } else {
            item.sizer()?.item_at_path(rest)
        }
    }

    /// Every container on the path loses its cached minimum: the caller may
    /// change anything about the item.
    fn item_at_path_mut(&mut self, path: &[usize]) -> Option<&mut SizerItem> {
        self.invalidate();
        let (first, rest) = path.split_first()?;
        let item = self.items.get_mut(*first)?;
        if rest.is_empty() {
            Some(item)
        } else {
            item.sizer_mut()?.item_at_path_mut(rest)
        }
    }

    pub fn get_item<'a>(
        &self,
        target: impl Into<ItemTarget<'a>>,
        recursive: bool,
    ) -> Option<&SizerItem> {
        let path = self.path_of(&target.into(), recursive)?;
        self.item_at_path(&path)
    }

    pub fn get_item_mut<'a>(
        &mut self,
        target: impl Into<ItemTarget<'a>>,
        recursive: bool,
    ) -> Option<&mut SizerItem> {
        let path = self.path_of(&target.into(), recursive)?;
        self.item_at_path_mut(&path)
    }

    /// Searches the whole subtree.
    pub fn find_item<'a>(&self, target: impl Into<ItemTarget<'a>>) -> Option<&SizerItem> {
        self.get_item(target, true)
    }

    pub fn get_item_by_id(&self, id: i32, recursive: bool) -> Option<&SizerItem> {
        if let Some(item) = self.items.iter().find(|item| item.id() == Some(id)) {
            return Some(item);
        }
        if !recursive {
            return None;
        }
        self.items
            .iter()
            .find_map(|item| item.sizer()?.get_item_by_id(id, true))
    }

    /// Finds a nested container anywhere below this one.
    pub fn child_sizer(&self, id: SizerId) -> Option<&Sizer> {
        self.get_item(id, true)?.sizer()
    }

    pub fn child_sizer_mut(&mut self, id: SizerId) -> Option<&mut Sizer> {
        self.get_item_mut(id, true)?.sizer_mut()
    }

    /// Item whose last arranged box contains `point`.
    pub fn find_item_at_point(&self, point: Point) -> Option<&SizerItem> {
        let index = self.kind.strategy().find_item_at_point(&self.items, point)?;
        self.items.get(index)
    }

    // Sizing

    /// Minimal size from the items alone, ignoring the explicit floor and the cache.
    pub fn calc_min(&self) -> Size {
        self.kind.strategy().calc_min(&self.items)
    }

    fn measure(&self) -> Size {
        self.calc_min().max(self.min_size_floor)
    }

    /// Cached minimal size, floored by [`Sizer::set_min_size`].
    pub fn min_size(&self) -> Size {
        if let Some(size) = self.cached_min.get() {
            return size;
        }
        let size = self.measure();
        debug!(kind = self.kind.name(), items = self.items.len(), min = ?size, "measured sizer");
        self.cached_min.set(Some(size));
        size
    }

    pub fn set_min_size(&mut self, size: Size) -> Result<()> {
        self.min_size_floor = LayoutError::check_size("min size", size)?;
        self.invalidate();
        Ok(())
    }

    /// Returns `Ok(false)` when the item is not found.
    pub fn set_item_min_size<'a>(
        &mut self,
        target: impl Into<ItemTarget<'a>>,
        size: Size,
    ) -> Result<bool> {
        LayoutError::check_size("min size", size)?;
        match self.get_item_mut(target, true) {
            Some(item) => {
                item.set_min_size(size)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drops the cached minimal size of this container.
    pub fn invalidate(&self) {
        self.cached_min.set(None);
    }

    /// Drops cached minimal sizes of this container and everything below it.
    pub fn invalidate_tree(&self) {
        self.invalidate();
        for sizer in self.items.iter().filter_map(SizerItem::sizer) {
            sizer.invalidate_tree();
        }
    }

    // Arrangement

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn size(&self) -> Size {
        self.rect.size
    }

    pub fn position(&self) -> Point {
        self.rect.origin
    }

    pub fn set_dimension(&mut self, rect: Rect) {
        let extent_changed = match &mut self.kind {
            SizerKind::Wrap(wrap) => wrap.track_extent(rect.size),
            _ => false,
        };
        if extent_changed {
            self.invalidate();
        }
        self.rect = rect;
        self.recalc_sizes();
    }

    /// Re-arranges the items inside the last assigned rectangle.
    pub fn recalc_sizes(&mut self) {
        debug!(kind = self.kind.name(), items = self.items.len(), rect = ?self.rect, "arranging sizer");
        let rect = self.rect;
        self.kind.strategy_mut().arrange(&mut self.items, rect);
        // Hints learnt during this pass may have changed what the children need.
        if self
            .cached_min
            .get()
            .is_some_and(|cached| cached != self.measure())
        {
            self.invalidate();
        }
    }

    /// Full pass: re-measures the whole tree, then arranges it in the current rectangle.
    pub fn layout(&mut self) {
        self.invalidate_tree();
        self.min_size();
        self.recalc_sizes();
    }

    /// Returns true when the hint changed the minimal size of this container.
    pub fn inform_first_direction(
        &mut self,
        direction: Orientation,
        size: i32,
        available_other: i32,
    ) -> bool {
        let changed = self.kind.strategy_mut().inform_first_direction(
            &mut self.items,
            direction,
            size,
            available_other,
        );
        if changed {
            self.invalidate();
        }
        changed
    }

    pub fn compute_fitting_client_size(&self, _widget: &WidgetRef) -> Size {
        self.min_size()
    }

    pub fn compute_fitting_window_size(&self, widget: &WidgetRef) -> Size {
        widget.borrow().client_to_window_size(self.min_size())
    }

    /// Resizes `widget` to the fitting window size and lays the items out in its client area.
    pub fn fit(&mut self, widget: &WidgetRef) -> Size {
        let client = self.compute_fitting_client_size(widget);
        let window = self.compute_fitting_window_size(widget);
        let origin = widget.borrow().position();
        widget.borrow_mut().set_bounds(Rect::from_parts(origin, window));
        self.set_dimension(Rect::from_parts(Point::ZERO, client));
        window
    }

    /// Tells a scrollable widget how large its content is.
    pub fn fit_inside(&mut self, widget: &WidgetRef) {
        let size = self.compute_fitting_client_size(widget);
        widget.borrow_mut().set_virtual_size(size);
    }

    pub fn set_size_hints(&mut self, widget: &WidgetRef) {
        let size = self.compute_fitting_window_size(widget);
        widget.borrow_mut().set_min_window_size(size);
        self.fit(widget);
    }

    // Visibility

    pub fn show<'a>(&mut self, target: impl Into<ItemTarget<'a>>, show: bool, recursive: bool) -> bool {
        match self.get_item_mut(target, recursive) {
            Some(item) => {
                item.show(show);
                true
            }
            None => false,
        }
    }

    pub fn hide<'a>(&mut self, target: impl Into<ItemTarget<'a>>, recursive: bool) -> bool {
        self.show(target, false, recursive)
    }

    /// False for items that are not direct children of this container.
    pub fn is_shown<'a>(&self, target: impl Into<ItemTarget<'a>>) -> bool {
        self.index_of(&target.into())
            .is_some_and(|index| self.items[index].is_shown())
    }

    pub fn show_items(&mut self, show: bool) {
        self.invalidate();
        for item in &mut self.items {
            item.show(show);
        }
    }

    pub fn are_any_items_shown(&self) -> bool {
        self.items.iter().any(SizerItem::is_shown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_widget;

    #[test]
    fn test_structure_operations() {
        let a = test_widget(10, 10);
        let b = test_widget(20, 20);
        let mut sizer = Sizer::vertical();
        let policy = sizer.policy();

        sizer.add(a.widget(), &policy).unwrap();
        sizer.prepend(b.widget(), &policy).unwrap();
        sizer.add_spacer(5).unwrap();
        assert_eq!(sizer.item_count(), 3);
        assert!(sizer.get_item(0usize, false).unwrap().widget().is_some());
        assert!(sizer.insert(7, a.widget(), &policy).is_err());

        assert!(sizer.remove(b.widget()));
        assert!(!sizer.remove(b.widget()));
        assert!(sizer.get_item(b.widget(), true).is_none());
        assert_eq!(sizer.item_count(), 2);

        sizer.clear();
        assert!(sizer.is_empty());
    }

    #[test]
    fn test_detach_returns_owned_content() {
        let mut outer = Sizer::vertical();
        let inner = Sizer::horizontal();
        let inner_id = inner.id();
        let policy = outer.policy();
        outer.add(inner, &policy).unwrap();

        let Some(ItemContent::Sizer(inner)) = outer.detach(inner_id) else {
            panic!("sub-sizer should be handed back");
        };
        assert_eq!(inner.id(), inner_id);
        assert!(outer.is_empty());
        assert!(outer.detach(inner_id).is_none());
    }

    #[test]
    fn test_recursive_lookup_and_min_size_setters() {
        let leaf = test_widget(10, 10);
        let mut inner = Sizer::horizontal();
        let policy = inner.policy();
        inner.add(leaf.widget(), &policy).unwrap().set_id(42);
        let inner_id = inner.id();

        let mut outer = Sizer::vertical();
        outer.add(inner, &policy).unwrap();

        assert!(outer.get_item(leaf.widget(), false).is_none());
        assert!(outer.get_item(leaf.widget(), true).is_some());
        assert!(outer.get_item_by_id(42, true).is_some());
        assert!(outer.get_item_by_id(42, false).is_none());
        assert!(outer.child_sizer(inner_id).is_some());

        assert_eq!(outer.min_size(), Size::new(10, 10));
        assert_eq!(outer.set_item_min_size(leaf.widget(), Size::new(30, 5)), Ok(true));
        assert_eq!(outer.min_size(), Size::new(30, 5));

        let stranger = test_widget(1, 1);
        assert_eq!(outer.set_item_min_size(stranger.widget(), Size::new(1, 1)), Ok(false));
        assert!(outer.set_item_min_size(leaf.widget(), Size::new(-1, 1)).is_err());
    }

    #[test]
    fn test_nested_mutation_invalidates_ancestors() {
        let leaf = test_widget(10, 10);
        let mut inner = Sizer::horizontal();
        let policy = inner.policy();
        inner.add(leaf.widget(), &policy).unwrap();
        let inner_id = inner.id();

        let mut outer = Sizer::vertical();
        outer.add(inner, &policy).unwrap();
        assert_eq!(outer.min_size(), Size::new(10, 10));

        let extra = test_widget(15, 4);
        outer
            .child_sizer_mut(inner_id)
            .unwrap()
            .add(extra.widget(), &policy)
            .unwrap();
        assert_eq!(outer.min_size(), Size::new(25, 10));
    }

    #[test]
    fn test_min_size_floor() {
        let mut sizer = Sizer::vertical();
        sizer.set_min_size(Size::new(50, 5)).unwrap();
        let widget = test_widget(10, 10);
        let policy = sizer.policy();
        sizer.add(widget.widget(), &policy).unwrap();

        assert_eq!(sizer.calc_min(), Size::new(10, 10));
        assert_eq!(sizer.min_size(), Size::new(50, 10));
        assert!(sizer.set_min_size(Size::new(-1, 0)).is_err());
    }

    #[test]
    fn test_visibility_operations() {
        let a = test_widget(10, 10);
        let b = test_widget(10, 10);
        let mut sizer = Sizer::vertical();
        let policy = sizer.policy();
        sizer.add(a.widget(), &policy).unwrap();
        sizer.add(b.widget(), &policy).unwrap();

        assert!(sizer.hide(a.widget(), false));
        assert!(!a.state().visible);
        assert!(!sizer.is_shown(a.widget()));
        assert_eq!(sizer.min_size(), Size::new(10, 10));

        sizer.show_items(false);
        assert!(!sizer.are_any_items_shown());
        assert!(sizer.show(1usize, true, false));
        assert!(sizer.is_shown(1usize));

        let detached = test_widget(1, 1);
        assert!(!sizer.show(detached.widget(), true, true));
        assert!(!sizer.is_shown(detached.widget()));
    }

    #[test]
    fn test_fit_resizes_widget() {
        let child = test_widget(30, 20);
        let window = test_widget(0, 0);
        let mut sizer = Sizer::vertical();
        let policy = sizer.policy().border_px(crate::SizerFlags::BORDER_ALL, 5);
        sizer.add(child.widget(), &policy).unwrap();

        assert_eq!(sizer.fit(window.widget()), Size::new(40, 30));
        assert_eq!(window.bounds().size, Size::new(40, 30));
        assert_eq!(child.bounds(), Rect::new(5, 5, 30, 20));

        sizer.fit_inside(window.widget());
        assert_eq!(window.state().virtual_size, Some(Size::new(40, 30)));
        sizer.set_size_hints(window.widget());
        assert_eq!(window.state().min_window_size, Some(Size::new(40, 30)));
    }

    #[test]
    fn test_replace_keeps_policy() {
        let a = test_widget(10, 10);
        let b = test_widget(30, 30);
        let mut sizer = Sizer::vertical();
        let policy = sizer.policy().proportion(2);
        sizer.add(a.widget(), &policy).unwrap();

        assert!(sizer.replace(a.widget(), b.widget(), false));
        let item = sizer.get_item(0usize, false).unwrap();
        assert_eq!(item.proportion(), 2);
        assert_eq!(sizer.min_size(), Size::new(30, 30));
        assert!(!sizer.replace(a.widget(), b.widget(), true));
    }
}
