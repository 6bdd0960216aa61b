// crates/tessel-layout/src/item.rs

use std::fmt;

use tessel_core::{same_widget, LayoutError, Orientation, Rect, Result, Size, WidgetRef};
use tracing::trace;

use crate::{CellSpan, LayoutPolicy, Sizer, SizerFlags, SizerId};

/// What an item lays out.
///
/// Sub-containers and spacers are owned by the item; widgets are only referenced.
pub enum ItemContent {
    Widget(WidgetRef),
    Sizer(Box<Sizer>),
    Spacer(Size),
}

impl ItemContent {
    pub fn spacer(width: i32, height: i32) -> Self {
        ItemContent::Spacer(Size::new(width, height))
    }
}

impl From<WidgetRef> for ItemContent {
    fn from(widget: WidgetRef) -> Self {
        ItemContent::Widget(widget)
    }
}

impl From<&WidgetRef> for ItemContent {
    fn from(widget: &WidgetRef) -> Self {
        ItemContent::Widget(widget.clone())
    }
}

impl From<Sizer> for ItemContent {
    fn from(sizer: Sizer) -> Self {
        ItemContent::Sizer(Box::new(sizer))
    }
}

impl From<Size> for ItemContent {
    fn from(size: Size) -> Self {
        ItemContent::Spacer(size)
    }
}

impl fmt::Debug for ItemContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemContent::Widget(widget) => f
                .debug_tuple("Widget")
                .field(&widget.borrow().natural_size())
                .finish(),
            ItemContent::Sizer(sizer) => f.debug_tuple("Sizer").field(&sizer.id()).finish(),
            ItemContent::Spacer(size) => f.debug_tuple("Spacer").field(size).finish(),
        }
    }
}

/// Addresses an item of a container.
#[derive(Clone, Copy)]
pub enum ItemTarget<'a> {
    Widget(&'a WidgetRef),
    Sizer(SizerId),
    Index(usize),
}

impl<'a> From<&'a WidgetRef> for ItemTarget<'a> {
    fn from(widget: &'a WidgetRef) -> Self {
        ItemTarget::Widget(widget)
    }
}

impl From<SizerId> for ItemTarget<'_> {
    fn from(id: SizerId) -> Self {
        ItemTarget::Sizer(id)
    }
}

impl From<usize> for ItemTarget<'_> {
    fn from(index: usize) -> Self {
        ItemTarget::Index(index)
    }
}

/// One child entry of a container together with its layout policy.
#[derive(Debug)]
pub struct SizerItem {
    content: ItemContent,
    proportion: i32,
    flags: SizerFlags,
    border: i32,
    min_size_override: Option<Size>,
    fixed_min_size: Option<Size>,
    ratio: Option<f32>,
    id: Option<i32>,
    shown: bool,
    rect: Rect,
    placement: Option<CellSpan>,
}

impl SizerItem {
    /// Fails with `InvalidArgument` on a negative proportion or border.
    pub fn new(
        content: impl Into<ItemContent>,
        proportion: i32,
        flags: SizerFlags,
        border: i32,
    ) -> Result<Self> {
        LayoutError::check_non_negative("proportion", proportion)?;
        LayoutError::check_non_negative("border", border)?;
        let content = content.into();
        if let ItemContent::Spacer(size) = content {
            LayoutError::check_size("spacer size", size)?;
        }

        let mut item = Self {
            content,
            proportion,
            flags: SizerFlags::empty(),
            border,
            min_size_override: None,
            fixed_min_size: None,
            ratio: None,
            id: None,
            shown: true,
            rect: Rect::default(),
            placement: None,
        };
        item.apply_flags(flags);
        Ok(item)
    }

    pub fn with_policy(content: impl Into<ItemContent>, policy: &LayoutPolicy) -> Result<Self> {
        Self::new(
            content,
            policy.get_proportion(),
            policy.flags(),
            policy.border_width(),
        )
    }

    pub fn content(&self) -> &ItemContent {
        &self.content
    }

    pub fn into_content(self) -> ItemContent {
        self.content
    }

    pub(crate) fn replace_content(&mut self, content: ItemContent) -> ItemContent {
        let old = std::mem::replace(&mut self.content, content);
        self.fixed_min_size = None;
        self.apply_flags(self.flags);
        old
    }

    pub fn widget(&self) -> Option<&WidgetRef> {
        match &self.content {
            ItemContent::Widget(widget) => Some(widget),
            _ => None,
        }
    }

    pub fn sizer(&self) -> Option<&Sizer> {
        match &self.content {
            ItemContent::Sizer(sizer) => Some(sizer),
            _ => None,
        }
    }

    /// Mutable access to a nested container. The owning container has already
    /// dropped its cached minimum when it handed out this item.
    pub fn sizer_mut(&mut self) -> Option<&mut Sizer> {
        match &mut self.content {
            ItemContent::Sizer(sizer) => Some(sizer),
            _ => None,
        }
    }

    pub fn is_widget(&self) -> bool {
        matches!(self.content, ItemContent::Widget(_))
    }

    pub fn is_sizer(&self) -> bool {
        matches!(self.content, ItemContent::Sizer(_))
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self.content, ItemContent::Spacer(_))
    }

    pub fn proportion(&self) -> i32 {
        self.proportion
    }

    pub fn set_proportion(&mut self, proportion: i32) -> Result<()> {
        self.proportion = LayoutError::check_non_negative("proportion", proportion)?;
        Ok(())
    }

    pub fn flags(&self) -> SizerFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: SizerFlags) {
        self.apply_flags(flags);
    }

    pub fn border(&self) -> i32 {
        self.border
    }

    pub fn set_border(&mut self, border: i32) -> Result<()> {
        self.border = LayoutError::check_non_negative("border", border)?;
        Ok(())
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    /// Width to height ratio kept by shaped items. Defaults to the ratio of the minimal size.
    pub fn ratio(&self) -> Option<f32> {
        self.ratio.or_else(|| {
            let min = self.min_size();
            (min.width > 0 && min.height > 0).then(|| min.width as f32 / min.height as f32)
        })
    }

    pub fn set_ratio(&mut self, ratio: f32) {
        self.ratio = (ratio > 0.0).then_some(ratio);
    }

    /// Box assigned by the last arrange pass, borders excluded.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn placement(&self) -> Option<CellSpan> {
        self.placement
    }

    pub(crate) fn set_placement(&mut self, placement: Option<CellSpan>) {
        self.placement = placement;
    }

    fn apply_flags(&mut self, flags: SizerFlags) {
        self.flags = flags;
        if !flags.contains(SizerFlags::FIXED_MIN_SIZE) {
            self.fixed_min_size = None;
        } else if self.fixed_min_size.is_none() {
            if let ItemContent::Widget(widget) = &self.content {
                self.fixed_min_size = Some(widget.borrow().current_size());
            }
        }
    }

    /// Pins the minimal size. Widgets keep it as an override, spacers are
    /// resized and sub-containers take it as their floor.
    pub fn set_min_size(&mut self, size: Size) -> Result<()> {
        LayoutError::check_size("min size", size)?;
        match &mut self.content {
            ItemContent::Widget(_) => self.min_size_override = Some(size),
            ItemContent::Sizer(sizer) => sizer.set_min_size(size)?,
            ItemContent::Spacer(spacer) => *spacer = size,
        }
        Ok(())
    }

    /// Minimal size of the content, borders excluded.
    pub fn min_size(&self) -> Size {
        match &self.content {
            ItemContent::Widget(widget) => self
                .min_size_override
                .or(self.fixed_min_size)
                .unwrap_or_else(|| widget.borrow().natural_size()),
            ItemContent::Sizer(sizer) => sizer.min_size(),
            ItemContent::Spacer(size) => *size,
        }
    }

    pub fn min_size_with_border(&self) -> Size {
        let (left, top, right, bottom) = self.flags.insets(self.border);
        self.min_size().grow(left + right, top + bottom)
    }

    /// What this item adds to its container's minimal size: hidden items
    /// count only when they reserve their space.
    pub fn contribution(&self) -> Size {
        if self.takes_space() {
            self.min_size_with_border()
        } else {
            Size::ZERO
        }
    }

    pub fn takes_space(&self) -> bool {
        self.is_shown() || self.flags.contains(SizerFlags::RESERVE_SPACE_EVEN_IF_HIDDEN)
    }

    /// Widgets report their own visibility; an empty sub-container counts as shown.
    pub fn is_shown(&self) -> bool {
        match &self.content {
            ItemContent::Widget(widget) => widget.borrow().is_visible(),
            ItemContent::Sizer(sizer) => {
                self.shown && (sizer.is_empty() || sizer.are_any_items_shown())
            }
            ItemContent::Spacer(_) => self.shown,
        }
    }

    pub fn show(&mut self, show: bool) {
        self.shown = show;
        match &mut self.content {
            ItemContent::Widget(widget) => widget.borrow_mut().set_visible(show),
            ItemContent::Sizer(sizer) => sizer.show_items(show),
            ItemContent::Spacer(_) => {}
        }
    }

    pub(crate) fn matches(&self, target: &ItemTarget<'_>) -> bool {
        match (target, &self.content) {
            (ItemTarget::Widget(target), ItemContent::Widget(widget)) => same_widget(target, widget),
            (ItemTarget::Sizer(id), ItemContent::Sizer(sizer)) => sizer.id() == *id,
            _ => false,
        }
    }

    /// Forwards a size hint along `direction` to a nested container, net of this item's borders.
    pub(crate) fn inform_first_direction(
        &mut self,
        direction: Orientation,
        size: i32,
        available_other: i32,
    ) -> bool {
        let (left, top, right, bottom) = self.flags.insets(self.border);
        let border = match direction {
            Orientation::Horizontal => left + right,
            Orientation::Vertical => top + bottom,
        };
        match &mut self.content {
            ItemContent::Sizer(sizer) => {
                sizer.inform_first_direction(direction, (size - border).max(0), available_other)
            }
            _ => false,
        }
    }

    /// Records the cell of a hidden item that still reserves its space.
    pub(crate) fn reserve(&mut self, cell: Rect) {
        self.rect = cell;
    }

    /// Places the item inside `cell`.
    ///
    /// Borders are removed first. Along `fill` (the main axis of linear
    /// containers) the item always takes the whole cell; elsewhere `EXPAND`
    /// stretches it, `SHAPED` keeps the aspect ratio and anything else keeps
    /// its minimal size and is aligned in the cell.
    pub fn set_dimension(&mut self, cell: Rect, fill: Option<Orientation>) {
        let (left, top, right, bottom) = self.flags.insets(self.border);
        let inner = cell.deflate(left, top, right, bottom);

        let size = if self.flags.contains(SizerFlags::SHAPED) {
            self.shaped_size(inner.size)
        } else {
            let mut size = if self.flags.contains(SizerFlags::EXPAND) {
                inner.size
            } else {
                self.min_size().min(inner.size)
            };
            match fill {
                Some(Orientation::Horizontal) => size.width = inner.width(),
                Some(Orientation::Vertical) => size.height = inner.height(),
                None => {}
            }
            size
        };

        let x = inner.x()
            + self
                .flags
                .align_offset(Orientation::Horizontal, inner.width() - size.width);
        let y = inner.y()
            + self
                .flags
                .align_offset(Orientation::Vertical, inner.height() - size.height);
        self.rect = Rect::new(x, y, size.width, size.height);
        trace!(rect = ?self.rect, ?cell, "placing item");

        match &mut self.content {
            ItemContent::Widget(widget) => widget.borrow_mut().set_bounds(self.rect),
            ItemContent::Sizer(sizer) => sizer.set_dimension(self.rect),
            ItemContent::Spacer(_) => {}
        }
    }

    fn shaped_size(&self, available: Size) -> Size {
        let Some(ratio) = self.ratio() else {
            return self.min_size().min(available);
        };
        if available.height <= 0 {
            return Size::new(0, 0);
        }
        if available.width as f32 / available.height as f32 > ratio {
            let width = (available.height as f32 * ratio).round() as i32;
            Size::new(width.min(available.width), available.height)
        } else {
            let height = (available.width as f32 / ratio).round() as i32;
            Size::new(available.width, height.min(available.height))
        }
    }
}
