// src/description.rs
//! JSON layout descriptions: a tree of containers, widgets and spacers.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use tessel_layout::{
    FlexibleDirection, GridPosition, GridSpan, ItemContent, LayoutConfig, LayoutPolicy,
    NonFlexibleGrowMode, Orientation, Rect, Size, Sizer, SizerFlags, Widget, WidgetRef, WrapFlags,
};

/// One node of a description, tagged by its kind: `{"box": {...}}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Box(ContainerNode),
    Grid(ContainerNode),
    FlexGrid(ContainerNode),
    GridBag(ContainerNode),
    Wrap(ContainerNode),
    Widget(WidgetNode),
    Spacer(SpacerNode),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContainerNode {
    pub orientation: Orientation,
    pub rows: usize,
    pub cols: usize,
    pub hgap: i32,
    pub vgap: i32,
    pub growable_rows: Vec<Growable>,
    pub growable_cols: Vec<Growable>,
    pub flexible_direction: Option<FlexibleDirection>,
    pub non_flexible_grow_mode: Option<NonFlexibleGrowMode>,
    pub empty_cell_size: Option<Size>,
    pub extend_last: Option<bool>,
    pub remove_leading_spaces: Option<bool>,
    pub min_size: Option<Size>,
    pub items: Vec<ItemNode>,
}

impl ContainerNode {
    fn gap(&self) -> Size {
        Size::new(self.hgap, self.vgap)
    }

    fn wrap_flags(&self) -> WrapFlags {
        let mut flags = WrapFlags::default();
        flags.set(
            WrapFlags::EXTEND_LAST_ON_EACH_LINE,
            self.extend_last.unwrap_or(true),
        );
        flags.set(
            WrapFlags::REMOVE_LEADING_SPACES,
            self.remove_leading_spaces.unwrap_or(true),
        );
        flags
    }
}

#[derive(Debug, Deserialize)]
pub struct Growable {
    pub index: usize,
    #[serde(default = "default_growable_proportion")]
    pub proportion: i32,
}

fn default_growable_proportion() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct WidgetNode {
    pub name: String,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SpacerNode {
    pub width: i32,
    pub height: i32,
}

/// A node together with the policy of the item holding it.
#[derive(Debug, Deserialize)]
pub struct ItemNode {
    #[serde(flatten)]
    pub node: Node,
    #[serde(flatten)]
    pub policy: ItemPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Right,
    Top,
    Bottom,
    Center,
    CenterHorizontal,
    CenterVertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
    Horizontal,
    Vertical,
    All,
}

impl Side {
    fn flags(self) -> SizerFlags {
        match self {
            Side::Left => SizerFlags::BORDER_LEFT,
            Side::Right => SizerFlags::BORDER_RIGHT,
            Side::Top => SizerFlags::BORDER_TOP,
            Side::Bottom => SizerFlags::BORDER_BOTTOM,
            Side::Horizontal => SizerFlags::BORDER_HORIZONTAL,
            Side::Vertical => SizerFlags::BORDER_VERTICAL,
            Side::All => SizerFlags::BORDER_ALL,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SpanNode {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemPolicy {
    pub proportion: i32,
    pub expand: bool,
    pub align: Vec<Align>,
    pub border: Vec<Side>,
    /// Defaults to the configured default border when `border` names any side.
    pub border_width: Option<i32>,
    pub shaped: bool,
    pub fixed_min_size: bool,
    pub reserve_space: bool,
    pub hidden: bool,
    pub min_size: Option<Size>,
    pub position: Option<GridPosition>,
    pub span: Option<SpanNode>,
    pub id: Option<i32>,
}

impl ItemPolicy {
    fn apply(&self, mut policy: LayoutPolicy) -> LayoutPolicy {
        policy = policy.proportion(self.proportion);
        if self.expand {
            policy = policy.expand();
        }
        if self.shaped {
            policy = policy.shaped();
        }
        if self.fixed_min_size {
            policy = policy.fixed_min_size();
        }
        if self.reserve_space {
            policy = policy.reserve_space_even_if_hidden();
        }
        for align in &self.align {
            policy = match align {
                Align::Left => policy.left(),
                Align::Right => policy.right(),
                Align::Top => policy.top(),
                Align::Bottom => policy.bottom(),
                Align::Center => policy.center(),
                Align::CenterHorizontal => policy.center_horizontal(),
                Align::CenterVertical => policy.center_vertical(),
            };
        }
        let sides = self
            .border
            .iter()
            .fold(SizerFlags::empty(), |sides, side| sides | side.flags());
        if !sides.is_empty() {
            policy = match self.border_width {
                Some(px) => policy.border_px(sides, px),
                None => policy.border(sides),
            };
        }
        policy
    }
}

/// Widget standing in for a real control: it has a name and remembers its bounds.
#[derive(Debug)]
pub struct DemoWidget {
    pub name: String,
    natural: Size,
    bounds: Rect,
    visible: bool,
}

impl DemoWidget {
    pub fn new(name: impl Into<String>, natural: Size) -> Self {
        Self {
            name: name.into(),
            natural,
            bounds: Rect::default(),
            visible: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Widget for DemoWidget {
    fn natural_size(&self) -> Size {
        self.natural
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
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

/// A built container tree and the widgets it lays out, in description order.
pub struct Scene {
    pub root: Sizer,
    pub widgets: Vec<Rc<RefCell<DemoWidget>>>,
}

impl Scene {
    /// One line per widget: `name x y width height`, hidden widgets marked as such.
    pub fn report(&self) -> Vec<String> {
        self.widgets
            .iter()
            .map(|widget| {
                let widget = widget.borrow();
                let rect = widget.bounds();
                let mut line = format!(
                    "{} {} {} {} {}",
                    widget.name,
                    rect.x(),
                    rect.y(),
                    rect.width(),
                    rect.height()
                );
                if !widget.is_visible() {
                    line.push_str(" hidden");
                }
                line
            })
            .collect()
    }
}

pub fn parse(text: &str) -> Result<Node> {
    serde_json::from_str(text).context("Failed to parse layout description")
}

pub fn build(node: &Node, config: LayoutConfig) -> Result<Scene> {
    let mut widgets = Vec::new();
    let root = build_sizer(node, config, &mut widgets)?;
    debug!(widgets = widgets.len(), "built layout");
    Ok(Scene { root, widgets })
}

fn build_sizer(
    node: &Node,
    config: LayoutConfig,
    widgets: &mut Vec<Rc<RefCell<DemoWidget>>>,
) -> Result<Sizer> {
    let (sizer, container) = match node {
        Node::Box(c) => (Sizer::new_box(c.orientation), c),
        Node::Grid(c) => (Sizer::new_grid(c.rows, c.cols, c.gap())?, c),
        Node::FlexGrid(c) => (Sizer::new_flex_grid(c.rows, c.cols, c.gap())?, c),
        Node::GridBag(c) => (Sizer::new_grid_bag(c.gap())?, c),
        Node::Wrap(c) => (Sizer::new_wrap(c.orientation, c.wrap_flags()), c),
        Node::Widget(_) | Node::Spacer(_) => bail!("Expected a container node, found {:?}", node),
    };
    let mut sizer = sizer.with_config(config);

    configure(&mut sizer, container)?;
    for item in &container.items {
        add_item(&mut sizer, item, config, widgets)?;
    }
    Ok(sizer)
}

fn configure(sizer: &mut Sizer, container: &ContainerNode) -> Result<()> {
    for growable in &container.growable_rows {
        if !sizer.add_growable_row(growable.index, growable.proportion)? {
            warn!("growable_rows ignored on a {} container", sizer.kind().name());
        }
    }
    for growable in &container.growable_cols {
        if !sizer.add_growable_col(growable.index, growable.proportion)? {
            warn!("growable_cols ignored on a {} container", sizer.kind().name());
        }
    }
    if let Some(direction) = container.flexible_direction {
        sizer.set_flexible_direction(direction);
    }
    if let Some(mode) = container.non_flexible_grow_mode {
        sizer.set_non_flexible_grow_mode(mode);
    }
    if let Some(size) = container.empty_cell_size {
        sizer.set_empty_cell_size(size)?;
    }
    if let Some(size) = container.min_size {
        sizer.set_min_size(size)?;
    }
    Ok(())
}

fn add_item(
    sizer: &mut Sizer,
    item: &ItemNode,
    config: LayoutConfig,
    widgets: &mut Vec<Rc<RefCell<DemoWidget>>>,
) -> Result<()> {
    let content: ItemContent = match &item.node {
        Node::Widget(node) => {
            let widget = Rc::new(RefCell::new(DemoWidget::new(
                node.name.clone(),
                Size::new(node.width, node.height),
            )));
            widgets.push(widget.clone());
            let widget: WidgetRef = widget;
            widget.into()
        }
        Node::Spacer(node) => ItemContent::spacer(node.width, node.height),
        nested => build_sizer(nested, config, widgets)?.into(),
    };

    let options = &item.policy;
    let policy = options.apply(sizer.policy());
    let added = match options.position {
        Some(position) => {
            let span = match options.span {
                Some(span) => GridSpan::new(span.rows, span.cols)?,
                None => GridSpan::default(),
            };
            sizer.add_at(content, position, span, &policy)?
        }
        None => sizer.add(content, &policy)?,
    };

    if let Some(id) = options.id {
        added.set_id(id);
    }
    if let Some(size) = options.min_size {
        added.set_min_size(size)?;
    }
    if options.hidden {
        added.show(false);
    }
    Ok(())
}
