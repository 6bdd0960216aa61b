// crates/tessel-layout/src/policy.rs

use tessel_core::LayoutConfig;

use crate::SizerFlags;

/// Fluent description of how an item should be laid out.
///
/// Border calls accumulate their sides, the width of the latest call wins.
/// `align` and `center` replace the whole alignment, while the single-axis
/// helpers (`left`, `top`, `center_vertical`, ...) only touch their own axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPolicy {
    proportion: i32,
    flags: SizerFlags,
    border: i32,
    config: LayoutConfig,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutPolicy {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    /// Policy whose default border is derived from `config`.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            proportion: 0,
            flags: SizerFlags::empty(),
            border: 0,
            config,
        }
    }

    pub fn proportion(mut self, proportion: i32) -> Self {
        self.proportion = proportion;
        self
    }

    pub fn expand(mut self) -> Self {
        self.flags |= SizerFlags::EXPAND;
        self
    }

    pub fn shaped(mut self) -> Self {
        self.flags |= SizerFlags::SHAPED;
        self
    }

    pub fn fixed_min_size(mut self) -> Self {
        self.flags |= SizerFlags::FIXED_MIN_SIZE;
        self
    }

    pub fn reserve_space_even_if_hidden(mut self) -> Self {
        self.flags |= SizerFlags::RESERVE_SPACE_EVEN_IF_HIDDEN;
        self
    }

    /// Replaces the alignment with the alignment bits of `alignment`.
    pub fn align(mut self, alignment: SizerFlags) -> Self {
        self.flags.remove(SizerFlags::ALIGN_MASK);
        self.flags |= alignment & SizerFlags::ALIGN_MASK;
        self
    }

    pub fn center(self) -> Self {
        self.align(SizerFlags::ALIGN_CENTER)
    }

    pub fn center_horizontal(mut self) -> Self {
        self.flags.remove(SizerFlags::ALIGN_RIGHT);
        self.flags |= SizerFlags::ALIGN_CENTER_HORIZONTAL;
        self
    }

    pub fn center_vertical(mut self) -> Self {
        self.flags.remove(SizerFlags::ALIGN_BOTTOM);
        self.flags |= SizerFlags::ALIGN_CENTER_VERTICAL;
        self
    }

    pub fn left(mut self) -> Self {
        self.flags
            .remove(SizerFlags::ALIGN_RIGHT | SizerFlags::ALIGN_CENTER_HORIZONTAL);
        self
    }

    pub fn right(mut self) -> Self {
        self.flags.remove(SizerFlags::ALIGN_CENTER_HORIZONTAL);
        self.flags |= SizerFlags::ALIGN_RIGHT;
        self
    }

    pub fn top(mut self) -> Self {
        self.flags
            .remove(SizerFlags::ALIGN_BOTTOM | SizerFlags::ALIGN_CENTER_VERTICAL);
        self
    }

    pub fn bottom(mut self) -> Self {
        self.flags.remove(SizerFlags::ALIGN_CENTER_VERTICAL);
        self.flags |= SizerFlags::ALIGN_BOTTOM;
        self
    }

    /// Border of `px` pixels on the sides given by `direction`.
    pub fn border_px(mut self, direction: SizerFlags, px: i32) -> Self {
        self.flags |= direction & SizerFlags::BORDER_ALL;
        self.border = px;
        self
    }

    /// Default border on the sides given by `direction`.
    pub fn border(self, direction: SizerFlags) -> Self {
        let px = self.default_border();
        self.border_px(direction, px)
    }

    pub fn border_all(self) -> Self {
        self.border(SizerFlags::BORDER_ALL)
    }

    pub fn double_border(self, direction: SizerFlags) -> Self {
        let px = 2 * self.default_border();
        self.border_px(direction, px)
    }

    pub fn triple_border(self, direction: SizerFlags) -> Self {
        let px = 3 * self.default_border();
        self.border_px(direction, px)
    }

    pub fn horz_border(self) -> Self {
        self.border(SizerFlags::BORDER_HORIZONTAL)
    }

    pub fn double_horz_border(self) -> Self {
        self.double_border(SizerFlags::BORDER_HORIZONTAL)
    }

    pub fn default_border(&self) -> i32 {
        self.config.default_border()
    }

    pub fn default_border_fractional(&self) -> f32 {
        self.config.default_border_fractional()
    }

    pub fn get_proportion(&self) -> i32 {
        self.proportion
    }

    pub fn flags(&self) -> SizerFlags {
        self.flags
    }

    pub fn border_width(&self) -> i32 {
        self.border
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }
}
