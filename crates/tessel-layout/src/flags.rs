// crates/tessel-layout/src/flags.rs
use bitflags::bitflags;
use tessel_core::Orientation;

bitflags! {
    /// Per-item layout flags: border sides, alignment and sizing behaviour.
    ///
    /// Left/top alignment is the absence of the right/bottom/center bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SizerFlags: u32 {
        const RESERVE_SPACE_EVEN_IF_HIDDEN = 0x0002;

        const BORDER_LEFT = 0x0010;
        const BORDER_RIGHT = 0x0020;
        const BORDER_TOP = 0x0040;
        const BORDER_BOTTOM = 0x0080;
        const BORDER_ALL = Self::BORDER_LEFT.bits()
            | Self::BORDER_RIGHT.bits()
            | Self::BORDER_TOP.bits()
            | Self::BORDER_BOTTOM.bits();
        const BORDER_HORIZONTAL = Self::BORDER_LEFT.bits() | Self::BORDER_RIGHT.bits();
        const BORDER_VERTICAL = Self::BORDER_TOP.bits() | Self::BORDER_BOTTOM.bits();

        const ALIGN_CENTER_HORIZONTAL = 0x0100;
        const ALIGN_RIGHT = 0x0200;
        const ALIGN_BOTTOM = 0x0400;
        const ALIGN_CENTER_VERTICAL = 0x0800;
        const ALIGN_CENTER = Self::ALIGN_CENTER_HORIZONTAL.bits() | Self::ALIGN_CENTER_VERTICAL.bits();
        const ALIGN_MASK = Self::ALIGN_CENTER.bits() | Self::ALIGN_RIGHT.bits() | Self::ALIGN_BOTTOM.bits();

        const EXPAND = 0x2000;
        const SHAPED = 0x4000;
        const FIXED_MIN_SIZE = 0x8000;
    }
}

impl SizerFlags {
    /// Border widths applied to each side, in `(left, top, right, bottom)` order.
    pub fn insets(self, border: i32) -> (i32, i32, i32, i32) {
        let side = |flag: SizerFlags| if self.contains(flag) { border } else { 0 };
        (
            side(SizerFlags::BORDER_LEFT),
            side(SizerFlags::BORDER_TOP),
            side(SizerFlags::BORDER_RIGHT),
            side(SizerFlags::BORDER_BOTTOM),
        )
    }

    /// Offset of an item inside a cell along `axis`, given the free space left in the cell.
    pub fn align_offset(self, axis: Orientation, free: i32) -> i32 {
        let (center, end) = match axis {
            Orientation::Horizontal => (SizerFlags::ALIGN_CENTER_HORIZONTAL, SizerFlags::ALIGN_RIGHT),
            Orientation::Vertical => (SizerFlags::ALIGN_CENTER_VERTICAL, SizerFlags::ALIGN_BOTTOM),
        };
        if self.contains(center) {
            free / 2
        } else if self.contains(end) {
            free
        } else {
            0
        }
    }
}

bitflags! {
    /// Behaviour switches of a wrapping container.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WrapFlags: u32 {
        /// The last item of a line without proportional items takes the leftover space.
        const EXTEND_LAST_ON_EACH_LINE = 0x0001;
        /// Spacers that would open a new line collapse to nothing.
        const REMOVE_LEADING_SPACES = 0x0002;
    }
}

impl Default for WrapFlags {
    fn default() -> Self {
        WrapFlags::EXTEND_LAST_ON_EACH_LINE | WrapFlags::REMOVE_LEADING_SPACES
    }
}
