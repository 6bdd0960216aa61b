// crates/tessel-core/src/lib.rs
pub mod config;
pub mod geometry;
pub mod widget;

pub use config::*;
pub use geometry::*;
pub use widget::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid argument: {name} = {value}")]
    InvalidArgument { name: &'static str, value: i32 },

    #[error("Index {index} is out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

impl LayoutError {
    /// Fails with `InvalidArgument` when `value` is negative.
    pub fn check_non_negative(name: &'static str, value: i32) -> Result<i32> {
        if value < 0 {
            Err(LayoutError::InvalidArgument { name, value })
        } else {
            Ok(value)
        }
    }

    pub fn check_size(name: &'static str, size: Size) -> Result<Size> {
        Self::check_non_negative(name, size.width)?;
        Self::check_non_negative(name, size.height)?;
        Ok(size)
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_values_are_rejected() {
        assert_eq!(LayoutError::check_non_negative("border", 3), Ok(3));
        assert_eq!(
            LayoutError::check_non_negative("border", -1),
            Err(LayoutError::InvalidArgument { name: "border", value: -1 })
        );
        assert!(LayoutError::check_size("min size", Size::new(4, -2)).is_err());
    }
}
