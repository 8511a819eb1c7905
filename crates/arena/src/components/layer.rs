use serde::{Deserialize, Serialize};

/// Draw layer. Controls painter's order for drawables.
///
/// Lower layers are drawn first. Drawables sharing a layer keep the order in
/// which they were added, so games that never set a layer draw in insertion
/// order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Layer(pub i32);

impl Layer {
    /// The layer used when none is given.
    pub const DEFAULT: Self = Self(0);

    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// The layer directly above this one.
    pub fn above(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl From<i32> for Layer {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zero() {
        assert_eq!(Layer::default(), Layer::DEFAULT);
        assert_eq!(Layer::default().as_i32(), 0);
    }

    #[test]
    fn ordering_is_back_to_front() {
        assert!(Layer(-1) < Layer(0));
        assert!(Layer(0) < Layer(0).above());
        assert_eq!(Layer(i32::MAX).above(), Layer(i32::MAX));
    }
}
