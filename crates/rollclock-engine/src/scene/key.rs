/// Layer of a draw item; higher layers cover lower ones.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}

/// Paint order of a draw item: by layer, then by recording order.
///
/// Field order matters: the derived `Ord` compares `z` first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_wins_over_recording_order() {
        let early_top = SortKey::new(ZIndex(2), 0);
        let late_bottom = SortKey::new(ZIndex(1), 9);
        assert!(late_bottom < early_top);
        assert!(SortKey::new(ZIndex(1), 3) < SortKey::new(ZIndex(1), 4));
    }
}
