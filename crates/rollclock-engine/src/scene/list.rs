use crate::coords::Rect;

use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command + clip rect.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Clip rect in logical pixels. `None` = unclipped.
    pub clip_rect: Option<Rect>,
}

/// Recorded draw stream for one frame.
///
/// The runtime keeps a single list alive and clears it every frame, so
/// steady-state recording does not allocate.
///
/// Digit columns scope their strip with [`push_clip`](Self::push_clip) /
/// [`pop_clip`](Self::pop_clip); nested clips are intersected with the parent.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
    sorted: Vec<usize>,
    sorted_dirty: bool,
    clip_stack: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and the clip stack. Keeps capacity.
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted.clear();
        self.sorted_dirty = true;
        self.clip_stack.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Records `cmd` at layer `z`, inheriting the current clip.
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
            clip_rect: self.clip_stack.last().copied(),
        });
        self.sorted_dirty = true;
    }

    /// Begins a clip region, intersected with the enclosing one.
    ///
    /// Disjoint clips collapse to a zero-area rect so surfaces skip the items.
    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip_stack.last() {
            None => rect,
            Some(&parent) => parent.intersect(rect).unwrap_or_default(),
        };
        self.clip_stack.push(effective);
    }

    /// Ends the most recent clip region.
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip called without matching push_clip");
        self.clip_stack.pop();
    }

    /// Iterates items back-to-front without cloning commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.sorted.clear();
            self.sorted.extend(0..self.items.len());
            let items = &self.items;
            self.sorted.sort_by_key(|&i| items[i].key);
            self.sorted_dirty = false;
        }

        self.sorted.iter().map(|&i| &self.items[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn dot(list: &mut DrawList, z: i32, x: f32) {
        list.push_dot(ZIndex::new(z), Vec2::new(x, 0.0), 1.0, Color::WHITE);
    }

    fn xs(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Circle(c) => c.center.x,
                other => panic!("unexpected {other:?}"),
            })
            .collect()
    }

    #[test]
    fn paint_order_is_z_then_insertion() {
        let mut list = DrawList::new();
        dot(&mut list, 2, 0.0);
        dot(&mut list, 1, 1.0);
        dot(&mut list, 2, 2.0);
        dot(&mut list, 0, 3.0);
        assert_eq!(xs(&mut list), vec![3.0, 1.0, 0.0, 2.0]);
    }

    #[test]
    fn clips_nest_by_intersection() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        list.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        dot(&mut list, 0, 0.0);
        list.pop_clip();
        dot(&mut list, 0, 1.0);
        list.pop_clip();
        dot(&mut list, 0, 2.0);

        let clips: Vec<_> = list.items().iter().map(|i| i.clip_rect).collect();
        assert_eq!(clips, vec![
            Some(Rect::new(50.0, 50.0, 50.0, 50.0)),
            Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
            None,
        ]);
    }

    #[test]
    fn disjoint_clip_collapses_to_empty() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.push_clip(Rect::new(20.0, 20.0, 10.0, 10.0));
        dot(&mut list, 0, 0.0);
        assert!(list.items()[0].clip_rect.unwrap().is_empty());
    }

    #[test]
    fn clear_resets_items_and_order() {
        let mut list = DrawList::new();
        dot(&mut list, 0, 0.0);
        list.push_clip(Rect::new(0.0, 0.0, 1.0, 1.0));
        list.clear();
        assert!(list.is_empty());
        dot(&mut list, 0, 5.0);
        assert_eq!(list.items()[0].key.order, 0);
        assert_eq!(list.items()[0].clip_rect, None);
    }
}
