use eframe::egui;

pub type ItemId = u64;
pub type GroupId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    BackgroundMap,
    RulerLine,
    RulerText,
    RulerBubble,
}

#[derive(Clone, Debug)]
pub enum ItemKind {
    Line {
        a: egui::Pos2,
        b: egui::Pos2,
        width: f32,
        color: egui::Color32,
    },
    Text {
        pos: egui::Pos2,
        text: String,
        // Extent measured by the caller's layout engine at creation time.
        size: egui::Vec2,
        font_size: f32,
        color: egui::Color32,
    },
    Rect {
        rect: egui::Rect,
        fill: egui::Color32,
    },
    Image {
        pos: egui::Pos2,
        texture: egui::TextureId,
        size: egui::Vec2,
    },
}

#[derive(Clone, Debug)]
pub struct Item {
    pub id: ItemId,
    pub tag: Tag,
    pub group: Option<GroupId>,
    pub kind: ItemKind,
}

impl Item {
    pub fn bounds(&self) -> egui::Rect {
        match &self.kind {
            ItemKind::Line { a, b, .. } => egui::Rect::from_two_pos(*a, *b),
            ItemKind::Text { pos, size, .. } => egui::Rect::from_min_size(*pos, *size),
            ItemKind::Rect { rect, .. } => *rect,
            ItemKind::Image { pos, size, .. } => egui::Rect::from_min_size(*pos, *size),
        }
    }

    fn hit_distance(&self, pos: egui::Pos2) -> f32 {
        match &self.kind {
            ItemKind::Line { a, b, .. } => segment_distance(pos, *a, *b),
            _ => self.bounds().distance_to_pos(pos),
        }
    }
}

fn segment_distance(p: egui::Pos2, a: egui::Pos2, b: egui::Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}

/// Retained drawing surface: items in creation order (back to front) with
/// stable ids, category tags and optional annotation-group membership.
#[derive(Clone, Debug)]
pub struct Scene {
    items: Vec<Item>,
    next_id: ItemId,
    next_group: GroupId,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            next_group: 1,
        }
    }

    pub fn allocate_group(&mut self) -> GroupId {
        let group = self.next_group;
        self.next_group += 1;
        group
    }

    pub fn create(&mut self, tag: Tag, group: Option<GroupId>, kind: ItemKind) -> ItemId {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Item {
            id,
            tag,
            group,
            kind,
        });
        id
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let idx = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(idx))
    }

    /// Remove every item of an annotation group, returning the removed ids.
    pub fn remove_group(&mut self, group: GroupId) -> Vec<ItemId> {
        let mut removed = Vec::new();
        self.items.retain(|i| {
            if i.group == Some(group) {
                removed.push(i.id);
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&Item) -> bool) -> Vec<ItemId> {
        let mut removed = Vec::new();
        self.items.retain(|i| {
            if keep(i) {
                true
            } else {
                removed.push(i.id);
                false
            }
        });
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items in stacking order, back to front.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn with_tag(&self, tag: Tag) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |i| i.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn bring_to_front(&mut self, id: ItemId) {
        if let Some(idx) = self.items.iter().position(|i| i.id == id) {
            let item = self.items.remove(idx);
            self.items.push(item);
        }
    }

    /// Nearest deletable item within `tolerance` of `pos`. The background map
    /// is never a candidate; equidistant ties go to the last-drawn item.
    pub fn closest_within(&self, pos: egui::Pos2, tolerance: f32) -> Option<ItemId> {
        let mut best: Option<(f32, ItemId)> = None;
        for item in self.items.iter().rev() {
            if item.tag == Tag::BackgroundMap {
                continue;
            }
            let d = item.hit_distance(pos);
            if d > tolerance {
                continue;
            }
            // Strict comparison keeps the more recent item on a tie, since we
            // walk front to back.
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, item.id));
            }
        }
        best.map(|(_, id)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(scene: &mut Scene, group: Option<GroupId>, a: egui::Pos2, b: egui::Pos2) -> ItemId {
        scene.create(
            Tag::RulerLine,
            group,
            ItemKind::Line {
                a,
                b,
                width: 5.0,
                color: egui::Color32::BLUE,
            },
        )
    }

    #[test]
    fn ids_are_stable_and_ordered() {
        let mut scene = Scene::new();
        let a = line(&mut scene, None, egui::pos2(0.0, 0.0), egui::pos2(1.0, 0.0));
        let b = line(&mut scene, None, egui::pos2(0.0, 1.0), egui::pos2(1.0, 1.0));
        assert!(b > a);
        let order: Vec<ItemId> = scene.items().map(|i| i.id).collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn remove_group_takes_all_members() {
        let mut scene = Scene::new();
        let g = scene.allocate_group();
        let a = line(&mut scene, Some(g), egui::pos2(0.0, 0.0), egui::pos2(1.0, 0.0));
        let b = scene.create(
            Tag::RulerText,
            Some(g),
            ItemKind::Text {
                pos: egui::pos2(1.0, 1.0),
                text: "5.0 ft".to_string(),
                size: egui::vec2(40.0, 20.0),
                font_size: 26.0,
                color: egui::Color32::WHITE,
            },
        );
        let other = line(&mut scene, None, egui::pos2(9.0, 9.0), egui::pos2(10.0, 9.0));

        let mut removed = scene.remove_group(g);
        removed.sort_unstable();
        assert_eq!(removed, vec![a, b]);
        assert!(scene.get(other).is_some());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn closest_prefers_nearest_then_recency() {
        let mut scene = Scene::new();
        let far = line(&mut scene, None, egui::pos2(0.0, 4.0), egui::pos2(10.0, 4.0));
        let near = line(&mut scene, None, egui::pos2(0.0, 1.0), egui::pos2(10.0, 1.0));
        assert_eq!(scene.closest_within(egui::pos2(5.0, 0.0), 5.0), Some(near));

        // Identical geometry: the later of the two wins.
        let dup_a = line(&mut scene, None, egui::pos2(0.0, 20.0), egui::pos2(10.0, 20.0));
        let dup_b = line(&mut scene, None, egui::pos2(0.0, 20.0), egui::pos2(10.0, 20.0));
        assert!(dup_b > dup_a);
        assert_eq!(scene.closest_within(egui::pos2(5.0, 20.0), 5.0), Some(dup_b));
        let _ = far;
    }

    #[test]
    fn closest_ignores_background_and_out_of_tolerance() {
        let mut scene = Scene::new();
        let bg = scene.create(
            Tag::BackgroundMap,
            None,
            ItemKind::Image {
                pos: egui::Pos2::ZERO,
                texture: egui::TextureId::default(),
                size: egui::vec2(1000.0, 1000.0),
            },
        );
        assert_eq!(scene.closest_within(egui::pos2(500.0, 500.0), 5.0), None);

        let l = line(&mut scene, None, egui::pos2(0.0, 0.0), egui::pos2(10.0, 0.0));
        assert_eq!(scene.closest_within(egui::pos2(5.0, 20.0), 5.0), None);
        assert_eq!(scene.closest_within(egui::pos2(5.0, 3.0), 5.0), Some(l));
        let _ = bg;
    }

    #[test]
    fn bring_to_front_restacks() {
        let mut scene = Scene::new();
        let a = line(&mut scene, None, egui::pos2(0.0, 0.0), egui::pos2(1.0, 0.0));
        let b = line(&mut scene, None, egui::pos2(0.0, 1.0), egui::pos2(1.0, 1.0));
        scene.bring_to_front(a);
        let order: Vec<ItemId> = scene.items().map(|i| i.id).collect();
        assert_eq!(order, vec![b, a]);
    }

    #[test]
    fn segment_distance_handles_degenerate_line() {
        let p = egui::pos2(3.0, 4.0);
        let d = segment_distance(p, egui::Pos2::ZERO, egui::Pos2::ZERO);
        assert!((d - 5.0).abs() < 1e-6);
    }
}
