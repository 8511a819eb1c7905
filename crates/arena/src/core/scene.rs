use crate::api::types::DrawId;
use crate::components::drawable::Drawable;

/// Default ceiling on the number of drawables a scene may hold.
pub const DEFAULT_SCENE_CAPACITY: usize = 100_000;

/// Retained draw list kept in painter's order (ascending layer).
/// Designed for small entity counts (hundreds, not millions).
pub struct Scene {
    drawables: Vec<Drawable>,
    capacity: usize,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SCENE_CAPACITY)
    }

    /// Create a scene that refuses to grow past `capacity` drawables.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            drawables: Vec::with_capacity(capacity.min(256)),
            capacity,
            next_id: 1,
        }
    }

    /// Add a drawable and return its handle.
    ///
    /// The drawable goes in front of the first drawable on a strictly higher
    /// layer, so equal layers keep insertion order.
    ///
    /// # Panics
    ///
    /// Panics when the scene already holds `capacity` drawables. A scene that
    /// large means the game is leaking drawables and the session cannot recover.
    pub fn add(&mut self, mut drawable: Drawable) -> DrawId {
        if self.drawables.len() >= self.capacity {
            log::error!("scene capacity of {} drawables exhausted", self.capacity);
            panic!("only {} drawables are supported per scene", self.capacity);
        }

        let id = DrawId(self.next_id);
        self.next_id += 1;
        drawable.id = id;

        let idx = self
            .drawables
            .iter()
            .position(|d| drawable.layer < d.layer)
            .unwrap_or(self.drawables.len());
        self.drawables.insert(idx, drawable);
        id
    }

    /// Remove a drawable by handle. Returns the removed drawable if found.
    pub fn remove(&mut self, id: DrawId) -> Option<Drawable> {
        let idx = self.drawables.iter().position(|d| d.id == id)?;
        Some(self.drawables.remove(idx))
    }

    pub fn contains(&self, id: DrawId) -> bool {
        self.drawables.iter().any(|d| d.id == id)
    }

    pub fn get(&self, id: DrawId) -> Option<&Drawable> {
        self.drawables.iter().find(|d| d.id == id)
    }

    pub fn get_mut(&mut self, id: DrawId) -> Option<&mut Drawable> {
        self.drawables.iter_mut().find(|d| d.id == id)
    }

    /// Iterate back-to-front.
    pub fn iter(&self) -> impl Iterator<Item = &Drawable> {
        self.drawables.iter()
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Remove every drawable. Handles are not reused.
    pub fn clear(&mut self) {
        self.drawables.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn layers(scene: &Scene) -> Vec<i32> {
        scene.iter().map(|d| d.layer.as_i32()).collect()
    }

    #[test]
    fn add_and_get() {
        let mut scene = Scene::new();
        let id = scene.add(Drawable::circle(Vec2::new(10.0, 20.0), 5.0));
        assert_eq!(scene.get(id).unwrap().pos, Vec2::new(10.0, 20.0));
        assert!(scene.contains(id));
    }

    #[test]
    fn insertion_keeps_ascending_layers() {
        let mut scene = Scene::new();
        scene.add(Drawable::rect(Vec2::ZERO, 1.0, 1.0).with_layer(2));
        scene.add(Drawable::rect(Vec2::ZERO, 1.0, 1.0).with_layer(0));
        scene.add(Drawable::rect(Vec2::ZERO, 1.0, 1.0).with_layer(1));
        scene.add(Drawable::rect(Vec2::ZERO, 1.0, 1.0).with_layer(-3));
        assert_eq!(layers(&scene), vec![-3, 0, 1, 2]);
    }

    #[test]
    fn equal_layers_keep_insertion_order() {
        let mut scene = Scene::new();
        scene.add(Drawable::rect(Vec2::ZERO, 1.0, 1.0).with_tag("table"));
        scene.add(Drawable::circle(Vec2::ZERO, 1.0).with_tag("ball"));
        scene.add(Drawable::rect(Vec2::ZERO, 1.0, 1.0).with_tag("cushion"));
        let tags: Vec<&str> = scene.iter().map(|d| d.tag.as_str()).collect();
        assert_eq!(tags, vec!["table", "ball", "cushion"]);
    }

    #[test]
    fn remove_by_handle() {
        let mut scene = Scene::new();
        let a = scene.add(Drawable::circle(Vec2::ZERO, 1.0));
        let b = scene.add(Drawable::circle(Vec2::ONE, 1.0));
        assert!(scene.remove(a).is_some());
        assert!(scene.remove(a).is_none());
        assert_eq!(scene.len(), 1);
        assert!(scene.contains(b));
    }

    #[test]
    fn handles_are_unique_after_clear() {
        let mut scene = Scene::new();
        let a = scene.add(Drawable::circle(Vec2::ZERO, 1.0));
        scene.clear();
        let b = scene.add(Drawable::circle(Vec2::ZERO, 1.0));
        assert_ne!(a, b);
    }

    #[test]
    #[should_panic(expected = "drawables are supported")]
    fn exceeding_capacity_panics() {
        let mut scene = Scene::with_capacity(2);
        scene.add(Drawable::circle(Vec2::ZERO, 1.0));
        scene.add(Drawable::circle(Vec2::ZERO, 1.0));
        scene.add(Drawable::circle(Vec2::ZERO, 1.0));
    }
}
