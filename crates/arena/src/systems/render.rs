use serde::Serialize;

use crate::components::colour::Colour;
use crate::components::drawable::Shape;
use crate::components::layer::Layer;
use crate::core::scene::Scene;
#[cfg(feature = "vectors")]
use crate::systems::vector::VectorState;

/// A label ready for the host page to draw as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelInstance {
    pub text: String,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub colour: Colour,
    pub layer: Layer,
}

/// Tessellate every shape in the scene, back-to-front, into `vectors`.
/// Labels are skipped; see [`collect_labels`].
#[cfg(feature = "vectors")]
pub fn tessellate_scene(scene: &Scene, vectors: &mut VectorState) {
    vectors.clear();

    for drawable in scene.iter() {
        match &drawable.shape {
            Shape::Circle { radius } => {
                vectors.fill_circle(drawable.pos, *radius, drawable.colour);
            }
            Shape::Rect { width, height } => {
                vectors.fill_rect(drawable.pos, *width, *height, drawable.colour);
            }
            Shape::Line { end, width, .. } => match drawable.arrowhead() {
                Some((head, shaft_end)) => {
                    vectors.fill_polygon(&head, drawable.colour);
                    vectors.stroke_polyline(&[drawable.pos, shaft_end], *width, drawable.colour);
                }
                None => vectors.stroke_polyline(&[drawable.pos, *end], *width, drawable.colour),
            },
            Shape::Label { .. } => {}
        }
    }
}

/// Collect the scene's labels in draw order.
pub fn collect_labels(scene: &Scene) -> Vec<LabelInstance> {
    scene
        .iter()
        .filter_map(|d| match &d.shape {
            Shape::Label { text, size } => Some(LabelInstance {
                text: text.clone(),
                size: *size,
                x: d.pos.x,
                y: d.pos.y,
                colour: d.colour,
                layer: d.layer,
            }),
            _ => None,
        })
        .collect()
}

/// The scene's labels as a JSON array for the host page.
pub fn labels_json(scene: &Scene) -> Result<String, serde_json::Error> {
    serde_json::to_string(&collect_labels(scene))
}
