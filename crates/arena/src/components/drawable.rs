use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::DrawId;
use crate::components::colour::Colour;
use crate::components::layer::Layer;

/// Shape payload of a drawable. Renderers switch on the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Filled circle centred on the drawable position.
    Circle { radius: f32 },
    /// Filled axis-aligned rectangle with its top-left corner at the drawable position.
    Rect { width: f32, height: f32 },
    /// Stroked segment from the drawable position to `end`.
    /// `arrow` is the arrowhead length in multiples of `width` (0 = none).
    Line { end: Vec2, width: f32, arrow: f32 },
    /// Text with its baseline origin at the drawable position.
    Label { text: String, size: f32 },
}

/// A retained drawing primitive: shared placement fields plus a [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    /// Handle assigned by the scene on insertion.
    pub id: DrawId,
    /// Free-form tag for lookups and debugging.
    pub tag: String,
    pub pos: Vec2,
    pub colour: Colour,
    pub layer: Layer,
    pub shape: Shape,
}

impl Drawable {
    pub fn new(shape: Shape) -> Self {
        Self {
            id: DrawId(0),
            tag: String::new(),
            pos: Vec2::ZERO,
            colour: Colour::WHITE,
            layer: Layer::DEFAULT,
            shape,
        }
    }

    pub fn circle(centre: Vec2, radius: f32) -> Self {
        Self::new(Shape::Circle { radius }).with_pos(centre)
    }

    pub fn rect(top_left: Vec2, width: f32, height: f32) -> Self {
        Self::new(Shape::Rect { width, height }).with_pos(top_left)
    }

    pub fn line(start: Vec2, end: Vec2, width: f32) -> Self {
        Self::new(Shape::Line { end, width, arrow: 0.0 }).with_pos(start)
    }

    pub fn label(text: impl Into<String>, size: f32, origin: Vec2) -> Self {
        Self::new(Shape::Label { text: text.into(), size }).with_pos(origin)
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_colour(mut self, colour: Colour) -> Self {
        self.colour = colour;
        self
    }

    pub fn with_layer(mut self, layer: impl Into<Layer>) -> Self {
        self.layer = layer.into();
        self
    }

    /// Give a line an arrowhead. No effect on other shapes.
    pub fn with_arrow(mut self, size: f32) -> Self {
        if let Shape::Line { arrow, .. } = &mut self.shape {
            *arrow = size;
        }
        self
    }

    // -- In-place edits used by games between frames --

    /// Move a line so it runs from `start` to `end`. Other shapes only move.
    pub fn set_segment(&mut self, start: Vec2, end: Vec2) {
        self.pos = start;
        if let Shape::Line { end: e, .. } = &mut self.shape {
            *e = end;
        }
    }

    /// Replace the text of a label. No effect on other shapes.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if let Shape::Label { text: t, .. } = &mut self.shape {
            *t = text.into();
        }
    }

    /// The arrowhead triangle (tip, left, right) and the point where the
    /// shaft should stop, if this is a line with an arrowhead.
    pub fn arrowhead(&self) -> Option<([Vec2; 3], Vec2)> {
        let Shape::Line { end, width, arrow } = self.shape else {
            return None;
        };
        let length = self.pos.distance(end);
        if arrow <= 0.0 || length <= 0.0 {
            return None;
        }
        let head_len = (width * arrow).min(length);
        let dir = (end - self.pos) / length;
        let base = end - dir * head_len;
        let side = dir.perp() * head_len * 0.5;
        Some(([end, base + side, base - side], base))
    }
}
