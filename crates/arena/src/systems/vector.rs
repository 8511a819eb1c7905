//! Lyon-based tessellation of scene primitives.
//!
//! Produces a flat triangle-list vertex buffer (6 floats per vertex) that the
//! host page uploads as-is.
//!
//! # Usage
//!
//! ```ignore
//! let mut vectors = VectorState::new();
//! vectors.fill_rect(Vec2::new(50.0, 50.0), 1400.0, 800.0, Colour::BLUE);
//! vectors.fill_circle(Vec2::new(400.0, 450.0), 10.0, Colour::WHITE);
//! vectors.stroke_polyline(&[start, end], 2.0, Colour::WHITE);
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use crate::components::colour::Colour;

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24

    fn at(x: f32, y: f32, colour: Colour) -> Self {
        Self { x, y, r: colour.r, g: colour.g, b: colour.b, a: colour.a }
    }
}

struct FillVertexCtor {
    colour: Colour,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex::at(vertex.position().x, vertex.position().y, self.colour)
    }
}

struct StrokeVertexCtor {
    colour: Colour,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex::at(vertex.position().x, vertex.position().y, self.colour)
    }
}

/// Tessellators plus the output vertex buffer.
/// Cleared each frame and refilled from the scene.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    max_vertices: usize,
}

impl VectorState {
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    /// Create a state that stops accepting geometry past `max_vertices`.
    pub fn with_capacity(max_vertices: usize) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices * VectorVertex::FLOATS),
            max_vertices,
        }
    }

    /// Clear the vertex buffer. Called at the start of each frame.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    /// Raw pointer to the flat float buffer (for the host to copy).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Flush indexed geometry to the flat buffer as a triangle list.
    /// Geometry that would overflow the vertex budget is dropped whole.
    fn flush_geometry(&mut self) {
        if self.vertex_count() + self.geometry.indices.len() > self.max_vertices {
            log::warn!(
                "vector buffer full ({} vertices), dropping {} vertices",
                self.max_vertices,
                self.geometry.indices.len()
            );
        } else {
            for idx in &self.geometry.indices {
                let v = &self.geometry.vertices[*idx as usize];
                self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
            }
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Tessellate and fill a closed polygon.
    pub fn fill_polygon(&mut self, points: &[Vec2], colour: Colour) {
        if points.len() < 3 {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.close();
        let path = builder.build();

        self.fill_path(&path, colour);
    }

    /// Fill an axis-aligned rectangle given its top-left corner.
    pub fn fill_rect(&mut self, pos: Vec2, width: f32, height: f32, colour: Colour) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let points = [
            pos,
            Vec2::new(pos.x + width, pos.y),
            Vec2::new(pos.x + width, pos.y + height),
            Vec2::new(pos.x, pos.y + height),
        ];
        self.fill_polygon(&points, colour);
    }

    /// Fill a circle, approximated at lyon's tolerance.
    pub fn fill_circle(&mut self, centre: Vec2, radius: f32, colour: Colour) {
        if radius <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.add_circle(point(centre.x, centre.y), radius, lyon::path::Winding::Positive);
        let path = builder.build();

        self.fill_path(&path, colour);
    }

    pub fn fill_path(&mut self, path: &Path, colour: Colour) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { colour }),
        );

        if result.is_ok() {
            self.flush_geometry();
        }
    }

    /// Tessellate a stroked polyline (open path).
    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, colour: Colour) {
        if points.len() < 2 || width <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(false);

        let path = builder.build();
        self.stroke_path(&path, width, colour);
    }

    pub fn stroke_path(&mut self, path: &Path, width: f32, colour: Colour) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { colour }),
        );

        if result.is_ok() {
            self.flush_geometry();
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}
