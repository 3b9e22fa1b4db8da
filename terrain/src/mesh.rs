use crate::{
    fusion::{Fusion, TrailIndex},
    HeightGrid, TerrainError,
};
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use log::debug;
use std::io::{self, Write};

/// Default horizontal spacing between grid samples, in local units.
pub const DEFAULT_HORIZONTAL_SCALE: f32 = 1.0;

/// Default height, in local units, of a `255` sample.
pub const DEFAULT_HEIGHT_SCALE: f32 = 50.0;

/// Default planar distance within which trail points override
/// terrain height.
pub const DEFAULT_INFLUENCE_RADIUS: f32 = 10.0;

/// A terrain vertex as laid out in the vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Unit length, or zero for vertices that only touch zero-area
    /// triangles.
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }

    pub fn uv(&self) -> Vec2 {
        Vec2::from_array(self.uv)
    }
}

/// A static triangle-list terrain mesh.
///
/// Triangles wind counter-clockwise when viewed from +Y.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Box<[Vertex]>,
    indices: Box<[u32]>,
}

impl Mesh {
    pub fn builder<'a>() -> MeshBuilder<'a> {
        MeshBuilder {
            trail: None,
            horizontal_scale: DEFAULT_HORIZONTAL_SCALE,
            height_scale: DEFAULT_HEIGHT_SCALE,
            influence_radius: DEFAULT_INFLUENCE_RADIUS,
            center: false,
            fusion: Fusion::default(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns the vertex buffer as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Returns the index buffer as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the `(min, max)` corners of the mesh's bounding box.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        self.vertices.iter().map(Vertex::position).fold(None, |acc, p| {
            Some(match acc {
                None => (p, p),
                Some((min, max)) => (min.min(p), max.max(p)),
            })
        })
    }

    /// Writes this mesh as a Wavefront OBJ document.
    pub fn write_obj<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "# {} vertices, {} triangles", self.vertices.len(), self.triangle_count())?;
        for Vertex { position: [x, y, z], .. } in self.vertices.iter() {
            writeln!(out, "v {x} {y} {z}")?;
        }
        for Vertex { normal: [x, y, z], .. } in self.vertices.iter() {
            writeln!(out, "vn {x} {y} {z}")?;
        }
        for Vertex { uv: [u, v], .. } in self.vertices.iter() {
            writeln!(out, "vt {u} {v}")?;
        }
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] + 1, tri[1] + 1, tri[2] + 1];
            writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
        }
        Ok(())
    }
}

pub struct MeshBuilder<'a> {
    /// Trail points in local space (required, may be empty).
    trail: Option<&'a [Vec3]>,

    /// Distance between neighboring samples (defaults to
    /// [`DEFAULT_HORIZONTAL_SCALE`]).
    horizontal_scale: f32,

    /// Height of a full-scale sample (defaults to
    /// [`DEFAULT_HEIGHT_SCALE`]).
    height_scale: f32,

    /// Planar trail influence distance (defaults to
    /// [`DEFAULT_INFLUENCE_RADIUS`]).
    influence_radius: f32,

    /// Center the grid on the origin (defaults to false).
    center: bool,

    /// Trail point tie-break (defaults to [`Fusion::Nearest`]).
    fusion: Fusion,
}

impl<'a> MeshBuilder<'a> {
    /// Trail points whose heights are carved into the surface
    /// (required).
    #[must_use]
    pub fn trail(mut self, points: &'a [Vec3]) -> Self {
        self.trail = Some(points);
        self
    }

    /// Distance between neighboring samples (defaults to `1.0`).
    #[must_use]
    pub fn horizontal_scale(mut self, scale: f32) -> Self {
        self.horizontal_scale = scale;
        self
    }

    /// Height of a `255` sample (defaults to `50.0`).
    #[must_use]
    pub fn height_scale(mut self, scale: f32) -> Self {
        self.height_scale = scale;
        self
    }

    /// Planar distance below which a trail point overrides a
    /// vertex's height (defaults to `10.0`).
    #[must_use]
    pub fn influence_radius(mut self, radius: f32) -> Self {
        self.influence_radius = radius;
        self
    }

    /// Subtract half the grid extent on X and Z so the grid is
    /// centered on the origin (defaults to false).
    #[must_use]
    pub fn center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    /// Which trail point wins when several are in range (defaults to
    /// [`Fusion::Nearest`]).
    #[must_use]
    pub fn fusion(mut self, fusion: Fusion) -> Self {
        self.fusion = fusion;
        self
    }

    pub fn build(&self, grid: &HeightGrid) -> Result<Mesh, TerrainError> {
        let trail = self.trail.ok_or(TerrainError::Builder("trail"))?;
        let (width, height) = (grid.width(), grid.height());
        if width == 0 || height == 0 {
            return Err(TerrainError::EmptyGrid);
        }
        let too_large = || TerrainError::TooLarge { width, height };
        let width_u32 = u32::try_from(width).map_err(|_| too_large())?;
        width
            .checked_mul(height)
            .and_then(|len| u32::try_from(len).ok())
            .ok_or_else(too_large)?;

        let (vertices, fused, vertex_runtime) = {
            let now = std::time::Instant::now();
            let index = TrailIndex::new(trail, self.influence_radius);
            let (offset_x, offset_z) = if self.center {
                (
                    (width - 1) as f32 * self.horizontal_scale / 2.0,
                    (height - 1) as f32 * self.horizontal_scale / 2.0,
                )
            } else {
                (0.0, 0.0)
            };

            let mut fused = 0_usize;
            let mut vertices = Vec::with_capacity(width * height);
            for row in 0..height {
                for col in 0..width {
                    let x = col as f32 * self.horizontal_scale - offset_x;
                    let z = row as f32 * self.horizontal_scale - offset_z;
                    let base = f32::from(grid.get_unchecked(col, row)) / 255.0 * self.height_scale;
                    let y = match index.height_at(x, z, self.fusion) {
                        Some(trail_height) => {
                            fused += 1;
                            trail_height
                        }
                        None => base,
                    };
                    vertices.push(Vertex {
                        position: [x, y, z],
                        normal: [0.0; 3],
                        uv: [col as f32 / width as f32, row as f32 / height as f32],
                    });
                }
            }
            (vertices, fused, now.elapsed())
        };

        let indices = grid_indices(width_u32, height);

        let (vertices, normal_runtime) = {
            let now = std::time::Instant::now();
            let vertices = with_normals(vertices, &indices);
            (vertices, now.elapsed())
        };

        debug!(
            "mesh; grid: {width}x{height}, vertices: {}, indices: {}, fused: {fused}, vertex_exec: {:?}, normal_exec: {:?}",
            vertices.len(),
            indices.len(),
            vertex_runtime,
            normal_runtime
        );

        Ok(Mesh {
            vertices: vertices.into_boxed_slice(),
            indices: indices.into_boxed_slice(),
        })
    }
}

/// Returns two triangles per interior cell of a row-major grid.
fn grid_indices(width: u32, height: usize) -> Vec<u32> {
    let cells = (width as usize).saturating_sub(1) * height.saturating_sub(1);
    let mut indices = Vec::with_capacity(cells * 6);
    // Callers guarantee `width * height` fits in a u32.
    #[allow(clippy::cast_possible_truncation)]
    let height = height as u32;
    for z in 0..height.saturating_sub(1) {
        for x in 0..width.saturating_sub(1) {
            let top_left = z * width + x;
            let top_right = top_left + 1;
            let bottom_left = (z + 1) * width + x;
            let bottom_right = bottom_left + 1;

            indices.extend_from_slice(&[top_left, bottom_left, top_right]);
            indices.extend_from_slice(&[top_right, bottom_left, bottom_right]);
        }
    }
    indices
}

/// Returns `vertices` with area-weighted smooth normals.
fn with_normals(mut vertices: Vec<Vertex>, indices: &[u32]) -> Vec<Vertex> {
    let mut normals = vec![Vec3::ZERO; vertices.len()];
    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let v0 = vertices[i0].position();
        let face = (vertices[i1].position() - v0).cross(vertices[i2].position() - v0);
        normals[i0] += face;
        normals[i1] += face;
        normals[i2] += face;
    }
    for (vertex, normal) in vertices.iter_mut().zip(normals) {
        vertex.normal = normal.normalize_or_zero().to_array();
    }
    vertices
}
