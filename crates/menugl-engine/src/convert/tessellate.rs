use std::borrow::Cow;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use lyon::lyon_tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, LineCap, LineJoin, StrokeOptions,
    StrokeTessellator, StrokeVertex, TessellationError, VertexBuffers,
};
use lyon::math::point;
use lyon::path::PathEvent;

use crate::coords::{Rect, Vec2};
use crate::gl::TextureId;
use crate::paint::Color;
use crate::scene::shapes::{DrawStyle, TextCmd};
use crate::scene::ShapeCmd;

use super::buffer::{BufferKind, FixedBuffer};
use super::draw_cmd::DrawCommands;
use super::vertex::DrawVertex;
use super::{AntiAliasing, ConvertConfig};

/// Width of the anti-aliasing fringe in pixels.
const AA_SIZE: f32 = 1.0;

/// Flattening tolerance handed to lyon. Menu paths are already polygons.
const TOLERANCE: f32 = 0.1;

/// Vertices addressable by 16-bit indices.
const MAX_INDEXED_VERTICES: usize = u16::MAX as usize + 1;

type PrimResult = Result<(), BufferKind>;

/// Triangles of one primitive, built before anything is written to the
/// frame buffers. Indices are local to `vertices`.
#[derive(Debug, Default)]
struct Mesh {
    vertices: Vec<(Vec2, Color)>,
    indices: Vec<u32>,
}

impl Mesh {
    fn solid(geometry: VertexBuffers<Vec2, u32>, color: Color) -> Self {
        Self {
            vertices: geometry.vertices.into_iter().map(|p| (p, color)).collect(),
            indices: geometry.indices,
        }
    }

    /// Appends a strip fading from `color` along `inner` to transparent
    /// along `outer`.
    fn fringe(&mut self, inner: &[Vec2], outer: &[Vec2], closed: bool, color: Color) {
        let n = inner.len();
        let start = self.vertices.len() as u32;
        let fade = color.transparent();
        for (&i, &o) in inner.iter().zip(outer) {
            self.vertices.push((i, color));
            self.vertices.push((o, fade));
        }

        let segments = if closed { n } else { n - 1 };
        for s in 0..segments {
            let a = start + 2 * s as u32;
            let b = start + 2 * ((s + 1) % n) as u32;
            self.indices.extend_from_slice(&[a, b, b + 1, a, b + 1, a + 1]);
        }
    }
}

/// Writes triangles for queue items into the scratch buffers.
///
/// Every primitive reserves its full vertex/index count up front, so a
/// primitive that does not fit leaves the buffers untouched.
pub(crate) struct Tessellator<'a> {
    vertices: &'a mut FixedBuffer<DrawVertex>,
    elements: &'a mut FixedBuffer<u16>,
    cmds: &'a mut DrawCommands,
    config: &'a ConvertConfig,
    clip: Rect,
    fill: FillTessellator,
    stroke: StrokeTessellator,
}

impl<'a> Tessellator<'a> {
    pub(crate) fn new(
        vertices: &'a mut FixedBuffer<DrawVertex>,
        elements: &'a mut FixedBuffer<u16>,
        cmds: &'a mut DrawCommands,
        config: &'a ConvertConfig,
    ) -> Self {
        Self {
            vertices,
            elements,
            cmds,
            config,
            clip: Rect::UNCLIPPED,
            fill: FillTessellator::new(),
            stroke: StrokeTessellator::new(),
        }
    }

    pub(crate) fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip.map_or(Rect::UNCLIPPED, Rect::normalized);
    }

    pub(crate) fn shape(&mut self, cmd: &ShapeCmd) -> PrimResult {
        let line_aa = self.config.line_aa;
        let segments = self.config.circle_segment_count.max(3) as usize;

        match cmd {
            ShapeCmd::Line(c) => {
                let color = self.tint(c.color);
                self.stroke(&[c.from, c.to], false, c.thickness, color, line_aa)
            }
            ShapeCmd::Rect(c) => {
                let color = self.tint(c.color);
                let path = path_rect(c.rect.normalized(), c.rounding, segments);
                self.styled(&path, c.style, color)
            }
            ShapeCmd::RectMultiColor(c) => {
                let colors = [c.left_top, c.right_top, c.right_bottom, c.left_bottom].map(|k| self.tint(k));
                self.quad_multi_color(c.rect.normalized(), colors)
            }
            ShapeCmd::Circle(c) => {
                let color = self.tint(c.color);
                let path = path_ellipse(c.rect.normalized(), segments);
                self.styled(&path, c.style, color)
            }
            ShapeCmd::Triangle(c) => {
                let color = self.tint(c.color);
                self.styled(&c.points, c.style, color)
            }
            ShapeCmd::Polygon(c) => {
                let color = self.tint(c.color);
                self.styled(&c.points, c.style, color)
            }
            ShapeCmd::Polyline(c) => {
                let color = self.tint(c.color);
                self.stroke(&c.points, false, c.thickness, color, line_aa)
            }
            ShapeCmd::Text(c) => self.text(c),
            ShapeCmd::Image(c) => {
                let color = self.tint(c.color);
                let r = c.rect.normalized();
                self.quad(r.min(), r.max(), c.uv_min, c.uv_max, color, c.texture)
            }
        }
    }

    #[inline]
    fn tint(&self, color: Color) -> Color {
        color.scale_alpha(self.config.global_alpha)
    }

    fn styled(&mut self, path: &[Vec2], style: DrawStyle, color: Color) -> PrimResult {
        match style {
            DrawStyle::Fill => self.fill_polygon(path, color, self.config.shape_aa),
            DrawStyle::Stroke(t) => self.stroke(path, true, t, color, self.config.line_aa),
        }
    }

    /// Checks room for a primitive and returns its first vertex index.
    fn reserve(&self, vtx_count: usize, idx_count: usize) -> Result<usize, BufferKind> {
        let base = self.vertices.len();
        if self.vertices.remaining() < vtx_count || base + vtx_count > MAX_INDEXED_VERTICES {
            return Err(BufferKind::Vertex);
        }
        if self.elements.remaining() < idx_count {
            return Err(BufferKind::Element);
        }
        Ok(base)
    }

    #[inline]
    fn vertex(&mut self, pos: Vec2, uv: [f32; 2], color: Color) {
        self.vertices.push(DrawVertex::new(pos.into(), uv, color.to_array()));
    }

    #[inline]
    fn commit(&mut self, texture: TextureId, idx_count: usize) {
        self.cmds.add_elements(texture, self.clip, idx_count as u32);
    }

    /// Copies `mesh` into the frame buffers as untextured geometry.
    fn emit(&mut self, mesh: &Mesh) -> PrimResult {
        let base = self.reserve(mesh.vertices.len(), mesh.indices.len())?;
        let indices = mesh
            .indices
            .iter()
            .map(|&i| u16::try_from(base + i as usize))
            .collect::<Result<Vec<u16>, _>>()
            .map_err(|_| BufferKind::Vertex)?;

        let null = self.config.null;
        for &(pos, color) in &mesh.vertices {
            self.vertex(pos, null.uv, color);
        }
        for index in indices {
            self.elements.push(index);
        }
        self.commit(null.texture, mesh.indices.len());
        Ok(())
    }

    /// Quad from four corners in top-left, top-right, bottom-right,
    /// bottom-left order.
    fn corners(&mut self, corners: [(Vec2, [f32; 2], Color); 4], texture: TextureId) -> PrimResult {
        let base = self.reserve(4, 6)?;
        let base = u16::try_from(base).map_err(|_| BufferKind::Vertex)?;
        for (pos, uv, color) in corners {
            self.vertex(pos, uv, color);
        }
        for k in [0, 1, 2, 0, 2, 3] {
            self.elements.push(base + k);
        }
        self.commit(texture, 6);
        Ok(())
    }

    fn quad(
        &mut self,
        min: Vec2,
        max: Vec2,
        uv_min: [f32; 2],
        uv_max: [f32; 2],
        color: Color,
        texture: TextureId,
    ) -> PrimResult {
        self.corners(
            [
                (min, uv_min, color),
                (Vec2::new(max.x, min.y), [uv_max[0], uv_min[1]], color),
                (max, uv_max, color),
                (Vec2::new(min.x, max.y), [uv_min[0], uv_max[1]], color),
            ],
            texture,
        )
    }

    fn quad_multi_color(&mut self, rect: Rect, colors: [Color; 4]) -> PrimResult {
        let null = self.config.null;
        let (min, max) = (rect.min(), rect.max());
        self.corners(
            [
                (min, null.uv, colors[0]),
                (Vec2::new(max.x, min.y), null.uv, colors[1]),
                (max, null.uv, colors[2]),
                (Vec2::new(min.x, max.y), null.uv, colors[3]),
            ],
            null.texture,
        )
    }

    /// Fills a closed outline. Anti-aliased fills shrink the body by half a
    /// pixel and add a transparent fringe one pixel wide around it.
    fn fill_polygon(&mut self, points: &[Vec2], color: Color, aa: AntiAliasing) -> PrimResult {
        if points.len() < 3 {
            return Ok(());
        }
        let points = clockwise(points);

        let mesh = match aa {
            AntiAliasing::Off => self.fill_mesh(&points, color),
            AntiAliasing::On => {
                let offsets = joint_offsets(&points, true);
                let half = AA_SIZE * 0.5;
                let inner: Vec<Vec2> = points.iter().zip(&offsets).map(|(&p, &d)| p - d * half).collect();
                let outer: Vec<Vec2> = points.iter().zip(&offsets).map(|(&p, &d)| p + d * half).collect();
                self.fill_mesh(&inner, color).map(|mut mesh| {
                    mesh.fringe(&inner, &outer, true, color);
                    mesh
                })
            }
        };
        match mesh {
            Ok(mesh) => self.emit(&mesh),
            Err(e) => {
                log::warn!("skipping polygon of {} points: {e:?}", points.len());
                Ok(())
            }
        }
    }

    /// Strokes a path with `thickness`, closing it back to the first point
    /// when `closed`. Anti-aliased strokes fade over one pixel on each side.
    fn stroke(
        &mut self,
        points: &[Vec2],
        closed: bool,
        thickness: f32,
        color: Color,
        aa: AntiAliasing,
    ) -> PrimResult {
        if points.len() < 2 {
            return Ok(());
        }

        let mesh = match aa {
            AntiAliasing::Off => self.stroke_mesh(points, closed, thickness, color),
            AntiAliasing::On => {
                // Thin lines keep an opaque centerline and are all fringe.
                let half_inner = (thickness - AA_SIZE).max(0.0) * 0.5;
                let body = if half_inner > 0.0 {
                    self.stroke_mesh(points, closed, half_inner * 2.0, color)
                } else {
                    Ok(Mesh::default())
                };
                body.map(|mut mesh| {
                    let offsets = joint_offsets(points, closed);
                    for side in [1.0, -1.0] {
                        let at = |width: f32| -> Vec<Vec2> {
                            points.iter().zip(&offsets).map(|(&p, &d)| p + d * (side * width)).collect()
                        };
                        mesh.fringe(&at(half_inner), &at(half_inner + AA_SIZE), closed, color);
                    }
                    mesh
                })
            }
        };
        match mesh {
            Ok(mesh) => self.emit(&mesh),
            Err(e) => {
                log::warn!("skipping stroke of {} points: {e:?}", points.len());
                Ok(())
            }
        }
    }

    fn fill_mesh(&mut self, points: &[Vec2], color: Color) -> Result<Mesh, TessellationError> {
        let mut geometry: VertexBuffers<Vec2, u32> = VertexBuffers::new();
        let options = FillOptions::default().with_tolerance(TOLERANCE);
        self.fill.tessellate(
            path_events(points, true),
            &options,
            &mut BuffersBuilder::new(&mut geometry, |v: FillVertex| {
                Vec2::new(v.position().x, v.position().y)
            }),
        )?;
        Ok(Mesh::solid(geometry, color))
    }

    fn stroke_mesh(
        &mut self,
        points: &[Vec2],
        closed: bool,
        width: f32,
        color: Color,
    ) -> Result<Mesh, TessellationError> {
        let mut geometry: VertexBuffers<Vec2, u32> = VertexBuffers::new();
        let options = StrokeOptions::default()
            .with_line_width(width)
            .with_line_cap(LineCap::Butt)
            .with_line_join(LineJoin::Miter)
            .with_tolerance(TOLERANCE);
        self.stroke.tessellate(
            path_events(points, closed),
            &options,
            &mut BuffersBuilder::new(&mut geometry, |v: StrokeVertex| {
                Vec2::new(v.position().x, v.position().y)
            }),
        )?;
        Ok(Mesh::solid(geometry, color))
    }

    /// One quad per visible glyph, laid out on a single line. The run is
    /// reserved as a whole so it is never cut short by the budget.
    fn text(&mut self, cmd: &TextCmd) -> PrimResult {
        let color = self.tint(cmd.color);
        let font = &cmd.font;
        let rect = cmd.rect;

        let mut quads = Vec::with_capacity(cmd.text.len());
        let mut pen = 0.0;
        for c in cmd.text.chars().filter(|c| !c.is_control()) {
            let Some(g) = font.glyph(c) else { continue };
            if rect.w > 0.0 && pen + g.x1 > rect.w {
                break;
            }
            if !g.is_blank() {
                quads.push((
                    Vec2::new(rect.x + pen + g.x0, rect.y + g.y0),
                    Vec2::new(rect.x + pen + g.x1, rect.y + g.y1),
                    [g.u0, g.v0],
                    [g.u1, g.v1],
                ));
            }
            pen += g.advance;
        }

        self.reserve(quads.len() * 4, quads.len() * 6)?;
        for (min, max, uv_min, uv_max) in quads {
            self.quad(min, max, uv_min, uv_max, color, font.texture())?;
        }
        Ok(())
    }
}

/// Lyon events for a polyline, closed back to its start when `closed`.
fn path_events(points: &[Vec2], closed: bool) -> Vec<PathEvent> {
    let at = |v: Vec2| point(v.x, v.y);
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return Vec::new();
    };

    let mut events = Vec::with_capacity(points.len() + 1);
    events.push(PathEvent::Begin { at: at(first) });
    for pair in points.windows(2) {
        events.push(PathEvent::Line { from: at(pair[0]), to: at(pair[1]) });
    }
    events.push(PathEvent::End { last: at(last), first: at(first), close: closed });
    events
}

/// Signed area is positive for clockwise outlines in +Y-down space.
fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum::<f32>()
        * 0.5
}

/// The outline in clockwise order, so edge normals point outward.
fn clockwise(points: &[Vec2]) -> Cow<'_, [Vec2]> {
    if signed_area(points) < 0.0 {
        Cow::Owned(points.iter().rev().copied().collect())
    } else {
        Cow::Borrowed(points)
    }
}

/// Unit offset direction at every point: the miter of the two adjacent edge
/// normals, or the single edge normal at the ends of an open path.
fn joint_offsets(points: &[Vec2], closed: bool) -> Vec<Vec2> {
    let n = points.len();
    let normal = |i: usize| (points[(i + 1) % n] - points[i]).normalized_or_zero().perp();

    (0..n)
        .map(|i| match (closed, i) {
            (false, 0) => normal(0),
            (false, i) if i == n - 1 => normal(n - 2),
            _ => miter(normal((i + n - 1) % n), normal(i)),
        })
        .collect()
}

/// Averaged normal at a joint, scaled so the offset edge keeps its distance
/// from both segments. The scale is capped for very sharp joints.
fn miter(n0: Vec2, n1: Vec2) -> Vec2 {
    let dm = (n0 + n1) * 0.5;
    let len_sq = dm.length_sq();
    if len_sq > 0.000001 {
        dm * (1.0 / len_sq).min(100.0)
    } else {
        dm
    }
}

/// Clockwise outline of `rect` with corners rounded by `rounding`.
pub(crate) fn path_rect(rect: Rect, rounding: f32, circle_segments: usize) -> Vec<Vec2> {
    let r = rounding.min(rect.w * 0.5).min(rect.h * 0.5);
    let (min, max) = (rect.min(), rect.max());
    if r <= 0.0 {
        return vec![min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)];
    }

    let steps = (circle_segments / 4).max(2);
    let corners = [
        (Vec2::new(min.x + r, min.y + r), PI),
        (Vec2::new(max.x - r, min.y + r), PI + FRAC_PI_2),
        (Vec2::new(max.x - r, max.y - r), 0.0),
        (Vec2::new(min.x + r, max.y - r), FRAC_PI_2),
    ];

    let mut path = Vec::with_capacity(4 * (steps + 1));
    for (center, start) in corners {
        for s in 0..=steps {
            let a = start + FRAC_PI_2 * s as f32 / steps as f32;
            path.push(center + Vec2::new(a.cos(), a.sin()) * r);
        }
    }
    path
}

/// Clockwise outline of the ellipse inscribed in `rect`.
pub(crate) fn path_ellipse(rect: Rect, segments: usize) -> Vec<Vec2> {
    let c = rect.center();
    let (rx, ry) = (rect.w * 0.5, rect.h * 0.5);
    (0..segments)
        .map(|i| {
            let a = TAU * i as f32 / segments as f32;
            Vec2::new(c.x + a.cos() * rx, c.y + a.sin() * ry)
        })
        .collect()
}
