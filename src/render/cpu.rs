use kurbo::{Point, Vec2};
use vello_cpu::peniko::Color;

use crate::camera::projection::{Camera, ScreenPoint};
use crate::foundation::core::{Canvas, Rgba8, Vec3};
use crate::foundation::error::{OrbitError, OrbitResult};
use crate::render::backend::FrameRGBA;
use crate::scene::decorations::grid;
use crate::scene::model::{Geometry, Scene};

/// Triad origin as a fraction of the canvas, measured from the top-left.
const TRIAD_ORIGIN: (f64, f64) = (0.1, 0.9);
/// Triad arm length as a fraction of the shorter canvas side.
const TRIAD_LEN: f64 = 0.08;
const TRIAD_WIDTH_PX: f64 = 2.0;

#[derive(Clone, Copy, Debug)]
enum Shape {
    Square { center: Point, half: f64 },
    Quad([Point; 4]),
    Tri([Point; 3]),
}

#[derive(Clone, Copy, Debug)]
struct DrawItem {
    depth: f32,
    color: Rgba8,
    shape: Shape,
}

/// Off-screen CPU rasterizer powered by `vello_cpu`.
///
/// Primitives are projected, sorted far to near, and painted in that order, so nearer
/// geometry covers farther geometry without a depth buffer.
pub struct CpuRasterizer {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    items: Vec<DrawItem>,
}

impl CpuRasterizer {
    pub fn new(canvas: Canvas) -> OrbitResult<Self> {
        canvas.validate()?;
        let (w, h) = canvas_u16(canvas)?;
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            items: Vec::new(),
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Render `scene` as seen by `camera` into a premultiplied RGBA8 frame.
    pub fn render(&mut self, scene: &Scene, camera: &Camera) -> OrbitResult<FrameRGBA> {
        self.items.clear();
        for g in scene.decorations().iter().chain(scene.geometry()) {
            collect(&mut self.items, g, camera, self.canvas);
        }
        if scene.grid()
            && let Some(bounds) = scene.geometry_bounds()
        {
            collect(
                &mut self.items,
                &grid(bounds, camera.direction()),
                camera,
                self.canvas,
            );
        }
        // Stable sort: equal depths keep insertion order.
        self.items.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        let ctx = &mut self.ctx;
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color(scene.background()));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
        ));

        for item in &self.items {
            paint(ctx, item);
        }
        if scene.world_axes() {
            for item in triad_items(camera, self.canvas) {
                paint(ctx, &item);
            }
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        let data = self.pixmap.data_as_u8_slice().to_vec();
        if data.len() != self.canvas.rgba8_len() {
            return Err(OrbitError::render(format!(
                "pixmap holds {} bytes, expected {}",
                data.len(),
                self.canvas.rgba8_len()
            )));
        }
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data,
            premultiplied: true,
        })
    }
}

fn canvas_u16(canvas: Canvas) -> OrbitResult<(u16, u16)> {
    let w = u16::try_from(canvas.width)
        .map_err(|_| OrbitError::validation("canvas width exceeds u16"))?;
    let h = u16::try_from(canvas.height)
        .map_err(|_| OrbitError::validation("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn collect(out: &mut Vec<DrawItem>, g: &Geometry, camera: &Camera, canvas: Canvas) {
    match g {
        Geometry::Points {
            positions,
            colors,
            size_px,
        } => {
            let half = f64::from(*size_px) * 0.5;
            for (p, c) in positions.iter().zip(colors) {
                let Some(sp) = camera.project(*p) else {
                    continue;
                };
                let center = to_point(sp);
                if !on_canvas(center, half, canvas) {
                    continue;
                }
                out.push(DrawItem {
                    depth: sp.depth,
                    color: *c,
                    shape: Shape::Square { center, half },
                });
            }
        }
        Geometry::Lines {
            segments,
            color,
            width_px,
        } => {
            for [a, b] in segments {
                let (Some(sa), Some(sb)) = (camera.project(*a), camera.project(*b)) else {
                    continue;
                };
                let Some(quad) = segment_quad(to_point(sa), to_point(sb), f64::from(*width_px))
                else {
                    continue;
                };
                out.push(DrawItem {
                    depth: (sa.depth + sb.depth) * 0.5,
                    color: *color,
                    shape: Shape::Quad(quad),
                });
            }
        }
        Geometry::Triangles {
            positions,
            colors,
            triangles,
        } => {
            for tri in triangles {
                let mut pts = [Point::ZERO; 3];
                let mut cols = [Rgba8::GRAY; 3];
                let mut depth = 0.0;
                let mut visible = true;
                for (k, &i) in tri.iter().enumerate() {
                    let i = i as usize;
                    match (positions.get(i).and_then(|p| camera.project(*p)), colors.get(i)) {
                        (Some(sp), Some(c)) => {
                            pts[k] = to_point(sp);
                            cols[k] = *c;
                            depth += sp.depth / 3.0;
                        }
                        _ => visible = false,
                    }
                }
                if !visible {
                    continue;
                }
                out.push(DrawItem {
                    depth,
                    color: Rgba8::mean(&cols).unwrap_or(Rgba8::GRAY),
                    shape: Shape::Tri(pts),
                });
            }
        }
    }
}

/// The world X/Y/Z axes as seen from `camera`, drawn as a fixed-size 2D triad.
fn triad_items(camera: &Camera, canvas: Canvas) -> Vec<DrawItem> {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let origin = Point::new(w * TRIAD_ORIGIN.0, h * TRIAD_ORIGIN.1);
    let len = w.min(h) * TRIAD_LEN;

    let mut arms: Vec<(f32, Rgba8, Vec2)> = [
        (Vec3::X, Rgba8::RED),
        (Vec3::Y, Rgba8::GREEN),
        (Vec3::Z, Rgba8::BLUE),
    ]
    .into_iter()
    .map(|(axis, c)| {
        let v = camera.to_view_direction(axis);
        (v.z, c, Vec2::new(f64::from(v.x), -f64::from(v.y)) * len)
    })
    .collect();
    // Camera looks down -Z in view space: arms pointing away are painted first.
    arms.sort_by(|a, b| a.0.total_cmp(&b.0));

    arms.into_iter()
        .filter_map(|(z, c, arm)| {
            segment_quad(origin, origin + arm, TRIAD_WIDTH_PX).map(|quad| DrawItem {
                depth: z,
                color: c,
                shape: Shape::Quad(quad),
            })
        })
        .collect()
}

/// Rectangle of `width` around segment `a..b`; `None` for a degenerate segment.
fn segment_quad(a: Point, b: Point, width: f64) -> Option<[Point; 4]> {
    let d = b - a;
    let len = d.hypot();
    if len < 1e-6 {
        return None;
    }
    let n = Vec2::new(-d.y, d.x) * (width * 0.5 / len);
    Some([a + n, b + n, b - n, a - n])
}

fn on_canvas(p: Point, margin: f64, canvas: Canvas) -> bool {
    p.x + margin >= 0.0
        && p.y + margin >= 0.0
        && p.x - margin <= f64::from(canvas.width)
        && p.y - margin <= f64::from(canvas.height)
}

fn to_point(sp: ScreenPoint) -> Point {
    Point::new(f64::from(sp.x), f64::from(sp.y))
}

fn color(c: Rgba8) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn paint(ctx: &mut vello_cpu::RenderContext, item: &DrawItem) {
    ctx.set_paint(color(item.color));
    match item.shape {
        Shape::Square { center, half } => {
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                center.x - half,
                center.y - half,
                center.x + half,
                center.y + half,
            ));
        }
        Shape::Quad(pts) => ctx.fill_path(&polygon(&pts)),
        Shape::Tri(pts) => ctx.fill_path(&polygon(&pts)),
    }
}

fn polygon(pts: &[Point]) -> vello_cpu::kurbo::BezPath {
    let mut path = vello_cpu::kurbo::BezPath::new();
    if let Some((first, rest)) = pts.split_first() {
        path.move_to((first.x, first.y));
        for p in rest {
            path.line_to((p.x, p.y));
        }
        path.close_path();
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
