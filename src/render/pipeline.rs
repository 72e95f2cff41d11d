use std::path::{Path, PathBuf};

use crate::camera::orbit::{FRAMES_PER_SOURCE, OrbitParams, OrbitPath};
use crate::camera::projection::Camera;
use crate::cloud::ply::{read_mesh, read_point_cloud};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, FrameIndex, Rgba8};
use crate::foundation::error::{OrbitError, OrbitResult};
use crate::foundation::fs::list_files_with_suffix;
use crate::render::cpu::CpuRasterizer;
use crate::scene::decorations::{CAMERA_AXIS_SCALE, camera_axis_arrows};
use crate::scene::model::{DEFAULT_POINT_SIZE_PX, Scene};

/// File name suffix of point-cloud inputs.
pub const POINT_CLOUD_SUFFIX: &str = ".ply";

/// Rendering options shared by every frame of a run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderOpts {
    /// Output image size.
    pub canvas: Canvas,
    /// Uniform scale applied to every point position.
    pub psf: f32,
    /// Static model added next to every point cloud.
    pub overlay: Option<PathBuf>,
    /// Reference grid behind the geometry.
    pub grid: bool,
    /// World-axes triad in the lower-left corner.
    pub world_axes: bool,
    /// Red/green/blue arrows along X/Y/Z at the origin.
    pub camera_axes: bool,
    /// Point splat size in pixels.
    pub point_size_px: f32,
    pub background: Rgba8,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            psf: 1.0,
            overlay: None,
            grid: false,
            world_axes: true,
            camera_axes: true,
            point_size_px: DEFAULT_POINT_SIZE_PX,
            background: Rgba8::WHITE,
        }
    }
}

impl RenderOpts {
    pub fn validate(&self) -> OrbitResult<()> {
        self.canvas.validate()?;
        if !self.psf.is_finite() || self.psf == 0.0 {
            return Err(OrbitError::validation(format!(
                "point scale factor must be finite and non-zero, got {}",
                self.psf
            )));
        }
        if !self.point_size_px.is_finite() || self.point_size_px <= 0.0 {
            return Err(OrbitError::validation("point size must be > 0"));
        }
        Ok(())
    }
}

/// Summary of one [`render_orbit`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderStats {
    /// Point-cloud files rendered.
    pub sources: u64,
    /// Frames handed to the sink.
    pub frames_written: u64,
    /// Orbit angle after the last source, in radians.
    pub final_angle: f64,
}

/// Point-cloud files in `dir`, sorted by name.
pub fn list_point_clouds(dir: &Path) -> OrbitResult<Vec<PathBuf>> {
    list_files_with_suffix(dir, &[POINT_CLOUD_SUFFIX])
}

/// Scene holding only the persistent decorations selected by `opts`.
pub fn decorated_scene(opts: &RenderOpts) -> Scene {
    let mut scene = Scene::new(opts.background);
    scene.set_grid(opts.grid);
    scene.set_world_axes(opts.world_axes);
    if opts.camera_axes {
        for g in camera_axis_arrows(CAMERA_AXIS_SCALE) {
            scene.add_decoration(g);
        }
    }
    scene
}

/// Render every point cloud in `input_dir` from the orbiting camera into `sink`.
///
/// Each source yields [`FRAMES_PER_SOURCE`] frames; frame `f` of source `i` has index
/// `i * FRAMES_PER_SOURCE + f`. The orbit angle carries over from one source to the next.
///
/// Any load failure aborts the run, including a missing overlay model.
#[tracing::instrument(
    level = "info",
    skip(params, opts, sink),
    fields(width = opts.canvas.width, height = opts.canvas.height)
)]
pub fn render_orbit(
    input_dir: &Path,
    params: &OrbitParams,
    opts: &RenderOpts,
    sink: &mut dyn FrameSink,
) -> OrbitResult<RenderStats> {
    opts.validate()?;
    let mut orbit = OrbitPath::new(*params)?;
    let files = list_point_clouds(input_dir)?;

    let mut scene = decorated_scene(opts);
    let mut raster = CpuRasterizer::new(opts.canvas)?;

    sink.begin(SinkConfig {
        width: opts.canvas.width,
        height: opts.canvas.height,
        fps: params.frame_rate()?,
    })?;

    let mut stats = RenderStats::default();
    for (idx, file) in files.iter().enumerate() {
        tracing::info!("Processing {} ...", file.display());

        let mut cloud = read_point_cloud(file)?;
        cloud.scale(opts.psf);
        let focal = cloud.center();

        scene.clear_geometry();
        scene.add_point_cloud(cloud, opts.point_size_px);
        if let Some(overlay) = &opts.overlay {
            scene.add_mesh(read_mesh(overlay)?);
        }
        let bounds = scene.bounds();

        for sub in 0..FRAMES_PER_SOURCE {
            let mut camera = Camera::new(orbit.pose(sub, focal), opts.canvas);
            camera.reset_clipping_range(bounds);

            let frame = raster.render(&scene, &camera)?;
            let frame_idx =
                FrameIndex(idx as u64 * u64::from(FRAMES_PER_SOURCE) + u64::from(sub));
            sink.push_frame(frame_idx, &frame)?;
            stats.frames_written += 1;

            tracing::debug!(
                frame = frame_idx.0,
                angle = orbit.subframe_angle(sub),
                position = ?camera.pose().position,
                "frame rendered"
            );
        }

        orbit.advance();
        stats.sources += 1;
    }

    sink.end()?;
    stats.final_angle = orbit.angle();
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
