//! orbitcast turns a folder of colored point clouds into an orbiting-camera image sequence, and
//! an image folder into a video.
//!
//! Two independent batch pipelines:
//!
//! - [`render_orbit`] loads every `.ply` file in a folder, renders it from a camera circling the
//!   cloud, and streams the frames into a [`FrameSink`] (usually a [`PngSequenceSink`])
//! - [`assemble_video`] concatenates every image in a folder, in name order, into an MP4 through
//!   the system `ffmpeg`
//!
//! Rendering is CPU-only and single-threaded.
#![forbid(unsafe_code)]

mod assets;
mod camera;
mod cloud;
mod encode;
mod foundation;
mod render;
mod scene;
mod video;

pub use crate::foundation::core::{Bounds3, Canvas, Fps, FrameIndex, Mat4, Rgba8, Vec3};
pub use crate::foundation::error::{OrbitError, OrbitResult};

pub use crate::assets::decode::{decode_image, decode_image_file};
pub use crate::camera::orbit::{
    CameraPose, FRAMES_PER_SOURCE, ORBIT_VIEW_UP, OrbitParams, OrbitPath, orbit_position,
};
pub use crate::camera::projection::{Camera, ClipRange, ScreenPoint, VIEW_ANGLE_DEG};
pub use crate::cloud::mesh::Mesh;
pub use crate::cloud::ply::{
    DEFAULT_VERTEX_COLOR, mesh_from_reader, point_cloud_from_reader, read_mesh, read_point_cloud,
};
pub use crate::cloud::point_cloud::PointCloud;
pub use crate::encode::ffmpeg::{
    FfmpegSink, FfmpegSinkOpts, FfplaySink, ensure_parent_dir, is_ffmpeg_on_path,
    is_ffplay_on_path,
};
pub use crate::encode::png::{PngSequenceSink, frame_file_name};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig, TeeSink};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::cpu::CpuRasterizer;
pub use crate::render::pipeline::{
    POINT_CLOUD_SUFFIX, RenderOpts, RenderStats, decorated_scene, list_point_clouds,
    render_orbit,
};
pub use crate::scene::decorations::{
    CAMERA_AXIS_SCALE, GRID_COLOR, GRID_DIVISIONS, arrow, camera_axis_arrows, grid,
    grid_segments,
};
pub use crate::scene::model::{DEFAULT_POINT_SIZE_PX, Geometry, Scene};
pub use crate::video::assemble::{
    AssembleOpts, AssembleStats, IMAGE_SUFFIXES, assemble_frames, assemble_video, list_images,
};
