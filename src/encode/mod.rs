//! Frame sinks.
//!
//! Sinks consume rendered frames in order and are fed by `render_orbit` and
//! `assemble_frames`.

pub(crate) mod ffmpeg;
pub(crate) mod png;
pub(crate) mod sink;
