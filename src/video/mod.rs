//! Image folder to video.

pub(crate) mod assemble;
