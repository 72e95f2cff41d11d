//! Rasterization and the orbit render pipeline.

pub(crate) mod backend;
pub(crate) mod cpu;
pub(crate) mod pipeline;
