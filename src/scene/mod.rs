//! Scene graph shared by every frame of a render run.

pub(crate) mod decorations;
pub(crate) mod model;
