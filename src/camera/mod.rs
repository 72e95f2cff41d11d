//! Orbit camera path and perspective projection.

pub(crate) mod orbit;
pub(crate) mod projection;
