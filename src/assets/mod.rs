//! Still-image decoding for the video assembler.

pub(crate) mod decode;
