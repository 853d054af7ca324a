//! Image compositing: template base layer, outlined caption lines, lossless encoding.

pub(crate) mod backend;
pub(crate) mod cpu;
pub(crate) mod encode;
pub(crate) mod pool;
pub(crate) mod text;

pub use backend::{FrameRGBA, LineDraw, Typesetter};
pub use cpu::{Composite, Compositor};
pub use encode::{RenderedImage, decode_data_url, encode_png};
pub use pool::CompositorPool;
pub use text::{BlockTypesetter, ParleyTypesetter};
