//! Custom markdown-it plugins for the document pipeline

pub mod block_image;
pub mod footnote;
pub mod math;
pub mod toc;

pub use block_image::add_block_image_plugin;
pub use footnote::add_footnote_plugin;
pub use math::add_math_plugin;
pub use toc::add_toc_plugin;
