//! Inference model capability
//!
//! The core never depends on a concrete model; everything goes through
//! the Segmenter trait. The shipped implementations are stand-ins for
//! testing and for demonstrating the pipeline end to end.

mod segmenter;
mod identity;
mod grayscale;
mod factory;

pub use segmenter::Segmenter;
pub use identity::IdentityModel;
pub use grayscale::GrayscaleModel;
pub use factory::SegmenterFactory;
