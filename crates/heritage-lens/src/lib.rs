//! Presentation layer: classification records as editor code lenses.
//!
//! Every record becomes one lens above the querying member, titled
//! `@Override Base` or `@Implement Shape`, whose command peeks at the
//! ancestor's member.

pub mod code_lens;
pub mod config;

pub use code_lens::{AnnotationLensProvider, CodeLens, CodeLensCommand, annotation_lens};
pub use config::{LensConfig, PeekMode};
