//! Shaping adapter: wraps the external shaper behind a small trait so
//! the justification and positioning stages are testable without font
//! data. Everything downstream speaks char indices; the adapter owns
//! the byte/char conversion at the boundary.

pub mod features;
mod shaper;

pub use features::{
    ALTERNATE_CAP, FeatureMap, FeatureOverride, KASHIDA_CAP, OPEN_END, StretchFeature,
};
pub use shaper::{LineShaper, ShapeText, ShapedGlyph, ShaperFeature};
