//! Calligraphic line justification.
//!
//! Reconciles a line's natural shaped width with the width the page
//! asks for. Compression is always a uniform scale; stretching first
//! spends the inter-word space budget, then inserts kashida and
//! alternate forms at calligraphically legal sites, and finally
//! full-justifies whatever residue is left across the spaces.

mod indopak;
mod just_info;
mod madinah;
mod rules;

pub use just_info::{CommitOutcome, JustInfo};
pub use rules::{PairPosition, StretchKind, StretchSite};

use tracing::debug;

use crate::segment::LineTextInfo;
use crate::shaping::{FeatureMap, ShapeText};

/// Supported mushaf typesetting conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MushafVariant {
    /// Madinah 15-line convention.
    Madinah,
    /// IndoPak 15-line convention.
    IndoPak,
}

impl MushafVariant {
    /// Number of decorative frame sub-paths embedded in a verse-end
    /// numeral glyph for this convention.
    pub fn frame_contour_count(self) -> usize {
        match self {
            MushafVariant::Madinah => 2,
            MushafVariant::IndoPak => 1,
        }
    }
}

/// Justification style for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JustStyle {
    /// Default: space budget, then kashida/alternate search.
    Stretch,
    /// Uniform horizontal scaling only (used for headers and special
    /// lines).
    ScaleOnly,
}

/// How far a single simple space may stretch beyond its natural width,
/// in font units. Independent of line length.
pub const SIMPLE_SPACE_STRETCH_CAP: f32 = 100.0;

/// How far a verse-boundary space may stretch, in font units.
pub const AYA_SPACE_STRETCH_CAP: f32 = 200.0;

/// Width comparisons tolerate this much rounding noise (font units).
pub const WIDTH_EPSILON: f32 = 0.01;

/// The committed spacing/scaling/feature plan for one line.
///
/// Applying the plan never yields a width beyond `desired_width` by more
/// than [`WIDTH_EPSILON`]; under-fill is possible and is detected by
/// comparing `achieved_width` with `desired_width`, not via an error.
#[derive(Debug, Clone)]
pub struct JustificationPlan {
    /// Shaped width of each word with the plan's overrides applied.
    pub word_widths: Vec<f32>,
    /// Accumulated per-character feature overrides.
    pub overrides: FeatureMap,
    /// Final width of a simple inter-word space.
    pub simple_space: f32,
    /// Final width of a verse-boundary space.
    pub aya_space: f32,
    /// Uniform horizontal scale (1.0 unless compressing or scale-only).
    pub x_scale: f32,
    pub desired_width: f32,
    pub achieved_width: f32,
}

impl JustificationPlan {
    fn natural(word_widths: Vec<f32>, space_width: f32, desired_width: f32, natural: f32) -> Self {
        Self {
            word_widths,
            overrides: FeatureMap::new(),
            simple_space: space_width,
            aya_space: space_width,
            x_scale: 1.0,
            desired_width,
            achieved_width: natural,
        }
    }

    /// Width still missing after justification; zero when the line
    /// filled its measure.
    pub fn underfill(&self) -> f32 {
        (self.desired_width - self.achieved_width).max(0.0)
    }
}

/// Compute a justification plan for a segmented line.
///
/// `space_width` is the natural width of one space glyph. The plan's
/// feature overrides use line-relative char indices and are meant to be
/// handed back to the shaper when the full line is re-shaped for
/// positioning.
pub fn justify(
    shaper: &dyn ShapeText,
    info: &LineTextInfo,
    desired_width: f32,
    space_width: f32,
    variant: MushafVariant,
    style: JustStyle,
) -> JustificationPlan {
    let word_widths: Vec<f32> = info
        .words
        .iter()
        .map(|w| shaper.measure(&w.text, &[]))
        .collect();
    let words_total: f32 = word_widths.iter().sum();
    let (n_simple, n_aya) = info.space_counts();
    let n_spaces = n_simple + n_aya;
    let natural = words_total + n_spaces as f32 * space_width;

    let mut plan = JustificationPlan::natural(word_widths, space_width, desired_width, natural);

    if natural <= 0.0 {
        return plan;
    }

    // Compression never uses kashida: squeezing a connection stroke is
    // not calligraphically meaningful, so a uniform scale carries it.
    if desired_width < natural - WIDTH_EPSILON {
        plan.x_scale = desired_width / natural;
        plan.achieved_width = desired_width;
        return plan;
    }

    if style == JustStyle::ScaleOnly {
        plan.x_scale = desired_width / natural;
        plan.achieved_width = desired_width;
        return plan;
    }

    let needed = desired_width - natural;
    if needed <= WIDTH_EPSILON {
        return plan;
    }

    // Space budget: aya spaces absorb twice what simple spaces do, both
    // distributed proportionally up to their caps.
    let budget = n_simple as f32 * SIMPLE_SPACE_STRETCH_CAP + n_aya as f32 * AYA_SPACE_STRETCH_CAP;
    if budget > 0.0 {
        let ratio = (needed / budget).min(1.0);
        plan.simple_space += SIMPLE_SPACE_STRETCH_CAP * ratio;
        plan.aya_space += AYA_SPACE_STRETCH_CAP * ratio;
        plan.achieved_width = natural + budget * ratio;
    }
    if needed <= budget + WIDTH_EPSILON {
        return plan;
    }

    debug!(
        gap = desired_width - plan.achieved_width,
        ?variant,
        "space budget exhausted, entering stretch search"
    );

    let mut just = JustInfo::new(shaper, info, plan);
    match variant {
        MushafVariant::Madinah => madinah::run(&mut just),
        MushafVariant::IndoPak => indopak::run(&mut just),
    }
    let mut plan = just.into_plan();

    // Full-justify fallback: whatever the search could not close is
    // spread evenly over every space in the line. A line with no spaces
    // stays at its best-effort width and reports the shortfall through
    // `achieved_width`.
    let remaining = plan.desired_width - plan.achieved_width;
    if remaining > WIDTH_EPSILON && n_spaces > 0 {
        let per_space = remaining / n_spaces as f32;
        plan.simple_space += per_space;
        plan.aya_space += per_space;
        plan.achieved_width = plan.desired_width;
    }
    plan
}
