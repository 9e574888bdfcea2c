use tracing::trace;

use crate::segment::LineTextInfo;
use crate::shaping::{FeatureMap, ShapeText, StretchFeature};

use super::{JustificationPlan, WIDTH_EPSILON};

/// Result of one speculative site edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The edit widened the word and fit; it is now part of the plan.
    Committed,
    /// The edit did not change the shaped width (site saturated or the
    /// font has no wider form here); discarded.
    NoEffect,
    /// The edit would push the line past the desired width; discarded.
    Overflow,
}

/// Mutable working state of the kashida/alternate search.
///
/// Holds the plan being built plus the running totals needed to answer
/// "would this edit overflow" without re-measuring the whole line.
pub struct JustInfo<'a> {
    shaper: &'a dyn ShapeText,
    pub info: &'a LineTextInfo,
    plan: JustificationPlan,
    words_total: f32,
    /// Total contributed by spaces at their budget-applied widths.
    /// Fixed for the duration of the search.
    spaces_total: f32,
}

impl<'a> JustInfo<'a> {
    pub fn new(shaper: &'a dyn ShapeText, info: &'a LineTextInfo, plan: JustificationPlan) -> Self {
        let words_total: f32 = plan.word_widths.iter().sum();
        let spaces_total = plan.achieved_width - words_total;
        Self {
            shaper,
            info,
            plan,
            words_total,
            spaces_total,
        }
    }

    pub fn overrides(&self) -> &FeatureMap {
        &self.plan.overrides
    }

    /// Width still missing from the line.
    pub fn gap(&self) -> f32 {
        self.plan.desired_width - (self.words_total + self.spaces_total)
    }

    /// The search is finished once the gap closes to rounding noise.
    pub fn done(&self) -> bool {
        self.gap() <= WIDTH_EPSILON
    }

    /// Speculatively apply `edits` (feature, start, end, value) to one
    /// word, re-shape it, and commit iff the word grew without pushing
    /// the line past the desired width.
    ///
    /// Committed edits strictly widen the line, which is what makes the
    /// search width monotonically non-decreasing.
    pub fn try_commit(
        &mut self,
        word_index: usize,
        edits: &[(StretchFeature, usize, usize, u32)],
    ) -> CommitOutcome {
        let word = &self.info.words[word_index];
        let old_width = self.plan.word_widths[word_index];

        let mut tentative = self.plan.overrides.clone();
        for &(feature, start, end, value) in edits {
            tentative.set(feature, start, end, value);
        }
        let features = tentative.for_word(word.start, word.char_len);
        let new_width = self.shaper.measure(&word.text, &features);

        if new_width <= old_width + WIDTH_EPSILON {
            return CommitOutcome::NoEffect;
        }
        let new_total = self.words_total - old_width + new_width;
        if new_total + self.spaces_total > self.plan.desired_width + WIDTH_EPSILON {
            return CommitOutcome::Overflow;
        }

        trace!(
            word_index,
            grew = new_width - old_width,
            "committed stretch edit"
        );
        self.plan.overrides = tentative;
        self.plan.word_widths[word_index] = new_width;
        self.words_total = new_total;
        self.plan.achieved_width = self.words_total + self.spaces_total;
        CommitOutcome::Committed
    }

    pub fn into_plan(self) -> JustificationPlan {
        self.plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{Line, segment};
    use crate::shaping::{ShapedGlyph, ShaperFeature};

    /// 100 units per char, +25 per cv01 level on the targeted char.
    struct StepShaper;

    impl ShapeText for StepShaper {
        fn shape(&self, text: &str, features: &[ShaperFeature]) -> Vec<ShapedGlyph> {
            text.chars()
                .enumerate()
                .map(|(i, _)| {
                    let mut advance = 100.0;
                    for f in features {
                        if f.start == i && &f.tag == b"cv01" {
                            advance += 25.0 * f.value as f32;
                        }
                    }
                    ShapedGlyph {
                        glyph_id: i as u32,
                        cluster: i as u32,
                        x_advance: advance,
                        y_advance: 0.0,
                        x_offset: 0.0,
                        y_offset: 0.0,
                    }
                })
                .collect()
        }
    }

    fn just_for<'a>(
        shaper: &'a StepShaper,
        info: &'a LineTextInfo,
        desired: f32,
    ) -> JustInfo<'a> {
        let word_widths: Vec<f32> = info
            .words
            .iter()
            .map(|w| shaper.measure(&w.text, &[]))
            .collect();
        let natural: f32 = word_widths.iter().sum();
        let plan = JustificationPlan {
            word_widths,
            overrides: FeatureMap::default(),
            simple_space: 0.0,
            aya_space: 0.0,
            x_scale: 1.0,
            desired_width: desired,
            achieved_width: natural,
        };
        JustInfo::new(shaper, info, plan)
    }

    #[test]
    fn committed_edits_strictly_narrow_the_gap() {
        let shaper = StepShaper;
        let info = segment(&Line::content("بسم"));
        let mut just = just_for(&shaper, &info, 400.0);

        let mut last_gap = just.gap();
        for level in 1..=3u32 {
            let outcome = just.try_commit(0, &[(StretchFeature::Kashida, 0, 1, level)]);
            assert_eq!(outcome, CommitOutcome::Committed);
            assert!(just.gap() < last_gap);
            last_gap = just.gap();
        }
    }

    #[test]
    fn overflowing_edits_are_discarded_entirely() {
        let shaper = StepShaper;
        let info = segment(&Line::content("بسم"));
        let mut just = just_for(&shaper, &info, 310.0);

        // The smallest edit is 25 units; 300 + 25 overshoots 310.
        let outcome = just.try_commit(0, &[(StretchFeature::Kashida, 0, 1, 1)]);
        assert_eq!(outcome, CommitOutcome::Overflow);
        let plan = just.into_plan();
        assert!(plan.overrides.is_empty());
        assert_eq!(plan.word_widths[0], 300.0);
    }

    #[test]
    fn edits_that_do_not_widen_are_rejected() {
        let shaper = StepShaper;
        let info = segment(&Line::content("بسم"));
        let mut just = just_for(&shaper, &info, 500.0);

        // Lig features carry no width in this fake; the commit protocol
        // must refuse them rather than loop forever.
        let outcome = just.try_commit(0, &[(StretchFeature::Lig11, 0, 2, 1)]);
        assert_eq!(outcome, CommitOutcome::NoEffect);
    }
}
