use swash::scale::outline::Outline;
use swash::zeno::Verb;

/// One path command of a glyph outline, in font design units.
///
/// Em-space is +Y-up; presentation backends apply the Y flip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    QuadTo { cx: f32, cy: f32, x: f32, y: f32 },
    CurveTo { c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32 },
    Close,
}

impl PathCommand {
    fn y_coords(&self) -> [Option<f32>; 3] {
        match *self {
            PathCommand::MoveTo { y, .. } | PathCommand::LineTo { y, .. } => {
                [Some(y), None, None]
            }
            PathCommand::QuadTo { cy, y, .. } => [Some(cy), Some(y), None],
            PathCommand::CurveTo { c1y, c2y, y, .. } => [Some(c1y), Some(c2y), Some(y)],
            PathCommand::Close => [None, None, None],
        }
    }
}

fn y_extent(commands: &[PathCommand]) -> (f32, f32) {
    let mut y_min = f32::MAX;
    let mut y_max = f32::MIN;
    for cmd in commands {
        for y in cmd.y_coords().into_iter().flatten() {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    if y_min > y_max {
        (0.0, 0.0)
    } else {
        (y_min, y_max)
    }
}

/// A glyph outline as a flat command list plus its vertical extent.
#[derive(Debug, Clone, Default)]
pub struct GlyphOutline {
    pub commands: Vec<PathCommand>,
    /// Lowest Y coordinate touched by the outline.
    pub y_min: f32,
    /// Highest Y coordinate touched by the outline.
    pub y_max: f32,
}

impl GlyphOutline {
    pub fn new(commands: Vec<PathCommand>) -> Self {
        let (y_min, y_max) = y_extent(&commands);
        Self {
            commands,
            y_min,
            y_max,
        }
    }

    /// Build a command list from a swash outline.
    pub fn from_swash(outline: &Outline) -> Self {
        let mut commands = Vec::with_capacity(outline.verbs().len());
        let points = outline.points();
        let mut p = 0usize;

        for verb in outline.verbs() {
            match verb {
                Verb::MoveTo => {
                    let pt = points[p];
                    p += 1;
                    commands.push(PathCommand::MoveTo { x: pt.x, y: pt.y });
                }
                Verb::LineTo => {
                    let pt = points[p];
                    p += 1;
                    commands.push(PathCommand::LineTo { x: pt.x, y: pt.y });
                }
                Verb::QuadTo => {
                    let (c, pt) = (points[p], points[p + 1]);
                    p += 2;
                    commands.push(PathCommand::QuadTo {
                        cx: c.x,
                        cy: c.y,
                        x: pt.x,
                        y: pt.y,
                    });
                }
                Verb::CurveTo => {
                    let (c1, c2, pt) = (points[p], points[p + 1], points[p + 2]);
                    p += 3;
                    commands.push(PathCommand::CurveTo {
                        c1x: c1.x,
                        c1y: c1.y,
                        c2x: c2.x,
                        c2y: c2.y,
                        x: pt.x,
                        y: pt.y,
                    });
                }
                Verb::Close => commands.push(PathCommand::Close),
            }
        }

        Self::new(commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of contours (sub-paths) in this outline. A contour starts at
    /// each `MoveTo`.
    pub fn contour_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo { .. }))
            .count()
    }

    /// Return a copy with the first `n` contours removed, recomputing the
    /// Y extent over what remains.
    ///
    /// Verse-end numeral glyphs embed their decorative frame as leading
    /// sub-paths; dropping them lets an externally supplied frame or a
    /// textual digit be overlaid instead.
    pub fn drop_leading_contours(&self, n: usize) -> Self {
        if n == 0 {
            return self.clone();
        }
        let mut seen = 0usize;
        let mut start = self.commands.len();
        for (i, cmd) in self.commands.iter().enumerate() {
            if matches!(cmd, PathCommand::MoveTo { .. }) {
                if seen == n {
                    start = i;
                    break;
                }
                seen += 1;
            }
        }
        Self::new(self.commands[start..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f32, y: f32, size: f32) -> Vec<PathCommand> {
        vec![
            PathCommand::MoveTo { x, y },
            PathCommand::LineTo { x: x + size, y },
            PathCommand::LineTo {
                x: x + size,
                y: y + size,
            },
            PathCommand::LineTo { x, y: y + size },
            PathCommand::Close,
        ]
    }

    #[test]
    fn contour_count_counts_moves() {
        let mut commands = square(0.0, 0.0, 10.0);
        commands.extend(square(20.0, 20.0, 5.0));
        let outline = GlyphOutline::new(commands);
        assert_eq!(outline.contour_count(), 2);
        assert_eq!(outline.y_max, 25.0);
    }

    #[test]
    fn drop_leading_contours_recomputes_extent() {
        let mut commands = square(0.0, -100.0, 300.0);
        commands.extend(square(50.0, 10.0, 20.0));
        let outline = GlyphOutline::new(commands);
        assert_eq!(outline.y_min, -100.0);
        let inner = outline.drop_leading_contours(1);
        assert_eq!(inner.contour_count(), 1);
        assert_eq!(inner.y_min, 10.0);
        assert_eq!(inner.y_max, 30.0);
    }

    #[test]
    fn drop_all_contours_yields_empty() {
        let outline = GlyphOutline::new(square(0.0, 0.0, 10.0));
        let none = outline.drop_leading_contours(3);
        assert!(none.is_empty());
        assert_eq!(none.y_min, 0.0);
        assert_eq!(none.y_max, 0.0);
    }
}
