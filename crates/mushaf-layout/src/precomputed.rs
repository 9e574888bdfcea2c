//! Precomputed page-layout documents.
//!
//! A layout document carries a glyph-outline table keyed by codepoint
//! (with size-variant outlines covering the calligraphic elongation
//! range) and per-page line records of pre-positioned glyph runs. The
//! document is an input artifact; this module parses it, resolves the
//! runs into draw lists, and passes the nodes through the mark solver
//! so diacritics settle against their resolved bases.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use mushaf_font::{GlyphOutline, PathCommand};
use mushaf_text::arabic;

use crate::LayoutError;
use crate::draw_list::{LineLayout, PositionedGlyph};
use crate::marks::{ForceNode, MarkSolver};

/// One serialized path segment, in font design units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum PathSeg {
    M { x: f32, y: f32 },
    L { x: f32, y: f32 },
    Q { cx: f32, cy: f32, x: f32, y: f32 },
    C { c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32 },
    Z,
}

impl PathSeg {
    fn to_command(self) -> PathCommand {
        match self {
            PathSeg::M { x, y } => PathCommand::MoveTo { x, y },
            PathSeg::L { x, y } => PathCommand::LineTo { x, y },
            PathSeg::Q { cx, cy, x, y } => PathCommand::QuadTo { cx, cy, x, y },
            PathSeg::C {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => PathCommand::CurveTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            },
            PathSeg::Z => PathCommand::Close,
        }
    }
}

/// Size-variant outlines for one codepoint, ordered from the nominal
/// form through its elongation limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlyphRecord {
    pub outlines: Vec<Vec<PathSeg>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunGlyph {
    /// Source codepoint.
    pub code: char,
    /// Index into the codepoint's outline variants.
    pub variant: usize,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRecord {
    /// Line origin within the column.
    pub x: f32,
    pub x_scale: f32,
    pub run: Vec<RunGlyph>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PageRecord {
    pub lines: Vec<LineRecord>,
}

/// A whole precomputed mushaf layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub glyphs: HashMap<char, GlyphRecord>,
    pub pages: Vec<PageRecord>,
}

impl LayoutDocument {
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        serde_json::from_str(json).map_err(|e| LayoutError::Document(e.to_string()))
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Resolve one page of a precomputed document into draw lists, running
/// the mark solver so diacritics sit against their resolved bases.
///
/// Marks are recognized by codepoint class; each binds to the nearest
/// preceding non-mark glyph in its line's run.
pub fn compose_page(
    document: &LayoutDocument,
    page: usize,
    solver: &MarkSolver,
) -> Result<Vec<LineLayout>, LayoutError> {
    let record = document
        .pages
        .get(page)
        .ok_or(LayoutError::PageOutOfRange {
            page,
            pages: document.pages.len(),
        })?;

    let mut layouts = Vec::with_capacity(record.lines.len());
    for line in &record.lines {
        layouts.push(compose_line(document, line, solver)?);
    }
    Ok(layouts)
}

fn compose_line(
    document: &LayoutDocument,
    line: &LineRecord,
    solver: &MarkSolver,
) -> Result<LineLayout, LayoutError> {
    let mut nodes: Vec<ForceNode> = Vec::with_capacity(line.run.len());
    let mut outlines: Vec<Arc<GlyphOutline>> = Vec::with_capacity(line.run.len());
    let mut last_base: Option<usize> = None;

    for glyph in &line.run {
        let record = document
            .glyphs
            .get(&glyph.code)
            .ok_or_else(|| LayoutError::Document(format!("no outline table entry for {:?}", glyph.code)))?;
        let segs = record.outlines.get(glyph.variant).ok_or_else(|| {
            LayoutError::Document(format!(
                "variant {} out of range for {:?}",
                glyph.variant, glyph.code
            ))
        })?;
        let outline = GlyphOutline::new(segs.iter().map(|s| s.to_command()).collect());
        outlines.push(Arc::new(outline));

        let target = [glyph.x, glyph.y];
        if arabic::is_diacritic(glyph.code) {
            match last_base {
                Some(base) => nodes.push(ForceNode::mark(target, base, nodes[base].target)),
                None => nodes.push(ForceNode::base_glyph(target)),
            }
        } else {
            last_base = Some(nodes.len());
            nodes.push(ForceNode::base_glyph(target));
        }
    }

    solver.run(&mut nodes);

    let mut layout = LineLayout::new();
    layout.x_scale = line.x_scale;
    let mut y_min = f32::MAX;
    let mut y_max = f32::MIN;
    let mut max_x: f32 = 0.0;

    for ((glyph, node), outline) in line.run.iter().zip(&nodes).zip(&outlines) {
        let x = line.x + node.position[0];
        let y = node.position[1];
        if !outline.is_empty() {
            y_min = y_min.min(outline.y_min + y);
            y_max = y_max.max(outline.y_max + y);
        }
        max_x = max_x.max(node.position[0]);
        layout.draw.push(PositionedGlyph {
            glyph_id: glyph.code as u32,
            outline: Some(outline.clone()),
            x,
            y,
            color: None,
        });
    }

    if y_min <= y_max {
        layout.y_min = y_min;
        layout.y_max = y_max;
    }
    layout.width = max_x;
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> LayoutDocument {
        let json = r#"{
            "glyphs": {
                "ب": { "outlines": [[
                    {"op": "M", "x": 0.0, "y": 0.0},
                    {"op": "L", "x": 100.0, "y": 0.0},
                    {"op": "L", "x": 100.0, "y": 200.0},
                    {"op": "Z"}
                ]] },
                "ِ": { "outlines": [[
                    {"op": "M", "x": 0.0, "y": -60.0},
                    {"op": "L", "x": 40.0, "y": -60.0},
                    {"op": "Z"}
                ]] }
            },
            "pages": [
                { "lines": [
                    { "x": 10.0, "x_scale": 1.0, "run": [
                        {"code": "ب", "variant": 0, "x": 0.0, "y": 0.0},
                        {"code": "ِ", "variant": 0, "x": 20.0, "y": -80.0}
                    ] }
                ] }
            ]
        }"#;
        LayoutDocument::from_json(json).expect("valid document")
    }

    #[test]
    fn out_of_range_page_is_an_error_not_a_clamp() {
        let doc = document();
        let err = compose_page(&doc, 5, &MarkSolver::default()).unwrap_err();
        assert!(matches!(err, LayoutError::PageOutOfRange { page: 5, pages: 1 }));
    }

    #[test]
    fn missing_variant_is_a_document_error() {
        let mut doc = document();
        doc.pages[0].lines[0].run[0].variant = 3;
        let err = compose_page(&doc, 0, &MarkSolver::default()).unwrap_err();
        assert!(matches!(err, LayoutError::Document(_)));
    }

    #[test]
    fn marks_bind_to_the_preceding_base() {
        let doc = document();
        let layouts = compose_page(&doc, 0, &MarkSolver::default()).expect("page composes");
        assert_eq!(layouts.len(), 1);
        let line = &layouts[0];
        assert_eq!(line.draw.len(), 2);
        // Base stays at its target (already resolved); the mark holds
        // its relative offset from the base.
        let base = &line.draw[0];
        let mark = &line.draw[1];
        assert!((base.x - 10.0).abs() < 0.1);
        assert!((mark.x - base.x - 20.0).abs() < 0.5);
        assert!((mark.y + 80.0).abs() < 0.5);
    }

    #[test]
    fn json_round_trips() {
        let doc = document();
        let json = serde_json::to_string(&doc).expect("serializes");
        let back = LayoutDocument::from_json(&json).expect("parses");
        assert_eq!(back.page_count(), doc.page_count());
        assert_eq!(back.pages[0].lines[0].run.len(), 2);
    }
}
