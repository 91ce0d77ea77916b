use std::fmt::{Display, Formatter, Write};

use crate::{common::ModuleCount, sampler::FillMatrix};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

// Vector document
//------------------------------------------------------------------------------

/// SVG drawing of a fill matrix: one unit square per dark module on a `steps` x `steps`
/// canvas.
#[derive(Debug, Clone, Copy)]
pub struct VectorDocument<'a> {
    steps: ModuleCount,
    matrix: &'a FillMatrix,
}

impl<'a> VectorDocument<'a> {
    pub fn new(steps: ModuleCount, matrix: &'a FillMatrix) -> Self {
        debug_assert_eq!(steps.get(), matrix.steps(), "Matrix sampled for another module count");
        Self { steps, matrix }
    }

    pub fn steps(&self) -> ModuleCount {
        self.steps
    }

    pub fn rect_count(&self) -> usize {
        self.matrix.len()
    }
}

impl Display for VectorDocument<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let n = self.steps.get();
        writeln!(
            f,
            r#"<svg xmlns="{SVG_NS}" version="1.2" baseProfile="full" viewBox="0 0 {n} {n}" shape-rendering="crispEdges" style="min-width: {}px;">"#,
            n * 2
        )?;
        writeln!(f, r##"  <g fill="#000000">"##)?;
        for p in self.matrix {
            writeln!(f, r#"    <rect x="{}" y="{}" width="1" height="1"/>"#, p.x, p.y)?;
        }
        writeln!(f, "  </g>")?;
        writeln!(f, "</svg>")
    }
}

// ENTRY POINT FOR VECTOR OUTPUT
/// Serialises `matrix` in the order it was filled, so identical input yields identical bytes.
pub fn render_vector(steps: ModuleCount, matrix: &FillMatrix) -> String {
    let doc = VectorDocument::new(steps, matrix);
    let mut out = String::with_capacity(160 + doc.rect_count() * 48);
    // Writing into a String cannot fail
    let _ = write!(out, "{doc}");
    out
}
