use std::fmt::Write;

use super::{
    palette::Color,
    render::{Surface, CANVAS_SIZE},
};

/// Vector surface keeping the exact fractional cell geometry.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    side: u32,
    background: Option<Color>,
    body: String,
}

impl SvgSurface {
    /// `side` only sets the displayed size, the view box stays logical.
    pub fn new(side: u32) -> Self {
        Self {
            side,
            background: None,
            body: String::new(),
        }
    }

    pub fn with_background(mut self, color: Option<Color>) -> Self {
        self.background = color;
        self
    }

    pub fn finish(&self) -> String {
        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{side}" height="{side}" viewBox="0 0 {size} {size}" shape-rendering="crispEdges">"#,
            side = self.side,
            size = CANVAS_SIZE,
        );

        if let Some(color) = self.background {
            _ = write!(
                out,
                r#"<rect width="{size}" height="{size}" fill="{color}"/>"#,
                size = CANVAS_SIZE,
            );
        }

        out.push_str(&self.body);
        out.push_str("</svg>");
        out
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self) {
        self.body.clear();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        _ = write!(
            self.body,
            r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{color}"/>"#,
        );
    }
}
