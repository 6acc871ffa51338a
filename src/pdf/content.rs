//! PDF content stream generation for label borders, titles, and barcodes.
//!
//! This module provides:
//! - Per-label drawing operators (borders, centered titles, bars, caption)
//! - Text width estimation for visual centering
//! - String escaping for PDF literal strings

use super::fonts::{RES_BOLD, RES_REGULAR};
use crate::barcode::{self, SENTINEL};
use crate::config::{LabelRecord, LayoutConfig};
use crate::error::LabelError;

/// Builder for one page's content stream
pub struct ContentBuilder {
    content_parts: Vec<String>,
}

impl ContentBuilder {
    pub fn new() -> Self {
        Self {
            content_parts: Vec::new(),
        }
    }

    /// Draw one label into slot `slot` (0 = top of the page).
    ///
    /// Stacking is fixed-pitch: the slot alone determines the vertical
    /// placement, independent of the label's content.
    pub fn add_label(
        &mut self,
        slot: usize,
        record: &LabelRecord,
        cfg: &LayoutConfig,
    ) -> Result<(), LabelError> {
        let y_bottom = cfg.page_height - (slot as f64 * cfg.label_pitch + cfg.label_top_offset);
        let y_top = y_bottom + cfg.label_height;
        let center_x = cfg.margin_left + cfg.label_width / 2.0;

        // Main border
        self.content_parts.extend([
            "2 w".to_string(),
            "0.8 0.8 0.8 RG".to_string(),
            format!(
                "{} {} {} {} re S",
                cfg.margin_left,
                y_bottom + cfg.margin_bottom,
                cfg.label_width,
                cfg.label_height
            ),
        ]);

        // Dashed cutting guide, expanded 10 units past the label on each side
        self.content_parts.extend([
            "[4 4] 0 d".to_string(),
            "1 w".to_string(),
            "0 0 0 RG".to_string(),
            format!(
                "{} {} {} {} re S",
                cfg.margin_left - 10.0,
                y_bottom - 6.0,
                cfg.label_width + 20.0,
                cfg.label_height + 20.0
            ),
            "[] 0 d".to_string(),
        ]);

        // Title 1 (larger font, centered)
        let title1_width = estimate_text_width(&record.title1, cfg.title1_size, cfg.char_width_bold);
        self.content_parts.extend([
            "BT".to_string(),
            format!("/{RES_BOLD} {} Tf", cfg.title1_size),
            "0 0 0 rg".to_string(),
            format!(
                "1 0 0 1 {} {} Tm",
                centered_start(center_x, title1_width),
                y_top - 30.0
            ),
            format!("({}) Tj", escape_pdf_string(&record.title1)),
            "ET".to_string(),
        ]);

        // Title 2 (smaller font, centered)
        let title2_width =
            estimate_text_width(&record.title2, cfg.title2_size, cfg.char_width_regular);
        self.content_parts.extend([
            "BT".to_string(),
            format!("/{RES_REGULAR} {} Tf", cfg.title2_size),
            format!(
                "1 0 0 1 {} {} Tm",
                centered_start(center_x, title2_width),
                y_top - 55.0
            ),
            format!("({}) Tj", escape_pdf_string(&record.title2)),
            "ET".to_string(),
        ]);

        // Barcode bars, scaled down and centered under the titles, with the
        // empirical horizontal nudge applied.
        let bars = barcode::encode(&record.barcode)?;
        let bars_width: f64 = bars.iter().map(|b| b.width).sum::<f64>() * cfg.barcode_scale;
        let bars_start_x =
            centered_start(center_x, bars_width) + cfg.barcode_center_nudge;
        let bars_start_y = y_bottom + (cfg.label_height - cfg.barcode_height) / 3.0;
        self.content_parts.push("0 g".to_string());
        for bar in &bars {
            self.content_parts.push(format!(
                "{} {} {} {} re f",
                bars_start_x + bar.x * cfg.barcode_scale,
                bars_start_y,
                bar.width * cfg.barcode_scale,
                cfg.barcode_height
            ));
        }

        // Human-readable caption under the bars, sentinels included
        let caption = format!("{SENTINEL}{}{SENTINEL}", record.barcode);
        let caption_width =
            estimate_text_width(&caption, cfg.caption_size, cfg.char_width_regular);
        self.content_parts.extend([
            "BT".to_string(),
            format!("/{RES_REGULAR} {} Tf", cfg.caption_size),
            format!(
                "1 0 0 1 {} {} Tm",
                centered_start(center_x, caption_width),
                y_bottom + 20.0
            ),
            format!("({}) Tj", escape_pdf_string(&caption)),
            "ET".to_string(),
        ]);

        Ok(())
    }

    /// Build the final content stream text
    pub fn build(&self) -> String {
        self.content_parts.join("\n")
    }
}

impl Default for ContentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Estimated rendered width: character count scaled by the face's
/// per-character width factor. An approximation rather than glyph metrics;
/// centering tolerance is visual.
pub fn estimate_text_width(s: &str, font_size: f64, char_width: f64) -> f64 {
    s.chars().count() as f64 * char_width * font_size
}

/// Left edge of a run of the given width centered on `center_x`.
pub fn centered_start(center_x: f64, width: f64) -> f64 {
    center_x - width / 2.0
}

/// Escape special characters in PDF strings
pub fn escape_pdf_string(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        match c {
            '(' => result.push_str(r"\("),
            ')' => result.push_str(r"\)"),
            '\\' => result.push_str(r"\\"),
            '\n' => result.push_str(r"\n"),
            '\r' => result.push_str(r"\r"),
            '\t' => result.push_str(r"\t"),
            _ => result.push(c),
        }
    }
    result
}
