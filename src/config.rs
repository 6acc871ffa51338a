//! Configuration loading and parsing.
//!
//! This module handles:
//! - Loading and parsing settings.json (layout overrides, font selection)
//! - Loading and parsing data.csv (label records)
//! - Unit conversion for dimensions (mm, cm, in, pt)

use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::pdf::fonts::StandardFont;

/// Dimension value that can be specified as:
/// - A number (interpreted as points)
/// - A string with unit: e.g., "100 mm", "10 cm", "1 in" (inches)
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(try_from = "RawDimension")]
pub struct Dimension(pub f64);

impl Dimension {
    /// Convert to points (internal PDF unit)
    pub fn as_points(&self) -> f64 {
        self.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDimension {
    Number(f64),
    Text(String),
}

impl TryFrom<RawDimension> for Dimension {
    type Error = String;

    fn try_from(raw: RawDimension) -> Result<Self, Self::Error> {
        match raw {
            RawDimension::Number(n) => Ok(Dimension(n)),
            RawDimension::Text(s) => parse_dimension(&s),
        }
    }
}

fn parse_dimension(value: &str) -> Result<Dimension, String> {
    let value = value.trim();
    let split = value
        .find(|c: char| c.is_whitespace() || c.is_ascii_alphabetic())
        .unwrap_or(value.len());
    let (num_str, unit) = value.split_at(split);
    let num: f64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number in dimension: {}", num_str.trim()))?;

    // 1 inch = 72 points (PDF default unit)
    let points = match unit.trim().to_lowercase().as_str() {
        "" | "pt" | "point" | "points" => num,
        "mm" => num * 72.0 / 25.4,
        "cm" => num * 72.0 / 2.54,
        "in" | "inch" | "inches" => num * 72.0,
        other => return Err(format!("unknown unit '{other}'. Supported: mm, cm, in, pt")),
    };
    Ok(Dimension(points))
}

/// One label to print. Rows of data.csv map to records in input order.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelRecord {
    pub title1: String,
    pub title2: String,
    pub barcode: String,
}

/// Geometry and font constants for the label sheet.
///
/// Passed explicitly into the assembler so the layout math can be tested in
/// isolation.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub page_width: f64,
    pub page_height: f64,
    pub label_width: f64,
    pub label_height: f64,
    pub margin_left: f64,
    pub margin_bottom: f64,
    /// Vertical distance between the bottom edges of consecutive labels.
    pub label_pitch: f64,
    /// Distance from the page top to the first label's bottom edge.
    pub label_top_offset: f64,
    pub labels_per_page: usize,
    pub title1_size: f64,
    pub title2_size: f64,
    pub caption_size: f64,
    /// Estimated glyph width per character, as a fraction of the font size.
    pub char_width_regular: f64,
    pub char_width_bold: f64,
    /// Drawn bar height, overriding the encoder's unscaled height.
    pub barcode_height: f64,
    pub barcode_scale: f64,
    /// Empirical horizontal correction applied to the centered barcode.
    pub barcode_center_nudge: f64,
    pub font_regular: StandardFont,
    pub font_bold: StandardFont,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            label_width: 300.0,
            label_height: 160.0,
            margin_left: 76.0,
            margin_bottom: 4.0,
            label_pitch: 198.0,
            label_top_offset: 180.0,
            labels_per_page: 4,
            title1_size: 20.0,
            title2_size: 16.0,
            caption_size: 14.0,
            char_width_regular: 0.5,
            char_width_bold: 0.6,
            barcode_height: 50.0,
            barcode_scale: 0.5,
            barcode_center_nudge: -50.0,
            font_regular: StandardFont::Helvetica,
            font_bold: StandardFont::HelveticaBold,
        }
    }
}

/// Parsed settings.json. Every field is optional; absent values fall back to
/// the built-in layout.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub layout: LayoutSection,
    #[serde(default)]
    pub settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct LayoutSection {
    pub label_width: Option<Dimension>,
    pub label_height: Option<Dimension>,
    pub margin_left: Option<Dimension>,
    pub margin_bottom: Option<Dimension>,
    pub label_pitch: Option<Dimension>,
    pub title1_size: Option<Dimension>,
    pub title2_size: Option<Dimension>,
    pub caption_size: Option<Dimension>,
    pub barcode_height: Option<Dimension>,
    pub char_width_regular: Option<f64>,
    pub char_width_bold: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsSection {
    #[serde(default)]
    pub font: Option<String>,
}

impl SettingsFile {
    /// Apply the overrides on top of the default layout.
    pub fn resolve(&self) -> Result<LayoutConfig> {
        let mut cfg = LayoutConfig::default();
        let layout = &self.layout;

        if let Some(d) = layout.label_width {
            cfg.label_width = d.as_points();
        }
        if let Some(d) = layout.label_height {
            cfg.label_height = d.as_points();
        }
        if let Some(d) = layout.margin_left {
            cfg.margin_left = d.as_points();
        }
        if let Some(d) = layout.margin_bottom {
            cfg.margin_bottom = d.as_points();
        }
        if let Some(d) = layout.label_pitch {
            cfg.label_pitch = d.as_points();
        }
        if let Some(d) = layout.title1_size {
            cfg.title1_size = d.as_points();
        }
        if let Some(d) = layout.title2_size {
            cfg.title2_size = d.as_points();
        }
        if let Some(d) = layout.caption_size {
            cfg.caption_size = d.as_points();
        }
        if let Some(d) = layout.barcode_height {
            cfg.barcode_height = d.as_points();
        }
        if let Some(w) = layout.char_width_regular {
            cfg.char_width_regular = w;
        }
        if let Some(w) = layout.char_width_bold {
            cfg.char_width_bold = w;
        }

        if let Some(name) = &self.settings.font {
            let font = StandardFont::from_name(name).ok_or_else(|| {
                anyhow!("unknown font '{}'. Supported: standard Type1 faces", name)
            })?;
            cfg.font_regular = font;
            cfg.font_bold = font.bold_variant();
        }

        Ok(cfg)
    }
}

/// Helper function to open a file with consistent error context
fn open_file_with_context(path: &Path, description: &str) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open {} at {:?}", description, path))
}

pub fn load_settings_config(path: &Path) -> Result<SettingsFile> {
    let file = open_file_with_context(path, "settings.json")?;
    let reader = BufReader::new(file);
    let settings: SettingsFile =
        serde_json::from_reader(reader).with_context(|| "Failed to parse settings.json")?;
    Ok(settings)
}

pub fn load_csv_data(path: &Path) -> Result<Vec<LabelRecord>> {
    let file = open_file_with_context(path, "data.csv")?;
    let mut rdr = ReaderBuilder::new().from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: LabelRecord = result.with_context(|| "Failed to parse data.csv")?;
        rows.push(record);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dimension_from_number() {
        let json = json!(100);
        let dim: Dimension = serde_json::from_value(json).unwrap();
        assert_eq!(dim.as_points(), 100.0);
    }

    #[test]
    fn test_dimension_from_f64() {
        let json = json!(12.5);
        let dim: Dimension = serde_json::from_value(json).unwrap();
        assert_eq!(dim.as_points(), 12.5);
    }

    #[test]
    fn test_dimension_from_mm() {
        let json = json!("100 mm");
        let dim: Dimension = serde_json::from_value(json).unwrap();
        // 100 mm = 100 * 72 / 25.4 points ≈ 283.46
        assert!((dim.as_points() - 283.46).abs() < 0.01);
    }

    #[test]
    fn test_dimension_from_cm() {
        let json = json!("10 cm");
        let dim: Dimension = serde_json::from_value(json).unwrap();
        assert!((dim.as_points() - 283.46).abs() < 0.01);
    }

    #[test]
    fn test_dimension_from_inch() {
        let json = json!("1 in");
        let dim: Dimension = serde_json::from_value(json).unwrap();
        assert_eq!(dim.as_points(), 72.0);
    }

    #[test]
    fn test_dimension_from_pt() {
        let json = json!("100 pt");
        let dim: Dimension = serde_json::from_value(json).unwrap();
        assert_eq!(dim.as_points(), 100.0);
    }

    #[test]
    fn test_dimension_without_unit_string() {
        let json = json!("24");
        let dim: Dimension = serde_json::from_value(json).unwrap();
        assert_eq!(dim.as_points(), 24.0);
    }

    #[test]
    fn test_dimension_whitespace_handling() {
        let json = json!("  100  mm  ");
        let dim: Dimension = serde_json::from_value(json).unwrap();
        assert!((dim.as_points() - 283.46).abs() < 0.01);
    }

    #[test]
    fn test_dimension_invalid_unit() {
        let json = json!("100 foo");
        let result: Result<Dimension, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_dimension_invalid_number() {
        let json = json!("abc mm");
        let result: Result<Dimension, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_layout_values() {
        let cfg = LayoutConfig::default();
        assert_eq!(cfg.page_width, 612.0);
        assert_eq!(cfg.page_height, 792.0);
        assert_eq!(cfg.label_width, 300.0);
        assert_eq!(cfg.label_height, 160.0);
        assert_eq!(cfg.margin_left, 76.0);
        assert_eq!(cfg.labels_per_page, 4);
        assert_eq!(cfg.barcode_center_nudge, -50.0);
    }

    #[test]
    fn test_empty_settings_resolve_to_defaults() {
        let settings: SettingsFile = serde_json::from_value(json!({})).unwrap();
        let cfg = settings.resolve().unwrap();
        assert_eq!(cfg.label_width, 300.0);
        assert_eq!(cfg.font_regular, StandardFont::Helvetica);
        assert_eq!(cfg.font_bold, StandardFont::HelveticaBold);
    }

    #[test]
    fn test_settings_layout_overrides() {
        let settings: SettingsFile = serde_json::from_value(json!({
            "layout": {
                "label_width": "4 in",
                "title1_size": 24,
                "char_width_bold": 0.65
            }
        }))
        .unwrap();
        let cfg = settings.resolve().unwrap();
        assert_eq!(cfg.label_width, 288.0);
        assert_eq!(cfg.title1_size, 24.0);
        assert_eq!(cfg.char_width_bold, 0.65);
        // Untouched fields keep their defaults.
        assert_eq!(cfg.label_height, 160.0);
    }

    #[test]
    fn test_settings_font_selection() {
        let settings: SettingsFile = serde_json::from_value(json!({
            "settings": { "font": "times-roman" }
        }))
        .unwrap();
        let cfg = settings.resolve().unwrap();
        assert_eq!(cfg.font_regular, StandardFont::TimesRoman);
        assert_eq!(cfg.font_bold, StandardFont::TimesBold);
    }

    #[test]
    fn test_settings_unknown_font() {
        let settings: SettingsFile = serde_json::from_value(json!({
            "settings": { "font": "wingdings" }
        }))
        .unwrap();
        assert!(settings.resolve().is_err());
    }

    #[test]
    fn test_csv_rows_map_in_order() {
        let data = "title1,title2,barcode\nAlpha,First,A1\nBeta,Second,B2\n";
        let mut rdr = ReaderBuilder::new().from_reader(data.as_bytes());
        let rows: Vec<LabelRecord> = rdr
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title1, "Alpha");
        assert_eq!(rows[0].barcode, "A1");
        assert_eq!(rows[1].title2, "Second");
    }
}
