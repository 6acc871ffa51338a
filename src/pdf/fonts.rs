//! Standard PDF Type1 font faces.
//!
//! Labels use two faces from the built-in Latin set: a regular face for the
//! second title and the barcode caption, and its bold companion for the
//! first title. Nothing is embedded; pages reference the faces by their
//! BaseFont names.

/// Content-stream resource name of the regular face.
pub const RES_REGULAR: &str = "F1";

/// Content-stream resource name of the bold face.
pub const RES_BOLD: &str = "F2";

/// Standard PDF Type1 fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl StandardFont {
    /// Get the PDF BaseFont name for this font
    pub fn base_font_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::TimesBoldItalic => "Times-BoldItalic",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// Parse a font name into a StandardFont
    pub fn from_name(name: &str) -> Option<StandardFont> {
        let name_lower = name.to_lowercase();
        match name_lower.as_str() {
            "helvetica" => Some(StandardFont::Helvetica),
            "helvetica-bold" => Some(StandardFont::HelveticaBold),
            "helvetica-oblique" => Some(StandardFont::HelveticaOblique),
            "helvetica-boldoblique" => Some(StandardFont::HelveticaBoldOblique),
            "times" | "times-roman" => Some(StandardFont::TimesRoman),
            "times-bold" => Some(StandardFont::TimesBold),
            "times-italic" => Some(StandardFont::TimesItalic),
            "times-bolditalic" => Some(StandardFont::TimesBoldItalic),
            "courier" => Some(StandardFont::Courier),
            "courier-bold" => Some(StandardFont::CourierBold),
            "courier-oblique" => Some(StandardFont::CourierOblique),
            "courier-boldoblique" => Some(StandardFont::CourierBoldOblique),
            _ => None,
        }
    }

    /// The bold companion of this face; bold faces map to themselves.
    pub fn bold_variant(&self) -> StandardFont {
        match self {
            StandardFont::Helvetica | StandardFont::HelveticaBold => StandardFont::HelveticaBold,
            StandardFont::HelveticaOblique | StandardFont::HelveticaBoldOblique => {
                StandardFont::HelveticaBoldOblique
            }
            StandardFont::TimesRoman | StandardFont::TimesBold => StandardFont::TimesBold,
            StandardFont::TimesItalic | StandardFont::TimesBoldItalic => {
                StandardFont::TimesBoldItalic
            }
            StandardFont::Courier | StandardFont::CourierBold => StandardFont::CourierBold,
            StandardFont::CourierOblique | StandardFont::CourierBoldOblique => {
                StandardFont::CourierBoldOblique
            }
        }
    }
}
