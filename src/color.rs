use eframe::egui::Color32;

// ---------------------------------------------------------------------------
// Carrier color mapping
// ---------------------------------------------------------------------------

/// Fallback for carriers outside the fixed mapping.
pub const NEUTRAL: Color32 = Color32::from_rgb(0xF8, 0xF8, 0xF8);

/// RPK bars in the traffic chart.
pub const RPK_BAR: Color32 = Color32::from_rgb(0xB3, 0xB3, 0xB3);

/// ASK bars in the traffic chart.
pub const ASK_BAR: Color32 = Color32::from_rgb(0x66, 0x66, 0x66);

/// Load-factor line overlaid on the traffic chart.
pub const LOAD_FACTOR_LINE: Color32 = Color32::WHITE;

/// Fixed color for a carrier code.
///
/// The three main domestic carriers keep their brand colors so they stay
/// recognizable across every chart; everything else is neutral.
pub fn company_color(code: &str) -> Color32 {
    match code {
        "AZU" => Color32::from_rgb(0x53, 0xB2, 0xE5),
        "GLO" => Color32::from_rgb(0xEE, 0x79, 0x3A),
        "TAM" => Color32::from_rgb(0xD9, 0x35, 0x55),
        _ => NEUTRAL,
    }
}
