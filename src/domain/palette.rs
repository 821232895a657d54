//! Series colours, assigned by selection index.

pub const SERIES_COLORS: [&str; 5] = ["#00AAFF", "#00FF99", "#9b87f5", "#ff4d4f", "#faad14"];

/// Colour for the series at `index`, cycling once the palette runs out.
pub fn series_color(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// One colour per selected symbol, in selection order.
pub fn colors_for(symbols: &[String]) -> Vec<&'static str> {
    (0..symbols.len()).map(series_color).collect()
}
