/// Format a value that is already a percentage (0-100)
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Number of cells a `percent` share of `width` occupies, rounded to nearest
pub fn cells_for(percent: f64, width: usize) -> usize {
    let cells = (percent / 100.0 * width as f64).round();
    (cells.max(0.0) as usize).min(width)
}

/// A horizontal bar of `percent` share, padded with spaces to `width`
pub fn bar(percent: f64, width: usize, fill: char) -> String {
    let filled = cells_for(percent, width);
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat_n(fill, filled));
    out.extend(std::iter::repeat_n(' ', width - filled));
    out
}

/// Pad or truncate `text` to exactly `width` characters
pub fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}
