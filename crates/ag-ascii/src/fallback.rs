/// Motif binaire de l'en-tête. Le pied de page le reprend en ordre inverse.
pub const PATTERN: [&str; 5] = [
    "01001010101010101",
    "10101010101010101",
    "01010101010101010",
    "10101010101010101",
    "01010101010101010",
];

/// Séparateur encadrant le label.
pub const DIVIDER: &str = "--------------------";

const LABEL_INDENT: &str = "    ";

/// Placeholder block used when the source image cannot be rasterized.
///
/// Pure: no I/O, no randomness, never fails. The artifact opens with an empty
/// line, then the header pattern, the upper-cased label between two dividers,
/// and the header mirrored row-wise as footer. Every line ends with `'\n'`.
///
/// # Example
/// ```
/// use ag_ascii::fallback::render_fallback;
/// let block = render_fallback("no signal");
/// assert!(block.contains("\n    NO SIGNAL\n"));
/// assert_eq!(block, render_fallback("no signal"));
/// ```
#[must_use]
pub fn render_fallback(label: &str) -> String {
    let mut out = String::from("\n");
    for row in PATTERN {
        out.push_str(row);
        out.push('\n');
    }
    out.push_str(DIVIDER);
    out.push('\n');
    out.push_str(LABEL_INDENT);
    out.push_str(&label.to_uppercase());
    out.push('\n');
    out.push_str(DIVIDER);
    out.push('\n');
    for row in PATTERN.iter().rev() {
        out.push_str(row);
        out.push('\n');
    }
    out
}
