use ag_core::charset::CharacterRamp;
use ag_core::frame::LuminanceBuffer;
use rayon::prelude::*;

/// Render a luminance grid as text, one line per row.
///
/// Each sample selects its glyph through [`CharacterRamp::glyph_for`]
/// (bucket `floor(v / 256 * len)`, inverted index). Every row, the last one
/// included, ends with `'\n'`. No trimming.
///
/// Rows are built in parallel; the output is identical to a sequential pass.
///
/// # Example
/// ```
/// use ag_core::charset::CharacterRamp;
/// use ag_core::frame::LuminanceBuffer;
/// use ag_ascii::ramp::render;
///
/// let buf = LuminanceBuffer::from_raw(2, 1, vec![0, 255]).unwrap();
/// assert_eq!(render(&buf, &CharacterRamp::default()), " $\n");
/// ```
#[must_use]
pub fn render(buffer: &LuminanceBuffer, ramp: &CharacterRamp) -> String {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    if width == 0 {
        return "\n".repeat(height);
    }

    let rows: Vec<String> = buffer
        .data()
        .par_chunks_exact(width)
        .map(|row| {
            let mut line = String::with_capacity(width + 1);
            line.extend(row.iter().map(|&v| ramp.glyph_for(v)));
            line.push('\n');
            line
        })
        .collect();

    rows.concat()
}
