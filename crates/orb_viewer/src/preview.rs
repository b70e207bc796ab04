//! ASCII preview of a rendered frame for terminals.

use orb_renderer::Framebuffer;

/// Characters from darkest to brightest.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Downsample `frame` to at most `columns` characters per line.
///
/// Terminal cells are about twice as tall as they are wide, so every output
/// row covers twice as many pixels vertically as a column does horizontally.
pub fn ascii_preview(frame: &Framebuffer, columns: u32) -> String {
    let columns = columns.clamp(1, frame.width());
    let step_x = frame.width() / columns;
    let step_y = (step_x * 2).max(1);
    let rows = frame.height() / step_y;

    let mut out = String::with_capacity(((columns + 1) * rows) as usize);
    for row in 0..rows {
        for column in 0..columns {
            let luminance = frame
                .get(column * step_x, row * step_y)
                .map_or(0.0, |color| color.luminance());
            let level = (luminance * (RAMP.len() - 1) as f64).round() as usize;
            out.push(RAMP[level.min(RAMP.len() - 1)] as char);
        }
        out.push('\n');
    }
    out
}
