//! Reader for the shaping engine's glyph listing
//!
//! ```text
//! <header line, ignored>
//! gid x_offset y_offset x_advance y_advance cluster
//! ...
//! ```

use glyphrun_core::{error::ShapingError, types::GlyphInfo};

const FIELDS: usize = 6;

/// Parse the engine's stdout into glyphs
///
/// The first line is a header and is skipped. Every following line must hold
/// exactly six integers; anything else fails the whole run.
pub fn parse_output(stdout: &str) -> Result<Vec<GlyphInfo>, ShapingError> {
    stdout
        .lines()
        .enumerate()
        .skip(1)
        .map(|(idx, line)| parse_line(idx + 1, line))
        .collect()
}

fn parse_line(line_no: usize, line: &str) -> Result<GlyphInfo, ShapingError> {
    let malformed = |reason: String| ShapingError::MalformedOutput {
        line: line_no,
        content: line.to_string(),
        reason,
    };

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != FIELDS {
        return Err(malformed(format!(
            "expected {} fields, found {}",
            FIELDS,
            tokens.len()
        )));
    }

    let mut values = [0i64; FIELDS];
    for (slot, token) in values.iter_mut().zip(&tokens) {
        *slot = token
            .parse::<i64>()
            .map_err(|_| malformed(format!("{:?} is not an integer", token)))?;
    }

    let unsigned = |value: i64, what: &str| {
        u32::try_from(value).map_err(|_| malformed(format!("{} {} out of range", what, value)))
    };
    let signed = |value: i64, what: &str| {
        i32::try_from(value).map_err(|_| malformed(format!("{} {} out of range", what, value)))
    };

    Ok(GlyphInfo {
        id: unsigned(values[0], "glyph id")?,
        x_offset: signed(values[1], "x offset")?,
        y_offset: signed(values[2], "y offset")?,
        x_advance: signed(values[3], "x advance")?,
        y_advance: signed(values[4], "y advance")?,
        cluster: unsigned(values[5], "cluster")?,
    })
}
