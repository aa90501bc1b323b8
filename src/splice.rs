use crate::error::{Error, Result};
use crate::model::Menu;
use crate::render;

pub const BEGIN_MARKER: &str = "// CHANNELS BEGIN";
pub const END_MARKER: &str = "// CHANNELS END";

pub fn splice(host: &str, menu: &Menu) -> Result<String> {
    splice_block(host, &render::render_menu(menu))
}

/// Replace the lines strictly between the begin- and end-marker lines with
/// `block`. Everything up to and including the begin line, and everything
/// from the start of the end line (its indentation included), is kept as is.
pub fn splice_block(host: &str, block: &str) -> Result<String> {
    let begin = host
        .find(BEGIN_MARKER)
        .ok_or(Error::MissingMarker(BEGIN_MARKER))?;
    let end = host
        .find(END_MARKER)
        .ok_or(Error::MissingMarker(END_MARKER))?;

    let after_begin = begin + BEGIN_MARKER.len();
    let region_start = host[after_begin..]
        .find('\n')
        .map(|i| after_begin + i + 1)
        .ok_or(Error::MarkersOutOfOrder)?;
    let region_end = line_start(host, end);
    if region_end < region_start {
        return Err(Error::MarkersOutOfOrder);
    }

    let mut out = String::with_capacity(host.len() - (region_end - region_start) + block.len());
    out.push_str(&host[..region_start]);
    out.push_str(block);
    out.push_str(&host[region_end..]);
    Ok(out)
}

fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map_or(0, |i| i + 1)
}
