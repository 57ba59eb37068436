//! Styled text runs from a span's own declaration.

use crate::model::{Rgb, Run};
use crate::style::StyleMap;

fn style_contains(styles: &StyleMap, key: &str, needle: &str) -> bool {
    styles.get(key).is_some_and(|v| v.contains(needle))
}

/// Build a run for `text` using only `styles`. Empty text yields `None`.
///
/// Each attribute is decided independently; a malformed color drops that one
/// attribute and keeps the rest of the run.
pub fn build_run(text: &str, styles: &StyleMap) -> Option<Run> {
    if text.is_empty() {
        return None;
    }

    let mut run = Run::plain(text);
    run.bold = style_contains(styles, "font-weight", "700") || style_contains(styles, "font-weight", "bold");
    run.italic = style_contains(styles, "font-style", "italic");
    run.underline = style_contains(styles, "text-decoration", "underline");

    if let Some(color) = styles.get("color").filter(|c| c.starts_with('#')) {
        run.color = Rgb::from_hex(color);
        if run.color.is_none() {
            log::debug!("ignoring unparseable color {color:?}");
        }
    }

    if let Some(bg) = styles.get("background-color") {
        if bg != "transparent" && bg.starts_with('#') {
            if Rgb::from_hex(bg).is_some() {
                run.highlight = Some(bg.trim_start_matches('#').to_string());
            } else {
                log::debug!("ignoring unparseable background {bg:?}");
            }
        }
    }

    Some(run)
}
