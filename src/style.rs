//! Inline `style="..."` declaration parsing.
//!
//! Every node's formatting comes from its own declaration only; nothing is
//! cascaded from ancestors, so this is a pure `(&str) -> StyleMap` function.

use std::collections::BTreeMap;

/// Lower-cased property name → trimmed raw value.
pub type StyleMap = BTreeMap<String, String>;

/// Parse `key1: val1; key2: val2; ...` into a [`StyleMap`].
///
/// Segments without a `:` are dropped; a later duplicate key overwrites an
/// earlier one. Never fails.
pub fn parse_style(style: &str) -> StyleMap {
    let mut out = StyleMap::new();
    for item in style.split(';') {
        let Some((key, val)) = item.split_once(':') else {
            continue;
        };
        out.insert(key.trim().to_lowercase(), val.trim().to_string());
    }
    out
}

/// Parse the `style` attribute of an optional value, empty when absent.
pub fn parse_style_attr(style: Option<&str>) -> StyleMap {
    style.map(parse_style).unwrap_or_default()
}
