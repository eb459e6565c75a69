//! Flattener - nested mappings to dotted parameter keys

use std::collections::BTreeMap;
use serde_yaml::{Mapping, Value};
use crate::value::{render_key, render_leaf};

/// Default separator placed between path segments
pub const DEFAULT_SEPARATOR: &str = ".";

/// Flat parameter set: dotted key -> stored text
pub type Parameters = BTreeMap<String, String>;

/// Flatten a nested mapping into dotted keys using the default separator.
pub fn flatten(mapping: &Mapping) -> Parameters {
    flatten_with(mapping, DEFAULT_SEPARATOR)
}

/// Flatten a nested mapping, joining path segments with `separator`.
///
/// Keys are visited depth-first in insertion order. When two paths
/// collide (e.g. a literal `a.b` key next to `a: {b: ..}`), the one
/// visited last wins.
pub fn flatten_with(mapping: &Mapping, separator: &str) -> Parameters {
    let mut out = Parameters::new();
    flatten_into(&mut out, "", mapping, separator);
    out
}

fn flatten_into(out: &mut Parameters, prefix: &str, mapping: &Mapping, separator: &str) {
    for (key, value) in mapping {
        let segment = render_key(key);
        let path = if prefix.is_empty() {
            segment
        } else {
            format!("{}{}{}", prefix, separator, segment)
        };

        match value {
            Value::Mapping(child) => flatten_into(out, &path, child, separator),
            leaf => {
                out.insert(path, render_leaf(leaf));
            }
        }
    }
}
