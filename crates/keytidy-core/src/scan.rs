// Keytidy Binding Scanner
// Extracts per-position behavior tags from ZMK keymap layer blocks

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::behavior::{behavior_arity, TagPolicy};

/// Tag sets keyed by zero-based binding position within one layer.
pub type PositionTags = BTreeMap<usize, BTreeSet<String>>;

/// Per-layer position tags, in the order layers were discovered.
/// Layers without any tagged position are absent.
pub type LayerTags = IndexMap<String, PositionTags>;

/// Plain-named layer blocks, scanned with the curated tag table.
const PLAIN_LAYERS: &[&str] = &["symbol", "number", "navigation", "window", "bootloader"];

/// Suffix identifying generic layer blocks (`default_layer` -> `default`).
const LAYER_SUFFIX: &str = "_layer";

fn block_open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*([A-Za-z_]\w*)\s*\{").expect("valid regex"))
}

fn bindings_re() -> &'static Regex {
    // `sensor-bindings` must not count as a bindings declaration
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)(?:^|[^\w-])bindings\s*=\s*<(.*?)>\s*;").expect("valid regex")
    })
}

/// Scan a keymap source file. A missing or unreadable file is not an
/// error; it simply contributes no tags.
pub fn scan_layer_tags_file<P: AsRef<Path>>(path: P) -> LayerTags {
    let path = path.as_ref();
    match fs::read(path) {
        Ok(bytes) => scan_layer_tags(&String::from_utf8_lossy(&bytes)),
        Err(err) => {
            log::debug!("keymap source {} not readable: {}", path.display(), err);
            LayerTags::new()
        }
    }
}

/// Scan keymap source text for layer blocks and return the tags each
/// binding position carries.
///
/// Plain-named blocks are scanned with [`TagPolicy::Curated`], then
/// `*_layer` blocks with [`TagPolicy::Generic`]; when both yield tags for
/// the same logical layer name, the generic result replaces the curated
/// one.
pub fn scan_layer_tags(text: &str) -> LayerTags {
    let blocks = layer_blocks(text);
    let mut tags = LayerTags::new();

    for (name, body) in &blocks {
        if PLAIN_LAYERS.contains(&name.as_str()) {
            insert_block_tags(&mut tags, name, body, TagPolicy::Curated);
        }
    }

    for (name, body) in &blocks {
        if let Some(stem) = name.strip_suffix(LAYER_SUFFIX) {
            if !stem.is_empty() {
                insert_block_tags(&mut tags, stem, body, TagPolicy::Generic);
            }
        }
    }

    tags
}

/// All `name { ... }` blocks in the text, in document order, with the body
/// delimited by the brace that matches the opener. Unbalanced blocks are
/// dropped.
fn layer_blocks(text: &str) -> Vec<(String, &str)> {
    block_open_re()
        .captures_iter(text)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_string();
            let body = block_body(text, caps.get(0)?.end())?;
            Some((name, body))
        })
        .collect()
}

/// Body span starting just after an opening brace, up to its matching `}`.
fn block_body(text: &str, after_open: usize) -> Option<&str> {
    let mut depth = 1usize;
    for (offset, ch) in text[after_open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[after_open..after_open + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

fn insert_block_tags(tags: &mut LayerTags, layer: &str, body: &str, policy: TagPolicy) {
    let Some(caps) = bindings_re().captures(body) else {
        log::debug!("layer block '{layer}' has no bindings declaration");
        return;
    };
    let Some(content) = caps.get(1) else {
        return;
    };

    let positions = walk_bindings(content.as_str(), policy);
    if positions.is_empty() {
        return;
    }
    tags.insert(layer.to_string(), positions);
}

/// Walk the flat binding token stream left to right.
///
/// A `&behavior` token occupies the current positional index and consumes
/// its parameter tokens per the arity table; a stray parameter token
/// outside that consumption is skipped without advancing the index.
fn walk_bindings(content: &str, policy: TagPolicy) -> PositionTags {
    let tokens: Vec<&str> = content.split_whitespace().collect();
    let mut positions = PositionTags::new();
    let mut index = 0usize;
    let mut i = 0usize;

    while i < tokens.len() {
        match tokens[i].strip_prefix('&') {
            Some(behavior) => {
                if let Some(tag) = policy.tag_for(behavior) {
                    positions.entry(index).or_default().insert(tag);
                }
                i += 1 + behavior_arity(behavior);
                index += 1;
            }
            None => {
                i += 1;
            }
        }
    }

    positions
}
