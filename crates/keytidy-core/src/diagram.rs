// Keytidy Diagram Document
// keymap-drawer YAML post-processing: label remap and behavior tags

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::behavior::display_label;
use crate::scan::LayerTags;

/// Keymap source the annotator scans for behavior tags. A fixed
/// collaborator resolved against the working directory, not a parameter.
pub const KEYMAP_SOURCE: &str = "config/corne.keymap";

/// Separator between a key label and its appended tags.
const TAG_SEPARATOR: char = '·';

/// Errors that can occur while loading or saving a diagram document
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("not a keymap-drawer document: expected a top-level 'layers' mapping")]
    MissingLayers,
}

/// A keymap-drawer diagram document.
///
/// Held as an untyped YAML tree so fields this tool does not know about
/// round-trip verbatim, in their original order.
#[derive(Debug, Clone)]
pub struct Diagram {
    root: Value,
}

impl Diagram {
    /// Parse a diagram document from YAML text. The root must be a
    /// mapping whose `layers` value is a mapping of layer name to
    /// key-entry list.
    pub fn from_yaml(text: &str) -> Result<Self, DiagramError> {
        let root: Value = serde_yaml::from_str(text)?;
        if !matches!(root.get("layers"), Some(Value::Mapping(_))) {
            return Err(DiagramError::MissingLayers);
        }
        Ok(Self { root })
    }

    /// Load a diagram document from a YAML file.
    pub fn from_yaml_path<P: AsRef<Path>>(path: P) -> Result<Self, DiagramError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Rewrite raw behavior references and modifier names in every layer's
    /// entry list to their display labels. The rest of the document is
    /// untouched.
    pub fn remap_labels(&mut self) {
        let Some(Value::Mapping(layers)) = self.root.get_mut("layers") else {
            return;
        };
        for (_, entries) in layers.iter_mut() {
            let taken = std::mem::replace(entries, Value::Null);
            *entries = remap_value(taken);
        }
    }

    /// Merge scanned behavior tags into the matching key entries.
    ///
    /// For each tagged position within range, the hold label (`h`) is
    /// annotated if it is a non-empty string, otherwise the tap label
    /// (`t`). Tags already present as a substring are skipped, so
    /// re-annotating an annotated document is a no-op.
    pub fn apply_tags(&mut self, tags: &LayerTags) {
        let Some(Value::Mapping(layers)) = self.root.get_mut("layers") else {
            return;
        };
        for (name, entries) in layers.iter_mut() {
            let Some(name) = name.as_str() else {
                continue;
            };
            let Some(positions) = tags.get(name) else {
                continue;
            };
            let Value::Sequence(entries) = entries else {
                continue;
            };
            for (&index, tag_set) in positions {
                if let Some(entry) = entries.get_mut(index) {
                    annotate_entry(entry, tag_set);
                }
            }
        }
    }

    /// Serialize the document, preserving mapping order.
    pub fn to_yaml_string(&self) -> Result<String, DiagramError> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// Write the document back to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DiagramError> {
        let text = self.to_yaml_string()?;
        fs::write(path, text)?;
        Ok(())
    }
}

/// Replace every string leaf that has a display label, recursing through
/// mappings and sequences at any depth. Structure, key order, and
/// non-string leaves pass through unchanged.
pub fn remap_value(value: Value) -> Value {
    match value {
        Value::String(s) => match display_label(&s) {
            Some(label) => Value::String(label.to_string()),
            None => Value::String(s),
        },
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(key, value)| (key, remap_value(value)))
                .collect(),
        ),
        Value::Sequence(sequence) => {
            Value::Sequence(sequence.into_iter().map(remap_value).collect())
        }
        other => other,
    }
}

/// Append tags to the entry's hold label, falling back to the tap label.
fn annotate_entry(entry: &mut Value, tag_set: &BTreeSet<String>) {
    let Value::Mapping(record) = entry else {
        return;
    };
    // Prefer tagging holds; fall back to tap
    for field in ["h", "t"] {
        if let Some(Value::String(label)) = record.get_mut(field) {
            if !label.is_empty() {
                append_tags(label, tag_set);
                return;
            }
        }
    }
}

fn append_tags(label: &mut String, tag_set: &BTreeSet<String>) {
    // BTreeSet iteration gives lexicographic tag order
    for tag in tag_set {
        if !label.contains(tag.as_str()) {
            label.push(TAG_SEPARATOR);
            label.push_str(tag);
        }
    }
}
