// Keytidy Core Library
// Text transforms for ZMK keymap sources and keymap-drawer diagrams

pub mod behavior;
pub mod diagram;
pub mod format;
pub mod scan;

pub use behavior::{behavior_arity, curated_tag, display_label, TagPolicy};
pub use diagram::{remap_value, Diagram, DiagramError, KEYMAP_SOURCE};
pub use format::{format_file, format_lines, FormatError, FormatOutcome};
pub use scan::{scan_layer_tags, scan_layer_tags_file, LayerTags, PositionTags};
