// Keytidy Behavior Tables
// Static arity, tag, and display-label tables for ZMK binding behaviors

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Number of parameter tokens a behavior consumes after its own `&name` token.
///
/// Behaviors not in the table default to arity 1, which matches the common
/// single-parameter shape (`&kp A`, `&mo 1`).
pub fn behavior_arity(name: &str) -> usize {
    static ARITY: OnceLock<HashMap<&'static str, usize>> = OnceLock::new();
    let table = ARITY.get_or_init(|| {
        HashMap::from([
            ("kp", 1),
            ("homey_left", 2),
            ("homey_right", 2),
            ("longer_hold", 2),
            ("mt", 2),
            ("thumb", 2),
            ("lspace", 2),
            ("rspace", 2),
            ("to", 1),
            ("mo", 1),
        ])
    });
    table.get(name).copied().unwrap_or(1)
}

/// Curated behavior-to-tag table for the plain-named layer blocks.
///
/// Overlaps with the generic-policy exclusion set below are not reconciled;
/// the two policies apply to disjoint block categories. Check both tables
/// before extending the plain layer-name list in the scanner.
pub fn curated_tag(name: &str) -> Option<&'static str> {
    static TAGS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    let table = TAGS.get_or_init(|| {
        HashMap::from([
            ("homey_left", "HRM"),
            ("homey_right", "HRM"),
            ("longer_hold", "LH"),
            ("mt", "MT"),
            ("thumb", "TH"),
            ("lspace", "LSP"),
            ("rspace", "RSP"),
        ])
    });
    table.get(name).copied()
}

/// Purely-typing behaviors that carry no annotation value of their own.
fn is_typing_behavior(name: &str) -> bool {
    static TYPING: OnceLock<HashSet<&'static str>> = OnceLock::new();
    let set = TYPING
        .get_or_init(|| HashSet::from(["kp", "macro_tap", "macro_press", "macro_release"]));
    set.contains(name)
}

/// Display label for raw behavior references and modifier names that
/// keymap-drawer leaves as-is in the diagram document.
pub fn display_label(token: &str) -> Option<&'static str> {
    static LABELS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    let table = LABELS.get_or_init(|| {
        HashMap::from([
            ("&alttab", "AltTab"),
            ("&lgui_and_type", "GuiType"),
            ("&select_line", "SelLn"),
            ("&select_line_right", "SelLn→"),
            ("&select_line_left", "←SelLn"),
            ("&select_word", "SelWrd"),
            ("&select_word_right", "SelW→"),
            ("&select_word_left", "←SelW"),
            ("&winleft", "Win←"),
            ("&winright", "Win→"),
            ("&winup", "Win↑"),
            ("&windown", "Win↓"),
            ("&winbar", "WinBar"),
            ("&bootloader", "Boot"),
            // Modifier normalization
            ("LGUI", "Gui"),
            ("RGUI", "Gui"),
            ("LCTRL", "Ctl"),
            ("RCTRL", "Ctl"),
            ("LEFT ALT", "Alt"),
            ("RIGHT ALT", "AltGr"),
            ("LALT", "Alt"),
            ("RALT", "AltGr"),
            ("LEFT SHIFT", "Sft"),
            ("RIGHT SHIFT", "Sft"),
            ("LSHIFT", "Sft"),
            ("RSHIFT", "Sft"),
            ("RSHFT", "Sft"),
        ])
    });
    table.get(token).copied()
}

/// How a layer block's bindings are turned into tags.
///
/// Plain-named blocks (`number`, `symbol`, ...) use the curated table;
/// `*_layer` blocks tag every non-typing behavior with its own name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPolicy {
    /// Only behaviors in the curated table contribute a tag.
    Curated,
    /// Every behavior contributes its own name, minus typing behaviors.
    Generic,
}

impl TagPolicy {
    /// Tag contributed by `behavior` under this policy, if any.
    pub fn tag_for(&self, behavior: &str) -> Option<String> {
        match self {
            TagPolicy::Curated => curated_tag(behavior).map(str::to_string),
            TagPolicy::Generic => {
                if is_typing_behavior(behavior) {
                    None
                } else {
                    Some(behavior.to_string())
                }
            }
        }
    }
}
