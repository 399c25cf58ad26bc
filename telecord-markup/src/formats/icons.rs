//! Shared icon mapping for tree visualization
//!
//! Kept separate from the treeviz formatter so that other inspection outputs can reuse
//! the same glyphs.

/// Get the Unicode icon for a node kind, as returned by [`crate::ir::nodes::Node::kind`]
/// or [`crate::ir::nodes::Style::name`].
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Message" => "⧉",
        "Container" => "☰",
        "Text" => "◦",
        "Newline" => "↵",
        "Bold" => "𝐁",
        "Italic" => "𝐼",
        "Underline" => "_",
        "Strikethrough" => "~",
        "Mono" | "InlineCode" => "ƒ",
        "MultiMono" | "Code" => "𝒱",
        "BlockQuote" => "\"",
        "Spoiler" => "▒",
        "Link" => "⊕",
        "Mention" => "@",
        "Channel" => "#",
        "Role" => "&",
        "CustomEmoji" => "☺",
        _ => "○",
    }
}
