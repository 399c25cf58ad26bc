//! JSON dump of the formatting tree
//!
//! Serializes the tree with `serde_json` using serde's default externally tagged enum
//! layout, e.g. `{"Style":["Bold",{"Text":"x"}]}`.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Node;

/// Format implementation for the JSON tree dump
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Formatting tree as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, tree: &Node) -> Result<String, FormatError> {
        serde_json::to_string_pretty(tree)
            .map_err(|e| FormatError::SerializationError(format!("JSON encoding failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::{MentionTarget, Style};

    #[test]
    fn test_externally_tagged_layout() {
        let tree = Node::Container(vec![
            Node::styled(Style::Bold, Node::text("x")),
            Node::Mention(MentionTarget::Here),
        ]);
        let json: serde_json::Value =
            serde_json::from_str(&JsonFormat.serialize(&tree).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Container": [
                {"Style": ["Bold", {"Text": "x"}]},
                {"Mention": "Here"}
            ]})
        );
    }
}
