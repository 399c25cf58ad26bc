//! CLI-specific transforms
//!
//! Each transform parses the Discord source and prints one view of the resulting
//! formatting tree:
//!
//! - `treeviz`: Tree visualization with Unicode icons
//! - `json`: The tree as JSON
//! - `plain`: Visible text with all markup removed
//!
//! With `--normalize` the tree is flattened first (nested containers spliced, adjacent
//! text merged), which is usually easier to read.

use telecord_markup::formats::treeviz::to_treeviz_str;
use telecord_markup::transforms::{normalize, plain_text};
use telecord_markup::DiscordParser;

/// All available CLI transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["treeviz", "json", "plain"];

/// Execute a named transform on a Discord message
///
/// # Examples
///
/// ```ignore
/// let output = execute_transform("**hi**", "treeviz", false)?;
/// ```
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    normalized: bool,
) -> Result<String, String> {
    let tree = DiscordParser::new()
        .parse(source)
        .map_err(|e| format!("Transform failed: {e}"))?;
    let tree = if normalized { normalize(&tree) } else { tree };

    match transform_name {
        "treeviz" => Ok(to_treeviz_str(&tree)),
        "json" => serde_json::to_string_pretty(&tree)
            .map(|json| json + "\n")
            .map_err(|e| format!("JSON serialization failed: {e}")),
        "plain" => Ok(plain_text(&tree) + "\n"),
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}
