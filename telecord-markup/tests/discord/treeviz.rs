//! Tree shape snapshots, to catch parser regressions that HTML output would hide.

use insta::assert_snapshot;
use telecord_markup::formats::treeviz::to_treeviz_str;
use telecord_markup::transforms::normalize;
use telecord_markup::DiscordParser;

fn treeviz(markdown: &str) -> String {
    let tree = DiscordParser::new().parse(markdown).unwrap();
    to_treeviz_str(&normalize(&tree))
}

#[test]
fn test_mixed_inline_nodes() {
    assert_snapshot!(treeviz("**a**<@5>||s||<https://x.io>"), @r"
⧉ Message (4 nodes)
├─ 𝐁 Bold
│ └─ ◦ a
├─ @ @5
├─ ▒ Spoiler
│ └─ ◦ s
└─ ⊕ https://x.io (no preview)
  └─ ◦ https://x.io
");
}

#[test]
fn test_quote_with_code_block() {
    assert_snapshot!(treeviz(">>> look\n```rust\nlet x = 1;\n```"), @r#"
⧉ Message (1 nodes)
└─ " BlockQuote
  └─ ☰ 2 items
    ├─ ◦ look↵
    └─ 𝒱 Code rust (1 lines)
"#);
}
