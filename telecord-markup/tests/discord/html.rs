//! Discord markdown → HTML, end to end through the parser and the html5ever serializer.

use telecord_markup::formats::html::{serialize_to_html, HtmlOptions};
use telecord_markup::{DiscordParser, LiteralNames};

fn check(markdown: &str, html: &str) {
    let tree = DiscordParser::new().parse(markdown).unwrap();
    let actual = serialize_to_html(&tree, &HtmlOptions::default(), &LiteralNames).unwrap();
    assert_eq!(actual, html, "input: {markdown:?}");
}

#[test]
fn test_strong() {
    check(
        "This is a **test** with **some bold** text in it",
        "This is a <strong>test</strong> with <strong>some bold</strong> text in it",
    );
}

#[test]
fn test_underscore_em() {
    check(
        "This is a _test_ with _some italicized_ text in it",
        "This is a <em>test</em> with <em>some italicized</em> text in it",
    );
    check(
        "This is a _ test_ with _ italic _ text in it",
        "This is a <em> test</em> with <em> italic </em> text in it",
    );
}

#[test]
fn test_asterisk_em() {
    check(
        "This is a *test* with *some italicized* text in it",
        "This is a <em>test</em> with <em>some italicized</em> text in it",
    );
}

#[test]
fn test_underline() {
    check(
        "This is a __test__ with __some underlined__ text in it",
        "This is a <u>test</u> with <u>some underlined</u> text in it",
    );
}

#[test]
fn test_inline_code() {
    check("Code: `1 + 1 = 2`", "Code: <code>1 + 1 = 2</code>");
    check(
        "`Inline `code` with extra marker",
        "<code>Inline </code>code` with extra marker",
    );
    check(
        r#"``function test() { return "`" }``"#,
        r#"<code>function test() { return "`" }</code>"#,
    );
    check("`<@1234>`", "<code>&lt;@1234&gt;</code>");
}

#[test]
fn test_strike() {
    check("~~this~~that", "<del>this</del>that");
    check("~~ text ~~ stuffs", "<del> text </del> stuffs");
    check("~~a~~~", "<del>a</del>~");
    check("~~a~~_b_", "~~a~~<em>b</em>");
}

#[test]
fn test_links() {
    check(
        "https://brussell.me",
        "<a href=\"https://brussell.me\">https://brussell.me</a>",
    );
    check(
        "xhttps://brussell.me",
        "x<a href=\"https://brussell.me\">https://brussell.me</a>",
    );
    check(
        "[label](http://example.com)",
        "[label](<a href=\"http://example.com\">http://example.com</a>)",
    );
}

#[test]
fn test_autolinks() {
    check(
        "<https://brussell.me>",
        "<a href=\"https://brussell.me\">https://brussell.me</a>",
    );
    check(
        "<xhttps://brussell.me>",
        "<a href=\"xhttps://brussell.me\">xhttps://brussell.me</a>",
    );
}

#[test]
fn test_code_blocks() {
    check(
        "text\n```\ncode\nblock\n```\nmore text",
        "text\n<pre><code class=\"hljs\">code\nblock</code></pre>\nmore text",
    );
    check(
        "```js\nconst one = 1;\nconsole.log(one);\n```",
        "<pre><code class=\"hljs js\">const one = 1;\nconsole.log(one);</code></pre>",
    );
    check(
        "`test`\n\n```test```",
        "<code>test</code>\n\n<pre><code class=\"hljs\">test</code></pre>",
    );
    check(
        "```<b>haha</b>```",
        "<pre><code class=\"hljs\">&lt;b&gt;haha&lt;/b&gt;</code></pre>",
    );
}

#[test]
fn test_multiline() {
    check("multi\nline", "multi\nline");
    check(
        "some *awesome* text\nthat **spreads** lines",
        "some <em>awesome</em> text\nthat <strong>spreads</strong> lines",
    );
    check("some\n    text", "some\n    text");
    check("some\n\ntext", "some\n\ntext");
}

#[test]
fn test_block_quotes() {
    check("> text > here", "<blockquote>text &gt; here</blockquote>");
    check("> text\nhere", "<blockquote>text\n</blockquote>here");
    check(">text", "&gt;text");
    check(
        "outside\n>>> inside\ntext\n> here\ndoes not end",
        "outside\n<blockquote>inside\ntext\n&gt; here\ndoes not end</blockquote>",
    );
    check(
        ">>> test\n```js\ncode```",
        "<blockquote>test\n<pre><code class=\"hljs js\">code</code></pre></blockquote>",
    );
    check("> text\n> \n> here", "<blockquote>text\n\nhere</blockquote>");
}

#[test]
fn test_bold_in_quote() {
    check(
        "> **bold**\nend",
        "<blockquote><strong>bold</strong>\n</blockquote>end",
    );
    check(
        ">>> **bold**\nend",
        "<blockquote><strong>bold</strong>\nend</blockquote>",
    );
}

#[test]
fn test_kaomoji_keeps_its_arms() {
    check("¯\\_(ツ)_/¯", "¯\\_(ツ)_/¯");
    check(
        "¯\\_(ツ)_/¯ *test* ¯\\_(ツ)_/¯",
        "¯\\_(ツ)_/¯ <em>test</em> ¯\\_(ツ)_/¯",
    );
}

#[test]
fn test_html_is_escaped() {
    check("<b>test</b>", "&lt;b&gt;test&lt;/b&gt;");
}

#[test]
fn test_star_next_to_space() {
    check("*Hello World! *", "*Hello World! *");
}

#[test]
fn test_no_underscore_italic_inside_word() {
    check("test_ing_stuff", "test_ing_stuff");
}

#[test]
fn test_spoilers() {
    check("||spoiler||", "<span class=\"d-spoiler\">spoiler</span>");
    check("|| spoiler ||", "<span class=\"d-spoiler\"> spoiler </span>");
    check(
        "|| spoiler | message ||",
        "<span class=\"d-spoiler\"> spoiler | message </span>",
    );
    check(
        "a ||spoiler|| may have ||multiple\nlines||",
        "a <span class=\"d-spoiler\">spoiler</span> may have <span class=\"d-spoiler\">multiple\nlines</span>",
    );
    check(
        "||strange||markdown||",
        "<span class=\"d-spoiler\">strange</span>markdown||",
    );
    check(
        "||<i>itallics</i>||",
        "<span class=\"d-spoiler\">&lt;i&gt;itallics&lt;/i&gt;</span>",
    );
    check(
        "||```\ncode\nblock\n```||",
        "<span class=\"d-spoiler\"><pre><code class=\"hljs\">code\nblock</code></pre></span>",
    );
}

#[test]
fn test_spoiler_edge_cases() {
    check("||||", "||||");
    check("|| ||", "<span class=\"d-spoiler\"> </span>");
    check("||||||", "<span class=\"d-spoiler\">|</span>|");
}

#[test]
fn test_nested_ems_collapse() {
    check(
        "_hello world *foo bar* hello world_",
        "<em>hello world foo bar hello world</em>",
    );
    check(
        "_hello world *foo __blah__ bar* hello world_",
        "<em>hello world foo <u>blah</u> bar hello world</em>",
    );
    check(
        "_hello world __foo *blah* bar__ hello world_",
        "<em>hello world <u>foo blah bar</u> hello world</em>",
    );
    check(
        "_hello *world*_ not em *foo*",
        "<em>hello world</em> not em <em>foo</em>",
    );
}

#[test]
fn test_mentions() {
    check(
        "hey <@1234>!",
        "hey <span class=\"d-mention d-user\">@1234</span>!",
    );
    check(
        "hey @everyone!",
        "hey <span class=\"d-mention d-user\">@everyone</span>!",
    );
    check(
        "hey @here!",
        "hey <span class=\"d-mention d-user\">@here</span>!",
    );
    check(
        "goto <#1234>, please",
        "goto <span class=\"d-mention d-channel\">#1234</span>, please",
    );
    check(
        "is any of <@&1234> here?",
        "is any of <span class=\"d-mention d-role\">&amp;1234</span> here?",
    );
}

#[test]
fn test_custom_emojis() {
    check("heh <:blah:1234>", "heh <span class=\"d-emoji\">:blah:</span>");
    check("heh <a:blah:1234>", "heh <span class=\"d-emoji\">:blah:</span>");
}

#[test]
fn test_hard_breaks() {
    check("1\n \n2\n  \n3\n   \n4", "1\n \n2\n<br>3\n<br>4");
}

#[test]
fn test_weird_formatting() {
    check("*a*b*", "<em>a</em>b*");
    check("***aaa*b**", "<strong><em>aaa</em>b</strong>");
    check("***underlined bold***", "<em><strong>underlined bold</strong></em>");
    check(
        "***this *is* a test***",
        "<strong>*this <em>is</em> a test*</strong>",
    );
    check(
        "**_this _is_ a test_**",
        "<strong>_this <em>is</em> a test_</strong>",
    );
    check(
        "**_this_ is _a test_**",
        "<strong><em>this</em> is <em>a test</em></strong>",
    );
    check("*aa *bb cc*", "*aa <em>bb cc</em>");
    check("**aa **bb cc**", "<strong>aa </strong>bb cc**");
    check("*aa *bb cc", "*aa *bb cc");
}

#[test]
fn test_escape() {
    check("**bold \\**test**", "<strong>bold **test</strong>");
}
