//! Contract Tests for Scrollback Rendering
//!
//! Entries must render as exactly one element each, with every piece of
//! user or service text escaped.

use webterm::output::{escape_html, EntryKind, ScrollbackEntry, WELCOME_BANNER};
use webterm::surface::{MemorySurface, TerminalSurface};

#[test]
fn test_welcome_markup() {
    let html = ScrollbackEntry::welcome().to_html();
    assert!(html.starts_with("<div class=\"welcome-message\"><pre class=\"welcome-ascii\">"));
    assert!(html.ends_with("</pre></div>"));
    assert!(html.contains("Type &#39;help&#39; to see available commands"));
    assert!(WELCOME_BANNER.contains("Type 'help'"));
}

#[test]
fn test_command_echo_markup() {
    let html = ScrollbackEntry::command_echo("grep \"a\" < in.txt").to_html();
    assert_eq!(
        html,
        "<div class=\"command-line\"><span class=\"command-prompt\">$</span>\
         <span class=\"command-text\">grep &quot;a&quot; &lt; in.txt</span></div>"
    );
}

#[test]
fn test_output_classes() {
    let cases = [
        ("Error: no such file", "command-output error-output"),
        ("\u{2705} Created", "command-output success-output"),
        ("\u{1F525} CPU 93%", "command-output info-output"),
        ("plain text", "command-output"),
    ];

    for (raw, class) in cases {
        let html = ScrollbackEntry::output(raw).to_html();
        let expected = format!("<div class=\"{}\">", class);
        assert!(html.starts_with(&expected), "{} rendered as {}", raw, html);
    }
}

#[test]
fn test_output_preserves_newlines() {
    let html = ScrollbackEntry::output("a.txt\nb.txt").to_html();
    assert_eq!(html, "<div class=\"command-output\">a.txt\nb.txt</div>");
}

#[test]
fn test_injected_markup_stays_text() {
    let payload = "<img src=x onerror=\"alert('pwned')\">";
    let mut surface = MemorySurface::new();
    surface.append(ScrollbackEntry::command_echo(payload));
    surface.append(ScrollbackEntry::output(payload));
    surface.append(ScrollbackEntry::transport_failure(payload));

    let html = surface.to_html();
    assert!(!html.contains("<img"));
    assert_eq!(html.matches(&escape_html(payload)).count(), 3);
    // One element per entry
    assert_eq!(html.matches("<div").count(), 4);
}

#[test]
fn test_raw_text_is_kept() {
    let entry = ScrollbackEntry::output("1 < 2 && 3 > 2");
    assert_eq!(entry.text, "1 < 2 && 3 > 2");
    assert_eq!(entry.escaped_text(), "1 &lt; 2 &amp;&amp; 3 &gt; 2");
    assert_eq!(entry.kind, EntryKind::OutputPlain);
}

#[test]
fn test_escaping_is_not_idempotent() {
    // Already-escaped text from the service is shown literally
    assert_eq!(escape_html("&lt;"), "&amp;lt;");
}
