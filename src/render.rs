use std::fmt::Write as _;

use stocksage_config::RenderMode;
use stocksage_format::{format, FormattedMessage, SectionView};

/// Turn an assistant reply into terminal text.
///
/// In `Sections` mode each heading is printed on its own line with an
/// expand marker, its icon and a 1-based number usable with `/toggle`;
/// expanded bodies follow, indented.  Replies without headings are printed
/// verbatim.
pub fn render_reply(reply: &str, mode: RenderMode, view: &SectionView) -> String {
    if mode == RenderMode::Raw {
        return reply.to_string();
    }
    match format(reply) {
        FormattedMessage::Plain(text) => text,
        formatted => render_sections(&formatted, view),
    }
}

fn render_sections(formatted: &FormattedMessage, view: &SectionView) -> String {
    let mut out = String::new();
    if let Some(pre) = formatted.preamble() {
        let pre = pre.trim();
        if !pre.is_empty() {
            let _ = writeln!(out, "{pre}\n");
        }
    }
    for section in formatted.sections() {
        let expanded = view.is_expanded(section.index);
        let marker = if expanded { "▾" } else { "▸" };
        let _ = writeln!(
            out,
            "{marker} {} {}  [{}]",
            section.icon.glyph(),
            section.heading.trim(),
            section.index + 1
        );
        if !expanded {
            continue;
        }
        if let Some(body) = section.body {
            for line in body.trim_matches('\n').lines() {
                if line.trim().is_empty() {
                    out.push('\n');
                } else {
                    let _ = writeln!(out, "    {line}");
                }
            }
        }
    }
    out
}
