//! Converter for the AsciiDoc subset found in definition documentation.
//!
//! Supported blocks: paragraphs, `[source]` / `[source,lang]` listings fenced
//! by `----`, literal blocks fenced by `....`, `NOTE:` / `TIP:` /
//! `IMPORTANT:` / `WARNING:` / `CAUTION:` admonitions, `*` and `-` bullet
//! lists and `==` headings. Inline, only backtick code spans are recognised;
//! everything else is escaped and passed through.

use askama::filters::{Escaper, Html};

const LISTING_FENCE: &str = "----";
const LITERAL_FENCE: &str = "....";
const ADMONITIONS: [&str; 5] = ["NOTE", "TIP", "IMPORTANT", "WARNING", "CAUTION"];

#[derive(Debug, PartialEq, Eq)]
enum Block<'a> {
    Heading(usize, &'a str),
    Paragraph(Vec<&'a str>),
    Listing {
        language: Option<&'a str>,
        body: Vec<&'a str>,
    },
    Literal(Vec<&'a str>),
    Admonition {
        kind: &'static str,
        lines: Vec<&'a str>,
    },
    List(Vec<Vec<&'a str>>),
}

/// Escape text with the same HTML escaper the page templates use.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a `String` cannot fail.
    let _ = Html.write_escaped_str(&mut out, text);
    out
}

/// Render documentation text as an HTML fragment.
#[must_use]
pub fn to_html(text: &str) -> String {
    let mut out = String::new();
    for block in parse(text) {
        render_block(&mut out, &block);
    }
    out
}

/// First paragraph only, rendered inline (for index listings).
#[must_use]
pub fn summary_html(text: &str) -> String {
    parse(text)
        .into_iter()
        .find_map(|block| match block {
            Block::Paragraph(lines) => Some(inline(&lines.join(" "))),
            _ => None,
        })
        .unwrap_or_default()
}

fn source_attribute(line: &str) -> Option<Option<&str>> {
    let attrs = line.strip_prefix("[source")?.strip_suffix(']')?;
    if attrs.is_empty() {
        return Some(None);
    }
    let language = attrs.strip_prefix(',')?.split(',').next()?.trim();
    Some((!language.is_empty()).then_some(language))
}

fn admonition(line: &str) -> Option<(&'static str, &str)> {
    ADMONITIONS.iter().find_map(|kind| {
        let rest = line.strip_prefix(kind)?.strip_prefix(':')?;
        Some((*kind, rest.trim_start()))
    })
}

fn bullet(line: &str) -> Option<&str> {
    line.strip_prefix("* ")
        .or_else(|| line.strip_prefix("- "))
        .map(str::trim_start)
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|c| *c == '=').count();
    if level < 2 {
        return None;
    }
    let title = line[level..].strip_prefix(' ')?.trim();
    (!title.is_empty()).then_some((level, title))
}

fn starts_block(line: &str) -> bool {
    line == LISTING_FENCE
        || line == LITERAL_FENCE
        || source_attribute(line).is_some()
        || admonition(line).is_some()
        || bullet(line).is_some()
        || heading(line).is_some()
}

fn parse(text: &str) -> Vec<Block<'_>> {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let mut blocks = Vec::new();
    let mut language: Option<Option<&str>> = None;
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];
        index += 1;
        if line.trim().is_empty() {
            continue;
        }

        if let Some(lang) = source_attribute(line) {
            language = Some(lang);
            continue;
        }

        if line == LISTING_FENCE || line == LITERAL_FENCE {
            let start = index;
            while index < lines.len() && lines[index] != line {
                index += 1;
            }
            let body = lines[start..index].to_vec();
            // skip the closing fence
            index += 1;
            if line == LISTING_FENCE {
                blocks.push(Block::Listing {
                    language: language.take().flatten(),
                    body,
                });
            } else {
                language = None;
                blocks.push(Block::Literal(body));
            }
            continue;
        }
        language = None;

        if let Some((level, title)) = heading(line) {
            blocks.push(Block::Heading(level, title));
            continue;
        }

        if let Some((kind, first)) = admonition(line) {
            let mut collected = vec![first];
            while index < lines.len() && !lines[index].trim().is_empty() && !starts_block(lines[index]) {
                collected.push(lines[index].trim());
                index += 1;
            }
            blocks.push(Block::Admonition {
                kind,
                lines: collected,
            });
            continue;
        }

        if let Some(first) = bullet(line) {
            let mut items = vec![vec![first]];
            while index < lines.len() && !lines[index].trim().is_empty() {
                let next = lines[index];
                if let Some(item) = bullet(next) {
                    items.push(vec![item]);
                } else if starts_block(next) {
                    break;
                } else if let Some(current) = items.last_mut() {
                    current.push(next.trim());
                }
                index += 1;
            }
            blocks.push(Block::List(items));
            continue;
        }

        let mut collected = vec![line.trim()];
        while index < lines.len() && !lines[index].trim().is_empty() && !starts_block(lines[index]) {
            collected.push(lines[index].trim());
            index += 1;
        }
        blocks.push(Block::Paragraph(collected));
    }
    blocks
}

fn render_block(out: &mut String, block: &Block<'_>) {
    match block {
        Block::Heading(level, title) => {
            let tag = (level + 2).min(6);
            out.push_str(&format!("<h{tag}>{}</h{tag}>\n", inline(title)));
        }
        Block::Paragraph(lines) => {
            out.push_str(&format!("<p>{}</p>\n", inline(&lines.join(" "))));
        }
        Block::Listing { language, body } => {
            let body = escape(&body.join("\n"));
            match language {
                Some(lang) => out.push_str(&format!(
                    "<pre class=\"listing\"><code class=\"language-{}\">{body}</code></pre>\n",
                    escape(lang)
                )),
                None => out.push_str(&format!("<pre class=\"listing\"><code>{body}</code></pre>\n")),
            }
        }
        Block::Literal(body) => {
            out.push_str(&format!(
                "<pre class=\"literal\">{}</pre>\n",
                escape(&body.join("\n"))
            ));
        }
        Block::Admonition { kind, lines } => {
            let class = kind.to_ascii_lowercase();
            out.push_str(&format!(
                "<div class=\"admonition {class}\"><span class=\"label\">{kind}</span><p>{}</p></div>\n",
                inline(&lines.join(" "))
            ));
        }
        Block::List(items) => {
            out.push_str("<ul>\n");
            for item in items {
                out.push_str(&format!("<li>{}</li>\n", inline(&item.join(" "))));
            }
            out.push_str("</ul>\n");
        }
    }
}

/// Escape text and turn balanced backtick spans into `<code>`.
fn inline(text: &str) -> String {
    let parts: Vec<&str> = text.split('`').collect();
    // an even number of parts means the last backtick is unmatched
    let closed = if parts.len() % 2 == 0 {
        parts.len() - 1
    } else {
        parts.len()
    };
    let mut out = String::with_capacity(text.len());
    for (index, part) in parts.iter().enumerate() {
        let code = index % 2 == 1;
        if code && index < closed {
            out.push_str("<code>");
            out.push_str(&escape(part));
            out.push_str("</code>");
        } else {
            if code {
                out.push('`');
            }
            out.push_str(&escape(part));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESTORE_DOC: &str = "Restores a virtual machine snapshot.

For example, to restore the snapshot with identifier `456` send a
request like this:

[source]
----
POST /ovirt-engine/api/vms/123/snapshots/456/restore
----

With an empty `action` in the body:

[source,xml]
----
<action/>
----

NOTE: Snapshot restore requires the virtual machine
to be down.
";

    #[test]
    fn should_split_paragraphs_on_blank_lines() {
        let html = to_html("First line\ncontinues here.\n\nSecond paragraph.");
        assert_eq!(html, "<p>First line continues here.</p>\n<p>Second paragraph.</p>\n");
    }

    #[test]
    fn should_render_source_listings_with_language() {
        let html = to_html(RESTORE_DOC);
        assert!(html.contains(
            "<pre class=\"listing\"><code>POST /ovirt-engine/api/vms/123/snapshots/456/restore</code></pre>"
        ));
        assert!(html.contains("<code class=\"language-xml\">&lt;action/&gt;</code>"));
    }

    #[test]
    fn should_render_admonition_with_continuation_lines() {
        let html = to_html(RESTORE_DOC);
        assert!(html.contains(
            "<div class=\"admonition note\"><span class=\"label\">NOTE</span><p>Snapshot restore requires the virtual machine to be down.</p></div>"
        ));
    }

    #[test]
    fn should_render_literal_blocks_verbatim() {
        let html = to_html("....\nGET /ovirt-engine/api/hosts?all_content=true\n....");
        assert_eq!(
            html,
            "<pre class=\"literal\">GET /ovirt-engine/api/hosts?all_content=true</pre>\n"
        );
    }

    #[test]
    fn should_render_bullet_lists() {
        let html = to_html("Attributes:\n\n- `hosted_engine`\n- `statistics`\n  with details\n");
        assert!(html.contains(
            "<ul>\n<li><code>hosted_engine</code></li>\n<li><code>statistics</code> with details</li>\n</ul>\n"
        ));
    }

    #[test]
    fn should_render_headings_below_page_titles() {
        assert_eq!(to_html("== Examples"), "<h4>Examples</h4>\n");
    }

    #[test]
    fn should_escape_markup_in_text() {
        assert_eq!(
            to_html("Use <b> & \"quotes\" it's"),
            "<p>Use &lt;b&gt; &amp; &#34;quotes&#34; it&#39;s</p>\n"
        );
    }

    #[test]
    fn should_keep_unmatched_backtick() {
        assert_eq!(inline("a `b` and `c"), "a <code>b</code> and `c");
    }

    #[test]
    fn should_keep_unterminated_listing_until_end() {
        let html = to_html("----\nGET /hosts");
        assert_eq!(html, "<pre class=\"listing\"><code>GET /hosts</code></pre>\n");
    }

    #[test]
    fn should_summarize_first_paragraph() {
        assert_eq!(
            summary_html(RESTORE_DOC),
            "Restores a virtual machine snapshot."
        );
        assert_eq!(summary_html(""), "");
    }
}
