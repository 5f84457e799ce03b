//! Species Document Markdown
//!
//! pulldown-cmark with tables, strikethrough and task lists, plus:
//! - links open in a new tab
//! - images are scaled down to the panel width

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Render a species document
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// Shown when a species has no document yet
pub fn missing_doc_html(name: &str) -> String {
    format!(
        r#"<div class="doc-missing"><p>No detailed introduction for {} yet.</p><p>Contributions are welcome.</p></div>"#,
        escape_html(name)
    )
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

// State for the event transformer
enum State {
    Normal,
    /// Inside an image; its alt text events are dropped
    InImage { dropped_depth: usize },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Start(Tag::Link { dest_url, title, .. }) => {
                    let html = format!(
                        r#"<a href="{}" title="{}" target="_blank" rel="noopener">"#,
                        escape_html(&dest_url),
                        escape_html(&title)
                    );
                    events.push(Event::Html(CowStr::from(html)));
                }
                Event::End(TagEnd::Link) => events.push(Event::Html(CowStr::from("</a>"))),

                Event::Start(Tag::Image { dest_url, title, .. }) => {
                    let html = format!(
                        r#"<img src="{}" title="{}" style="max-width: 100%; height: auto; border-radius: 8px; margin: 12px 0;" />"#,
                        escape_html(&dest_url),
                        escape_html(&title)
                    );
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::InImage { dropped_depth: 0 };
                }

                other => events.push(other),
            },

            State::InImage { ref mut dropped_depth } => match event {
                Event::Start(_) => *dropped_depth += 1,
                Event::End(_) => {
                    if *dropped_depth == 0 {
                        state = State::Normal;
                    } else {
                        *dropped_depth -= 1;
                    }
                }
                _ => {}
            },
        }
    }

    events
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
