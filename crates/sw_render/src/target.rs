use askama::Template;
use scraper::Html;
use url::Url;

use crate::entry::{ArticleCard, DisplayEntry, EntryContent};

/// CSS class shared by every entry in the result container.
pub const RESULT_CLASS: &str = "chat-widget-result";

/// Turns display entries into something a particular surface can show.
pub trait RenderTarget {
    type Output;

    fn render_entry(&self, entry: &DisplayEntry) -> Self::Output;

    fn render_entries(&self, entries: &[DisplayEntry]) -> Vec<Self::Output> {
        entries.iter().map(|entry| self.render_entry(entry)).collect()
    }
}

#[derive(Template)]
#[template(source = r#"<p class="{{ class }}">{{ text }}</p>"#, ext = "html")]
struct MessageTemplate<'a> {
    class: &'a str,
    text: &'a str,
}

#[derive(Template)]
#[template(
    source = r#"<div class="{{ class }}">
{%- if let Some(href) = href -%}
<a href="{{ href }}" target="_blank" rel="noopener noreferrer"><b>{{ card.title }}</b></a>
{%- else -%}
<b>{{ card.title }}</b>
{%- endif -%}
{%- if let Some(date) = card.date -%}
<p>({{ date }})</p>
{%- endif -%}
<p>{{ card.description|safe }}</p></div>"#,
    ext = "html"
)]
struct ArticleCardTemplate<'a> {
    class: &'a str,
    href: Option<String>,
    card: &'a ArticleCard,
}

#[derive(Template)]
#[template(
    source = r#"<div class="{{ class }} chat-widget-summary-header"><h4>{{ heading }}</h4><p><i>{{ disclaimer }}</i></p></div>"#,
    ext = "html"
)]
struct SummaryHeaderTemplate<'a> {
    class: &'a str,
    heading: &'a str,
    disclaimer: &'a str,
}

#[derive(Template)]
#[template(
    source = r#"<blockquote class="{{ class }} chat-widget-summary">{{ markup|safe }}</blockquote>"#,
    ext = "html"
)]
struct SummaryBodyTemplate<'a> {
    class: &'a str,
    markup: &'a sw_core::Markup,
}

/// Renders entries as HTML fragments for a browser host.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTarget;

impl RenderTarget for HtmlTarget {
    type Output = String;

    fn render_entry(&self, entry: &DisplayEntry) -> String {
        let class = RESULT_CLASS;
        let rendered = match entry.content() {
            EntryContent::Message { text } => MessageTemplate { class, text }.render(),
            EntryContent::ArticleCard(card) => ArticleCardTemplate {
                class,
                href: link_target(&card.url),
                card,
            }
            .render(),
            EntryContent::SummaryHeader { heading, disclaimer } => SummaryHeaderTemplate {
                class,
                heading,
                disclaimer,
            }
            .render(),
            EntryContent::SummaryBody { markup } => SummaryBodyTemplate { class, markup }.render(),
        };

        rendered.unwrap_or_else(|err| {
            tracing::error!(error = %err, kind = ?entry.kind(), "Failed to render entry");
            String::new()
        })
    }
}

/// Only web links become clickable. Anything else, `javascript:` included,
/// is shown as plain text.
pub fn link_target(raw: &str) -> Option<String> {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(raw.to_string()),
        Ok(url) => {
            tracing::warn!(scheme = url.scheme(), "Dropping link with unsupported scheme");
            None
        }
        Err(err) => {
            tracing::warn!(error = %err, "Dropping unparseable article link");
            None
        }
    }
}

/// Renders entries as plain text for a terminal host.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextTarget;

impl RenderTarget for TextTarget {
    type Output = String;

    fn render_entry(&self, entry: &DisplayEntry) -> String {
        match entry.content() {
            EntryContent::Message { text } => format!("! {}", text),
            EntryContent::ArticleCard(card) => {
                let mut lines = vec![card.title.clone(), format!("  {}", card.url)];
                if let Some(date) = &card.date {
                    lines.push(format!("  ({})", date));
                }
                let description = markup_to_text(card.description.as_str());
                if !description.is_empty() {
                    lines.push(format!("  {}", description));
                }
                lines.join("\n")
            }
            EntryContent::SummaryHeader { heading, disclaimer } => {
                format!("== {} ==\n{}", heading, disclaimer)
            }
            EntryContent::SummaryBody { markup } => markup_to_text(markup.as_str())
                .lines()
                .map(|line| format!("> {}", line))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Extracts the visible text of a markup fragment, keeping line breaks.
pub fn markup_to_text(markup: &str) -> String {
    let with_breaks = markup
        .replace("<br>", "\n")
        .replace("<br/>", "\n")
        .replace("<br />", "\n");
    let fragment = Html::parse_fragment(&with_breaks);
    let text: String = fragment.root_element().text().collect();
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ArticleCard;
    use sw_core::Markup;

    fn card(date: Option<&str>) -> DisplayEntry {
        card_linking_to("https://example.org/ticks?a=1&b=2", date)
    }

    fn card_linking_to(url: &str, date: Option<&str>) -> DisplayEntry {
        DisplayEntry::article(ArticleCard {
            title: "Ticks & Lyme".to_string(),
            url: url.to_string(),
            date: date.map(str::to_string),
            description: Markup::trusted("Check for <b>ticks</b> daily."),
        })
    }

    #[test]
    fn test_html_message_is_escaped() {
        let html = HtmlTarget.render_entry(&DisplayEntry::message("a < b"));
        assert_eq!(html, r#"<p class="chat-widget-result">a &lt; b</p>"#);
    }

    #[test]
    fn test_html_card_opens_in_new_context() {
        let html = HtmlTarget.render_entry(&card(Some("March 5, 2024")));
        assert!(html.starts_with(r#"<div class="chat-widget-result"><a href="https:"#));
        assert!(html.contains(r#"ticks?a=1&amp;b=2" target="_blank" rel="noopener noreferrer">"#));
        assert!(html.contains("<b>Ticks &amp; Lyme</b>"));
        assert!(html.contains("<p>(March 5, 2024)</p>"));
        assert!(html.contains("<p>Check for <b>ticks</b> daily.</p>"));
    }

    #[test]
    fn test_html_card_title_and_description_are_escaped() {
        let entry = DisplayEntry::article(ArticleCard {
            title: "<img src=x onerror=alert(1)>".to_string(),
            url: "https://example.org".to_string(),
            date: None,
            description: Markup::escaped("<script>alert(1)</script>"),
        });
        let html = HtmlTarget.render_entry(&entry);
        assert!(!html.contains("<img"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("<p>&lt;script&gt;alert(1)&lt;"));
    }

    #[test]
    fn test_html_card_drops_non_web_links() {
        for url in ["javascript:alert(1)", "data:text/html,hi", "not a url"] {
            let html = HtmlTarget.render_entry(&card_linking_to(url, None));
            assert!(!html.contains("href"), "url {:?} rendered as {}", url, html);
            assert!(html.contains("<b>Ticks &amp; Lyme</b>"));
        }
    }

    #[test]
    fn test_link_target_accepts_web_schemes() {
        assert_eq!(
            link_target("http://example.org/a"),
            Some("http://example.org/a".to_string())
        );
        assert!(link_target("HTTPS://example.org/a").is_some());
        assert_eq!(link_target("JavaScript:alert(1)"), None);
        assert_eq!(link_target("/relative/path"), None);
    }

    #[test]
    fn test_html_card_without_date() {
        let html = HtmlTarget.render_entry(&card(None));
        assert!(!html.contains("<p>("));
    }

    #[test]
    fn test_html_summary_body_is_inserted_verbatim() {
        let entry = DisplayEntry::summary_body(Markup::escaped("x < y\nz"));
        let html = HtmlTarget.render_entry(&entry);
        assert_eq!(
            html,
            r#"<blockquote class="chat-widget-result chat-widget-summary">x &lt; y<br>z</blockquote>"#
        );
    }

    #[test]
    fn test_text_card() {
        let text = TextTarget.render_entry(&card(Some("March 5, 2024")));
        assert_eq!(
            text,
            "Ticks & Lyme\n  https://example.org/ticks?a=1&b=2\n  (March 5, 2024)\n  Check for ticks daily."
        );
    }

    #[test]
    fn test_text_summary_body_is_quoted_line_by_line() {
        let entry = DisplayEntry::summary_body(Markup::escaped("Wash & rinse.\nDry <well>."));
        assert_eq!(TextTarget.render_entry(&entry), "> Wash & rinse.\n> Dry <well>.");
    }

    #[test]
    fn test_render_entries_keeps_order() {
        let entries = vec![DisplayEntry::message("first"), DisplayEntry::message("second")];
        assert_eq!(
            TextTarget.render_entries(&entries),
            vec!["! first".to_string(), "! second".to_string()]
        );
    }
}
