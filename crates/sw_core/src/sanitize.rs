use serde::Serialize;
use std::fmt;

/// Line-break marker emitted in place of newlines.
pub const LINE_BREAK: &str = "<br>";

/// Escapes the five HTML-significant characters and turns newlines into
/// line-break markers.
///
/// The input is assumed raw. Already-escaped text is escaped again
/// (`&amp;` becomes `&amp;amp;`), so call this exactly once on untrusted
/// text, at the render boundary.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\r' if chars.peek() == Some(&'\n') => {
                // \r\n is a single break
                chars.next();
                out.push_str(LINE_BREAK);
            }
            '\n' => out.push_str(LINE_BREAK),
            other => out.push(other),
        }
    }

    out
}

/// Markup that is safe to insert into a rendering surface as-is.
///
/// The only ways to build one are [`Markup::escaped`], which runs the text
/// through [`escape`], and [`Markup::trusted`], which marks backend-supplied
/// markup as pre-trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    pub fn escaped(text: &str) -> Self {
        Self(escape(text))
    }

    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
