use crate::method::ConsoleMethod;
use crate::style::StyleTag;

/// One piece of a console line, optionally carrying a style tag.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Segment {
    style: Option<StyleTag>,
    text: String,
}

impl Segment {
    /// Creates a styled segment.
    #[must_use]
    pub fn styled(style: StyleTag, text: impl Into<String>) -> Self {
        Self {
            style: Some(style),
            text: text.into(),
        }
    }

    /// Creates an unstyled segment.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            style: None,
            text: text.into(),
        }
    }

    /// Returns the style tag, if any.
    #[must_use]
    pub const fn style(&self) -> Option<StyleTag> {
        self.style
    }

    /// Returns the segment text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A single console write: the method plus the ordered display segments.
///
/// Segments are rendered separated by one space, the way a console joins the
/// values passed to one `console.log` call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsoleLine {
    method: ConsoleMethod,
    segments: Vec<Segment>,
}

impl ConsoleLine {
    /// Creates an empty line for `method`.
    #[must_use]
    pub const fn new(method: ConsoleMethod) -> Self {
        Self {
            method,
            segments: Vec::new(),
        }
    }

    /// Appends a styled segment.
    #[must_use]
    pub fn styled(mut self, style: StyleTag, text: impl Into<String>) -> Self {
        self.segments.push(Segment::styled(style, text));
        self
    }

    /// Appends an unstyled segment.
    #[must_use]
    pub fn plain(mut self, text: impl Into<String>) -> Self {
        self.segments.push(Segment::plain(text));
        self
    }

    /// Appends an arbitrary segment in place.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Returns the console method.
    #[must_use]
    pub const fn method(&self) -> ConsoleMethod {
        self.method
    }

    /// Returns the segments in display order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Renders the line without any styling.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::{ConsoleLine, ConsoleMethod, StyleTag};
    ///
    /// let line = ConsoleLine::new(ConsoleMethod::Warn)
    ///     .styled(StyleTag::Time, "1.500")
    ///     .styled(StyleTag::Warn, " wrn ")
    ///     .plain("disk almost full");
    /// assert_eq!(line.plain_text(), "1.500  wrn  disk almost full");
    /// ```
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.render_with(|_, text| text.to_owned())
    }

    /// Renders the line, letting `paint` decorate each segment.
    pub fn render_with<F>(&self, mut paint: F) -> String
    where
        F: FnMut(Option<StyleTag>, &str) -> String,
    {
        let mut rendered = String::new();
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                rendered.push(' ');
            }
            rendered.push_str(&paint(segment.style, &segment.text));
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_renders_empty_text() {
        assert_eq!(ConsoleLine::new(ConsoleMethod::Log).plain_text(), "");
    }

    #[test]
    fn segments_keep_insertion_order() {
        let mut line = ConsoleLine::new(ConsoleMethod::Debug).plain("a");
        line.push(Segment::styled(StyleTag::Directive, "b"));
        let texts: Vec<&str> = line.segments().iter().map(Segment::text).collect();
        assert_eq!(texts, ["a", "b"]);
        assert_eq!(line.segments()[1].style(), Some(StyleTag::Directive));
    }

    #[test]
    fn render_with_sees_each_style() {
        let line = ConsoleLine::new(ConsoleMethod::Log)
            .styled(StyleTag::Time, "t")
            .plain("x");
        let rendered = line.render_with(|style, text| match style {
            Some(tag) => format!("<{}>{text}", tag.as_str()),
            None => text.to_owned(),
        });
        assert_eq!(rendered, "<time>t x");
    }
}
