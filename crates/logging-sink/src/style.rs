//! crates/logging-sink/src/style.rs
//! Semantic style tags and the immutable palette that maps them to terminal styles.

use colored::Color;

/// Closed set of semantic tags a console segment can carry.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum StyleTag {
    /// Unstyled body text.
    Default,
    /// Elapsed-time stamp at the start of a line.
    Time,
    /// Error badge.
    Error,
    /// Warning badge.
    Warn,
    /// Info tier badge (strongest blue).
    InfoPrimary,
    /// Debug tier badge (medium blue).
    InfoMedium,
    /// Trace tier badge (light blue).
    InfoLow,
    /// Routes and states category badge.
    RoutesStates,
    /// Directives category badge.
    Directive,
    /// Attention banner used by `yell`.
    Attention,
}

impl StyleTag {
    /// Every tag, in palette order.
    pub const ALL: [Self; 10] = [
        Self::Default,
        Self::Time,
        Self::Error,
        Self::Warn,
        Self::InfoPrimary,
        Self::InfoMedium,
        Self::InfoLow,
        Self::RoutesStates,
        Self::Directive,
        Self::Attention,
    ];

    const fn index(self) -> usize {
        match self {
            Self::Default => 0,
            Self::Time => 1,
            Self::Error => 2,
            Self::Warn => 3,
            Self::InfoPrimary => 4,
            Self::InfoMedium => 5,
            Self::InfoLow => 6,
            Self::RoutesStates => 7,
            Self::Directive => 8,
            Self::Attention => 9,
        }
    }

    /// Returns the kebab-case name of the tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Time => "time",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::InfoPrimary => "info-primary",
            Self::InfoMedium => "info-medium",
            Self::InfoLow => "info-low",
            Self::RoutesStates => "routes-states",
            Self::Directive => "directive",
            Self::Attention => "attention",
        }
    }
}

/// Opaque style descriptor consumed by terminal sinks.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Style {
    foreground: Option<Color>,
    background: Option<Color>,
    bold: bool,
}

impl Style {
    /// A style that leaves text untouched.
    pub const PLAIN: Self = Self {
        foreground: None,
        background: None,
        bold: false,
    };

    /// Creates a style from explicit parts.
    #[must_use]
    pub const fn new(foreground: Option<Color>, background: Option<Color>, bold: bool) -> Self {
        Self {
            foreground,
            background,
            bold,
        }
    }

    /// Returns the foreground color, if any.
    #[must_use]
    pub const fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    /// Returns the background color, if any.
    #[must_use]
    pub const fn background(&self) -> Option<Color> {
        self.background
    }

    /// Reports whether the style renders bold text.
    #[must_use]
    pub const fn is_bold(&self) -> bool {
        self.bold
    }

    /// Reports whether painting with this style changes the text.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        self.foreground.is_none() && self.background.is_none() && !self.bold
    }

    /// Wraps `text` in the ANSI sequences for this style.
    ///
    /// The sequences are built directly from [`Color`] codes so the sink, not
    /// a process-wide switch, decides whether styling happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use colored::Color;
    /// use logging_sink::Style;
    ///
    /// let red = Style::new(Some(Color::Red), None, false);
    /// assert_eq!(red.paint("x"), "\x1b[31mx\x1b[0m");
    /// assert_eq!(Style::PLAIN.paint("x"), "x");
    /// ```
    #[must_use]
    pub fn paint(&self, text: &str) -> String {
        if self.is_plain() || text.is_empty() {
            return text.to_owned();
        }

        let mut codes: Vec<String> = Vec::with_capacity(3);
        if self.bold {
            codes.push("1".to_owned());
        }
        if let Some(fg) = self.foreground {
            codes.push(fg.to_fg_str().into_owned());
        }
        if let Some(bg) = self.background {
            codes.push(bg.to_bg_str().into_owned());
        }

        format!("\x1b[{}m{text}\x1b[0m", codes.join(";"))
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::TrueColor { r, g, b }
}

const WHITE: Color = rgb(255, 255, 255);
const ORANGE: Color = rgb(255, 166, 0);

/// Immutable mapping from [`StyleTag`] to [`Style`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StyleTable {
    styles: [Style; StyleTag::ALL.len()],
}

impl StyleTable {
    /// Returns the standard palette.
    ///
    /// Translucent badge backgrounds are flattened against white so the
    /// palette keeps three distinguishable blues for the info, debug and trace
    /// tiers.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            styles: [
                // default
                Style::PLAIN,
                // time
                Style::new(Some(rgb(85, 85, 85)), None, false),
                // error
                Style::new(Some(rgb(255, 204, 204)), Some(rgb(255, 0, 0)), false),
                // warn
                Style::new(Some(WHITE), Some(ORANGE), true),
                // info-primary
                Style::new(Some(WHITE), Some(rgb(30, 125, 248)), true),
                // info-medium
                Style::new(Some(WHITE), Some(rgb(75, 151, 249)), true),
                // info-low
                Style::new(Some(WHITE), Some(rgb(143, 190, 252)), true),
                // routes-states
                Style::new(Some(WHITE), Some(rgb(128, 192, 128)), false),
                // directive
                Style::new(Some(WHITE), Some(rgb(128, 192, 187)), false),
                // attention
                Style::new(Some(WHITE), Some(ORANGE), true),
            ],
        }
    }

    /// Returns a palette in which every tag renders plain text.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            styles: [Style::PLAIN; StyleTag::ALL.len()],
        }
    }

    /// Replaces the style for `tag`, consuming the table.
    ///
    /// Tables are built once and then shared read-only; there is no in-place
    /// mutation.
    #[must_use]
    pub const fn with_style(mut self, tag: StyleTag, style: Style) -> Self {
        self.styles[tag.index()] = style;
        self
    }

    /// Looks up the style for `tag`.
    #[must_use]
    pub const fn get(&self, tag: StyleTag) -> &Style {
        &self.styles[tag.index()]
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_palette_styles_every_badge() {
        let table = StyleTable::standard();
        for tag in StyleTag::ALL {
            if tag == StyleTag::Default {
                assert!(table.get(tag).is_plain());
            } else {
                assert!(!table.get(tag).is_plain(), "{} should be styled", tag.as_str());
            }
        }
    }

    #[test]
    fn info_tiers_have_distinct_backgrounds() {
        let table = StyleTable::standard();
        let primary = table.get(StyleTag::InfoPrimary).background();
        let medium = table.get(StyleTag::InfoMedium).background();
        let low = table.get(StyleTag::InfoLow).background();
        assert_ne!(primary, medium);
        assert_ne!(medium, low);
        assert_ne!(primary, low);
    }

    #[test]
    fn paint_combines_bold_foreground_and_background() {
        let style = Style::new(Some(Color::White), Some(Color::Blue), true);
        assert_eq!(style.paint("log"), "\x1b[1;37;44mlog\x1b[0m");
    }

    #[test]
    fn paint_ignores_global_color_override() {
        colored::control::set_override(false);
        let painted = Style::new(Some(Color::Red), None, false).paint("x");
        colored::control::unset_override();
        assert_eq!(painted, "\x1b[31mx\x1b[0m");
    }

    #[test]
    fn paint_leaves_empty_text_alone() {
        let style = Style::new(Some(Color::Red), None, true);
        assert_eq!(style.paint(""), "");
    }

    #[test]
    fn with_style_overrides_a_single_tag() {
        let table = StyleTable::plain().with_style(StyleTag::Error, Style::new(Some(Color::Red), None, false));
        assert!(!table.get(StyleTag::Error).is_plain());
        assert!(table.get(StyleTag::Warn).is_plain());
    }
}
