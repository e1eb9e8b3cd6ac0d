//! crates/logging/src/channel.rs
//! The leveled operations as data: gate, style and console method per channel.

use super::config::{DIRECTIVES, ROUTES_AND_STATES, Settings};
use super::levels::Severity;
use logging_sink::{ConsoleMethod, StyleTag};
use std::fmt;

/// One leveled operation of the logging service.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Channel {
    /// Always written, regardless of the enable flag and level.
    Error,
    /// Warnings (rank 1).
    Warn,
    /// Multi-line informational block (rank 2).
    Info,
    /// Application progress (rank 2).
    Log,
    /// User and application actions (rank 3).
    Log1,
    /// Application process details (rank 4).
    Log2,
    /// Routes and states category (rank 3).
    Rs,
    /// Directives category (rank 3).
    Dlog,
    /// Attention banner; gated by the enable flag only.
    Yell,
}

impl Channel {
    /// Every channel in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Log,
        Self::Log1,
        Self::Log2,
        Self::Rs,
        Self::Dlog,
        Self::Yell,
    ];

    /// Returns the operation name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Log => "log",
            Self::Log1 => "log1",
            Self::Log2 => "log2",
            Self::Rs => "rs",
            Self::Dlog => "dlog",
            Self::Yell => "yell",
        }
    }

    /// Returns the severity compared against the level threshold, or `None`
    /// for the channels that ignore the level.
    #[must_use]
    pub const fn severity(self) -> Option<Severity> {
        match self {
            Self::Error | Self::Yell => None,
            Self::Warn => Some(Severity::Warn),
            Self::Info | Self::Log => Some(Severity::Info),
            Self::Log1 | Self::Rs | Self::Dlog => Some(Severity::Debug),
            Self::Log2 => Some(Severity::Trace),
        }
    }

    /// Returns the category switch consulted in addition to the level.
    #[must_use]
    pub const fn category(self) -> Option<&'static str> {
        match self {
            Self::Rs => Some(ROUTES_AND_STATES),
            Self::Dlog => Some(DIRECTIVES),
            _ => None,
        }
    }

    /// Returns the label shown for category channels.
    #[must_use]
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::Rs => Some("routes and states"),
            Self::Dlog => Some("directive"),
            _ => None,
        }
    }

    /// Reports whether a call on this channel produces output under
    /// `settings`.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{Channel, Settings, Severity};
    ///
    /// let mut settings = Settings::default();
    /// assert!(Channel::Error.admits(&settings));
    /// assert!(!Channel::Yell.admits(&settings));
    ///
    /// settings.enabled = true;
    /// settings.level = Severity::Info;
    /// assert!(Channel::Log.admits(&settings));
    /// assert!(!Channel::Rs.admits(&settings));
    /// assert!(Channel::Yell.admits(&settings));
    /// ```
    #[must_use]
    pub fn admits(self, settings: &Settings) -> bool {
        match self {
            Self::Error => true,
            Self::Yell => settings.enabled,
            channel => {
                let level_ok = channel
                    .severity()
                    .is_some_and(|severity| settings.admits(severity));
                level_ok
                    && channel
                        .category()
                        .is_none_or(|category| settings.category_enabled(category))
            }
        }
    }

    /// Returns the style of the channel's badge.
    #[must_use]
    pub const fn style(self) -> StyleTag {
        match self {
            Self::Error => StyleTag::Error,
            Self::Warn => StyleTag::Warn,
            Self::Info | Self::Log => StyleTag::InfoPrimary,
            Self::Log1 => StyleTag::InfoMedium,
            Self::Log2 => StyleTag::InfoLow,
            Self::Rs => StyleTag::RoutesStates,
            Self::Dlog => StyleTag::Directive,
            Self::Yell => StyleTag::Attention,
        }
    }

    /// Returns the console method the channel writes through.
    #[must_use]
    pub const fn method(self) -> ConsoleMethod {
        match self {
            Self::Error => ConsoleMethod::Error,
            Self::Warn => ConsoleMethod::Warn,
            Self::Info => ConsoleMethod::Info,
            Self::Dlog => ConsoleMethod::Debug,
            Self::Log | Self::Log1 | Self::Log2 | Self::Rs | Self::Yell => ConsoleMethod::Log,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
