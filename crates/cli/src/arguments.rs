//! crates/cli/src/arguments.rs
//! Command-line definition and parsing for the demo driver.

use std::collections::BTreeMap;
use std::ffi::OsString;

use clap::{Arg, ArgAction, Command};
use logging::{LevelSpec, Severity, SettingsPatch};
use logging_sink::ColorMode;

use crate::error::CliError;

/// Program name used when the argument list is empty.
pub(crate) const PROGRAM_NAME: &str = "dbglog-demo";

/// Options recognised by the demo driver.
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs {
    pub(crate) show_help: bool,
    pub(crate) enable: bool,
    pub(crate) level: Option<Severity>,
    pub(crate) labels: bool,
    pub(crate) no_emitters: bool,
    pub(crate) categories: BTreeMap<String, bool>,
    pub(crate) settings: Option<serde_json::Value>,
    pub(crate) color: ColorMode,
    pub(crate) print_settings: bool,
    pub(crate) yell: bool,
}

impl ParsedArgs {
    /// Collects the switches given on the command line into one patch.
    ///
    /// Flags that were not given leave the corresponding setting untouched,
    /// so a `--settings` object applied first keeps its values.
    pub(crate) fn patch(&self) -> SettingsPatch {
        SettingsPatch {
            enabled: self.enable.then_some(true),
            level: self.level.map(LevelSpec::from),
            categories: self.categories.clone(),
            show_emitter_location: self.no_emitters.then_some(false),
            show_labels: self.labels.then_some(true),
            ..SettingsPatch::default()
        }
    }
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("enable")
                .long("enable")
                .help("Turn the logger on.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .value_name("LEVEL")
                .help("Verbosity threshold: error, warn, info, debug, trace or 0-4.")
                .num_args(1)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("labels")
                .long("labels")
                .help("Show category labels inside the badge.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-emitters")
                .long("no-emitters")
                .help("Hide caller locations on ordinary lines.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .value_name("NAME=on|off")
                .help("Switch a category such as rs or directives.")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .value_name("JSON")
                .help("Apply a settings object before the other switches.")
                .num_args(1)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .value_name("WHEN")
                .help("Colorize output: auto, always or never.")
                .num_args(1)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("print-settings")
                .long("print-settings")
                .help("Print the resulting settings as JSON and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("yell")
                .long("yell")
                .help("Finish the replay with an attention block.")
                .action(ArgAction::SetTrue),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let level = matches
        .remove_one::<String>("level")
        .map(|value| parse_level(&value))
        .transpose()?;
    let categories = matches
        .remove_many::<String>("category")
        .map(|values| {
            values
                .map(|value| parse_category(&value))
                .collect::<Result<BTreeMap<_, _>, _>>()
        })
        .transpose()?
        .unwrap_or_default();
    let settings = matches
        .remove_one::<String>("settings")
        .map(|text| serde_json::from_str(&text).map_err(CliError::SettingsJson))
        .transpose()?;
    let color = matches
        .remove_one::<String>("color")
        .map(|value| value.parse::<ColorMode>())
        .transpose()?
        .unwrap_or_default();

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        enable: matches.get_flag("enable"),
        level,
        labels: matches.get_flag("labels"),
        no_emitters: matches.get_flag("no-emitters"),
        categories,
        settings,
        color,
        print_settings: matches.get_flag("print-settings"),
        yell: matches.get_flag("yell"),
    })
}

/// Accepts a severity name or a numeric rank.
fn parse_level(value: &str) -> Result<Severity, CliError> {
    let spec = value
        .trim()
        .parse::<i64>()
        .map_or_else(|_| LevelSpec::from(value.trim()), LevelSpec::Rank);
    spec.resolve().ok_or_else(|| CliError::Level {
        value: value.to_owned(),
    })
}

/// Parses a `NAME=on|off` category switch.
fn parse_category(value: &str) -> Result<(String, bool), CliError> {
    let invalid = || CliError::Category {
        value: value.to_owned(),
    };
    let (name, state) = value.split_once('=').ok_or_else(invalid)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }
    let enabled = match state.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => true,
        "off" | "false" | "0" => false,
        _ => return Err(invalid()),
    };
    Ok((name.to_owned(), enabled))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ParsedArgs, CliError> {
        parse_args(std::iter::once(PROGRAM_NAME).chain(args.iter().copied()))
    }

    #[test]
    fn no_arguments_change_nothing() {
        let parsed = parse(&[]).expect("parses");
        assert!(!parsed.show_help);
        assert_eq!(parsed.color, ColorMode::Auto);
        assert_eq!(parsed.patch(), SettingsPatch::default());
    }

    #[test]
    fn empty_argument_list_is_accepted() {
        let parsed = parse_args(Vec::<OsString>::new()).expect("parses");
        assert!(parsed.settings.is_none());
    }

    #[test]
    fn switches_build_a_patch() {
        let parsed = parse(&[
            "--enable",
            "--level",
            "Info",
            "--labels",
            "--no-emitters",
            "--category",
            "rs=off",
            "--category",
            "forms=on",
        ])
        .expect("parses");

        let patch = parsed.patch();
        assert_eq!(patch.enabled, Some(true));
        assert_eq!(patch.level, Some(LevelSpec::from(Severity::Info)));
        assert_eq!(patch.show_emitter_location, Some(false));
        assert_eq!(patch.show_labels, Some(true));
        assert_eq!(patch.categories.get("rs"), Some(&false));
        assert_eq!(patch.categories.get("forms"), Some(&true));
    }

    #[test]
    fn numeric_levels_are_ranks() {
        assert_eq!(parse(&["--level", "4"]).expect("parses").level, Some(Severity::Trace));
        assert_eq!(parse(&["--level", " 0 "]).expect("parses").level, Some(Severity::Error));
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = parse(&["--level", "loud"]).unwrap_err();
        assert!(matches!(err, CliError::Level { ref value } if value == "loud"));
        assert!(matches!(parse(&["--level", "9"]), Err(CliError::Level { .. })));
    }

    #[test]
    fn malformed_category_is_rejected() {
        for bad in ["rs", "=on", "rs=maybe"] {
            assert!(
                matches!(parse(&["--category", bad]), Err(CliError::Category { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn settings_must_be_json() {
        let parsed = parse(&["--settings", r#"{"enable": true}"#]).expect("parses");
        assert_eq!(parsed.settings, Some(serde_json::json!({"enable": true})));
        assert!(matches!(
            parse(&["--settings", "{enable"]),
            Err(CliError::SettingsJson(_))
        ));
    }

    #[test]
    fn color_modes_parse() {
        assert_eq!(parse(&["--color", "always"]).expect("parses").color, ColorMode::Always);
        assert_eq!(parse(&["--color=never"]).expect("parses").color, ColorMode::Never);
        assert!(matches!(parse(&["--color", "rainbow"]), Err(CliError::Color(_))));
    }

    #[test]
    fn unknown_option_is_a_usage_error() {
        assert!(matches!(parse(&["--verbose"]), Err(CliError::Usage(_))));
    }
}
