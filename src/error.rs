use std::io;

use thiserror::Error;

/// Configuration error found while building the option registry.
///
/// These describe an [`OptCfg`](crate::OptCfg) that can never be satisfied,
/// regardless of the arguments being parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionErr {
    /// The config is an array but takes no argument, so there is nothing to collect.
    #[error("option '{option}' is configured as an array but takes no argument")]
    ConfigIsArrayButHasNoArg { option: String },

    /// The config declares default values but takes no argument.
    #[error("option '{option}' has default values but takes no argument")]
    ConfigHasDefaultButHasNoArg { option: String },
}

impl OptionErr {
    /// Name of the misconfigured option.
    pub fn option(&self) -> &str {
        match self {
            OptionErr::ConfigIsArrayButHasNoArg { option }
            | OptionErr::ConfigHasDefaultButHasNoArg { option } => option,
        }
    }
}

/// Argument parsing error.
///
/// Every variant carries the name of the offending option. For option tokens that
/// matched a config, the name is the config's canonical name, not the alias typed
/// on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErr {
    /// The option matched no configured name or alias, and no wildcard is registered.
    #[error("unconfigured option '{option}'")]
    UnconfiguredOption { option: String },

    /// The option takes an argument but was the last token.
    #[error("option '{option}' needs an argument")]
    OptionNeedsArg { option: String },

    /// An inline `=value` was passed to an option that takes no argument.
    #[error("option '{option}' takes no argument")]
    OptionTakesNoArg { option: String },

    /// A non-array option was given more than one value.
    #[error("option '{option}' is not an array and cannot be given twice")]
    OptionIsNotArray { option: String },

    /// The option configs are invalid.
    #[error(transparent)]
    Config(#[from] OptionErr),
}

impl ParseErr {
    /// Name of the option that caused the error.
    pub fn option(&self) -> &str {
        match self {
            ParseErr::UnconfiguredOption { option }
            | ParseErr::OptionNeedsArg { option }
            | ParseErr::OptionTakesNoArg { option }
            | ParseErr::OptionIsNotArray { option } => option,
            ParseErr::Config(err) => err.option(),
        }
    }
}

/// Help formatting error.
#[derive(Debug, Error)]
pub enum HelpErr {
    /// The margins and the description indent leave no room on the line.
    ///
    /// `indent` is the value supplied in [`WrapOpts`](crate::WrapOpts), which is
    /// zero when the indent was left to be computed.
    #[error("margins ({margin_left} + {margin_right}) and indent ({indent}) exceed line width {line_width}")]
    MarginsAndIndentExceedLineWidth {
        line_width: usize,
        margin_left: usize,
        margin_right: usize,
        indent: usize,
    },

    /// Writing the help lines failed.
    #[error("failed to write help: {0}")]
    Io(#[from] io::Error),
}
