use std::borrow::Cow;
use std::vec;

use tracing::{debug, trace};

use crate::cmd::{CmdBuilder, Command};
use crate::error::ParseErr;
use crate::option::{OptCfg, Options};
use crate::util::Util;

/// Parse `arguments` against the option configs `cfgs`.
///
/// The first argument is the program path, its final segment becomes
/// [`Command::name`]. Every following token is an option (`--name`, `--name=value`,
/// `-n`, `-n=value`, combined flags `-abc`), an option's value, or an argument.
/// An option taking an argument consumes the next token unconditionally when
/// no inline value is given. The lone tokens `-` and `--` are arguments.
///
/// After the scan, every configured option that was not given and declares
/// default values is set to those values.
///
/// # Error
///
/// The parse stops at the first invalid config or token and returns its
/// [`ParseErr`]. Nothing of the partial scan is kept.
///
/// # Examples
///
/// ```
/// use cliargs::{parse_with, OptCfg};
///
/// let cfgs = vec![
///     OptCfg::builder().name("foo-bar").alias("f").has_arg(true).is_array(true).build(),
///     OptCfg::builder().name("quiet").alias("q").build(),
/// ];
///
/// let cmd = parse_with(&["/usr/bin/app", "-f", "ABC", "in.txt", "--foo-bar=DEF", "-q"], &cfgs).unwrap();
/// assert_eq!(cmd.name(), "app");
/// assert_eq!(cmd.opt_args("foo-bar"), Some(&["ABC".to_string(), "DEF".to_string()][..]));
/// assert!(cmd.has_opt("quiet"));
/// assert_eq!(cmd.args(), &["in.txt".to_string()]);
/// ```
pub fn parse_with<T: AsRef<str>>(arguments: &[T], cfgs: &[OptCfg]) -> Result<Command, ParseErr> {
    let options = Options::new(cfgs)?;
    debug!(arguments = arguments.len(), configs = cfgs.len(), "Parsing command line");

    let tokens: Vec<&str> = arguments.iter().map(|a| a.as_ref()).collect();
    Resolver::new(&options, tokens).run()
}

/// A single left-to-right pass over the tokens of one parse.
struct Resolver<'a> {
    options: &'a Options<'a>,
    tokens: vec::IntoIter<&'a str>,
    cmd: CmdBuilder,
}

impl<'a> Resolver<'a> {
    fn new(options: &'a Options<'a>, tokens: Vec<&'a str>) -> Resolver<'a> {
        Resolver { options, tokens: tokens.into_iter(), cmd: CmdBuilder::default() }
    }

    fn run(mut self) -> Result<Command, ParseErr> {
        if let Some(program) = self.tokens.next() {
            self.cmd.name(Util::program_name(program));
        }

        while let Some(token) = self.tokens.next() {
            self.handle_token(token)?;
        }

        self.handle_defaults();
        Ok(self.cmd.build())
    }

    fn handle_token(&mut self, token: &'a str) -> Result<(), ParseErr> {
        if let Some(body) = token.strip_prefix("--") {
            self.handle_long_option(token, body)
        } else if let Some(body) = token.strip_prefix('-') {
            self.handle_short_options(token, body)
        } else {
            self.handle_arg(token);
            Ok(())
        }
    }

    fn handle_arg(&mut self, token: &str) {
        trace!(token, "Argument");
        self.cmd.add_arg(token);
    }

    fn handle_long_option(&mut self, token: &'a str, body: &'a str) -> Result<(), ParseErr> {
        let (name, inline_value) = Util::split_inline_value(body);
        if name.is_empty() {
            self.handle_arg(token);
            return Ok(());
        }
        trace!(token, name, "Long option");

        let option = self.resolve(name)?;
        self.handle_option(&option, inline_value)
    }

    /// `-a`, `-a=V`, and combined flags `-abc` / `-abc=V` where only the last may take a value.
    fn handle_short_options(&mut self, token: &'a str, body: &'a str) -> Result<(), ParseErr> {
        let (names, inline_value) = Util::split_inline_value(body);
        if names.is_empty() {
            self.handle_arg(token);
            return Ok(());
        }
        trace!(token, names, "Short option");

        let mut chars = names.char_indices().peekable();
        while let Some((pos, ch)) = chars.next() {
            let name = &names[pos..pos + ch.len_utf8()];
            let option = self.resolve(name)?;

            if chars.peek().is_some() {
                if option.has_arg {
                    return Err(ParseErr::OptionNeedsArg { option: option.name.clone() });
                }
                self.handle_option(&option, None)?;
            } else {
                self.handle_option(&option, inline_value)?;
            }
        }
        Ok(())
    }

    fn resolve(&self, name: &str) -> Result<Cow<'a, OptCfg>, ParseErr> {
        self.options
            .get_option(name)
            .ok_or_else(|| ParseErr::UnconfiguredOption { option: name.to_string() })
    }

    fn handle_option(&mut self, option: &OptCfg, inline_value: Option<&'a str>) -> Result<(), ParseErr> {
        if !option.has_arg {
            if inline_value.is_some() {
                return Err(ParseErr::OptionTakesNoArg { option: option.name.clone() });
            }
            trace!(option = option.name.as_str(), "Flag");
            self.cmd.add_option(&option.name);
            return Ok(());
        }

        let value = match inline_value {
            Some(value) => value,
            None => self
                .tokens
                .next()
                .ok_or_else(|| ParseErr::OptionNeedsArg { option: option.name.clone() })?,
        };

        if !option.is_array && self.cmd.value_count(&option.name) > 0 {
            return Err(ParseErr::OptionIsNotArray { option: option.name.clone() });
        }
        trace!(option = option.name.as_str(), value, "Option value");
        self.cmd.add_value(&option.name, value);
        Ok(())
    }

    fn handle_defaults(&mut self) {
        let options = self.options;
        for &option in options.get_options() {
            if option.default.is_empty() || !options.owns_name(option) || self.cmd.has_option(&option.name) {
                continue;
            }
            debug!(option = option.name.as_str(), default = ?option.default, "Applying default values");
            self.cmd.set_values(&option.name, option.default.clone());
        }
    }
}
