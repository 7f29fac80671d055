use std::collections::HashMap;
use std::str::FromStr;

/// The `Command` is the struct holding the parsed program name, options and arguments.
///
/// Options are looked up by their canonical name, see [`OptCfg::name`](crate::OptCfg::name).
/// An option is present if it was given on the command line or has default values.
///
/// The arguments are the tokens that are neither an option nor an option's value,
/// in the order they appeared.
///
/// `Command::default()` is the empty command: no name, no options, no arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    name: String,
    args: Vec<String>,
    options: HashMap<String, Vec<String>>,
}

/// Mutable state of a single parse, turned into a [`Command`] once the scan succeeds.
#[derive(Debug, Default)]
pub(crate) struct CmdBuilder {
    command: Command,
}

impl CmdBuilder {
    pub fn build(self) -> Command {
        self.command
    }

    pub fn name(&mut self, name: String) {
        self.command.name = name;
    }

    pub fn add_arg(&mut self, arg: &str) {
        self.command.args.push(arg.to_owned());
    }

    /// Mark the option present without adding a value.
    pub fn add_option(&mut self, name: &str) {
        self.command.options.entry(name.to_owned()).or_default();
    }

    pub fn add_value(&mut self, name: &str, value: &str) {
        self.command.options.entry(name.to_owned()).or_default().push(value.to_owned());
    }

    pub fn set_values(&mut self, name: &str, values: Vec<String>) {
        self.command.options.insert(name.to_owned(), values);
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.command.has_opt(name)
    }

    pub fn value_count(&self, name: &str) -> usize {
        self.command.options.get(name).map_or(0, |values| values.len())
    }
}

impl Command {
    /// Get the program name, the final path segment of the first argument.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the arguments that are not captured by any option.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Check if the option is given or has default values.
    pub fn has_opt(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// Get the first value of the option.
    ///
    /// An empty string is returned if the option is absent or has no value.
    pub fn opt_arg(&self, name: &str) -> &str {
        self.options
            .get(name)
            .and_then(|values| values.first())
            .map_or("", |value| value.as_str())
    }

    /// Get all values of the option.
    ///
    /// [`None`] is returned if the option is absent. A flag which is present
    /// yields an empty slice.
    pub fn opt_args(&self, name: &str) -> Option<&[String]> {
        self.options.get(name).map(|values| values.as_slice())
    }

    /// Get the first value of the option converted to `T`.
    ///
    /// [`None`] is returned if the option is absent or has no value.
    ///
    /// Also see [`Command::opt_values`].
    pub fn opt_value<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        let value = self.options.get(name)?.first()?;
        Some(T::from_str(value))
    }

    /// Get all values of the option converted to `T`.
    ///
    /// Also see [`Command::opt_value`].
    pub fn opt_values<T: FromStr>(&self, name: &str) -> Option<Vec<Result<T, T::Err>>> {
        let values = self.options.get(name)?;
        Some(values.iter().map(|v| T::from_str(v)).collect())
    }

    /// Canonical names of the present options, in no particular order.
    pub fn opt_names(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(|k| k.as_str())
    }
}
