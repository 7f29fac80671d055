use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use tracing::{debug, trace};

use crate::error::OptionErr;
use crate::util::Util;

/// The `OptCfg` declares a single recognized option.
///
/// All values passed with the option's name or any of its aliases are collected
/// under [`OptCfg::name`], the canonical name.
///
/// # Examples
///
/// Declare a flag `--verbose, -v`:
/// ```
/// use cliargs::OptCfg;
/// let cfg = OptCfg::builder().name("verbose").alias("v").desc("print verbosely").build();
/// ```
///
/// Declare an option collecting every `--include <dir>` with a default:
/// ```
/// use cliargs::OptCfg;
/// let cfg = OptCfg::builder()
///     .name("include")
///     .alias("I")
///     .has_arg(true)
///     .is_array(true)
///     .default_value("src")
///     .build();
/// ```
///
/// Accept any other option as a flag:
/// ```
/// use cliargs::OptCfg;
/// let cfg = OptCfg::wildcard();
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptCfg {
    /// Canonical name. [`OptCfg::WILDCARD`] makes this config the catch-all.
    pub name: String,
    /// Alternate names, matched exactly like `name`.
    pub aliases: Vec<String>,
    /// Whether the option consumes a value.
    pub has_arg: bool,
    /// Whether the option may be given more than once.
    pub is_array: bool,
    /// Values used when the option is not given at all.
    pub default: Vec<String>,
    /// Description shown in the help text.
    pub desc: String,
}

impl OptCfg {
    /// The name reserved for the wildcard config.
    pub const WILDCARD: &'static str = "*";

    /// Create a [`OptCfgBuilder`] to config the option.
    pub fn builder() -> OptCfgBuilder {
        OptCfgBuilder { cfg: OptCfg::default() }
    }

    /// The catch-all config accepting any unconfigured option as a flag.
    pub fn wildcard() -> OptCfg {
        OptCfg { name: Self::WILDCARD.to_string(), ..OptCfg::default() }
    }

    pub fn is_wildcard(&self) -> bool {
        self.name == Self::WILDCARD
    }

    /// Name followed by the aliases, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(|a| a.as_str()))
    }

    /// The header listing the option in help text, like `--foo-bar, -f`.
    pub fn header(&self) -> String {
        self.names()
            .map(Util::with_leading_hyphens)
            .collect::<Vec<String>>()
            .join(", ")
    }

    fn flag(name: &str) -> OptCfg {
        OptCfg { name: name.to_string(), ..OptCfg::default() }
    }

    fn validate(&self) -> Result<(), OptionErr> {
        if self.has_arg {
            return Ok(());
        }
        if self.is_array {
            return Err(OptionErr::ConfigIsArrayButHasNoArg { option: self.name.clone() });
        }
        if !self.default.is_empty() {
            return Err(OptionErr::ConfigHasDefaultButHasNoArg { option: self.name.clone() });
        }
        Ok(())
    }
}

impl Display for OptCfg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header())?;
        if self.has_arg {
            f.write_str(if self.is_array { " [ARG...]" } else { " [ARG]" })?;
        }
        if !self.desc.is_empty() {
            write!(f, " :: {}", self.desc)?;
        }
        Ok(())
    }
}

/// An builder struct for [`OptCfg`].
pub struct OptCfgBuilder {
    cfg: OptCfg,
}

impl OptCfgBuilder {
    /// Build the [`OptCfg`].
    ///
    /// The config is validated when the configs are parsed against, see
    /// [`Options::new`].
    pub fn build(self) -> OptCfg {
        self.cfg
    }

    /// Set the canonical name.
    pub fn name(mut self, name: &str) -> Self {
        self.cfg.name = name.to_owned();
        self
    }

    /// Add an alias.
    pub fn alias(mut self, alias: &str) -> Self {
        self.cfg.aliases.push(alias.to_owned());
        self
    }

    /// Set whether the option takes a value.
    pub fn has_arg(mut self, has_arg: bool) -> Self {
        self.cfg.has_arg = has_arg;
        self
    }

    /// Set whether the option may be given multiple times.
    pub fn is_array(mut self, is_array: bool) -> Self {
        self.cfg.is_array = is_array;
        self
    }

    /// Add a default value.
    pub fn default_value(mut self, value: &str) -> Self {
        self.cfg.default.push(value.to_owned());
        self
    }

    /// Set the description of the option.
    pub fn desc(mut self, desc: &str) -> Self {
        self.cfg.desc = desc.to_owned();
        self
    }
}

/// The `Options` is the validated registry of [`OptCfg`], indexed by name and alias.
#[derive(Clone, Debug)]
pub struct Options<'a> {
    cfgs: Vec<&'a OptCfg>,
    names: HashMap<&'a str, usize>,
    wildcard: Option<&'a OptCfg>,
}

impl<'a> Options<'a> {
    /// Validate `cfgs` and index them.
    ///
    /// When several configs share a name or alias, the first one declared wins.
    ///
    /// # Error
    ///
    /// Returns the first [`OptionErr`] found, checking configs in order.
    pub fn new(cfgs: &'a [OptCfg]) -> Result<Options<'a>, OptionErr> {
        let mut options = Options { cfgs: Vec::new(), names: HashMap::new(), wildcard: None };

        for cfg in cfgs {
            if cfg.is_wildcard() {
                options.wildcard.get_or_insert(cfg);
                continue;
            }
            cfg.validate()?;
            trace!(option = %cfg, "Registered option");

            let index = options.cfgs.len();
            options.cfgs.push(cfg);
            for name in cfg.names() {
                options.names.entry(name).or_insert(index);
            }
        }

        debug!(
            options = options.cfgs.len(),
            names = options.names.len(),
            wildcard = options.wildcard.is_some(),
            "Built option registry"
        );
        Ok(options)
    }

    /// Resolve a name or alias to its config.
    ///
    /// An unconfigured name resolves to a flag-only config named after it
    /// if a wildcard is registered.
    pub fn get_option(&self, name: &str) -> Option<Cow<'a, OptCfg>> {
        if let Some(&index) = self.names.get(name) {
            return Some(Cow::Borrowed(self.cfgs[index]));
        }
        self.wildcard.map(|_| Cow::Owned(OptCfg::flag(name)))
    }

    /// Whether `cfg` is the config its own name resolves to.
    ///
    /// A config whose name was taken by an earlier config's name or alias is unreachable.
    pub fn owns_name(&self, cfg: &OptCfg) -> bool {
        self.names
            .get(cfg.name.as_str())
            .is_some_and(|&index| std::ptr::eq(self.cfgs[index], cfg))
    }

    /// Configs in declaration order, wildcard excluded.
    pub fn get_options(&self) -> &[&'a OptCfg] {
        &self.cfgs
    }
}
