//! # The cliargs Library
//!
//! The cliargs library parses command line arguments against a declared set of
//! options, and renders the help text of those options.
//!
//! Supported syntax:
//!
//! - GNU like long options, for example `--max-depth=1` or `--max-depth 1`
//! - POSIX like short options, for example `-v`, `-n=3`, `-n 3`
//! - Combined short flags, for example `-zxvf`
//! - Values attached with `=`, for example `--name=value` or `-n=value`
//!
//! A help text rendered by cliargs looks like this:
//!
//! ```txt
//! usage: app [--verbose] [--include <dir>...] <file>
//!
//! --verbose, -v      Print every processed file.
//!
//! --include, -I      Add a directory to search. May be given more than once,
//!                    defaults to src.
//! ```
//!
//! # Examples
//!
//! Parse the arguments.
//!
//! ```
//! use cliargs::{parse_with, OptCfg};
//!
//! let cfgs = vec![
//!     OptCfg::builder().name("verbose").alias("v").build(),
//!     OptCfg::builder()
//!         .name("include")
//!         .alias("I")
//!         .has_arg(true)
//!         .is_array(true)
//!         .default_value("src")
//!         .build(),
//!     OptCfg::builder().name("jobs").alias("j").has_arg(true).build(),
//! ];
//!
//! let args = ["/usr/bin/app", "-vj", "4", "main.rs", "-I=lib", "--include", "tests"];
//! let cmd = parse_with(&args, &cfgs).unwrap();
//!
//! assert_eq!("app", cmd.name());
//! assert!(cmd.has_opt("verbose"));
//! assert_eq!(Some(Ok(4)), cmd.opt_value::<u32>("jobs"));
//! assert_eq!(Some(&["lib".to_string(), "tests".to_string()][..]), cmd.opt_args("include"));
//! assert_eq!(&["main.rs".to_string()], cmd.args());
//! ```
//!
//! Report a parse error, then print the help.
//!
//! ```
//! use cliargs::{parse_with, print_help, OptCfg, ParseErr, WrapOpts};
//!
//! let cfgs = vec![
//!     OptCfg::builder().name("verbose").alias("v").desc("Print every processed file.").build(),
//! ];
//!
//! match parse_with(&["app", "--quiet"], &cfgs) {
//!     Err(err @ ParseErr::UnconfiguredOption { .. }) => {
//!         eprintln!("{}", err);
//!         let wrap_opts = WrapOpts { margin_left: 2, ..WrapOpts::default() };
//!         print_help("usage: app [--verbose]", &cfgs, wrap_opts).unwrap();
//!     }
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

pub use cmd::Command;
pub use error::{HelpErr, OptionErr, ParseErr};
pub use format::{make_help, print_help, HelpFormatter, HelpIter, IterStatus, WrapOpts, LINE_WIDTH};
pub use option::{OptCfg, OptCfgBuilder, Options};
pub use parser::parse_with;
pub use wrap::LineWrapIter;

mod cmd;
mod error;
mod format;
mod option;
mod parser;
mod util;
mod wrap;
