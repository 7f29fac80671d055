use std::collections::VecDeque;
use std::io::{stdout, Write};

use tracing::debug;

use crate::error::HelpErr;
use crate::option::OptCfg;
use crate::util::Util;
use crate::wrap::LineWrapIter;

/// Width of every rendered help line, margins included.
pub const LINE_WIDTH: usize = 80;

const DEFAULT_DESC_PAD: usize = 2;

/// Layout of the help text.
///
/// The usage text is wrapped between the margins. Option descriptions start at
/// column `indent` after the left margin. An `indent` of zero is computed as the
/// length of the longest option header plus two.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WrapOpts {
    pub margin_left: usize,
    pub margin_right: usize,
    pub indent: usize,
}

/// Whether a [`HelpIter`] has lines left after the one just returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterStatus {
    HasMore,
    NoMore,
}

#[derive(Debug)]
enum Block {
    Text {
        margin: usize,
        wrap: LineWrapIter,
    },
    Blank {
        done: bool,
    },
    Opt {
        margin: usize,
        indent: usize,
        header: String,
        header_done: bool,
        wrap: LineWrapIter,
    },
}

impl Block {
    fn has_more(&self) -> bool {
        match self {
            Block::Text { wrap, .. } => wrap.has_more(),
            Block::Blank { done } => !done,
            Block::Opt { header_done, wrap, .. } => !header_done || wrap.has_more(),
        }
    }

    fn next_line(&mut self) -> Option<String> {
        match self {
            Block::Text { margin, wrap } => wrap.next_line().map(|line| indented(*margin, &line)),
            Block::Blank { done } => {
                if *done {
                    return None;
                }
                *done = true;
                Some(String::new())
            }
            Block::Opt { margin, indent, header, header_done, wrap } => {
                if *header_done {
                    return wrap.next_line().map(|line| indented(*margin + *indent, &line));
                }
                *header_done = true;

                let header_width = Util::width(header);
                let mut line = indented(*margin, header);
                if header_width < *indent {
                    if let Some(desc) = wrap.next_line() {
                        line.push_str(&Util::padding(*indent - header_width));
                        line.push_str(&desc);
                    }
                }
                Some(line)
            }
        }
    }
}

fn indented(width: usize, line: &str) -> String {
    if line.is_empty() {
        return String::new();
    }
    format!("{}{}", Util::padding(width), line)
}

/// Forward-only sequence of help lines, built by [`HelpFormatter::iter`].
///
/// Lines are wrapped as they are requested. Once the sequence is exhausted,
/// [`HelpIter::next_line`] keeps returning an empty line with [`IterStatus::NoMore`].
///
/// # Examples
///
/// ```
/// use cliargs::{make_help, IterStatus, OptCfg, WrapOpts};
///
/// let cfgs = vec![OptCfg::builder().name("foo").desc("the foo option").build()];
/// let mut iter = make_help("usage: app [--foo]", &cfgs, WrapOpts::default()).unwrap();
///
/// assert_eq!(iter.next_line(), ("usage: app [--foo]".to_string(), IterStatus::HasMore));
/// assert_eq!(iter.next_line(), ("".to_string(), IterStatus::HasMore));
/// assert_eq!(iter.next_line(), ("--foo  the foo option".to_string(), IterStatus::NoMore));
/// assert_eq!(iter.next_line(), ("".to_string(), IterStatus::NoMore));
/// ```
#[derive(Debug)]
pub struct HelpIter {
    blocks: VecDeque<Block>,
    exhausted: bool,
}

impl HelpIter {
    /// Advance to the next line.
    ///
    /// The status tells whether more lines follow the returned one.
    pub fn next_line(&mut self) -> (String, IterStatus) {
        loop {
            let Some(block) = self.blocks.front_mut() else {
                self.exhausted = true;
                return (String::new(), IterStatus::NoMore);
            };

            match block.next_line() {
                Some(line) => {
                    if !block.has_more() {
                        self.blocks.pop_front();
                    }
                    if self.blocks.is_empty() {
                        self.exhausted = true;
                        return (line, IterStatus::NoMore);
                    }
                    return (line, IterStatus::HasMore);
                }
                None => {
                    self.blocks.pop_front();
                }
            }
        }
    }
}

impl Iterator for HelpIter {
    type Item = String;

    /// Yields every line, including the single empty line of an empty help.
    fn next(&mut self) -> Option<String> {
        if self.exhausted {
            return None;
        }
        Some(self.next_line().0)
    }
}

/// `HelpFormatter` renders the usage text and the option descriptions.
///
/// The output format is like:
/// ```txt
/// <usage, wrapped>
///
/// --<name>, -<alias>  <description, wrapped
///                     at the indent>
///
/// -<name>             <description>
/// ```
///
/// Configs with an empty description, and the wildcard config, are not listed.
pub struct HelpFormatter<'a> {
    usage: &'a str,
    cfgs: &'a [OptCfg],
    wrap_opts: WrapOpts,
}

impl<'a> HelpFormatter<'a> {
    /// Create a `HelpFormatter` with the default [`WrapOpts`].
    pub fn new(usage: &'a str, cfgs: &'a [OptCfg]) -> HelpFormatter<'a> {
        HelpFormatter { usage, cfgs, wrap_opts: WrapOpts::default() }
    }

    pub fn set_wrap_opts(&mut self, wrap_opts: WrapOpts) {
        self.wrap_opts = wrap_opts;
    }

    /// Validate the layout and build the line sequence.
    ///
    /// # Error
    ///
    /// [`HelpErr::MarginsAndIndentExceedLineWidth`] if the margins and the indent
    /// take up [`LINE_WIDTH`] or more.
    pub fn iter(&self) -> Result<HelpIter, HelpErr> {
        let WrapOpts { margin_left, margin_right, .. } = self.wrap_opts;
        let options: Vec<&OptCfg> = self.cfgs.iter().filter(|cfg| !cfg.is_wildcard()).collect();
        let headers: Vec<String> = options.iter().map(|cfg| cfg.header()).collect();

        let indent = if self.wrap_opts.indent > 0 {
            self.wrap_opts.indent
        } else {
            headers.iter().map(|h| Util::width(h)).max().unwrap_or(0) + DEFAULT_DESC_PAD
        };

        let used = margin_left.checked_add(margin_right).and_then(|m| m.checked_add(indent));
        if used.map_or(true, |used| used >= LINE_WIDTH) {
            return Err(HelpErr::MarginsAndIndentExceedLineWidth {
                line_width: LINE_WIDTH,
                margin_left,
                margin_right,
                indent: self.wrap_opts.indent,
            });
        }

        let text_width = LINE_WIDTH - margin_left - margin_right;
        let desc_width = text_width - indent;
        debug!(indent, text_width, desc_width, options = options.len(), "Computed help layout");

        let mut blocks = VecDeque::new();
        if !self.usage.is_empty() {
            blocks.push_back(Block::Text {
                margin: margin_left,
                wrap: LineWrapIter::new(self.usage, text_width),
            });
        }

        for (cfg, header) in options.into_iter().zip(headers) {
            if cfg.desc.is_empty() {
                continue;
            }
            blocks.push_back(Block::Blank { done: false });
            blocks.push_back(Block::Opt {
                margin: margin_left,
                indent,
                header,
                header_done: false,
                wrap: LineWrapIter::new(&cfg.desc, desc_width),
            });
        }

        Ok(HelpIter { blocks, exhausted: false })
    }

    /// Write every help line to `out`, each followed by a newline.
    pub fn write_help<W: Write>(&self, out: &mut W) -> Result<(), HelpErr> {
        for line in self.iter()? {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// Print the help to stdout.
    ///
    /// Also see [`HelpFormatter::write_help`].
    pub fn print_help(&self) -> Result<(), HelpErr> {
        self.write_help(&mut stdout().lock())
    }
}

/// Build the help lines for `usage` and the descriptions of `cfgs`.
///
/// Also see [`HelpFormatter::iter`].
pub fn make_help(usage: &str, cfgs: &[OptCfg], wrap_opts: WrapOpts) -> Result<HelpIter, HelpErr> {
    let mut formatter = HelpFormatter::new(usage, cfgs);
    formatter.set_wrap_opts(wrap_opts);
    formatter.iter()
}

/// Print the help lines for `usage` and the descriptions of `cfgs` to stdout.
///
/// Also see [`HelpFormatter::print_help`].
pub fn print_help(usage: &str, cfgs: &[OptCfg], wrap_opts: WrapOpts) -> Result<(), HelpErr> {
    let mut formatter = HelpFormatter::new(usage, cfgs);
    formatter.set_wrap_opts(wrap_opts);
    formatter.print_help()
}

#[cfg(test)]
mod test {
    use crate::error::HelpErr;
    use crate::format::{make_help, print_help, HelpFormatter, HelpIter, IterStatus, WrapOpts, LINE_WIDTH};
    use crate::option::OptCfg;

    const LONG_USAGE: &str = "The Go programming language is an open source project to make programmers more productive.";

    fn two_opts() -> Vec<OptCfg> {
        vec![
            OptCfg::builder().name("foo").desc("This is the description of --foo option.").build(),
            OptCfg::builder()
                .name("bar-baz")
                .alias("b")
                .has_arg(true)
                .desc("This is the description of --bar-baz option. This option takes one parameter.")
                .build(),
        ]
    }

    fn assert_lines(iter: &mut HelpIter, expected: &[&str]) {
        for (i, line) in expected.iter().enumerate() {
            let status = if i + 1 == expected.len() { IterStatus::NoMore } else { IterStatus::HasMore };
            assert_eq!((line.to_string(), status), iter.next_line(), "line {}", i);
        }
        assert_eq!((String::new(), IterStatus::NoMore), iter.next_line());
        assert_eq!((String::new(), IterStatus::NoMore), iter.next_line());
    }

    #[test]
    fn test_empty_usage_and_no_options() {
        let mut iter = make_help("", &[], WrapOpts::default()).unwrap();
        assert_eq!((String::new(), IterStatus::NoMore), iter.next_line());
        assert_eq!((String::new(), IterStatus::NoMore), iter.next_line());

        let lines: Vec<String> = make_help("", &[], WrapOpts::default()).unwrap().collect();
        assert_eq!(vec![String::new()], lines);
    }

    #[test]
    fn test_short_usage() {
        let usage = "abcdefghijklmnopqrstuvwxyz";
        let mut iter = make_help(usage, &[], WrapOpts::default()).unwrap();
        assert_lines(&mut iter, &[usage]);
    }

    #[test]
    fn test_long_usage() {
        let mut iter = make_help(LONG_USAGE, &[], WrapOpts::default()).unwrap();
        assert_lines(&mut iter, &[&LONG_USAGE[0..79], &LONG_USAGE[79..90]]);
    }

    #[test]
    fn test_long_usage_and_one_option() {
        let cfgs = vec![OptCfg::builder().name("foo").desc("This is the description of --foo option.").build()];
        let mut iter = make_help(LONG_USAGE, &cfgs, WrapOpts::default()).unwrap();
        assert_lines(
            &mut iter,
            &[
                &LONG_USAGE[0..79],
                &LONG_USAGE[79..90],
                "",
                "--foo  This is the description of --foo option.",
            ],
        );
    }

    #[test]
    fn test_computed_indent() {
        let mut iter = make_help(LONG_USAGE, &two_opts(), WrapOpts::default()).unwrap();
        assert_lines(
            &mut iter,
            &[
                &LONG_USAGE[0..79],
                &LONG_USAGE[79..90],
                "",
                "--foo          This is the description of --foo option.",
                "",
                "--bar-baz, -b  This is the description of --bar-baz option. This option takes ",
                "               one parameter.",
            ],
        );
    }

    #[test]
    fn test_large_indent() {
        let wrap_opts = WrapOpts { indent: 20, ..WrapOpts::default() };
        let mut iter = make_help(LONG_USAGE, &two_opts(), wrap_opts).unwrap();
        assert_lines(
            &mut iter,
            &[
                &LONG_USAGE[0..79],
                &LONG_USAGE[79..90],
                "",
                "--foo               This is the description of --foo option.",
                "",
                "--bar-baz, -b       This is the description of --bar-baz option. This option ",
                "                    takes one parameter.",
            ],
        );
    }

    #[test]
    fn test_short_indent() {
        let wrap_opts = WrapOpts { indent: 10, ..WrapOpts::default() };
        let mut iter = make_help(LONG_USAGE, &two_opts(), wrap_opts).unwrap();
        assert_lines(
            &mut iter,
            &[
                &LONG_USAGE[0..79],
                &LONG_USAGE[79..90],
                "",
                "--foo     This is the description of --foo option.",
                "",
                "--bar-baz, -b",
                "          This is the description of --bar-baz option. This option takes one ",
                "          parameter.",
            ],
        );
    }

    #[test]
    fn test_margins() {
        let wrap_opts = WrapOpts { margin_left: 5, margin_right: 5, indent: 0 };
        let mut iter = make_help(LONG_USAGE, &two_opts(), wrap_opts).unwrap();
        let first = format!("     {}", &LONG_USAGE[0..62]);
        let second = format!("     {}", &LONG_USAGE[62..90]);
        assert_lines(
            &mut iter,
            &[
                &first,
                &second,
                "",
                "     --foo          This is the description of --foo option.",
                "",
                "     --bar-baz, -b  This is the description of --bar-baz option. This ",
                "                    option takes one parameter.",
            ],
        );
    }

    #[test]
    fn test_short_name_and_long_alias() {
        let cfgs = vec![
            OptCfg::builder().name("foo").desc("This is the description of --foo option.").build(),
            OptCfg::builder()
                .name("b")
                .alias("bar-baz")
                .has_arg(true)
                .desc("This is the description of --bar-baz option. This option takes one parameter.")
                .build(),
        ];
        let wrap_opts = WrapOpts { margin_left: 5, margin_right: 5, indent: 0 };
        let mut iter = make_help(LONG_USAGE, &cfgs, wrap_opts).unwrap();
        let first = format!("     {}", &LONG_USAGE[0..62]);
        let second = format!("     {}", &LONG_USAGE[62..90]);
        assert_lines(
            &mut iter,
            &[
                &first,
                &second,
                "",
                "     --foo          This is the description of --foo option.",
                "",
                "     -b, --bar-baz  This is the description of --bar-baz option. This ",
                "                    option takes one parameter.",
            ],
        );
    }

    #[test]
    fn test_options_without_desc_and_wildcard_are_skipped() {
        let cfgs = vec![
            OptCfg::builder().name("a-very-long-option-name").build(),
            OptCfg::builder().name("foo").desc("The foo.").build(),
            OptCfg::wildcard(),
        ];
        let mut iter = make_help("", &cfgs, WrapOpts::default()).unwrap();
        // the undescribed option still counts toward the computed indent
        assert_lines(&mut iter, &["", "--foo                      The foo."]);
    }

    #[test]
    fn test_margins_and_indent_exceed_line_width() {
        let wrap_opts = WrapOpts { margin_left: 50, margin_right: 50, indent: 10 };
        match make_help(LONG_USAGE, &two_opts(), wrap_opts) {
            Err(HelpErr::MarginsAndIndentExceedLineWidth { line_width, margin_left, margin_right, indent }) => {
                assert_eq!(LINE_WIDTH, line_width);
                assert_eq!(50, margin_left);
                assert_eq!(50, margin_right);
                assert_eq!(10, indent);
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_computed_indent_exceeding_line_width_reports_given_indent() {
        let wrap_opts = WrapOpts { margin_left: 35, margin_right: 30, indent: 0 };
        match make_help(LONG_USAGE, &two_opts(), wrap_opts) {
            Err(HelpErr::MarginsAndIndentExceedLineWidth { indent, .. }) => assert_eq!(0, indent),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_oversized_layout_values_fail_without_overflow() {
        let layouts = [
            WrapOpts { margin_left: usize::MAX, margin_right: 1, indent: 0 },
            WrapOpts { margin_left: 1, margin_right: usize::MAX, indent: 0 },
            WrapOpts { margin_left: 0, margin_right: 1, indent: usize::MAX },
        ];
        for wrap_opts in layouts {
            match make_help("usage", &[], wrap_opts) {
                Err(HelpErr::MarginsAndIndentExceedLineWidth { line_width, margin_left, margin_right, indent }) => {
                    assert_eq!(LINE_WIDTH, line_width);
                    assert_eq!(wrap_opts.margin_left, margin_left);
                    assert_eq!(wrap_opts.margin_right, margin_right);
                    assert_eq!(wrap_opts.indent, indent);
                }
                other => panic!("unexpected result: {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_usage_newlines_keep_margin_off_blank_lines() {
        let wrap_opts = WrapOpts { margin_left: 2, ..WrapOpts::default() };
        let mut iter = make_help("usage: app\n\nA tool.", &[], wrap_opts).unwrap();
        assert_lines(&mut iter, &["  usage: app", "", "  A tool."]);
    }

    #[test]
    fn test_iterator() {
        let lines: Vec<String> = make_help(LONG_USAGE, &two_opts(), WrapOpts::default()).unwrap().collect();
        assert_eq!(7, lines.len());
        assert_eq!("               one parameter.", lines[6]);
    }

    #[test]
    fn test_write_help() {
        let cfgs = two_opts();
        let mut formatter = HelpFormatter::new("usage: app", &cfgs);
        formatter.set_wrap_opts(WrapOpts { margin_left: 1, margin_right: 0, indent: 16 });

        let mut out = Vec::new();
        formatter.write_help(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let expected = concat!(
            " usage: app\n",
            "\n",
            " --foo           This is the description of --foo option.\n",
            "\n",
            " --bar-baz, -b   This is the description of --bar-baz option. This option takes \n",
            "                 one parameter.\n",
        );
        assert_eq!(expected, text);
    }

    #[test]
    fn test_print_help() {
        let wrap_opts = WrapOpts { margin_left: 5, margin_right: 5, indent: 10 };
        assert!(print_help(LONG_USAGE, &two_opts(), wrap_opts).is_ok());
    }

    #[test]
    fn test_print_help_error() {
        let wrap_opts = WrapOpts { margin_left: 50, margin_right: 50, indent: 10 };
        let err = print_help(LONG_USAGE, &two_opts(), wrap_opts).unwrap_err();
        assert!(matches!(err, HelpErr::MarginsAndIndentExceedLineWidth { indent: 10, .. }));
    }
}
