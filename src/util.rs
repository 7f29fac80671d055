use std::path::Path;

pub struct Util;

impl Util {
    /// Final path segment of `path`, or an empty string if `path` is empty.
    ///
    /// A path ending in `/`, `.` or `..` keeps that last component as written.
    pub fn program_name(path: &str) -> String {
        let path = Path::new(path);
        match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => path
                .components()
                .next_back()
                .map(|last| last.as_os_str().to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    /// Split an option body at the first `=` into the name and the inline value.
    pub fn split_inline_value(body: &str) -> (&str, Option<&str>) {
        match body.find('=') {
            Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
            None => (body, None),
        }
    }

    /// Prefix an option name the way it is typed: `-x` for one char, `--name` otherwise.
    pub fn with_leading_hyphens(name: &str) -> String {
        if Self::width(name) == 1 {
            format!("-{}", name)
        } else {
            format!("--{}", name)
        }
    }

    /// Number of columns the text occupies, counted in chars.
    pub fn width(text: &str) -> usize {
        text.chars().count()
    }

    pub fn padding(len: usize) -> String {
        " ".repeat(len)
    }
}
