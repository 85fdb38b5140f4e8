use shell_escape::escape;
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

/// A fully formed invocation of one toolkit program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCommand {
    program: String,
    args: Vec<String>,
}

impl PlannedCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a flag followed by its value.
    pub fn opt(self, flag: &str, value: impl Into<String>) -> Self {
        self.arg(flag).arg(value)
    }

    pub fn path_opt(self, flag: &str, path: &Path) -> Self {
        self.opt(flag, path.display().to_string())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Render as a single shell line, quoting arguments where needed.
    pub fn to_shell_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|part| escape(Cow::Borrowed(part.as_str())).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for PlannedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell_line())
    }
}
