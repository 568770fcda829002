//! Input sources for reading.

use std::{
    env, fmt,
    fs::File,
    io::{self, IsTerminal as _},
    path::{Path, PathBuf},
};

/// An input source for reading.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Input {
    /// A path from which to read a file.
    Path(PathBuf),
    /// Stdin.
    Stdin,
}

impl Input {
    /// By default, creating a stdin `Input` checks that stdin is not an interactive terminal,
    /// since reading would otherwise hang waiting for data.
    ///
    /// In some contexts, e.g. testing, this can cause issues, and so it may be disabled by setting
    /// this environment variable, or by using [`Input::new_unchecked`].
    pub const ENV_KEY_DISABLE_CHECK: &'static str = "STRPROFILES_ALLOW_STDIN";

    /// Creates a new input source, reading from stdin if no path is given.
    pub fn new(path: Option<PathBuf>) -> io::Result<Self> {
        let input = Self::new_unchecked(path);

        let check = env::var_os(Self::ENV_KEY_DISABLE_CHECK).is_none();
        if input == Input::Stdin && check && io::stdin().is_terminal() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "received no input via file or stdin",
            ));
        }

        Ok(input)
    }

    /// Creates a new input source without checking that any data is available.
    pub fn new_unchecked(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdin, Self::Path)
    }

    /// Open the input for buffered reading.
    pub fn open(&self) -> io::Result<Box<dyn io::BufRead>> {
        let reader: Box<dyn io::BufRead> = match self {
            Input::Path(path) => Box::new(io::BufReader::new(File::open(path)?)),
            Input::Stdin => Box::new(io::stdin().lock()),
        };

        Ok(reader)
    }

    /// Returns the path if reading from a file, otherwise `None`.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Input::Path(path) => Some(path.as_path()),
            Input::Stdin => None,
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Path(path) => write!(f, "'{}'", path.display()),
            Input::Stdin => f.write_str("stdin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_unchecked() {
        assert_eq!(Input::new_unchecked(None), Input::Stdin);
        assert_eq!(
            Input::new_unchecked(Some(PathBuf::from("ab.csv"))).as_path(),
            Some(Path::new("ab.csv"))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Input::Path(PathBuf::from("ab.csv")).to_string(), "'ab.csv'");
        assert_eq!(Input::Stdin.to_string(), "stdin");
    }
}
