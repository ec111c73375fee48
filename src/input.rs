//! Where diff text comes from: a file or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to obtain input text.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read diff from stdin")]
    Stdin(#[source] io::Error),
}

/// A source of text named on the command line. `-` or no argument means stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            Some(path) if path != Path::new("-") => Source::File(path.to_path_buf()),
            _ => Source::Stdin,
        }
    }

    /// Read the whole source into a string.
    pub fn read(&self) -> Result<String, InputError> {
        match self {
            Source::Stdin => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(InputError::Stdin)?;
                Ok(buf)
            }
            Source::File(path) => read_file(path),
        }
    }
}

/// Read a file, mapping failures to [`InputError::Read`].
pub fn read_file(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a file that may not exist yet. `Ok(None)` when it is missing.
pub fn read_optional(path: &Path) -> Result<Option<String>, InputError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(InputError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
