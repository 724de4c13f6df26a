use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::DaogenError;

/// What to do with a file that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Overwrite,
    Skip,
}

/// Decides whether existing output files get replaced.
pub trait ConflictResolver {
    fn resolve(&mut self, path: &Path) -> Resolution;
}

/// Replace existing files without asking.
#[derive(Debug, Default)]
pub struct AlwaysOverwrite;

impl ConflictResolver for AlwaysOverwrite {
    fn resolve(&mut self, _path: &Path) -> Resolution {
        Resolution::Overwrite
    }
}

/// Keep every existing file.
#[derive(Debug, Default)]
pub struct NeverOverwrite;

impl ConflictResolver for NeverOverwrite {
    fn resolve(&mut self, _path: &Path) -> Resolution {
        Resolution::Skip
    }
}

/// Asks on `output` and reads a y/n answer from `input`.
pub struct PromptResolver<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptResolver<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConflictResolver for PromptResolver<R, W> {
    fn resolve(&mut self, path: &Path) -> Resolution {
        let asked = write!(
            self.output,
            "file {} already exists, overwrite it? [y/n]: ",
            path.display()
        )
        .and_then(|()| self.output.flush());
        if let Err(e) = asked {
            tracing::warn!("Could not prompt for {}: {e}", path.display());
            return Resolution::Skip;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) if matches!(answer.trim(), "y" | "Y") => Resolution::Overwrite,
            Ok(_) => Resolution::Skip,
            Err(e) => {
                tracing::warn!("Could not read answer for {}: {e}", path.display());
                Resolution::Skip
            }
        }
    }
}

/// Write `contents` to `dir/name`, consulting `resolver` when the file exists.
pub fn write_file(
    dir: &Path,
    name: &str,
    contents: &str,
    resolver: &mut dyn ConflictResolver,
) -> Result<PathBuf, DaogenError> {
    let path = dir.join(name);
    if path.exists() && resolver.resolve(&path) == Resolution::Skip {
        return Err(DaogenError::Declined(path));
    }
    fs::write(&path, contents)?;
    Ok(path)
}
