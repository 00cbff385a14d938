//! source files

use std::{
    ffi::OsString,
    ops::Range,
    path::{Path, PathBuf},
    sync::Arc,
};

/// A single compilation unit, usually corresponding to a file on disk.
///
/// Note: this type uses `Arc` internally so that it can be cheaply cloned and
/// sent across threads.
#[derive(Clone, Debug, PartialEq)]
pub struct Source {
    /// The non-canonicalized path to this source, suitable for printing.
    path: PathBuf,
    contents: Arc<str>,
    /// The offset of the start of each line, for efficiently fetching lines
    /// (for error reporting, e.g.)
    line_offsets: Arc<[usize]>,
}

/// An error that occurs when trying to load a source.
#[derive(Clone, Debug, thiserror::Error)]
#[error("Failed to load source at '{}': '{cause}'", Path::new(.path.as_os_str()).display())]
pub struct SourceLoadError {
    cause: Arc<str>,
    path: OsString,
}

impl Source {
    /// Create a source from text in memory.
    ///
    /// The path is only used for display.
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<Arc<str>>) -> Self {
        let contents = text.into();
        let line_offsets = line_offsets(&contents);
        Source {
            path: path.into(),
            contents,
            line_offsets,
        }
    }

    /// Read the utf-8 encoded file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceLoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|cause| SourceLoadError::new(path.into(), cause))?;
        log::debug!("loaded {} ({} bytes)", path.display(), text.len());
        Ok(Source::from_text(path, text))
    }

    /// The raw text for this source
    pub fn text(&self) -> &str {
        &self.contents
    }

    /// The source's path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Compute the line and column for a given utf-8 offset.
    ///
    /// The line is 1-indexed, the column (a byte offset into the line) is
    /// 0-indexed.
    pub fn line_col_for_offset(&self, offset: usize) -> (usize, usize) {
        let offset_idx = self.line_index(offset);
        let offset_of_line = self.line_offsets[offset_idx];
        (offset_idx + 1, offset - offset_of_line)
    }

    /// returns the (1-indexed) number and text.
    pub fn line_containing_offset(&self, offset: usize) -> (usize, &str) {
        let offset_idx = self.line_index(offset);
        let range = self.line_range(offset_idx);
        (
            offset_idx + 1,
            self.contents[range].trim_end_matches(['\r', '\n']),
        )
    }

    /// Return the offset of the start of the (1-indexed) line, if it exists.
    pub fn offset_for_line_number(&self, line_number: usize) -> Option<usize> {
        line_number
            .checked_sub(1)
            .and_then(|idx| self.line_offsets.get(idx))
            .copied()
    }

    /// The number of lines in this source.
    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    fn line_index(&self, offset: usize) -> usize {
        match self.line_offsets.binary_search(&offset) {
            Ok(x) => x,
            Err(x) => x - 1, // cannot underflow as 0 is always in list
        }
    }

    fn line_range(&self, idx: usize) -> Range<usize> {
        let start = self.line_offsets[idx];
        let end = self
            .line_offsets
            .get(idx + 1)
            .copied()
            .unwrap_or(self.contents.len());
        start..end
    }
}

fn line_offsets(text: &str) -> Arc<[usize]> {
    let mut result = vec![0];
    result.extend(
        text.bytes()
            .enumerate()
            .filter_map(|(i, b)| if b == b'\n' { Some(i + 1) } else { None }),
    );
    result.into()
}

impl SourceLoadError {
    /// Create a new [`SourceLoadError`].
    ///
    /// The `cause` argument should be some error type that communicates the
    /// cause of the failure.
    pub fn new(path: OsString, cause: impl std::fmt::Display) -> Self {
        Self {
            cause: cause.to_string().into(),
            path,
        }
    }

    /// The path that failed to load.
    pub fn path(&self) -> &Path {
        Path::new(&self.path)
    }
}
