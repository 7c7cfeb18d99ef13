//! Source reader port

use std::io;
use std::path::Path;

/// Reads expression sources from local storage.
///
/// Reads are synchronous; sources are read one at a time.
pub trait SourceReader: Send + Sync {
    /// Reads the whole source as UTF-8 text.
    ///
    /// # Errors
    /// Returns an error with kind [`io::ErrorKind::NotFound`] if the source
    /// does not exist, or any other I/O error.
    fn read_source(&self, path: &Path) -> io::Result<String>;
}

impl<R: SourceReader + ?Sized> SourceReader for &R {
    fn read_source(&self, path: &Path) -> io::Result<String> {
        (**self).read_source(path)
    }
}
