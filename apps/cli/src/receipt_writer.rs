//! # Receipt Writer
//!
//! Stores rendered receipts as UTF-8 text files in the receipt directory.
//!
//! Files are opened with create-new semantics. When two receipts land in
//! the same second, the second one becomes `receipt_<ts>_2.txt`, then
//! `_3`, and so on; an existing receipt is never overwritten. A file whose
//! write or sync fails is removed again so no partial receipt is left.

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use grocify_core::{Receipt, ReceiptSink};
use tracing::{debug, info, warn};

/// Upper bound on collision suffixes tried for one receipt.
const MAX_SUFFIX: u32 = 1000;

/// Writes each receipt to its own file.
#[derive(Debug, Clone)]
pub struct FileReceiptSink {
    dir: PathBuf,
}

impl FileReceiptSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileReceiptSink { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn candidate(file_name: &str, attempt: u32) -> String {
        if attempt == 1 {
            return file_name.to_string();
        }
        match file_name.rsplit_once('.') {
            Some((stem, ext)) => format!("{stem}_{attempt}.{ext}"),
            None => format!("{file_name}_{attempt}"),
        }
    }
}

impl ReceiptSink for FileReceiptSink {
    type Error = io::Error;

    fn store(&mut self, receipt: &Receipt) -> io::Result<String> {
        fs::create_dir_all(&self.dir)?;
        let text = receipt.to_text();

        for attempt in 1..=MAX_SUFFIX {
            let path = self.dir.join(Self::candidate(&receipt.file_name, attempt));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    write_or_remove(&path, file, text.as_bytes(), File::sync_all)?;
                    info!(
                        path = %path.display(),
                        pages = receipt.page_count(),
                        total = %receipt.total,
                        "Receipt saved"
                    );
                    return Ok(path.display().to_string());
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "Receipt file exists, trying next suffix");
                }
                Err(e) => return Err(e),
            }
        }

        Err(io::Error::new(
            ErrorKind::AlreadyExists,
            format!("too many receipts named like {}", receipt.file_name),
        ))
    }
}

/// Writes `text` to a freshly created file at `path`, then syncs it.
///
/// On any failure the file is deleted before the error is returned.
fn write_or_remove<W: Write>(
    path: &Path,
    mut out: W,
    text: &[u8],
    sync: impl FnOnce(&W) -> io::Result<()>,
) -> io::Result<()> {
    let result = out
        .write_all(text)
        .and_then(|()| out.flush())
        .and_then(|()| sync(&out));

    if let Err(e) = result {
        drop(out);
        remove_partial(path);
        return Err(e);
    }
    Ok(())
}

fn remove_partial(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "Removed partial receipt file"),
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove partial receipt file"),
    }
}
