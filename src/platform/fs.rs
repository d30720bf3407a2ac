// LogWarden - platform/fs.rs
//
// Log file reading and decoding. Everything that can fail while turning a
// path into text happens here, so the core only ever sees decoded strings.

use crate::util::error::AppError;
use std::io::{self, Read};
use std::path::Path;

/// How input bytes are turned into text.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Refuse files larger than this many bytes.
    pub max_size: u64,

    /// Replace invalid UTF-8 with U+FFFD. When false, invalid input is an
    /// `AppError::Encoding`.
    pub lossy: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_size: crate::util::constants::DEFAULT_MAX_INPUT_FILE_SIZE,
            lossy: true,
        }
    }
}

/// Read and decode a log file.
///
/// The size is checked from metadata before reading so an oversized file is
/// rejected without being pulled into memory.
pub fn read_log_file(path: &Path, options: &ReadOptions) -> Result<String, AppError> {
    let io_err = |source: io::Error| AppError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > options.max_size {
        return Err(AppError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: options.max_size,
        });
    }

    let bytes = std::fs::read(path).map_err(io_err)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read log file");
    decode(bytes, path, options.lossy)
}

/// Read and decode a log from any reader (used for stdin).
///
/// Reads at most `max_size + 1` bytes so an oversized stream is detected
/// without unbounded buffering.
pub fn read_log_stream<R: Read>(
    reader: R,
    display_path: &Path,
    options: &ReadOptions,
) -> Result<String, AppError> {
    let mut bytes = Vec::new();
    reader
        .take(options.max_size.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|source| AppError::Io {
            path: display_path.to_path_buf(),
            source,
        })?;

    if bytes.len() as u64 > options.max_size {
        return Err(AppError::FileTooLarge {
            path: display_path.to_path_buf(),
            size: bytes.len() as u64,
            max_size: options.max_size,
        });
    }
    decode(bytes, display_path, options.lossy)
}

/// Decode UTF-8, dropping a leading byte-order mark.
fn decode(mut bytes: Vec<u8>, path: &Path, lossy: bool) -> Result<String, AppError> {
    const BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
    if bytes.starts_with(BOM) {
        bytes.drain(..BOM.len());
    }

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) if lossy => {
            tracing::warn!(
                path = %path.display(),
                valid_up_to = e.utf8_error().valid_up_to(),
                "Invalid UTF-8 in log; decoding lossily"
            );
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
        Err(source) => Err(AppError::Encoding {
            path: path.to_path_buf(),
            source,
        }),
    }
}
