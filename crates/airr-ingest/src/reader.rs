//! Recovery of gzip-compressed exports with a corrupted leading header.
//!
//! Upstream exports start with a duplicated/malformed header line. The reader
//! drops that line unconditionally, then checks the next line (the canary row)
//! for the expected number of comma-separated fields before the rest of the
//! file is handed to the CSV parser.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::{IngestError, Result};

/// Field count of a well-formed canary row.
pub const EXPECTED_FIELD_COUNT: usize = 198;

/// Delimiter used for the canary check.
pub const FIELD_DELIMITER: char = ',';

/// Text recovered from one input file, ready for parsing.
///
/// The first line of [`RecoveredText::as_str`] is the column header seen by
/// the parser.
#[derive(Debug, Clone)]
pub struct RecoveredText {
    text: String,
    had_replacements: bool,
}

impl RecoveredText {
    /// Wraps text that is already recovered and cleanly decoded.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            had_replacements: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.text.into_bytes()
    }

    /// True if undecodable bytes were replaced with U+FFFD.
    pub fn had_replacements(&self) -> bool {
        self.had_replacements
    }
}

/// Reads and validates one compressed input file.
#[derive(Debug, Clone, Copy)]
pub struct RecoveringReader {
    expected_fields: usize,
}

impl Default for RecoveringReader {
    fn default() -> Self {
        Self {
            expected_fields: EXPECTED_FIELD_COUNT,
        }
    }
}

impl RecoveringReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the canary field count.
    #[must_use]
    pub fn with_expected_fields(mut self, expected_fields: usize) -> Self {
        self.expected_fields = expected_fields;
        self
    }

    pub fn expected_fields(&self) -> usize {
        self.expected_fields
    }

    /// Decompresses, decodes and recovers `path`.
    ///
    /// # Errors
    ///
    /// - [`IngestError::FileNotFound`] / [`IngestError::FileRead`] if the file
    ///   cannot be opened
    /// - [`IngestError::Decompress`] if the gzip stream is invalid
    /// - [`IngestError::TruncatedInput`] if the canary row is malformed
    pub fn read(&self, path: &Path) -> Result<RecoveredText> {
        let file = File::open(path).map_err(|e| IngestError::file_read(path, e))?;
        let mut decoder = MultiGzDecoder::new(BufReader::new(file));
        let mut bytes = Vec::new();
        decoder
            .read_to_end(&mut bytes)
            .map_err(|e| IngestError::Decompress {
                path: path.to_path_buf(),
                source: e,
            })?;
        tracing::debug!(
            path = %path.display(),
            decompressed_bytes = bytes.len(),
            "decompressed input"
        );

        let (text, had_replacements) = encoding_rs::UTF_8.decode_without_bom_handling(&bytes);
        if had_replacements {
            tracing::warn!(
                path = %path.display(),
                "replaced undecodable byte sequences with U+FFFD"
            );
        }

        let text = self.recover(&text)?;
        Ok(RecoveredText {
            text,
            had_replacements,
        })
    }

    /// Drops line 0 and validates line 1 of already-decoded text.
    ///
    /// Line terminators are `\n`, `\r\n` or a lone `\r`; all of them come back
    /// as `\n`. Returns everything after the first line.
    ///
    /// ```
    /// use airr_ingest::RecoveringReader;
    ///
    /// let reader = RecoveringReader::new().with_expected_fields(2);
    /// let body = reader.recover("junk\na,b\n1,2\n").unwrap();
    /// assert_eq!(body, "a,b\n1,2\n");
    /// assert!(reader.recover("junk\na,b,c\n").is_err());
    /// ```
    pub fn recover(&self, text: &str) -> Result<String> {
        let normalized = universal_newlines(text);
        let text = normalized.as_ref();
        let body = match text.find('\n') {
            Some(idx) => &text[idx + 1..],
            None => "",
        };
        let found = match body.lines().next() {
            Some(canary) => count_fields(canary),
            None => 0,
        };
        if found != self.expected_fields {
            return Err(IngestError::TruncatedInput {
                expected: self.expected_fields,
                found,
            });
        }
        Ok(body.to_string())
    }
}

fn universal_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Naive, quote-unaware field count.
fn count_fields(line: &str) -> usize {
    line.split(FIELD_DELIMITER).count()
}
