//! FASTQ reading with noodles.
//!
//! Only read sequences are used; names and quality scores are discarded.
//!
//! Supported inputs:
//! - `.fastq`, `.fq` (uncompressed)
//! - `.fastq.gz`, `.fq.gz`, or any `.gz`/`.bgz` path (gzip/bgzip compressed)
//! - `-` for standard input (uncompressed)

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fastq;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Failed to open reads: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse FASTQ record {record}: {source}")]
    Record { record: u64, source: io::Error },
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Whether `path` names standard input
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Open a FASTQ file (or `-` for stdin) as a stream of read sequences
///
/// # Errors
///
/// Returns `ReadError::Io` if the file cannot be opened.
pub fn open(path: &Path) -> Result<FastqReads, ReadError> {
    let inner: Box<dyn BufRead + Send> = if is_stdin(path) {
        Box::new(BufReader::new(io::stdin()))
    } else if is_gzipped(path) {
        Box::new(BufReader::new(MultiGzDecoder::new(File::open(path)?)))
    } else {
        Box::new(BufReader::new(File::open(path)?))
    };

    Ok(FastqReads::new(inner))
}

/// Iterator over the sequences of a FASTQ stream
pub struct FastqReads {
    reader: fastq::io::Reader<Box<dyn BufRead + Send>>,
    record: fastq::Record,
    count: u64,
    done: bool,
}

impl FastqReads {
    pub fn new(inner: Box<dyn BufRead + Send>) -> Self {
        Self {
            reader: fastq::io::Reader::new(inner),
            record: fastq::Record::default(),
            count: 0,
            done: false,
        }
    }

    /// Build a reader over in-memory FASTQ text
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self::new(Box::new(io::Cursor::new(data)))
    }

    /// Records read so far
    pub fn records_read(&self) -> u64 {
        self.count
    }
}

impl Iterator for FastqReads {
    type Item = Result<Vec<u8>, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.read_record(&mut self.record) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                self.count += 1;
                Some(Ok(self.record.sequence().to_vec()))
            }
            Err(source) => {
                self.done = true;
                Some(Err(ReadError::Record {
                    record: self.count + 1,
                    source,
                }))
            }
        }
    }
}
