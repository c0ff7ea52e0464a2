//! Streaming writer for `{"data": [[[..]]]}` JSON files.
//!
//! Frames are appended one at a time, so the full time series never has to
//! be held in memory. The output is byte-identical to serializing the whole
//! nested array at once with compact separators.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;
use tracing::debug;

use super::{WrittenFile, GZIP_DATA_FILE, JSON_DATA_FILE};
use crate::error::{GridProcessorError, Result};

/// One output sink: plain file or gzip stream.
enum Sink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Sink {
    fn write_all(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        match self {
            Sink::Plain(w) => w.write_all(bytes),
            Sink::Gzip(w) => w.write_all(bytes),
        }
    }

    fn finish(self) -> std::io::Result<()> {
        match self {
            Sink::Plain(mut w) => w.flush(),
            Sink::Gzip(w) => w.finish()?.flush(),
        }
    }
}

/// Writes the JSON data file and/or its gzipped twin.
pub struct JsonDataWriter {
    sinks: Vec<(PathBuf, Sink)>,
    frames_written: usize,
}

impl JsonDataWriter {
    /// Create the selected data files in `dir`.
    pub fn create(dir: &Path, plain: bool, gzip: bool) -> Result<Self> {
        if !plain && !gzip {
            return Err(GridProcessorError::invalid_config(
                "no JSON data file selected",
            ));
        }

        let mut sinks = Vec::new();
        if plain {
            let path = dir.join(JSON_DATA_FILE);
            let file = BufWriter::new(File::create(&path)?);
            sinks.push((path, Sink::Plain(file)));
        }
        if gzip {
            let path = dir.join(GZIP_DATA_FILE);
            let file = BufWriter::new(File::create(&path)?);
            sinks.push((path, Sink::Gzip(GzEncoder::new(file, Compression::best()))));
        }

        let mut writer = Self {
            sinks,
            frames_written: 0,
        };
        writer.write_bytes(b"{\"data\":[")?;
        Ok(writer)
    }

    /// Append one frame of nested rows.
    pub fn write_frame<T: Serialize>(&mut self, rows: &[Vec<T>]) -> Result<()> {
        let mut bytes = Vec::new();
        if self.frames_written > 0 {
            bytes.push(b',');
        }
        serde_json::to_writer(&mut bytes, rows)?;
        self.write_bytes(&bytes)?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    /// Close the document and flush every sink.
    pub fn finish(mut self) -> Result<Vec<WrittenFile>> {
        self.write_bytes(b"]}")?;

        let mut written = Vec::with_capacity(self.sinks.len());
        for (path, sink) in self.sinks {
            sink.finish()?;
            let file = WrittenFile::from_path(&path)?;
            debug!(path = %file.path.display(), bytes = file.bytes, "Finished JSON data file");
            written.push(file);
        }
        Ok(written)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        for (_, sink) in &mut self.sinks {
            sink.write_all(bytes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn test_plain_and_gzip_match() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = JsonDataWriter::create(dir.path(), true, true).unwrap();
        writer.write_frame(&[vec![1, 2], vec![-999, 4]]).unwrap();
        writer.write_frame(&[vec![5, 6], vec![7, 8]]).unwrap();
        let files = writer.finish().unwrap();
        assert_eq!(files.len(), 2);

        let plain = std::fs::read_to_string(dir.path().join(JSON_DATA_FILE)).unwrap();
        assert_eq!(plain, r#"{"data":[[[1,2],[-999,4]],[[5,6],[7,8]]]}"#);

        let gz = std::fs::read(dir.path().join(GZIP_DATA_FILE)).unwrap();
        let mut decoded = String::new();
        GzDecoder::new(gz.as_slice())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, plain);
    }

    #[test]
    fn test_empty_series() {
        let dir = tempfile::tempdir().unwrap();
        let writer = JsonDataWriter::create(dir.path(), true, false).unwrap();
        writer.finish().unwrap();

        let plain = std::fs::read_to_string(dir.path().join(JSON_DATA_FILE)).unwrap();
        assert_eq!(plain, r#"{"data":[]}"#);
        assert!(!dir.path().join(GZIP_DATA_FILE).exists());
    }

    #[test]
    fn test_no_sink_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonDataWriter::create(dir.path(), false, false).is_err());
    }
}
