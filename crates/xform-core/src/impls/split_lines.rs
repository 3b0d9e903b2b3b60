//! SplitLinesTransformer - テキストを N 行ごとのファイルに分割
//!
//! 出力名: `<stem>.part<i><.ext>`（i は 0 始まり、順序は入力の行順）
//! バイト単位で分割するので、chunk を順に連結すると入力と一致する。

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::domain::{FileRef, TransformError};
use crate::ports::ArtifactTransformer;

#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("lines per chunk must be at least 1")]
    InvalidChunkSize,
}

#[derive(Debug, Clone)]
pub struct SplitLinesTransformer {
    out_dir: PathBuf,
    lines_per_chunk: usize,
}

impl SplitLinesTransformer {
    pub fn new(out_dir: impl Into<PathBuf>, lines_per_chunk: usize) -> Self {
        Self {
            out_dir: out_dir.into(),
            lines_per_chunk,
        }
    }

    fn chunk_path(&self, input: &Path, index: usize) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "chunk".to_string());
        let name = match input.extension() {
            Some(ext) => format!("{stem}.part{index}.{}", ext.to_string_lossy()),
            None => format!("{stem}.part{index}"),
        };
        self.out_dir.join(name)
    }
}

impl ArtifactTransformer for SplitLinesTransformer {
    fn display_name(&self) -> String {
        format!("Split into {}-line chunks", self.lines_per_chunk)
    }

    fn transform(&self, file: &FileRef) -> Result<Vec<FileRef>, TransformError> {
        if self.lines_per_chunk == 0 {
            return Err(Box::new(SplitError::InvalidChunkSize));
        }

        let mut reader = BufReader::new(File::open(file.path())?);
        fs::create_dir_all(&self.out_dir)?;

        let mut outputs = Vec::new();
        let mut writer: Option<BufWriter<File>> = None;
        let mut written = 0;
        let mut line = Vec::new();

        // raw bytes: line endings and a missing final newline are kept as-is
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            if written % self.lines_per_chunk == 0 {
                if let Some(mut w) = writer.take() {
                    w.flush()?;
                }
                let path = self.chunk_path(file.path(), outputs.len());
                writer = Some(BufWriter::new(File::create(&path)?));
                outputs.push(FileRef::new(path));
            }
            if let Some(w) = writer.as_mut() {
                w.write_all(&line)?;
            }
            written += 1;
        }

        if let Some(mut w) = writer {
            w.flush()?;
        }

        Ok(outputs)
    }
}
