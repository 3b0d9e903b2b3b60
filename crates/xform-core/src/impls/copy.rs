//! CopyTransformer - ファイルを出力ディレクトリへコピーするだけの変換
//!
//! - 入力と出力が同じファイルならコピーしない（fs::copy が入力を空にするため）
//! - 同じ base name の別入力が同じ出力先を取り合ったら後から来た方を失敗にする

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::domain::{FileRef, TransformError};
use crate::ports::ArtifactTransformer;

#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("{input} is already at {target}; refusing to copy a file onto itself")]
    SameFile { input: PathBuf, target: PathBuf },

    #[error("{target} was already produced from {claimed_by}")]
    TargetClaimed { target: PathBuf, claimed_by: PathBuf },
}

/// Copies the input into `out_dir`, keeping its base name.
///
/// Targets are claimed per transformer instance: target path -> canonical source.
#[derive(Debug)]
pub struct CopyTransformer {
    out_dir: PathBuf,
    claimed: Mutex<HashMap<PathBuf, PathBuf>>,
}

impl CopyTransformer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            claimed: Mutex::new(HashMap::new()),
        }
    }

    fn claim(&self, target: &Path, source: &Path) -> Result<(), CopyError> {
        let mut claimed = self.claimed.lock().unwrap_or_else(PoisonError::into_inner);
        match claimed.get(target) {
            Some(owner) if owner != source => Err(CopyError::TargetClaimed {
                target: target.to_path_buf(),
                claimed_by: owner.clone(),
            }),
            Some(_) => Ok(()),
            None => {
                claimed.insert(target.to_path_buf(), source.to_path_buf());
                Ok(())
            }
        }
    }
}

impl ArtifactTransformer for CopyTransformer {
    fn display_name(&self) -> String {
        format!("Copy to {}", self.out_dir.display())
    }

    fn transform(&self, file: &FileRef) -> Result<Vec<FileRef>, TransformError> {
        let source = fs::canonicalize(file.path())?;
        fs::create_dir_all(&self.out_dir)?;
        let target = self.out_dir.join(file.file_name());

        if target.exists() && fs::canonicalize(&target)? == source {
            return Err(Box::new(CopyError::SameFile {
                input: source,
                target,
            }));
        }
        self.claim(&target, &source)?;

        fs::copy(&source, &target)?;
        Ok(vec![FileRef::new(target)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TransformFileOperation;
    use crate::domain::OperationCategory;
    use std::sync::Arc;

    #[test]
    fn copies_into_created_directory() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.txt");
        fs::write(&input, "hello").unwrap();
        let out_dir = dir.path().join("out/nested");

        let t = CopyTransformer::new(&out_dir);
        let outputs = t.transform(&FileRef::new(&input)).unwrap();

        assert_eq!(outputs, vec![FileRef::new(out_dir.join("a.txt"))]);
        assert_eq!(fs::read_to_string(out_dir.join("a.txt")).unwrap(), "hello");
    }

    #[test]
    fn missing_input_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let t = CopyTransformer::new(dir.path().join("out"));

        let err = t.transform(&FileRef::new(dir.path().join("missing.txt"))).unwrap_err();

        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn copy_onto_itself_fails_and_keeps_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.txt");
        fs::write(&input, "hello").unwrap();
        let mut op = TransformFileOperation::new(
            FileRef::new(&input),
            Arc::new(CopyTransformer::new(dir.path())),
            OperationCategory::Transform,
        );

        op.run(None);

        assert!(op.result().is_none());
        let failure = op.failure().unwrap();
        assert!(matches!(failure.downcast_ref::<CopyError>(), Some(CopyError::SameFile { .. })));
        assert_eq!(fs::read_to_string(&input).unwrap(), "hello");
    }

    #[test]
    fn same_base_name_from_two_inputs_fails_the_second() {
        let dir = tempfile::tempdir().unwrap();
        for (sub, body) in [("x", "from-x"), ("y", "from-y")] {
            fs::create_dir_all(dir.path().join(sub)).unwrap();
            fs::write(dir.path().join(sub).join("a.txt"), body).unwrap();
        }
        let out = dir.path().join("out");
        let t = CopyTransformer::new(&out);

        let first = t.transform(&FileRef::new(dir.path().join("x/a.txt")));
        let second = t.transform(&FileRef::new(dir.path().join("y/a.txt")));

        assert_eq!(first.unwrap(), vec![FileRef::new(out.join("a.txt"))]);
        let err = second.unwrap_err();
        assert!(matches!(err.downcast_ref::<CopyError>(), Some(CopyError::TargetClaimed { .. })));
        assert_eq!(fs::read_to_string(out.join("a.txt")).unwrap(), "from-x");
    }

    #[test]
    fn existing_output_from_earlier_run_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.txt");
        fs::write(&input, "new").unwrap();
        let out = dir.path().join("out");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("a.txt"), "stale").unwrap();

        let outputs = CopyTransformer::new(&out).transform(&FileRef::new(&input)).unwrap();

        assert_eq!(outputs.len(), 1);
        assert_eq!(fs::read_to_string(out.join("a.txt")).unwrap(), "new");
    }
}
