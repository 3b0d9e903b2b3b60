//! TransformFileOperation - 1 ファイル分の変換を包む実行単位
//!
//! - run() は一度だけ変換を呼び、結果 or 失敗を保存する（呼び出し元には返さない）
//! - description() は operation tree 用のメタデータを返す
//! - failure() / result() は run() の後で読む

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::Level;

use crate::domain::{FileRef, OperationCategory, Outcome, TransformFailure};
use crate::ports::{ArtifactTransformer, OperationContext, OperationDescriptor, RunnableOperation};

/// Runs one transformation over one file and keeps what happened.
///
/// # 使用例
/// ```ignore
/// let mut op = TransformFileOperation::new(
///     FileRef::from("libs/a.jar"),
///     Arc::new(Unzip),
///     OperationCategory::Transform,
/// );
/// op.run(None);
///
/// match op.failure() {
///     Some(failure) => report(failure),
///     None => consume(op.result().unwrap_or_default()),
/// }
/// ```
///
/// `run` takes `&mut self`, so the outcome cannot be read while the
/// transformation is in flight. Moving the operation to a worker thread and
/// joining it is enough for the caller to observe the outcome.
pub struct TransformFileOperation {
    file: FileRef,
    transformer: Arc<dyn ArtifactTransformer>,
    category: OperationCategory,
    outcome: Outcome,
}

impl TransformFileOperation {
    pub fn new(
        file: FileRef,
        transformer: Arc<dyn ArtifactTransformer>,
        category: OperationCategory,
    ) -> Self {
        Self {
            file,
            transformer,
            category,
            outcome: Outcome::NotYetRun,
        }
    }

    /// Execute the transformation on the calling thread.
    ///
    /// Errors returned by the transformer and unwinding panics are both stored
    /// as `TransformFailure`; nothing escapes this call. The context is
    /// accepted for the executor contract and not consulted.
    ///
    /// A second call keeps the first outcome and does not invoke the
    /// transformer again.
    pub fn run(&mut self, _context: Option<&mut OperationContext>) {
        if self.outcome.is_completed() {
            tracing::warn!(
                file = %self.file,
                outcome = ?self.outcome.kind(),
                "transform already executed; keeping first outcome"
            );
            return;
        }

        let file = &self.file;
        let transformer = &self.transformer;
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            if tracing::enabled!(Level::INFO) {
                tracing::info!(
                    "Executing transform {} on file {}",
                    transformer.display_name(),
                    file
                );
            }
            transformer.transform(file)
        }));

        self.outcome = match result {
            Ok(Ok(files)) => Outcome::Success(files),
            Ok(Err(error)) => Outcome::Failure(TransformFailure::from_error(error)),
            Err(payload) => Outcome::Failure(TransformFailure::from_panic(payload.as_ref())),
        };
    }

    /// "Transform `<file-name>` with `<transform>`", used for both names.
    pub fn description(&self) -> OperationDescriptor {
        let display_name = format!(
            "Transform {} with {}",
            self.file.file_name(),
            self.transformer.display_name()
        );
        OperationDescriptor::display_name(display_name.clone())
            .progress_display_name(display_name)
            .operation_type(self.category)
    }

    pub fn failure(&self) -> Option<&TransformFailure> {
        self.outcome.failure()
    }

    pub fn result(&self) -> Option<&[FileRef]> {
        self.outcome.result()
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn has_run(&self) -> bool {
        self.outcome.is_completed()
    }

    pub fn into_outcome(self) -> Outcome {
        self.outcome
    }

    pub fn file(&self) -> &FileRef {
        &self.file
    }

    pub fn category(&self) -> OperationCategory {
        self.category
    }
}

impl RunnableOperation for TransformFileOperation {
    fn run(&mut self, context: Option<&mut OperationContext>) {
        TransformFileOperation::run(self, context)
    }

    fn description(&self) -> OperationDescriptor {
        TransformFileOperation::description(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OperationId, TransformError};
    use crate::impls::FnTransformer;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, thiserror::Error)]
    #[error("corrupt archive: {0}")]
    struct CorruptArchiveError(String);

    fn unzip() -> Arc<dyn ArtifactTransformer> {
        Arc::new(FnTransformer::new("Unzip", |_file: &FileRef| {
            Ok(vec![FileRef::from("b.class"), FileRef::from("c.class")])
        }))
    }

    fn corrupt() -> Arc<dyn ArtifactTransformer> {
        Arc::new(FnTransformer::new("Unzip", |file: &FileRef| {
            Err(Box::new(CorruptArchiveError(file.file_name())) as TransformError)
        }))
    }

    #[test]
    fn successful_transform_stores_result_in_order() {
        let mut op = TransformFileOperation::new(
            FileRef::from("a.jar"),
            unzip(),
            OperationCategory::Transform,
        );

        op.run(None);

        assert_eq!(
            op.result(),
            Some(&[FileRef::from("b.class"), FileRef::from("c.class")][..])
        );
        assert!(op.failure().is_none());
        assert_eq!(op.description().display_name, "Transform a.jar with Unzip");
    }

    #[test]
    fn failing_transform_stores_the_raised_error() {
        let mut op = TransformFileOperation::new(
            FileRef::from("libs/broken.jar"),
            corrupt(),
            OperationCategory::Transform,
        );

        op.run(None);

        let failure = op.failure().unwrap();
        let err = failure.downcast_ref::<CorruptArchiveError>().unwrap();
        assert_eq!(err.0, "broken.jar");
        assert!(op.result().is_none());
    }

    #[test]
    fn panicking_transform_is_captured() {
        let transformer = Arc::new(FnTransformer::new("Explode", |_file: &FileRef| {
            panic!("entry table truncated")
        }));
        let mut op = TransformFileOperation::new(
            FileRef::from("a.jar"),
            transformer,
            OperationCategory::Transform,
        );

        op.run(None);

        let failure = op.failure().unwrap();
        assert!(failure.is_panic());
        assert!(failure.to_string().contains("entry table truncated"));
        assert!(op.result().is_none());
    }

    #[test]
    fn empty_output_is_success() {
        let transformer = Arc::new(FnTransformer::new("Nothing", |_file: &FileRef| Ok(Vec::new())));
        let mut op = TransformFileOperation::new(
            FileRef::from("empty.jar"),
            transformer,
            OperationCategory::Transform,
        );

        op.run(None);

        assert_eq!(op.result(), Some(&[][..]));
        assert!(op.failure().is_none());
    }

    #[test]
    fn nothing_is_recorded_before_run() {
        let op = TransformFileOperation::new(
            FileRef::from("a.jar"),
            unzip(),
            OperationCategory::Transform,
        );

        assert!(!op.has_run());
        assert!(op.result().is_none());
        assert!(op.failure().is_none());
    }

    #[rstest]
    #[case("a.jar", "Transform a.jar with Unzip")]
    #[case("/home/user/.m2/repo/guava-33.jar", "Transform guava-33.jar with Unzip")]
    fn description_is_stable_across_run(#[case] path: &str, #[case] expected: &str) {
        let mut op = TransformFileOperation::new(
            FileRef::from(path),
            unzip(),
            OperationCategory::Transform,
        );

        let before = op.description();
        op.run(None);
        let after = op.description();

        assert_eq!(before, after);
        assert_eq!(before.display_name, expected);
        assert_eq!(before.progress_display_name.as_deref(), Some(expected));
        assert_eq!(before.category, OperationCategory::Transform);
    }

    #[test]
    fn second_run_keeps_first_outcome() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let transformer = Arc::new(FnTransformer::new("Count", move |file: &FileRef| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n == 0 {
                Ok(vec![file.clone()])
            } else {
                Err("should not be called twice".into())
            }
        }));
        let mut op = TransformFileOperation::new(
            FileRef::from("a.jar"),
            transformer,
            OperationCategory::Transform,
        );

        op.run(None);
        op.run(None);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(op.result(), Some(&[FileRef::from("a.jar")][..]));
        assert!(op.failure().is_none());
    }

    #[test]
    fn context_is_left_untouched() {
        let mut ctx = OperationContext::new(OperationId::generate(), None);
        let mut op = TransformFileOperation::new(
            FileRef::from("a.jar"),
            unzip(),
            OperationCategory::Transform,
        );

        op.run(Some(&mut ctx));

        assert!(ctx.status().is_none());
        assert!(op.has_run());
    }

    #[test]
    fn concurrent_envelopes_do_not_interfere() {
        let shared = unzip();
        let a = TransformFileOperation::new(
            FileRef::from("a.jar"),
            Arc::clone(&shared),
            OperationCategory::Transform,
        );
        let b = TransformFileOperation::new(
            FileRef::from("broken.jar"),
            corrupt(),
            OperationCategory::Transform,
        );

        let ha = std::thread::spawn(move || {
            let mut a = a;
            a.run(None);
            a
        });
        let hb = std::thread::spawn(move || {
            let mut b = b;
            b.run(None);
            b
        });
        let a = ha.join().unwrap();
        let b = hb.join().unwrap();

        assert_eq!(a.result().map(|r| r.len()), Some(2));
        assert!(a.failure().is_none());
        assert!(b.result().is_none());
        assert!(b.failure().unwrap().downcast_ref::<CorruptArchiveError>().is_some());
    }

    struct CountingNames {
        name_calls: AtomicUsize,
        panic_in_name: bool,
    }

    impl ArtifactTransformer for CountingNames {
        fn display_name(&self) -> String {
            self.name_calls.fetch_add(1, Ordering::SeqCst);
            if self.panic_in_name {
                panic!("name lookup failed");
            }
            "Counting".to_string()
        }

        fn transform(&self, file: &FileRef) -> Result<Vec<FileRef>, TransformError> {
            Ok(vec![file.clone()])
        }
    }

    fn counting(panic_in_name: bool) -> Arc<CountingNames> {
        Arc::new(CountingNames {
            name_calls: AtomicUsize::new(0),
            panic_in_name,
        })
    }

    fn run_with_max_level(level: Level, transformer: Arc<CountingNames>) -> TransformFileOperation {
        let mut op = TransformFileOperation::new(
            FileRef::from("a.jar"),
            transformer,
            OperationCategory::Transform,
        );
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || op.run(None));
        op
    }

    #[rstest]
    #[case::warn(Level::WARN, 0)]
    #[case::info(Level::INFO, 1)]
    fn log_message_is_built_only_when_info_is_enabled(
        #[case] level: Level,
        #[case] expected_calls: usize,
    ) {
        let transformer = counting(false);

        let op = run_with_max_level(level, Arc::clone(&transformer));

        assert_eq!(transformer.name_calls.load(Ordering::SeqCst), expected_calls);
        assert_eq!(op.result(), Some(&[FileRef::from("a.jar")][..]));
    }

    #[test]
    fn panic_in_display_name_during_run_is_captured() {
        let transformer = counting(true);

        let op = run_with_max_level(Level::INFO, Arc::clone(&transformer));

        let failure = op.failure().unwrap();
        assert!(failure.is_panic());
        assert!(failure.to_string().contains("name lookup failed"));
        assert!(op.result().is_none());
    }
}

