//! Domain model (IDs, files, categories, outcomes, errors).

pub mod category;
pub mod errors;
pub mod file;
pub mod ids;
pub mod outcome;

pub use self::category::OperationCategory;
pub use self::errors::{TransformError, TransformFailure};
pub use self::file::FileRef;
pub use self::ids::{Id, IdMarker, OperationId};
pub use self::outcome::{Outcome, OutcomeKind};
