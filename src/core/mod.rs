/*!
# Core Module

Shared building blocks: error types, languages, source positions,
submissions and file helpers.
*/

pub mod errors;
pub mod fs_utils;
pub mod language;
pub mod position;
pub mod submission;

pub use errors::{AnalyzerError, StructureError};
pub use fs_utils::{read_source_file, DecodedSource};
pub use language::{CommentStyle, Language};
pub use position::Position;
pub use submission::{Submission, SubmissionInput};
