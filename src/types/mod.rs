pub mod analysis;
pub mod comment;
pub mod error;

pub use analysis::{
    AnalysisResult, CodebaseReport, CommentReport, FileAnalysis, FileReport, JavaCommentReport,
    PythonCommentReport, ReportSummary,
};
pub use comment::{DuplicatePair, Scope, ScopeBreakdown, ScopedComment};
pub use error::{LensError, LexError, Result};
