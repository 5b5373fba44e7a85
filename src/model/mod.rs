pub mod decl;
pub mod tu;

pub use decl::{BodyEvent, CalleeKind, DeclId, DeclKind, DeclRecord, FunctionType, InitExpr, SourceRange};
pub use tu::TranslationUnit;
