use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::decl::DeclRecord;
use crate::error::ReanalyzeError;

/// The serialized stand-in for "the parsed AST of a translation unit."
/// A conforming front end would produce one of these per TU; this crate
/// consumes it exactly as it would an in-memory AST.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationUnit {
    pub main_file: String,
    #[serde(default)]
    pub has_parse_error: bool,
    pub decls: Vec<DeclRecord>,
}

impl TranslationUnit {
    pub fn load(path: &Path) -> Result<TranslationUnit, ReanalyzeError> {
        let text = fs::read_to_string(path).map_err(|source| ReanalyzeError::AstRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ReanalyzeError::AstParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
