mod anr;
mod cg;
mod cppcheck;
mod gcc;
mod ics;
mod rf;

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ReanalyzeError;

pub use ics::Counts;

/// Flags and path overrides shared by every emitter, mirroring the CLI
/// flag table.
pub struct EmitOptions {
    pub main_file: String,
    pub dump_to_file: bool,
    pub dump_usr: bool,
    pub print_loc: bool,
    pub dump_cg: bool,
    pub dump_anr: bool,
    pub rf_path: Option<PathBuf>,
    pub cppcheck_rf_path: Option<PathBuf>,
    pub gcc_rf_path: Option<PathBuf>,
    pub file_path: Option<String>,
}

impl EmitOptions {
    fn default_path(&self, extension: &str) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.main_file, extension))
    }

    /// The origin path Cppcheck-format output should report: the
    /// pre-preprocessing source path if one was given, else the main
    /// file the AST document itself names.
    fn origin_path(&self) -> &str {
        self.file_path.as_deref().unwrap_or(&self.main_file)
    }
}

/// Opens the destination for one emitter: either a sidecar file at
/// `path`, or stdout preceded by `header` when `dump_to_file` is false.
fn open(dump_to_file: bool, path: &Path, header: &str) -> Result<Box<dyn Write>, ReanalyzeError> {
    if dump_to_file {
        let file = std::fs::File::create(path)
            .map_err(|source| ReanalyzeError::OutputOpen { path: path.to_path_buf(), source })?;
        Ok(Box::new(file))
    } else {
        println!("{header}");
        Ok(Box::new(std::io::stdout()))
    }
}

pub use anr::emit as emit_anr;
pub use cg::emit as emit_cg;
pub use cppcheck::emit as emit_cppcheck;
pub use gcc::emit as emit_gcc;
pub use ics::emit as emit_ics;
pub use rf::emit as emit_rf;
