use std::collections::HashMap;
use std::io::Write;

use super::EmitOptions;
use crate::error::ReanalyzeError;
use crate::model::{DeclId, DeclRecord};

/// Writes the Cppcheck-compatible reanalysis list: an origin header
/// followed by one unqualified function name per line. Only emitted
/// when `--cppcheck-rf-file` names a destination.
pub fn emit(
    need_reanalyze: &[DeclId],
    decls: &HashMap<DeclId, &DeclRecord>,
    opts: &EmitOptions,
) -> Result<(), ReanalyzeError> {
    let Some(path) = &opts.cppcheck_rf_path else { return Ok(()) };
    let file = std::fs::File::create(path)
        .map_err(|source| ReanalyzeError::OutputOpen { path: path.clone(), source })?;
    let mut w = std::io::BufWriter::new(file);

    writeln!(w, "{}:", opts.origin_path())?;
    for &decl_id in need_reanalyze {
        if let Some(decl) = decls.get(&decl_id) {
            writeln!(w, "{}", decl.unqualified_name())?;
        }
    }
    Ok(())
}
