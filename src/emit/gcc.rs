use std::collections::HashMap;
use std::io::Write;

use super::EmitOptions;
use crate::error::ReanalyzeError;
use crate::model::{DeclId, DeclRecord};

/// Writes the GCC-compatible reanalysis list: `<qualified name>(<arity>)`
/// per line. Only emitted when `--gcc-rf-file` names a destination.
pub fn emit(
    need_reanalyze: &[DeclId],
    decls: &HashMap<DeclId, &DeclRecord>,
    opts: &EmitOptions,
) -> Result<(), ReanalyzeError> {
    let Some(path) = &opts.gcc_rf_path else { return Ok(()) };
    let file = std::fs::File::create(path)
        .map_err(|source| ReanalyzeError::OutputOpen { path: path.clone(), source })?;
    let mut w = std::io::BufWriter::new(file);

    for &decl_id in need_reanalyze {
        if let Some(decl) = decls.get(&decl_id) {
            writeln!(w, "{}({})", decl.name, decl.arity.unwrap_or(0))?;
        }
    }
    Ok(())
}
