use std::collections::HashMap;
use std::io::Write;

use super::EmitOptions;
use crate::error::ReanalyzeError;
use crate::model::{DeclId, DeclRecord};

/// Writes the `.rf` "functions needing reanalysis" dump. Emits nothing
/// at all — no file, no stream — when the list is empty.
pub fn emit(
    need_reanalyze: &[DeclId],
    decls: &HashMap<DeclId, &DeclRecord>,
    opts: &EmitOptions,
) -> Result<(), ReanalyzeError> {
    if need_reanalyze.is_empty() {
        return Ok(());
    }
    let default_path = opts.default_path("rf");
    let path = opts.rf_path.clone().unwrap_or(default_path);
    let mut w = super::open(opts.dump_to_file, &path, "--- Functions Need Reanalyze ---")?;

    for &decl_id in need_reanalyze {
        if let Some(decl) = decls.get(&decl_id) {
            writeln!(w, "{}{}", decl.display_name(opts.dump_usr), decl.loc_suffix(opts.print_loc))?;
        }
    }
    Ok(())
}
