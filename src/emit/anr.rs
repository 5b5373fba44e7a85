use std::collections::HashMap;
use std::io::Write;

use super::EmitOptions;
use crate::error::ReanalyzeError;
use crate::model::{DeclId, DeclRecord};

/// Writes the `.anr` affected-node-ranges dump: one block per source
/// file, each block listing every affected declaration's line range.
pub fn emit(
    affected_nodes: &[DeclId],
    decls: &HashMap<DeclId, &DeclRecord>,
    opts: &EmitOptions,
) -> Result<(), ReanalyzeError> {
    if !opts.dump_anr {
        return Ok(());
    }

    let mut by_file: Vec<(String, Vec<(u32, u32)>)> = Vec::new();
    for &decl_id in affected_nodes {
        let Some(decl) = decls.get(&decl_id) else { continue };
        let Some(range) = decl.range else { continue };
        match by_file.iter_mut().find(|(f, _)| f == &decl.file) {
            Some((_, ranges)) => ranges.push((range.start_line, range.end_line)),
            None => by_file.push((decl.file.clone(), vec![(range.start_line, range.end_line)])),
        }
    }

    let path = opts.default_path("anr");
    let mut w = super::open(opts.dump_to_file, &path, "--- Affected Node Ranges ---")?;
    for (file, ranges) in &by_file {
        write!(w, "{file}:")?;
        for (s, e) in ranges {
            write!(w, "{s},{e};")?;
        }
        writeln!(w)?;
    }
    Ok(())
}
