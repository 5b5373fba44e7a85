use std::collections::HashMap;
use std::io::Write;

use super::EmitOptions;
use crate::callgraph::ReverseCallGraph;
use crate::error::ReanalyzeError;
use crate::model::{DeclId, DeclRecord};

/// Writes the `.cg` call-graph dump: one block per node, in
/// reverse-postorder, each block naming the node then listing its
/// callers.
pub fn emit(
    cg: &ReverseCallGraph,
    decls: &HashMap<DeclId, &DeclRecord>,
    opts: &EmitOptions,
) -> Result<(), ReanalyzeError> {
    if !opts.dump_cg {
        return Ok(());
    }
    let path = opts.default_path("cg");
    let mut w = super::open(opts.dump_to_file, &path, "--- Call Graph ---")?;

    for decl_id in cg.reverse_postorder() {
        let Some(decl) = decls.get(&decl_id) else { continue };
        writeln!(w, "{}{}", decl.display_name(opts.dump_usr), decl.loc_suffix(opts.print_loc))?;
        writeln!(w, "[")?;
        for &caller in cg.callers_of(decl_id) {
            if let Some(caller_decl) = decls.get(&caller) {
                writeln!(
                    w,
                    "{}{}",
                    caller_decl.display_name(opts.dump_usr),
                    caller_decl.loc_suffix(opts.print_loc)
                )?;
            }
        }
        writeln!(w, "]")?;
    }
    Ok(())
}
