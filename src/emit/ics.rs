use std::io::Write;

use super::EmitOptions;
use crate::error::ReanalyzeError;

/// The seven summary counters spec.md's `.ics` format lists. The
/// `original_source` prototype this is grounded on only ever wrote the
/// first three (`changed`, `reanalyze`, `cg_nodes`); the other four are
/// this engine's own contribution, not a carry-over gap.
#[derive(Debug, Default, Clone, Copy)]
pub struct Counts {
    pub changed_functions: usize,
    pub reanalyze_functions: usize,
    pub cg_nodes: usize,
    pub affected_virtual_functions: usize,
    pub affected_vf_indirect_calls: usize,
    pub function_pointer_types: usize,
    pub affected_fp_indirect_calls: usize,
}

/// Mirrors `DumpIncSummary`'s three modes: `0` (no change, nothing after
/// the header), `1` (new file), `2` (the full counter block).
pub fn emit(mode: u8, counts: &Counts, opts: &EmitOptions) -> Result<(), ReanalyzeError> {
    let path = opts.default_path("ics");
    let mut w = super::open(opts.dump_to_file, &path, "--- Inc Summary ---")?;

    match mode {
        0 => {}
        1 => writeln!(w, "new file")?,
        _ => {
            writeln!(w, "changed functions:{}", counts.changed_functions)?;
            writeln!(w, "reanalyze functions:{}", counts.reanalyze_functions)?;
            writeln!(w, "cg nodes:{}", counts.cg_nodes)?;
            writeln!(w, "affected virtual functions:{}", counts.affected_virtual_functions)?;
            writeln!(w, "affected vf indirect calls:{}", counts.affected_vf_indirect_calls)?;
            writeln!(w, "function pointer types:{}", counts.function_pointer_types)?;
            writeln!(w, "affected fp indirect calls:{}", counts.affected_fp_indirect_calls)?;
        }
    }
    Ok(())
}
