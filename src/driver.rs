use std::collections::HashMap;
use std::path::Path;

use crate::affected_vfs;
use crate::callgraph::ReverseCallGraph;
use crate::cli::Cli;
use crate::diff::DiffLineManager;
use crate::emit::{self, Counts, EmitOptions};
use crate::model::{DeclId, DeclRecord, TranslationUnit};
use crate::ordered_set::OrderedSet;
use crate::propagate;
use crate::visitor;

/// Runs the full pipeline over one translation-unit document. Never
/// returns an error for anything recoverable — an unreadable or
/// malformed AST document is the one failure that skips the TU
/// entirely, logged to stderr, matching a front-end parse error.
pub fn run_one(path: &Path, cli: &Cli) {
    let tu = match TranslationUnit::load(path) {
        Ok(tu) => tu,
        Err(err) => {
            eprintln!("warning: skipping {}: {err}", path.display());
            return;
        }
    };

    if tu.has_parse_error {
        eprintln!("{}: front end reported a parse error, skipping", tu.main_file);
        return;
    }

    let dlm = DiffLineManager::load(cli.diff.as_deref(), &tu.main_file);

    let emit_opts = build_emit_options(cli, &tu.main_file);

    if dlm.is_no_change() {
        eprintln!("{} has no change, do nothing", tu.main_file);
        log_if_err(emit::emit_ics(0, &Counts::default(), &emit_opts));
        return;
    }
    if dlm.is_new_file() {
        eprintln!("{} is new, do not analyze changed functions", tu.main_file);
        log_if_err(emit::emit_ics(1, &Counts::default(), &emit_opts));
        return;
    }

    let decls_by_id: HashMap<DeclId, &DeclRecord> = tu.decls.iter().map(|d| (d.id, d)).collect();

    let cg = build_call_graph(&tu);

    let affected_vfs = affected_vfs::build(&cg, &decls_by_id, &dlm);

    let mut functions_changed: OrderedSet<DeclId> = OrderedSet::new();
    for decl_id in cg.reverse_postorder() {
        if let Some(decl) = decls_by_id.get(&decl_id) {
            if dlm.is_changed_decl(decl) {
                functions_changed.insert(decl_id);
            }
        }
    }

    let visit_out =
        visitor::run(&tu, &decls_by_id, &dlm, &affected_vfs, &mut functions_changed, &cg);

    let need_reanalyze = propagate::run(&cg, functions_changed.as_slice());

    log_if_err(emit::emit_cg(&cg, &decls_by_id, &emit_opts));
    log_if_err(emit::emit_rf(&need_reanalyze, &decls_by_id, &emit_opts));
    log_if_err(emit::emit_anr(visit_out.affected_nodes.as_slice(), &decls_by_id, &emit_opts));
    log_if_err(emit::emit_cppcheck(&need_reanalyze, &decls_by_id, &emit_opts));
    log_if_err(emit::emit_gcc(&need_reanalyze, &decls_by_id, &emit_opts));

    let counts = Counts {
        changed_functions: functions_changed.len(),
        reanalyze_functions: need_reanalyze.len(),
        cg_nodes: cg.len(),
        affected_virtual_functions: affected_vfs.len(),
        affected_vf_indirect_calls: visit_out.affected_vf_indirect_calls as usize,
        function_pointer_types: visit_out.types_may_used_by_fp.len(),
        affected_fp_indirect_calls: visit_out.affected_fp_indirect_calls as usize,
    };
    log_if_err(emit::emit_ics(2, &counts, &emit_opts));
}

fn log_if_err(result: Result<(), crate::error::ReanalyzeError>) {
    if let Err(err) = result {
        eprintln!("warning: {err}");
    }
}

fn build_call_graph(tu: &TranslationUnit) -> ReverseCallGraph {
    let mut cg = ReverseCallGraph::new();
    for decl in &tu.decls {
        if !decl.kind.is_function_or_method() || decl.is_template || !decl.is_definition {
            continue;
        }
        cg.add_node(decl.id);
        if decl.has_external_linkage {
            cg.add_root_edge(decl.id);
        }
        let Some(body) = &decl.body else { continue };
        for event in body {
            if let crate::model::BodyEvent::Call {
                callee: crate::model::CalleeKind::Direct(callee_id),
            } = event
            {
                cg.add_node(*callee_id);
                cg.add_call_edge(*callee_id, decl.id);
            }
        }
    }
    cg
}

fn build_emit_options(cli: &Cli, main_file: &str) -> EmitOptions {
    EmitOptions {
        main_file: main_file.to_string(),
        dump_to_file: cli.dump_file,
        dump_usr: cli.dump_usr,
        print_loc: cli.loc,
        dump_cg: cli.dump_cg,
        dump_anr: cli.dump_anr,
        rf_path: cli.rf_file.clone(),
        cppcheck_rf_path: cli.cppcheck_rf_file.clone(),
        gcc_rf_path: cli.gcc_rf_file.clone(),
        file_path: cli.file_path.clone(),
    }
}
