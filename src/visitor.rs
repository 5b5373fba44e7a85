use std::collections::{HashMap, HashSet};

use crate::callgraph::ReverseCallGraph;
use crate::diff::DiffLineManager;
use crate::model::{BodyEvent, CalleeKind, DeclId, DeclKind, DeclRecord, FunctionType, TranslationUnit};
use crate::ordered_set::OrderedSet;

/// Everything the AST-visiting pass discovers or extends, on top of the
/// `FunctionsChanged` seed and `AffectedVFs` set computed beforehand.
#[derive(Debug, Default)]
pub struct VisitorOutput {
    pub global_constant_set: OrderedSet<DeclId>,
    pub taint_decls: OrderedSet<DeclId>,
    pub affected_nodes: OrderedSet<DeclId>,
    pub types_may_used_by_fp: Vec<FunctionType>,
    pub affected_vf_indirect_calls: u32,
    pub affected_fp_indirect_calls: u32,
}

/// Runs the per-declaration and per-body passes described in §4.3,
/// extending `functions_changed` in place. `functions_changed` must
/// already contain the seeds from the reverse-postorder scan and
/// `affected_vfs` must already be fully built — both happen before this
/// runs (§9 "two-pass order").
pub fn run(
    tu: &TranslationUnit,
    decls_by_id: &HashMap<DeclId, &DeclRecord>,
    dlm: &DiffLineManager,
    affected_vfs: &HashSet<DeclId>,
    functions_changed: &mut OrderedSet<DeclId>,
    cg: &ReverseCallGraph,
) -> VisitorOutput {
    let mut out = VisitorOutput::default();

    // Pass 1: every declaration, global-constant taint closure and
    // affected-node bookkeeping.
    for decl in &tu.decls {
        if decl.is_global_constant() {
            let tainted = if dlm.is_changed_decl(decl) {
                true
            } else if let Some(init) = &decl.initializer {
                let mut refs = Vec::new();
                init.collect_refs(&mut refs);
                refs.iter().any(|d| out.global_constant_set.contains(d))
            } else {
                false
            };
            if tainted {
                out.global_constant_set.insert(decl.id);
                out.taint_decls.insert(decl.id);
            }
        }

        let tracked_kind = matches!(
            decl.kind,
            DeclKind::Typedef | DeclKind::Field | DeclKind::Var | DeclKind::Function
        );
        if tracked_kind && !decl.is_system_header && dlm.is_changed_decl(decl) {
            out.affected_nodes.insert(decl.id);
        }
    }

    // §3: AN also includes every TaintDecls member and every changed
    // function's own definition, regardless of kind.
    for &d in out.taint_decls.iter() {
        if let Some(decl) = decls_by_id.get(&d) {
            if !decl.is_system_header {
                out.affected_nodes.insert(d);
            }
        }
    }
    for &d in functions_changed.iter() {
        if let Some(decl) = decls_by_id.get(&d) {
            if !decl.is_system_header {
                out.affected_nodes.insert(d);
            }
        }
    }

    // Pass 2: function bodies, skipping anything already (or newly)
    // known to be changed. Function templates and anything else excluded
    // from the call graph (`build_call_graph`'s `is_template` skip) are
    // skipped here too — there is no CG node for them to propagate from.
    for decl in &tu.decls {
        if !decl.kind.is_function_or_method() {
            continue;
        }
        if !cg.has_node(decl.id) {
            continue;
        }
        let Some(body) = &decl.body else { continue };

        if functions_changed.contains(&decl.id) || dlm.is_changed_decl(decl) {
            functions_changed.insert(decl.id);
            continue;
        }

        for event in body {
            match event {
                BodyEvent::DeclRef { decl: referenced, is_direct_callee }
                | BodyEvent::MemberRef { decl: referenced, is_direct_callee } => {
                    if out.taint_decls.contains(referenced) {
                        functions_changed.insert(decl.id);
                    }
                    if !is_direct_callee {
                        if let Some(rd) = decls_by_id.get(referenced) {
                            if rd.kind.is_function_or_method()
                                && functions_changed.contains(referenced)
                            {
                                if let Some(ft) = &rd.function_type {
                                    if !out.types_may_used_by_fp.contains(ft) {
                                        out.types_may_used_by_fp.push(ft.clone());
                                    }
                                }
                            }
                        }
                    }
                }
                BodyEvent::Call { callee } => match callee {
                    CalleeKind::Direct(_) => {}
                    CalleeKind::FunctionPointer(ft) => {
                        if out.types_may_used_by_fp.iter().any(|t| t.compatible_with(ft)) {
                            functions_changed.insert(decl.id);
                            out.affected_fp_indirect_calls += 1;
                        }
                    }
                    CalleeKind::Virtual(method_id) => {
                        if affected_vfs.contains(method_id) {
                            functions_changed.insert(decl.id);
                            out.affected_vf_indirect_calls += 1;
                        }
                    }
                },
            }
        }
    }

    out
}
