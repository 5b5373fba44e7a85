use std::collections::{HashMap, HashSet};

use crate::callgraph::ReverseCallGraph;
use crate::diff::DiffLineManager;
use crate::model::{DeclId, DeclRecord};

/// The set of virtual methods whose override chain touches a change:
/// every changed virtual method, plus every method it (transitively)
/// overrides. A call through a base-class pointer to any method in this
/// set might now dispatch to changed code, even though the call site
/// itself is untouched.
pub fn build(
    cg: &ReverseCallGraph,
    decls: &HashMap<DeclId, &DeclRecord>,
    dlm: &DiffLineManager,
) -> HashSet<DeclId> {
    let mut affected = HashSet::new();
    for decl_id in cg.reverse_postorder() {
        let Some(decl) = decls.get(&decl_id) else { continue };
        if !decl.kind.is_virtual_method() {
            continue;
        }
        if !dlm.is_changed_decl(decl) {
            continue;
        }
        insert_with_overrides(decl_id, decls, &mut affected);
    }
    affected
}

fn insert_with_overrides(
    decl_id: DeclId,
    decls: &HashMap<DeclId, &DeclRecord>,
    affected: &mut HashSet<DeclId>,
) {
    if !affected.insert(decl_id) {
        return;
    }
    if let Some(decl) = decls.get(&decl_id) {
        for &overridden in &decl.overridden_methods {
            insert_with_overrides(overridden, decls, affected);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeclKind, SourceRange};

    fn method(id: u32, overrides: Vec<u32>, changed_range: Option<(u32, u32)>) -> DeclRecord {
        DeclRecord {
            id: DeclId(id),
            kind: DeclKind::Method { is_virtual: true },
            name: format!("m{id}"),
            file: "a.cpp".into(),
            range: changed_range.map(|(s, e)| SourceRange { start_line: s, end_line: e }),
            is_system_header: false,
            is_definition: true,
            is_template: false,
            is_const_qualified: false,
            is_namespace_or_class_scope: false,
            has_external_linkage: true,
            overridden_methods: overrides.into_iter().map(DeclId).collect(),
            function_type: None,
            arity: None,
            usr: None,
            initializer: None,
            body: None,
        }
    }

    #[test]
    fn override_chain_is_transitively_included() {
        // Derived::m (3) overrides Base::m (2) overrides Iface::m (1).
        // Only Derived::m's range is in the diff.
        let base = method(2, vec![1], None);
        let iface = method(1, vec![], None);
        let derived = method(3, vec![2], Some((10, 12)));

        let mut decls: HashMap<DeclId, &DeclRecord> = HashMap::new();
        decls.insert(DeclId(1), &iface);
        decls.insert(DeclId(2), &base);
        decls.insert(DeclId(3), &derived);

        let mut cg = ReverseCallGraph::new();
        cg.add_node(DeclId(3));
        cg.add_root_edge(DeclId(3));

        let diff = DiffLineManager::from_ranges(vec![(10, 12)]);
        let affected = build(&cg, &decls, &diff);

        assert!(affected.contains(&DeclId(3)));
        assert!(affected.contains(&DeclId(2)));
        assert!(affected.contains(&DeclId(1)));
    }
}
