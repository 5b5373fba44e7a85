use std::collections::HashMap;

use crate::model::DeclId;

/// A call graph restricted to the functions whose definitions are
/// available in the current translation unit, indexed the opposite way
/// a normal call graph would be: each node stores its *callers*, not its
/// callees. Edge notation `A → B` is realized uniformly as "`B` is
/// pushed onto `A`'s caller list" — for a direct call expression in `f`
/// resolving to `g`, that's `g → f` (`f` is a caller of `g`); for an
/// externally linked `f`, that's `root → f` (`f` is a "caller" of the
/// sentinel root, which makes `f` reachable when a traversal walks the
/// root's caller list).
///
/// The virtual root exists purely so reverse-postorder traversal has a
/// single entry point that can reach every externally visible function
/// and, transitively, everything that calls it. Declarations that are
/// never called and never externally linked simply never show up in
/// that traversal — they're still present as isolated entries in `nodes`
/// if something needs to look one up directly.
#[derive(Debug, Default)]
pub struct ReverseCallGraph {
    root_callers: Vec<DeclId>,
    nodes: HashMap<DeclId, Vec<DeclId>>,
}

impl ReverseCallGraph {
    pub fn new() -> ReverseCallGraph {
        ReverseCallGraph::default()
    }

    /// Ensures `decl` has a node, without adding any edges.
    pub fn add_node(&mut self, decl: DeclId) {
        self.nodes.entry(decl).or_default();
    }

    /// Adds the call edge `callee → caller`.
    pub fn add_call_edge(&mut self, callee: DeclId, caller: DeclId) {
        let callers = self.nodes.entry(callee).or_default();
        if !callers.contains(&caller) {
            callers.push(caller);
        }
    }

    /// Adds the root edge for an externally linked function.
    pub fn add_root_edge(&mut self, decl: DeclId) {
        if !self.root_callers.contains(&decl) {
            self.root_callers.push(decl);
        }
    }

    pub fn has_node(&self, decl: DeclId) -> bool {
        self.nodes.contains_key(&decl)
    }

    pub fn callers_of(&self, decl: DeclId) -> &[DeclId] {
        self.nodes.get(&decl).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of real nodes, excluding the sentinel root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Reverse-postorder traversal starting at the sentinel root,
    /// walking each node's caller list as its graph-traversal children.
    /// This is the deterministic order `.cg` emission and the
    /// `FunctionsChanged`/`AffectedVFs` seeding scans both rely on.
    /// Cyclic caller chains (mutual recursion) are safe: a node is
    /// pushed to the postorder at most once.
    pub fn reverse_postorder(&self) -> Vec<DeclId> {
        let mut visited: std::collections::HashSet<DeclId> = std::collections::HashSet::new();
        let mut postorder = Vec::new();
        for &root_child in &self.root_callers {
            self.visit_postorder(root_child, &mut visited, &mut postorder);
        }
        postorder.reverse();
        postorder
    }

    fn visit_postorder(
        &self,
        decl: DeclId,
        visited: &mut std::collections::HashSet<DeclId>,
        postorder: &mut Vec<DeclId>,
    ) {
        if !visited.insert(decl) {
            return;
        }
        for &caller in self.callers_of(decl) {
            self.visit_postorder(caller, visited, postorder);
        }
        postorder.push(decl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> DeclId {
        DeclId(n)
    }

    #[test]
    fn reaches_external_function_via_root() {
        let mut cg = ReverseCallGraph::new();
        cg.add_node(id(1));
        cg.add_root_edge(id(1));
        let order = cg.reverse_postorder();
        assert_eq!(order, vec![id(1)]);
    }

    #[test]
    fn caller_chain_is_traversed() {
        let mut cg = ReverseCallGraph::new();
        // f (1, external) calls g (2) calls h (3)
        cg.add_node(id(1));
        cg.add_node(id(2));
        cg.add_node(id(3));
        cg.add_root_edge(id(1));
        cg.add_call_edge(id(2), id(1)); // g called by f
        cg.add_call_edge(id(3), id(2)); // h called by g
        let order = cg.reverse_postorder();
        assert_eq!(order, vec![id(1), id(2), id(3)]);
    }

    #[test]
    fn unreachable_node_is_absent_from_traversal() {
        let mut cg = ReverseCallGraph::new();
        cg.add_node(id(1));
        cg.add_root_edge(id(1));
        cg.add_node(id(42)); // static, never called, not externally linked
        let order = cg.reverse_postorder();
        assert!(!order.contains(&id(42)));
        assert!(cg.has_node(id(42)));
    }

    #[test]
    fn duplicate_caller_edges_are_deduped() {
        let mut cg = ReverseCallGraph::new();
        cg.add_call_edge(id(2), id(1));
        cg.add_call_edge(id(2), id(1));
        assert_eq!(cg.callers_of(id(2)), &[id(1)]);
    }
}
