use std::collections::{HashSet, VecDeque};

use crate::callgraph::ReverseCallGraph;
use crate::model::DeclId;

/// Walks every caller-edge reachable from each seed in `functions_changed`,
/// returning the decls that need reanalysis in discovery order. A decl
/// reachable from more than one seed (or more than one path) is only
/// emitted once. Matches the worklist closure used to propagate a change
/// up through every transitive caller: pop a node, mark it if unmarked,
/// and push all of its own callers.
pub fn run(cg: &ReverseCallGraph, functions_changed: &[DeclId]) -> Vec<DeclId> {
    let mut marked: HashSet<DeclId> = HashSet::new();
    let mut need_reanalyze = Vec::new();

    for &seed in functions_changed {
        let mut worklist: VecDeque<DeclId> = VecDeque::new();
        worklist.push_back(seed);
        while let Some(decl) = worklist.pop_back() {
            if marked.contains(&decl) {
                continue;
            }
            marked.insert(decl);
            need_reanalyze.push(decl);
            for &caller in cg.callers_of(decl) {
                worklist.push_back(caller);
            }
        }
    }

    need_reanalyze
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> DeclId {
        DeclId(n)
    }

    #[test]
    fn propagates_through_caller_chain() {
        let mut cg = ReverseCallGraph::new();
        // h (3) calls g (2) calls f (1). f changed.
        cg.add_call_edge(id(1), id(2));
        cg.add_call_edge(id(2), id(3));
        let result = run(&cg, &[id(1)]);
        assert_eq!(result, vec![id(1), id(2), id(3)]);
    }

    #[test]
    fn shared_ancestor_reported_once() {
        let mut cg = ReverseCallGraph::new();
        // both f (1) and g (2) are called by h (3); both changed.
        cg.add_call_edge(id(1), id(3));
        cg.add_call_edge(id(2), id(3));
        let result = run(&cg, &[id(1), id(2)]);
        assert_eq!(result.iter().filter(|&&d| d == id(3)).count(), 1);
    }

    #[test]
    fn no_seeds_means_no_output() {
        let cg = ReverseCallGraph::new();
        assert!(run(&cg, &[]).is_empty());
    }
}
