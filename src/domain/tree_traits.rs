use generational_arena::Index;
use termtree::Tree;

use crate::domain::arena::TreeArena;
use crate::domain::report::grand_total;
use crate::domain::rounding::RoundingPolicy;

pub trait TreeNodeConvert {
    fn to_tree_string(&self, policy: &RoundingPolicy) -> Tree<String>;
}

// The forest hangs below a synthetic "Grand Total" root
impl TreeNodeConvert for TreeArena {
    fn to_tree_string(&self, policy: &RoundingPolicy) -> Tree<String> {
        let mut tree = Tree::new(format!(
            "Grand Total: {}",
            policy.format(grand_total(self))
        ));

        fn build_tree(
            arena: &TreeArena,
            node_idx: Index,
            policy: &RoundingPolicy,
        ) -> Option<Tree<String>> {
            let node = arena.get_node(node_idx)?;
            let mut node_tree = Tree::new(format!(
                "{} [{}]: {}",
                node.data.label,
                node.id(),
                policy.format(node.value)
            ));
            for &child_idx in &node.children {
                if let Some(child_tree) = build_tree(arena, child_idx, policy) {
                    node_tree.push(child_tree);
                }
            }
            Some(node_tree)
        }

        for &root_idx in self.roots() {
            if let Some(root_tree) = build_tree(self, root_idx, policy) {
                tree.push(root_tree);
            }
        }
        tree
    }
}
