//! Structural self-check of a tree, derived from the invariants alone.
//!
//! Rules enforced on every node:
//! * keys lie strictly between the bounds set by the node's ancestors,
//! * the `big` link is black,
//! * a red node never has a red `small` child,
//! * both subtrees carry the same number of black links,
//! * the size counter is one plus the size of both subtrees.
//!
//! The root link itself must be black.

use crate::Violation;
use crate::node::{LeanwoodNode, Link, is_red};

struct Summary {
    blacks: usize,
    size: usize,
}

pub(crate) fn validate<K: Ord, V>(root: &Link<K, V>) -> Result<(), Violation> {
    if is_red(root) {
        return Err(Violation::RedRoot);
    }

    validate_tree(root.as_deref(), None, None).map(|_| ())
}

fn validate_tree<K: Ord, V>(
    node: Option<&LeanwoodNode<K, V>>,
    lower: Option<&K>,
    upper: Option<&K>,
) -> Result<Summary, Violation> {
    let Some(node) = node else {
        return Ok(Summary { blacks: 0, size: 0 });
    };

    if lower.is_some_and(|lower| node.key <= *lower) || upper.is_some_and(|upper| node.key >= *upper) {
        return Err(Violation::Order);
    }
    if is_red(&node.big) {
        return Err(Violation::RedBigLink);
    }
    if node.is_red() && is_red(&node.small) {
        return Err(Violation::ConsecutiveReds);
    }

    let small = validate_tree(node.small_child(), lower, Some(&node.key))?;
    let big = validate_tree(node.big_child(), Some(&node.key), upper)?;

    if small.blacks != big.blacks {
        return Err(Violation::BlackImbalance {
            small: small.blacks,
            big: big.blacks,
        });
    }

    let actual = 1 + small.size + big.size;
    if node.size != actual {
        return Err(Violation::SizeMismatch {
            recorded: node.size,
            actual,
        });
    }

    Ok(Summary {
        blacks: small.blacks + usize::from(!node.is_red()),
        size: actual,
    })
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use super::validate;
    use crate::Violation;
    use crate::node::{LeanwoodNode, NodeColor};

    fn node(
        key: usize,
        color: NodeColor,
        small: Option<Box<LeanwoodNode<usize, ()>>>,
        big: Option<Box<LeanwoodNode<usize, ()>>>,
    ) -> Option<Box<LeanwoodNode<usize, ()>>> {
        let mut node = LeanwoodNode::new_isolated(key, ());
        node.color = color;
        node.small = small;
        node.big = big;
        node.update_size();
        Some(node)
    }

    #[test]
    pub fn valid_tree() {
        let root = node(
            2,
            NodeColor::Black,
            node(1, NodeColor::Black, None, None),
            node(4, NodeColor::Black, node(3, NodeColor::Red, None, None), None),
        );

        assert_eq!(validate(&root), Ok(()));
        assert_eq!(validate::<usize, ()>(&None), Ok(()));
    }

    #[test]
    pub fn red_root() {
        let root = node(1, NodeColor::Red, None, None);
        assert_eq!(validate(&root), Err(Violation::RedRoot));
    }

    #[test]
    pub fn out_of_order_grandchild() {
        // 5 sits below 4 on the small side of 3
        let root = node(
            3,
            NodeColor::Black,
            node(2, NodeColor::Black, None, node(5, NodeColor::Black, None, None)),
            node(4, NodeColor::Black, None, None),
        );
        assert_eq!(validate(&root), Err(Violation::Order));
    }

    #[test]
    pub fn right_leaning_red() {
        let root = node(1, NodeColor::Black, None, node(2, NodeColor::Red, None, None));
        assert_eq!(validate(&root), Err(Violation::RedBigLink));
    }

    #[test]
    pub fn red_chain() {
        let root = node(
            3,
            NodeColor::Black,
            node(2, NodeColor::Red, node(1, NodeColor::Red, None, None), None),
            None,
        );
        assert_eq!(validate(&root), Err(Violation::ConsecutiveReds));
    }

    #[test]
    pub fn black_imbalance() {
        let root = node(2, NodeColor::Black, node(1, NodeColor::Black, None, None), None);
        assert_eq!(
            validate(&root),
            Err(Violation::BlackImbalance { small: 1, big: 0 })
        );
    }

    #[test]
    pub fn stale_size() {
        let mut root = node(
            2,
            NodeColor::Black,
            node(1, NodeColor::Red, None, None),
            None,
        );
        if let Some(root) = root.as_mut() {
            root.size = 1;
        }
        assert_eq!(
            validate(&root),
            Err(Violation::SizeMismatch { recorded: 1, actual: 2 })
        );
    }
}
