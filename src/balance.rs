//! Local transformations that restore the left-leaning red-black invariants.
//!
//! Every primitive takes ownership of a subtree root and hands back the
//! (possibly different) root of the same subtree; callers rebind the child
//! slot they took it from.

use alloc::boxed::Box;

use crate::node::{LeanwoodNode, NodeColor, is_red, is_small_red};

type Tree<K, V> = Box<LeanwoodNode<K, V>>;

//        h                    x
//       / \                  / \
//      a   x       =>       h   c
//         / \              / \
//        b   c            a   b
//
/// Promotes `h.big`, sending `h` down to the small side.
pub(crate) fn rotate_toward_small<K, V>(mut h: Tree<K, V>) -> Tree<K, V> {
    debug_assert!(is_red(&h.big));
    let Some(mut x) = h.big.take() else {
        return h;
    };

    h.big = x.small.take();
    x.color = h.color;
    h.color = NodeColor::Red;
    x.size = h.size;
    h.update_size();
    x.small = Some(h);

    x
}

/// Promotes `h.small`, sending `h` down to the big side.
pub(crate) fn rotate_toward_big<K, V>(mut h: Tree<K, V>) -> Tree<K, V> {
    debug_assert!(is_red(&h.small));
    let Some(mut x) = h.small.take() else {
        return h;
    };

    h.small = x.big.take();
    x.color = h.color;
    h.color = NodeColor::Red;
    x.size = h.size;
    h.update_size();
    x.big = Some(h);

    x
}

/// Toggles `h` and both of its children, splitting or merging a 4-node.
pub(crate) fn flip_colors<K, V>(h: &mut LeanwoodNode<K, V>) {
    debug_assert!(h.small.is_some() && h.big.is_some());

    h.color.flip();
    if let Some(small) = h.small.as_mut() {
        small.color.flip();
    }
    if let Some(big) = h.big.as_mut() {
        big.color.flip();
    }
}

/// With `h` red and both `h.small` and `h.small.small` black, makes
/// `h.small` or one of its children red.
pub(crate) fn move_red_small<K, V>(mut h: Tree<K, V>) -> Tree<K, V> {
    debug_assert!(!is_red(&h.small) && !is_small_red(&h.small));

    flip_colors(&mut h);
    if is_small_red(&h.big) {
        h.big = h.big.take().map(rotate_toward_big);
        h = rotate_toward_small(h);
        flip_colors(&mut h);
    }

    h
}

/// With `h` red and both `h.big` and `h.big.small` black, makes `h.big`
/// or one of its children red.
pub(crate) fn move_red_big<K, V>(mut h: Tree<K, V>) -> Tree<K, V> {
    debug_assert!(!is_red(&h.big) && !is_small_red(&h.big));

    flip_colors(&mut h);
    if is_small_red(&h.small) {
        h = rotate_toward_big(h);
        flip_colors(&mut h);
    }

    h
}

/// Restores the invariants at `h` on the way back up from a mutation below
/// it, and refreshes its size.
pub(crate) fn balance<K, V>(mut h: Tree<K, V>) -> Tree<K, V> {
    if is_red(&h.big) && !is_red(&h.small) {
        h = rotate_toward_small(h);
    }
    if is_red(&h.small) && is_small_red(&h.small) {
        h = rotate_toward_big(h);
    }
    if is_red(&h.small) && is_red(&h.big) {
        flip_colors(&mut h);
    }
    h.update_size();

    h
}
