//! An ordered map backed by a left-leaning red-black tree.
//!
//! [`Leanwood`] keeps its height logarithmic in the number of entries no
//! matter the insertion order, so lookups, insertions, deletions and
//! min/max queries all run in `O(log n)`.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod balance;
mod check;
mod error;
mod iter;
mod node;

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::mem;

use alloc::boxed::Box;
use log::{debug, trace};

use balance::{balance, move_red_big, move_red_small, rotate_toward_big};
use node::{LeanwoodNode, Link, NodeColor, is_red, is_small_red};

pub use error::{Error, Violation};
pub use iter::{IntoIter, Iter, IterMut, Keys, Values};

/// An associative array, storing key-value pairs in key order.
#[derive(Clone)]
pub struct Leanwood<K, V> {
    root: Link<K, V>,
}

impl<K, V> Leanwood<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self { root: None }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        node::size(&self.root)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of links on the longest root-to-leaf path; a one-node tree has
    /// height 0 and an empty tree height -1.
    #[must_use]
    pub fn height(&self) -> isize {
        fn height<K, V>(node: Option<&LeanwoodNode<K, V>>) -> isize {
            match node {
                None => -1,
                Some(node) => 1 + height(node.small_child()).max(height(node.big_child())),
            }
        }

        height(self.root.as_deref())
    }

    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Smallest key of the tree.
    pub fn min(&self) -> Result<&K, Error> {
        let mut node = self.root.as_deref().ok_or(Error::EmptyContainer("min"))?;
        while let Some(small) = node.small_child() {
            node = small;
        }

        Ok(&node.key)
    }

    /// Largest key of the tree.
    pub fn max(&self) -> Result<&K, Error> {
        let mut node = self.root.as_deref().ok_or(Error::EmptyContainer("max"))?;
        while let Some(big) = node.big_child() {
            node = big;
        }

        Ok(&node.key)
    }

    /// Removes the entry holding the smallest key.
    pub fn delete_min(&mut self) -> Result<(K, V), Error> {
        let mut root = self.root.take().ok_or(Error::EmptyContainer("delete_min"))?;

        if !is_red(&root.small) && !is_red(&root.big) {
            root.color = NodeColor::Red;
        }
        let (root, removed) = delete_min(root);
        self.root = root;
        self.blacken_root();

        trace!("delete_min: {} entries left", self.len());
        Ok((removed.key, removed.value))
    }

    /// Removes the entry holding the largest key.
    pub fn delete_max(&mut self) -> Result<(K, V), Error> {
        let mut root = self.root.take().ok_or(Error::EmptyContainer("delete_max"))?;

        if !is_red(&root.small) && !is_red(&root.big) {
            root.color = NodeColor::Red;
        }
        let (root, removed) = delete_max(root);
        self.root = root;
        self.blacken_root();

        trace!("delete_max: {} entries left", self.len());
        Ok((removed.key, removed.value))
    }

    fn blacken_root(&mut self) {
        if let Some(root) = self.root.as_mut() {
            root.color = NodeColor::Black;
        }
    }
}

impl<K: Ord, V> Leanwood<K, V> {
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current_node = self.root.as_deref();

        while let Some(node) = current_node {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current_node = node.small_child(),
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => current_node = node.big_child(),
            }
        }

        None
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current_node = self.root.as_deref_mut();

        while let Some(node) = current_node {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current_node = node.small.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
                Ordering::Greater => current_node = node.big.as_deref_mut(),
            }
        }

        None
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Inserts a key-value pair, returning the value it replaced if `key` was
    /// already present. The stored key is left untouched in that case.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (mut root, replaced) = insert(self.root.take(), key, value);
        root.color = NodeColor::Black;
        self.root = Some(root);

        trace!("insert: {} entries", self.len());
        replaced
    }

    /// Symbol-table style entry point: an absent `value` deletes `key`.
    pub fn put(&mut self, key: Option<K>, value: Option<V>) -> Result<(), Error> {
        let key = key.ok_or(Error::InvalidArgument("put"))?;

        match value {
            Some(value) => {
                self.insert(key, value);
            }
            None => {
                debug!("put: absent value, deleting the key instead");
                self.remove(&key);
            }
        }

        Ok(())
    }

    /// Removes `key` and returns its value. Removing an absent key leaves the
    /// tree untouched.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if !self.contains(key) {
            debug!("remove: key is absent, nothing to do");
            return None;
        }

        let mut root = self.root.take()?;
        if !is_red(&root.small) && !is_red(&root.big) {
            root.color = NodeColor::Red;
        }
        let (root, removed) = delete(Some(root), key);
        self.root = root;
        self.blacken_root();

        trace!("remove: {} entries left", self.len());
        removed.map(|(_, value)| value)
    }

    /// Greatest key less than or equal to `key`.
    pub fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current_node = self.root.as_deref();
        let mut best = None;

        while let Some(node) = current_node {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current_node = node.small_child(),
                Ordering::Equal => return Some(&node.key),
                Ordering::Greater => {
                    best = Some(&node.key);
                    current_node = node.big_child();
                }
            }
        }

        best
    }

    /// Least key greater than or equal to `key`.
    pub fn ceiling<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current_node = self.root.as_deref();
        let mut best = None;

        while let Some(node) = current_node {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => {
                    best = Some(&node.key);
                    current_node = node.small_child();
                }
                Ordering::Equal => return Some(&node.key),
                Ordering::Greater => current_node = node.big_child(),
            }
        }

        best
    }

    /// Checks every structural invariant of the tree, reporting the first
    /// one found broken.
    pub fn validate(&self) -> Result<(), Violation> {
        check::validate(&self.root)
    }
}

fn insert<K: Ord, V>(link: Link<K, V>, key: K, value: V) -> (Box<LeanwoodNode<K, V>>, Option<V>) {
    let Some(mut h) = link else {
        return (LeanwoodNode::new_isolated(key, value), None);
    };

    let replaced = match key.cmp(&h.key) {
        Ordering::Less => {
            let (small, replaced) = insert(h.small.take(), key, value);
            h.small = Some(small);
            replaced
        }
        Ordering::Greater => {
            let (big, replaced) = insert(h.big.take(), key, value);
            h.big = Some(big);
            replaced
        }
        Ordering::Equal => Some(mem::replace(&mut h.value, value)),
    };

    (balance(h), replaced)
}

/// Splices out the smallest node below `h`, handing it back detached.
fn delete_min<K, V>(mut h: Box<LeanwoodNode<K, V>>) -> (Link<K, V>, Box<LeanwoodNode<K, V>>) {
    if h.small.is_none() {
        return (h.big.take(), h);
    }

    if !is_red(&h.small) && !is_small_red(&h.small) {
        h = move_red_small(h);
    }

    let Some(small) = h.small.take() else {
        return (h.big.take(), h);
    };
    let (small, removed) = delete_min(small);
    h.small = small;

    (Some(balance(h)), removed)
}

fn delete_max<K, V>(mut h: Box<LeanwoodNode<K, V>>) -> (Link<K, V>, Box<LeanwoodNode<K, V>>) {
    if is_red(&h.small) {
        h = rotate_toward_big(h);
    }

    if h.big.is_none() {
        return (h.small.take(), h);
    }

    if !is_red(&h.big) && !is_small_red(&h.big) {
        h = move_red_big(h);
    }

    let Some(big) = h.big.take() else {
        return (h.small.take(), h);
    };
    let (big, removed) = delete_max(big);
    h.big = big;

    (Some(balance(h)), removed)
}

fn delete<K, V, Q>(link: Link<K, V>, key: &Q) -> (Link<K, V>, Option<(K, V)>)
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let Some(mut h) = link else {
        return (None, None);
    };

    let removed = if key.cmp(h.key.borrow()) == Ordering::Less {
        if h.small.is_some() && !is_red(&h.small) && !is_small_red(&h.small) {
            h = move_red_small(h);
        }
        let (small, removed) = delete(h.small.take(), key);
        h.small = small;
        removed
    } else {
        if is_red(&h.small) {
            h = rotate_toward_big(h);
        }
        if key.cmp(h.key.borrow()) == Ordering::Equal && h.big.is_none() {
            let h = *h;
            return (h.small, Some((h.key, h.value)));
        }
        if h.big.is_some() && !is_red(&h.big) && !is_small_red(&h.big) {
            h = move_red_big(h);
        }

        match (key.cmp(h.key.borrow()), h.big.take()) {
            (Ordering::Equal, Some(big)) => {
                // successor takes over this node's slot
                let (big, successor) = delete_min(big);
                h.big = big;
                let successor = *successor;
                let key = mem::replace(&mut h.key, successor.key);
                let value = mem::replace(&mut h.value, successor.value);
                Some((key, value))
            }
            (_, big) => {
                let (big, removed) = delete(big, key);
                h.big = big;
                removed
            }
        }
    };

    (Some(balance(h)), removed)
}

impl<K, V> Default for Leanwood<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Leanwood<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for Leanwood<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Leanwood<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Dumps the entries as `{k1=v1, k2=v2}`, largest key first.
impl<K: fmt::Display, V: fmt::Display> fmt::Display for Leanwood<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn descending<K: fmt::Display, V: fmt::Display>(
            node: Option<&LeanwoodNode<K, V>>,
            first: &mut bool,
            f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result {
            let Some(node) = node else {
                return Ok(());
            };

            descending(node.big_child(), first, f)?;
            if !mem::take(first) {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", node.key, node.value)?;
            descending(node.small_child(), first, f)
        }

        f.write_str("{")?;
        descending(self.root.as_deref(), &mut true, f)?;
        f.write_str("}")
    }
}
