use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Leanwood;
use crate::node::{LeanwoodNode, Link};

/// In-order iterator over the entries of a [`Leanwood`].
pub struct Iter<'a, K, V> {
    pub(crate) curr: Option<&'a LeanwoodNode<K, V>>,
    pub(crate) stack: Vec<&'a LeanwoodNode<K, V>>,
    pub(crate) remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.curr {
            self.stack.push(node);
            self.curr = node.small_child();
        }

        let node = self.stack.pop()?;
        self.curr = node.big_child();
        self.remaining -= 1;

        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

type Pending<'a, K, V> = (&'a K, &'a mut V, Option<&'a mut LeanwoodNode<K, V>>);

/// In-order iterator yielding mutable references to the values.
pub struct IterMut<'a, K, V> {
    curr: Option<&'a mut LeanwoodNode<K, V>>,
    stack: Vec<Pending<'a, K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.curr.take() {
            let LeanwoodNode {
                key,
                value,
                small,
                big,
                ..
            } = node;
            self.stack.push((&*key, value, big.as_deref_mut()));
            self.curr = small.as_deref_mut();
        }

        let (key, value, big) = self.stack.pop()?;
        self.curr = big;
        self.remaining -= 1;

        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// Owning in-order iterator, tearing the tree down as it goes.
pub struct IntoIter<K, V> {
    curr: Link<K, V>,
    stack: Vec<Box<LeanwoodNode<K, V>>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.curr.take() {
            self.curr = node.small.take();
            self.stack.push(node);
        }

        let mut node = self.stack.pop()?;
        self.curr = node.big.take();
        self.remaining -= 1;

        let node = *node;
        Some((node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

pub struct Keys<'a, K, V>(Iter<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V>(Iter<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> Leanwood<K, V> {
    /// Entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            curr: self.root.as_deref(),
            stack: Vec::new(),
            remaining: self.len(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let remaining = self.len();

        IterMut {
            curr: self.root.as_deref_mut(),
            stack: Vec::new(),
            remaining,
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }
}

impl<'a, K, V> IntoIterator for &'a Leanwood<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut Leanwood<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for Leanwood<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let remaining = self.len();

        IntoIter {
            curr: self.root.take(),
            stack: Vec::new(),
            remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Leanwood;

    #[test]
    pub fn sorted_iteration() {
        let tree: Leanwood<_, _> = [9, 2, 7, 4, 5, 1].into_iter().map(|k| (k, k * 10)).collect();

        let entries: Vec<_> = tree.iter().map(|(&k, &v)| (k, v)).collect();
        assert_eq!(entries, [(1, 10), (2, 20), (4, 40), (5, 50), (7, 70), (9, 90)]);
        assert_eq!(tree.values().copied().collect::<Vec<_>>(), [10, 20, 40, 50, 70, 90]);
        assert_eq!(tree.iter().len(), 6);
    }

    #[test]
    pub fn empty_iteration() {
        let tree = Leanwood::<usize, usize>::new();

        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.into_iter().next(), None);
    }

    #[test]
    pub fn mutable_iteration() {
        let mut tree: Leanwood<_, _> = (0..100).map(|k| (k, k)).collect();

        for (key, value) in &mut tree {
            *value += key;
        }

        assert!(tree.iter().all(|(&k, &v)| v == 2 * k));
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    pub fn owned_iteration() {
        let tree: Leanwood<_, _> = (0..50).rev().map(|k| (k, k.to_string())).collect();

        let mut iter = tree.into_iter();
        assert_eq!(iter.len(), 50);
        assert_eq!(iter.next(), Some((0, "0".to_string())));
        assert_eq!(iter.len(), 49);
        assert_eq!(iter.map(|(k, _)| k).collect::<Vec<_>>(), (1..50).collect::<Vec<_>>());
    }
}
