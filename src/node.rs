use alloc::boxed::Box;

/// Color of the link from a node's parent to the node itself.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum NodeColor {
    #[default]
    Red,
    Black,
}

impl NodeColor {
    pub(crate) fn flip(&mut self) {
        *self = match self {
            NodeColor::Red => NodeColor::Black,
            NodeColor::Black => NodeColor::Red,
        };
    }
}

pub(crate) type Link<K, V> = Option<Box<LeanwoodNode<K, V>>>;

#[derive(Debug, Clone)]
pub(crate) struct LeanwoodNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: NodeColor,
    pub(crate) small: Link<K, V>,
    pub(crate) big: Link<K, V>,
    pub(crate) size: usize,
}

impl<K, V> LeanwoodNode<K, V> {
    /// New nodes always hang off a red link.
    pub(crate) fn new_isolated(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            color: NodeColor::default(),
            small: None,
            big: None,
            size: 1,
        })
    }

    pub(crate) fn is_red(&self) -> bool {
        self.color == NodeColor::Red
    }

    pub(crate) fn update_size(&mut self) {
        self.size = 1 + size(&self.small) + size(&self.big);
    }

    pub(crate) fn small_child(&self) -> Option<&Self> {
        self.small.as_deref()
    }

    pub(crate) fn big_child(&self) -> Option<&Self> {
        self.big.as_deref()
    }
}

/// Empty links are black.
pub(crate) fn is_red<K, V>(link: &Link<K, V>) -> bool {
    link.as_ref().is_some_and(|node| node.is_red())
}

/// Whether the `small` child of the node behind `link` is red.
pub(crate) fn is_small_red<K, V>(link: &Link<K, V>) -> bool {
    link.as_ref().is_some_and(|node| is_red(&node.small))
}

pub(crate) fn size<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

#[cfg(test)]
mod tests {
    use super::{LeanwoodNode, NodeColor, is_red, is_small_red, size};

    #[test]
    pub fn create_node() {
        let node = LeanwoodNode::new_isolated(3, "three");

        assert!(node.is_red());
        assert_eq!(node.size, 1);
        assert!(node.small.is_none() && node.big.is_none());
    }

    #[test]
    pub fn empty_link_is_black() {
        assert!(!is_red::<usize, ()>(&None));
        assert!(!is_small_red::<usize, ()>(&None));
        assert_eq!(size::<usize, ()>(&None), 0);
    }

    #[test]
    pub fn color_flip() {
        let mut color = NodeColor::Red;
        color.flip();
        assert_eq!(color, NodeColor::Black);
        color.flip();
        assert_eq!(color, NodeColor::Red);
    }

    #[test]
    pub fn size_update() {
        let mut node = LeanwoodNode::new_isolated(5, ());
        node.small = Some(LeanwoodNode::new_isolated(3, ()));
        node.big = Some(LeanwoodNode::new_isolated(7, ()));
        node.update_size();

        assert_eq!(node.size, 3);
        assert!(is_small_red(&Some(node)));
    }
}
