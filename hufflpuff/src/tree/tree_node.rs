/// A node of the huffman tree.
///
/// Internal nodes own their children exclusively, a tree is dropped with its root.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Leaf {
        /// the symbol, limited to single byte alphabet
        symbol: u8,
        /// the number of occurences
        weight: u64,
    },
    Internal {
        /// sum of the weights of both children
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    /// Combines two trees under a new parent. Returns None if the summed weight overflows.
    pub fn combine(left: Node, right: Node) -> Option<Self> {
        let weight = left.weight().checked_add(right.weight())?;
        Some(Node::Internal {
            weight,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    #[inline]
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    #[inline]
    pub fn symbol(&self) -> Option<u8> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// the children of an internal node
    #[inline]
    pub fn children(&self) -> Option<(&Node, &Node)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((left, right)),
        }
    }
}

impl core::fmt::Debug for Node {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Node::Leaf { symbol, weight } => f.write_fmt(format_args!(
                "Leaf{{ symbol:{:?} weight:{} }}",
                symbol, weight
            )),
            Node::Internal {
                weight,
                left,
                right,
            } => f.write_fmt(format_args!(
                "Internal{{ weight:{} left:{:?} right:{:?} }}",
                weight, left, right
            )),
        }
    }
}

#[test]
fn test_combine() {
    let node = Node::combine(Node::leaf(b'a', 3), Node::leaf(b'b', 4)).unwrap();
    assert_eq!(node.weight(), 7);
    assert_eq!(node.symbol(), None);
    let (left, right) = node.children().unwrap();
    assert_eq!(left.symbol(), Some(b'a'));
    assert_eq!(right.symbol(), Some(b'b'));

    assert!(Node::combine(Node::leaf(0, u64::MAX), Node::leaf(1, 1)).is_none());
}
