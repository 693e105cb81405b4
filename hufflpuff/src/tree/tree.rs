use super::tree_node::Node;
use crate::tree::render_tree::render_plan_to;
use bitstream::BitString;
use common::HuffError;
use common::Result;

/// A huffman tree. The tree is empty, when no symbol was observed.
///
/// A built tree is never modified, it can be shared between threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    pub(crate) root: Option<Node>,
}

impl Tree {
    pub fn new(root: Option<Node>) -> Self {
        Tree { root }
    }

    pub fn get_root_node(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// total weight of all symbols
    pub fn get_weight(&self) -> u64 {
        self.root.as_ref().map(Node::weight).unwrap_or(0)
    }

    pub fn get_num_symbol_nodes(&self) -> usize {
        let mut num_symbols = 0;
        self.walk_tree(&mut |node, _path| {
            if node.is_leaf() {
                num_symbols += 1;
            }
        });
        num_symbols
    }

    /// Number of edges from the root to the deepest leaf. A tree with a single leaf has depth 0.
    pub fn get_depth(&self) -> usize {
        let mut depth = 0;
        self.walk_tree(&mut |_node, path| {
            depth = depth.max(path.len());
        });
        depth
    }

    /// Sum of weight * depth over all leafs, which is the number of bits the input encodes to.
    ///
    /// A single leaf is counted with depth 1, since it gets a one bit code. Fails with
    /// `InvalidArgument` if the number of bits overflows u64.
    pub fn weighted_path_length(&self) -> Result<u64> {
        match &self.root {
            None => Ok(0),
            Some(Node::Leaf { weight, .. }) => Ok(*weight),
            Some(root @ Node::Internal { .. }) => {
                let mut size_in_bits = Some(0_u64);
                walk_node(root, &BitString::new(), &mut |node, path| {
                    if node.is_leaf() {
                        size_in_bits = size_in_bits.and_then(|bits| {
                            bits.checked_add(node.weight().checked_mul(path.len() as u64)?)
                        });
                    }
                });
                size_in_bits.ok_or(HuffError::InvalidArgument("encoded size overflows u64"))
            }
        }
    }

    /// returns estimated compressed size in byte
    pub fn estimate_compressed_size(&self) -> Result<u64> {
        let bits = self.weighted_path_length()?;
        Ok(bits / 8 + u64::from(bits % 8 != 0))
    }

    /// Visits every node depth first, left before right. The path from the root to the node
    /// (0 = left, 1 = right) is passed along with the node.
    pub fn walk_tree<F>(&self, fun: &mut F)
    where
        F: FnMut(&Node, &BitString),
    {
        if let Some(root) = &self.root {
            walk_node(root, &BitString::new(), fun);
        }
    }
}

fn walk_node<F>(node: &Node, path: &BitString, fun: &mut F)
where
    F: FnMut(&Node, &BitString),
{
    fun(node, path);
    if let Some((left, right)) = node.children() {
        walk_node(left, &path.with_bit(false), fun);
        walk_node(right, &path.with_bit(true), fun);
    }
}

impl std::fmt::Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        render_plan_to(self, f)
    }
}
