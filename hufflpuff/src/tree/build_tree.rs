use common::FrequencyTable;
use common::HuffError;
use common::Result;
use log::log_enabled;
use log::Level::Trace;
use log::*;

use crate::heap::PriorityQueue;
use crate::tree::tree_node::Node;
use crate::tree::Tree;
use crate::ALPHABET_SIZE;

/// Creates a huffman tree by repeatedly combining the two lightest trees.
///
/// Only symbols with a count > 0 become leafs. Without any such symbol the tree is empty.
pub fn build_tree(counts: &FrequencyTable) -> Result<Tree> {
    let mut heap = PriorityQueue::with_capacity(ALPHABET_SIZE);
    for (symbol, count) in counts.iter() {
        heap.insert(Node::leaf(symbol, count), count);
    }
    // the last remaining tree is the root
    let root = loop {
        let (left, right) = match (heap.remove_min(), heap.remove_min()) {
            (Some(left), Some(right)) => (left, right),
            (last, _) => break last,
        };
        if log_enabled!(Trace) {
            trace!(
                "combine weight {} ({:?}) and {} ({:?})",
                left.weight(),
                left.symbol(),
                right.weight(),
                right.symbol()
            );
        }
        let parent = Node::combine(left, right)
            .ok_or(HuffError::InvalidArgument("total symbol count overflows u64"))?;
        let weight = parent.weight();
        heap.insert(parent, weight);
    };

    let tree = Tree::new(root);
    debug!(
        "built huffman tree with {} symbols, weight {}, depth {}",
        tree.get_num_symbol_nodes(),
        tree.get_weight(),
        tree.get_depth()
    );
    Ok(tree)
}
