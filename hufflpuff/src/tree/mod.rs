pub mod build_tree;
pub mod code_table;
pub mod render_tree;
mod tree;
pub(crate) mod tree_node;
pub use build_tree::build_tree;
pub use code_table::tree_to_table;
pub use code_table::CodeTable;
pub use tree_node::Node;

pub use tree::Tree;

/// Lower bound for the longest code of a prefix code over `num_symbols` symbols.
///
/// Every symbol is a leaf, a tree of depth `d` has at most `2^d` leaves. At least one bit is
/// needed, also for a single symbol.
#[inline]
pub fn minimum_tree_depth(num_symbols: usize) -> usize {
    let mut min_depth = 0;
    while (1_usize << min_depth) < num_symbols {
        min_depth += 1;
    }
    min_depth.max(1)
}

#[test]
fn minimum_depth_of_small_and_full_alphabets() {
    let expected = [(0, 1), (1, 1), (2, 1), (3, 2), (4, 2), (5, 3), (8, 3), (9, 4), (129, 8)];
    for (num_symbols, depth) in expected.iter() {
        assert_eq!(minimum_tree_depth(*num_symbols), *depth, "{} symbols", num_symbols);
    }
    assert_eq!(minimum_tree_depth(crate::ALPHABET_SIZE), 8);
}
