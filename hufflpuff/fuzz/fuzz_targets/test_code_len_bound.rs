#![no_main]

use common::FrequencyTable;
use hufflpuff::build_tree;
use hufflpuff::tree::minimum_tree_depth;
use hufflpuff::tree_to_table;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let counts = FrequencyTable::from_data(data);
    let tree = build_tree(&counts).unwrap();
    let table = tree_to_table(&tree);
    let weighted: u64 = counts
        .iter()
        .map(|(symbol, count)| count * table.get(symbol).unwrap().len() as u64)
        .sum();
    assert_eq!(Ok(weighted), tree.weighted_path_length());
    // a fixed length code is a valid prefix code too, huffman can never be worse
    let fixed_len = minimum_tree_depth(counts.num_symbols()) as u64;
    assert!(weighted <= fixed_len * data.len() as u64);
});
