#![no_main]

use common::FrequencyTable;
use hufflpuff::build_tree;
use hufflpuff::tree::code_table::test_prefix_property;
use hufflpuff::tree_to_table;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let counts = FrequencyTable::from_data(data);
    let tree = build_tree(&counts).unwrap();
    let table = tree_to_table(&tree);
    assert_eq!(table.len(), counts.num_symbols());
    test_prefix_property(&table);
});
