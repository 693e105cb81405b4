/*!
hufflpuff builds huffman codes for the byte alphabet.

The symbol counts are put as single leaf trees into a [`PriorityQueue`](heap::PriorityQueue),
then the two lightest trees are combined until only the root remains. Walking the finished
tree yields the [`CodeTable`], a prefix free code per symbol, where frequent symbols get the
shorter codes.

```
use common::FrequencyTable;
use hufflpuff::{build_tree, tree_to_table};

let counts = FrequencyTable::from_data(b"abracadabra");
let tree = build_tree(&counts).unwrap();
let table = tree_to_table(&tree);
assert_eq!(table.get(b'a').unwrap().len(), 1);
```
*/

pub mod heap;
pub mod tree;

pub use crate::tree::build_tree;
pub use crate::tree::tree_to_table;
pub use crate::tree::CodeTable;
pub use crate::tree::Node;
pub use crate::tree::Tree;
pub use common::count_simple;
pub use common::ALPHABET_SIZE;
pub use common::MAX_SYMBOL_VALUE;

/// Initial number of slots in a new priority queue
pub const DEFAULT_HEAP_CAPACITY: usize = 10;
