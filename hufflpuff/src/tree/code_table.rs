use bitstream::BitString;
use log::log_enabled;
use log::Level::Trace;
use log::*;

use crate::tree::tree_node::Node;
use crate::tree::Tree;
use crate::ALPHABET_SIZE;

/// Lookup table from symbol to its prefix code.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<BitString>>,
    num_codes: usize,
}

impl Default for CodeTable {
    fn default() -> Self {
        CodeTable {
            codes: vec![None; ALPHABET_SIZE],
            num_codes: 0,
        }
    }
}

impl CodeTable {
    /// Creates a table from `(symbol, code)` pairs. The codes are taken as is, use
    /// [`CodeTable::find_prefix_conflict`] to validate them.
    pub fn from_codes<I>(codes: I) -> Self
    where
        I: IntoIterator<Item = (u8, BitString)>,
    {
        let mut table = CodeTable::default();
        for (symbol, code) in codes {
            table.insert(symbol, code);
        }
        table
    }

    fn insert(&mut self, symbol: u8, code: BitString) {
        if self.codes[symbol as usize].replace(code).is_none() {
            self.num_codes += 1;
        }
    }

    #[inline]
    pub fn get(&self, symbol: u8) -> Option<&BitString> {
        self.codes[symbol as usize].as_ref()
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.codes[symbol as usize].is_some()
    }

    /// number of symbols with a code
    pub fn len(&self) -> usize {
        self.num_codes
    }

    pub fn is_empty(&self) -> bool {
        self.num_codes == 0
    }

    /// iterates over all `(symbol, code)` pairs, ordered by symbol
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitString)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|code| (symbol as u8, code)))
    }

    pub fn max_code_len(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// Returns two symbols whose codes violate the prefix property, the code of the first one is a
    /// prefix of the code of the second one. Empty codes always conflict.
    pub fn find_prefix_conflict(&self) -> Option<(u8, u8)> {
        let mut codes: Vec<(u8, &BitString)> = self.iter().collect();
        if let Some((symbol, _)) = codes.iter().find(|(_, code)| code.is_empty()) {
            return Some((*symbol, *symbol));
        }
        // after sorting, a code is directly followed by the codes it is a prefix of
        codes.sort_by(|(_, a), (_, b)| a.iter().cmp(b.iter()));
        codes
            .windows(2)
            .find(|pair| pair[1].1.starts_with(pair[0].1))
            .map(|pair| (pair[0].0, pair[1].0))
    }
}

impl core::fmt::Debug for CodeTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(symbol, code)| (symbol, code.to_string())))
            .finish()
    }
}

/// converts the tree into a table with prefixes for each symbol
///
/// Walks the tree depth first, a step to the left adds a 0, a step to the right a 1 to the code.
/// A tree with a single symbol gets the code `0` for it, an empty tree yields an empty table.
pub fn tree_to_table(tree: &Tree) -> CodeTable {
    let mut table = CodeTable::default();
    match tree.get_root_node() {
        None => {}
        Some(Node::Leaf { symbol, .. }) => {
            table.insert(*symbol, BitString::from_iter([false]));
        }
        Some(Node::Internal { .. }) => {
            tree.walk_tree(&mut |node, path| {
                if let Some(symbol) = node.symbol() {
                    table.insert(symbol, path.clone());
                }
            });
        }
    }

    if log_enabled!(Trace) {
        for (symbol, code) in table.iter() {
            trace!("{:3}: {}", symbol, code);
        }
    }
    table
}

/// will validate the table to have generated correct prefix properties for all symbols.
/// This validation is rather slow and should not be used in a regular compression execution.
pub fn test_prefix_property(table: &CodeTable) {
    if let Some((prefix_symbol, symbol)) = table.find_prefix_conflict() {
        panic!(
            "invalid prefix detected between {:?} ({}) and {:?} ({})",
            prefix_symbol,
            table.get(prefix_symbol).map(|code| code.to_string()).unwrap_or_default(),
            symbol,
            table.get(symbol).map(|code| code.to_string()).unwrap_or_default(),
        );
    }
}
