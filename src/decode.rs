use bitstream::BitString;
use common::HuffError;
use common::Result;
use hufflpuff::CodeTable;

/// Node of the decoding trie, children are positions in the node array
#[derive(Debug, Default, Clone, Copy)]
struct DecodeNode {
    symbol: Option<u8>,
    /// child for bit 0
    left: Option<u32>,
    /// child for bit 1
    right: Option<u32>,
}

/// Decoding trie, rebuilt from a [`CodeTable`].
#[derive(Debug)]
pub struct DecodingTable {
    nodes: Vec<DecodeNode>,
}

impl DecodingTable {
    /// Inserts the code of every symbol into the trie. The codes of the table need to be prefix
    /// free, otherwise `InvalidArgument` is returned.
    pub fn new(table: &CodeTable) -> Result<Self> {
        let mut nodes = vec![DecodeNode::default()];
        for (symbol, code) in table.iter() {
            if code.is_empty() {
                return Err(HuffError::InvalidArgument("code table contains an empty code"));
            }
            let mut pos = 0;
            for bit in code.iter() {
                if nodes[pos].symbol.is_some() {
                    return Err(HuffError::InvalidArgument("code table is not prefix free"));
                }
                let existing = if bit { nodes[pos].right } else { nodes[pos].left };
                pos = match existing {
                    Some(child) => child as usize,
                    None => {
                        let next = nodes.len();
                        nodes.push(DecodeNode::default());
                        if bit {
                            nodes[pos].right = Some(next as u32);
                        } else {
                            nodes[pos].left = Some(next as u32);
                        }
                        next
                    }
                };
            }
            let leaf = &nodes[pos];
            if leaf.symbol.is_some() || leaf.left.is_some() || leaf.right.is_some() {
                return Err(HuffError::InvalidArgument("code table is not prefix free"));
            }
            nodes[pos].symbol = Some(symbol);
        }
        Ok(DecodingTable { nodes })
    }

    /// Decodes all bits of `input`.
    ///
    /// A bit sequence which is not the start of any code fails with `InvalidCode`, bits left over
    /// at the end with `IncompleteCode`.
    pub fn decode(&self, input: &BitString) -> Result<Vec<u8>> {
        let mut out = vec![];
        let mut pos = 0;
        let mut code_start = 0;
        for (bit_pos, bit) in input.iter().enumerate() {
            let node = &self.nodes[pos];
            let child = if bit { node.right } else { node.left };
            pos = child.ok_or(HuffError::InvalidCode(bit_pos))? as usize;
            if let Some(symbol) = self.nodes[pos].symbol {
                out.push(symbol);
                pos = 0;
                code_start = bit_pos + 1;
            }
        }
        if pos != 0 {
            return Err(HuffError::IncompleteCode(code_start));
        }
        Ok(out)
    }
}

/// Decodes bits encoded with `table`, the reverse of [`crate::encode`].
pub fn decode(table: &CodeTable, input: &BitString) -> Result<Vec<u8>> {
    DecodingTable::new(table)?.decode(input)
}
