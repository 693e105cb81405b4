/*!
huffman_encoder builds an optimal prefix code for the byte alphabet and encodes data with it.

Symbol counts are turned into a huffman tree ([`hufflpuff`]), the tree into a [`CodeTable`],
and the table is used to encode the input into a packed [`BitString`]. The encoding is
stateless, the input can be encoded chunk by chunk into the same output.

```
use huffman_encoder::{build_code, decode, encode, FrequencyTable};

let input = b"abracadabra";
let table = build_code(&FrequencyTable::from_data(input)).unwrap();
let encoded = encode(&table, input).unwrap();
assert_eq!(encoded.len(), 23);
assert_eq!(decode(&table, &encoded).unwrap(), input.to_vec());
```

The statistics of an encoding run are available via [`Statistics`], its output size always
refers to the packed bits.
*/

use log::*;

pub mod decode;
pub mod encode;
pub mod stats;

pub use crate::decode::decode;
pub use crate::encode::encode;
pub use crate::encode::encode_into;
pub use crate::stats::statistics_view;
pub use crate::stats::Statistics;
pub use crate::stats::SymbolStatistics;
pub use bitstream::BitString;
pub use common::count_simple;
pub use common::FrequencyTable;
pub use common::HuffError;
pub use common::Result;
pub use common::DEFAULT_CHUNK_SIZE;
pub use hufflpuff::CodeTable;
pub use hufflpuff::Tree;

/// Builds the huffman tree for `counts` and derives the code of every symbol.
///
/// A table without any counted symbol yields an empty code table.
pub fn build_code(counts: &FrequencyTable) -> Result<CodeTable> {
    let tree = hufflpuff::build_tree(counts)?;
    Ok(hufflpuff::tree_to_table(&tree))
}

/// Huffman encoder holding the symbol counts and the code table built from them.
///
/// The counts are collected with [`HuffmanEncoder::analyze`] or passed in directly, then
/// [`HuffmanEncoder::build`] creates the code table. Encoding before that fails with
/// [`HuffError::NotInitialized`].
#[derive(Debug, Default, Clone)]
pub struct HuffmanEncoder {
    counts: Option<FrequencyTable>,
    tree: Option<Tree>,
    table: Option<CodeTable>,
}

impl HuffmanEncoder {
    pub fn new() -> Self {
        HuffmanEncoder::default()
    }

    /// Creates an encoder and builds the code table for `counts`.
    pub fn from_frequencies(counts: FrequencyTable) -> Result<Self> {
        let mut encoder = HuffmanEncoder {
            counts: Some(counts),
            ..Default::default()
        };
        encoder.build()?;
        Ok(encoder)
    }

    /// Adds the symbols of `chunk` to the counts. A previously built code table is discarded.
    ///
    /// Analyzing an empty chunk still creates the (empty) counts, building afterwards yields the
    /// empty code table.
    pub fn analyze(&mut self, chunk: &[u8]) -> Result<()> {
        self.counts
            .get_or_insert_with(FrequencyTable::new)
            .update(chunk)?;
        self.tree = None;
        self.table = None;
        Ok(())
    }

    /// Builds the huffman tree and the code table from the collected counts.
    ///
    /// Fails with `InvalidArgument` if the encoded size of the counted input overflows u64.
    pub fn build(&mut self) -> Result<&CodeTable> {
        let counts = self.counts.as_ref().ok_or(HuffError::NotInitialized)?;
        let tree = hufflpuff::build_tree(counts)?;
        let table = hufflpuff::tree_to_table(&tree);
        let output_size = tree.estimate_compressed_size()?;
        info!(
            "built code table: {} symbols, {} bytes in, {} bytes out, longest code {} bits",
            table.len(),
            counts.total(),
            output_size,
            table.max_code_len()
        );
        self.tree = Some(tree);
        Ok(self.table.insert(table))
    }

    pub fn frequencies(&self) -> Result<&FrequencyTable> {
        self.counts.as_ref().ok_or(HuffError::NotInitialized)
    }

    pub fn tree(&self) -> Result<&Tree> {
        self.tree.as_ref().ok_or(HuffError::NotInitialized)
    }

    pub fn code_table(&self) -> Result<&CodeTable> {
        self.table.as_ref().ok_or(HuffError::NotInitialized)
    }

    /// Encodes `input`, see [`encode()`].
    pub fn encode(&self, input: &[u8]) -> Result<BitString> {
        encode(self.code_table()?, input)
    }

    /// Appends the encoded `input` to `out`, see [`encode_into()`].
    pub fn encode_into(&self, input: &[u8], out: &mut BitString) -> Result<()> {
        encode_into(self.code_table()?, input, out)
    }

    /// Decodes bits produced by this encoder.
    pub fn decode(&self, input: &BitString) -> Result<Vec<u8>> {
        decode(self.code_table()?, input)
    }

    /// Statistics for encoding the analyzed input with the built code table.
    pub fn statistics(&self) -> Result<Statistics> {
        Statistics::from_counts(self.code_table()?, self.frequencies()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Setup function that is only run once, even if called multiple times.
    fn setup() {
        INIT.call_once(|| {
            env_logger::init();
        });
    }

    const A_BYTE: u8 = b'a';
    const B_BYTE: u8 = b'b';
    const C_BYTE: u8 = b'c';

    fn get_test_data() -> Vec<u8> {
        use std::io::Read;
        let mut buffer = Vec::new();
        std::io::repeat(A_BYTE)
            .take(45)
            .read_to_end(&mut buffer)
            .unwrap(); // 45% prob
        std::io::repeat(B_BYTE)
            .take(35)
            .read_to_end(&mut buffer)
            .unwrap(); // 35% prob
        std::io::repeat(C_BYTE)
            .take(20)
            .read_to_end(&mut buffer)
            .unwrap(); // 20% prob

        buffer
    }

    #[test]
    fn test_encode_decode() {
        setup();
        let test_data = get_test_data();
        let mut encoder = HuffmanEncoder::new();
        encoder.analyze(&test_data).unwrap();
        let table = encoder.build().unwrap();
        assert_eq!(table.get(A_BYTE).unwrap().len(), 1);
        assert_eq!(table.get(B_BYTE).unwrap().len(), 2);
        assert_eq!(table.get(C_BYTE).unwrap().len(), 2);

        let encoded = encoder.encode(&test_data).unwrap();
        assert_eq!(encoded.len(), 45 + 35 * 2 + 20 * 2);
        assert_eq!(encoder.decode(&encoded).unwrap(), test_data);

        let stats = encoder.statistics().unwrap();
        assert_eq!(stats.input_size, 100);
        assert_eq!(stats.output_bits, encoded.len() as u64);
        assert_eq!(stats.output_size(), 20);
    }

    #[test]
    fn not_initialized() {
        setup();
        let mut encoder = HuffmanEncoder::new();
        assert_eq!(encoder.build().unwrap_err(), HuffError::NotInitialized);
        assert_eq!(encoder.encode(b"a"), Err(HuffError::NotInitialized));
        assert_eq!(encoder.statistics(), Err(HuffError::NotInitialized));
        assert!(encoder.tree().is_err());

        // counts alone are not enough
        encoder.analyze(b"abc").unwrap();
        assert_eq!(encoder.encode(b"a"), Err(HuffError::NotInitialized));
        encoder.build().unwrap();
        assert!(encoder.encode(b"a").is_ok());

        // new input invalidates the table
        encoder.analyze(b"d").unwrap();
        assert_eq!(encoder.code_table(), Err(HuffError::NotInitialized));
        encoder.build().unwrap();
        assert!(encoder.encode(b"abcd").is_ok());
    }

    #[test]
    fn chunked_analyze_equals_whole_input() {
        setup();
        let test_data = get_test_data();
        let mut chunked = HuffmanEncoder::new();
        for chunk in test_data.chunks(DEFAULT_CHUNK_SIZE / 64) {
            chunked.analyze(chunk).unwrap();
        }
        chunked.build().unwrap();
        let whole =
            HuffmanEncoder::from_frequencies(FrequencyTable::from_data(&test_data)).unwrap();
        assert_eq!(chunked.frequencies(), whole.frequencies());
        assert_eq!(chunked.code_table(), whole.code_table());

        let mut out = BitString::new();
        for chunk in test_data.chunks(7) {
            chunked.encode_into(chunk, &mut out).unwrap();
        }
        assert_eq!(out, whole.encode(&test_data).unwrap());
    }

    #[test]
    fn encoded_size_overflow() {
        setup();
        let pairs = vec![(0, u64::MAX / 2), (1, u64::MAX / 4), (2, u64::MAX / 4)];
        let counts = FrequencyTable::from_pairs(pairs).unwrap();
        assert_eq!(
            HuffmanEncoder::from_frequencies(counts).unwrap_err(),
            HuffError::InvalidArgument("encoded size overflows u64")
        );

        let mut encoder = HuffmanEncoder::new();
        encoder.analyze(b"ab").unwrap();
        assert!(encoder.build().is_ok());
    }

    #[test]
    fn empty_input() {
        setup();
        let encoder = HuffmanEncoder::from_frequencies(FrequencyTable::new()).unwrap();
        assert!(encoder.code_table().unwrap().is_empty());
        assert!(encoder.tree().unwrap().is_empty());
        assert_eq!(encoder.encode(b""), Ok(BitString::new()));
        assert_eq!(encoder.encode(b"x"), Err(HuffError::UnknownSymbol(b'x')));

        let mut analyzed = HuffmanEncoder::new();
        analyzed.analyze(b"").unwrap();
        assert!(analyzed.build().unwrap().is_empty());
        assert_eq!(analyzed.statistics().unwrap().output_bits, 0);
    }
}
