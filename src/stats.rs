use std::collections::BTreeMap;
use std::fmt;

use bitstream::num_bytes_for;
use bitstream::BitString;
use common::FrequencyTable;
use common::HuffError;
use common::Result;
use hufflpuff::CodeTable;

/// Code and number of occurences of a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolStatistics {
    pub code: BitString,
    pub frequency: u64,
}

/// Joins codes and counts for every symbol with a code.
pub fn statistics_view(
    table: &CodeTable,
    counts: &FrequencyTable,
) -> BTreeMap<u8, SymbolStatistics> {
    table
        .iter()
        .map(|(symbol, code)| {
            let stats = SymbolStatistics {
                code: code.clone(),
                frequency: counts.get(symbol),
            };
            (symbol, stats)
        })
        .collect()
}

/// Size report of an encoding run.
///
/// `output_bits` counts the encoded bits, `output_size` the bytes those bits occupy when packed,
/// which is also what the packed output file contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    /// input size in bytes
    pub input_size: u64,
    pub output_bits: u64,
    pub symbols: BTreeMap<u8, SymbolStatistics>,
}

impl Statistics {
    pub fn new(table: &CodeTable, counts: &FrequencyTable, output_bits: u64) -> Self {
        Statistics {
            input_size: counts.total(),
            output_bits,
            symbols: statistics_view(table, counts),
        }
    }

    /// Expected statistics when encoding exactly the input `counts` was taken from.
    ///
    /// Fails with `InvalidArgument` if the number of encoded bits overflows u64.
    pub fn from_counts(table: &CodeTable, counts: &FrequencyTable) -> Result<Self> {
        let output_bits = table
            .iter()
            .try_fold(0_u64, |total, (symbol, code)| {
                total.checked_add(counts.get(symbol).checked_mul(code.len() as u64)?)
            })
            .ok_or(HuffError::InvalidArgument("encoded size overflows u64"))?;
        Ok(Statistics::new(table, counts, output_bits))
    }

    /// packed output size in bytes
    pub fn output_size(&self) -> u64 {
        num_bytes_for(self.output_bits as usize) as u64
    }

    /// average number of bits per input symbol
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_size == 0 {
            return 0.0;
        }
        self.output_bits as f64 / self.input_size as f64
    }

    /// output size relative to input size
    pub fn ratio(&self) -> f64 {
        if self.input_size == 0 {
            return 0.0;
        }
        self.output_size() as f64 / self.input_size as f64
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input size: {} bytes", self.input_size)?;
        writeln!(
            f,
            "Output size: {} bytes ({} bits)",
            self.output_size(),
            self.output_bits
        )?;
        writeln!(f, "Bits per symbol: {:.3}", self.bits_per_symbol())?;
        writeln!(f, "Compression ratio: {:.3}", self.ratio())?;
        writeln!(f)?;
        writeln!(f, "{:<8}{:>12}  Code", "Symbol", "Frequency")?;
        for (symbol, stats) in self.symbols.iter() {
            writeln!(
                f,
                "{:<8}{:>12}  {}",
                display_symbol(*symbol),
                stats.frequency,
                stats.code
            )?;
        }
        Ok(())
    }
}

/// printable ascii as is, everything else as hex value
fn display_symbol(symbol: u8) -> String {
    if symbol.is_ascii_graphic() {
        format!("'{}'", symbol as char)
    } else {
        format!("0x{:02X}", symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_code;
    use crate::encode;

    #[test]
    fn view_joins_code_and_frequency() {
        let counts = FrequencyTable::from_data(b"aaab");
        let table = build_code(&counts).unwrap();
        let view = statistics_view(&table, &counts);
        assert_eq!(view.len(), 2);
        assert_eq!(view[&b'a'].frequency, 3);
        assert_eq!(view[&b'b'].frequency, 1);
        assert_eq!(view[&b'a'].code.len(), 1);
        assert_eq!(Some(&view[&b'b'].code), table.get(b'b'));
    }

    #[test]
    fn output_size_matches_packed_output() {
        let data = b"mississippi";
        let counts = FrequencyTable::from_data(data);
        let table = build_code(&counts).unwrap();
        let encoded = encode(&table, data).unwrap();

        let stats = Statistics::from_counts(&table, &counts).unwrap();
        assert_eq!(stats.input_size, data.len() as u64);
        assert_eq!(stats.output_bits, encoded.len() as u64);
        assert_eq!(stats.output_size(), encoded.as_bytes().len() as u64);
        assert_eq!(stats, Statistics::new(&table, &counts, encoded.len() as u64));
    }

    #[test]
    fn report_format() {
        let counts = FrequencyTable::from_data(b"aaab\n");
        let table = build_code(&counts).unwrap();
        let report = Statistics::from_counts(&table, &counts).unwrap().to_string();
        assert!(report.starts_with("Input size: 5 bytes\n"));
        assert!(report.contains("Output size: 1 bytes (7 bits)"));
        assert!(report.contains("Bits per symbol: 1.400"));
        assert!(report.contains("Compression ratio: 0.200"));
        assert!(report.contains("'a'"));
        assert!(report.contains("0x0A"));
    }

    #[test]
    fn empty_statistics() {
        let counts = FrequencyTable::new();
        let table = build_code(&counts).unwrap();
        let stats = Statistics::from_counts(&table, &counts).unwrap();
        assert_eq!(stats.output_size(), 0);
        assert_eq!(stats.bits_per_symbol(), 0.0);
        assert_eq!(stats.ratio(), 0.0);
        assert!(stats.symbols.is_empty());
    }

    #[test]
    fn encoded_size_overflow() {
        let pairs = vec![(0, u64::MAX / 2), (1, u64::MAX / 4), (2, u64::MAX / 4)];
        let counts = FrequencyTable::from_pairs(pairs).unwrap();
        let table = build_code(&counts).unwrap();
        assert_eq!(
            Statistics::from_counts(&table, &counts),
            Err(HuffError::InvalidArgument("encoded size overflows u64"))
        );
    }
}
