pub mod error;

use log::log_enabled;
use log::Level::Trace;
use log::*;

pub use error::HuffError;
pub use error::Result;

pub const MAX_SYMBOL_VALUE: u32 = u8::MAX as u32;
pub const ALPHABET_SIZE: usize = MAX_SYMBOL_VALUE as usize + 1;

/// Size of the chunks the input is read and encoded in.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

pub type CountsTable = [u64; ALPHABET_SIZE];

/// creates a table with the counts of each symbol
#[inline]
pub fn count_simple(input: &[u8]) -> CountsTable {
    let mut counts = [0_u64; ALPHABET_SIZE];

    for byte in input {
        counts[*byte as usize] += 1;
    }
    counts
}

/// creates a table with the counts of each symbol
///
/// Uses 4 separate tables, so consecutive equal bytes don't stall on the same counter.
#[inline]
pub fn count_multi(input: &[u8]) -> CountsTable {
    let mut counts1 = [0_u64; ALPHABET_SIZE];
    let mut counts2 = [0_u64; ALPHABET_SIZE];
    let mut counts3 = [0_u64; ALPHABET_SIZE];
    let mut counts4 = [0_u64; ALPHABET_SIZE];

    let mut iter = input.chunks_exact(4);
    for chunks in &mut iter {
        counts1[chunks[0] as usize] += 1;
        counts2[chunks[1] as usize] += 1;
        counts3[chunks[2] as usize] += 1;
        counts4[chunks[3] as usize] += 1;
    }

    for el in iter.remainder() {
        counts1[*el as usize] += 1;
    }

    let iter = counts1
        .iter_mut()
        .zip(counts2.iter().zip(counts3.iter().zip(counts4.iter())));

    for (el1, (el2, (el3, el4))) in iter {
        *el1 += *el2 + *el3 + *el4;
    }

    counts1
}

/// Number of occurences of every symbol of the byte alphabet.
///
/// Entries with a count of zero are symbols absent from the input. The sum of all counts always
/// fits into a `u64`, every constructor checks it.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: CountsTable,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        FrequencyTable {
            counts: [0; ALPHABET_SIZE],
        }
    }
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable::default()
    }

    /// Counts the symbols of `input`.
    pub fn from_data(input: &[u8]) -> Self {
        FrequencyTable {
            counts: count_multi(input),
        }
    }

    /// Creates the table from a slice of counts indexed by symbol value.
    ///
    /// The slice may be longer than the alphabet, as long as the additional entries are zero.
    pub fn from_counts(counts: &[u64]) -> Result<Self> {
        if counts.is_empty() {
            return Err(HuffError::InvalidArgument("counts table is empty"));
        }
        let mut table = FrequencyTable::default();
        for (symbol, count) in counts.iter().enumerate() {
            if *count == 0 {
                continue;
            }
            if symbol >= ALPHABET_SIZE {
                return Err(HuffError::AlphabetViolation(symbol));
            }
            table.counts[symbol] = *count;
        }
        table.checked_total()?;
        Ok(table)
    }

    /// Creates the table from `(symbol, count)` pairs. Repeated symbols are summed up.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, u64)>,
    {
        let mut table = FrequencyTable::default();
        for (symbol, count) in pairs {
            if count == 0 {
                continue;
            }
            if symbol >= ALPHABET_SIZE {
                return Err(HuffError::AlphabetViolation(symbol));
            }
            table.counts[symbol] = table.counts[symbol]
                .checked_add(count)
                .ok_or(HuffError::InvalidArgument("symbol count overflows u64"))?;
        }
        table.checked_total()?;
        Ok(table)
    }

    /// Adds the symbol counts of another chunk of input.
    ///
    /// Fails with `InvalidArgument` if the total count would overflow, the table is unchanged then.
    pub fn update(&mut self, chunk: &[u8]) -> Result<()> {
        self.total()
            .checked_add(chunk.len() as u64)
            .ok_or(HuffError::InvalidArgument("total symbol count overflows u64"))?;
        let chunk_counts = count_multi(chunk);
        for (count, chunk_count) in self.counts.iter_mut().zip(chunk_counts.iter()) {
            *count += *chunk_count;
        }
        if log_enabled!(Trace) {
            trace!(
                "counted chunk of {} bytes, {} distinct symbols so far",
                chunk.len(),
                self.num_symbols()
            );
        }
        Ok(())
    }

    #[inline]
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    fn checked_total(&self) -> Result<u64> {
        self.counts
            .iter()
            .try_fold(0_u64, |total, count| total.checked_add(*count))
            .ok_or(HuffError::InvalidArgument("total symbol count overflows u64"))
    }

    /// number of symbols with a count > 0
    pub fn num_symbols(&self) -> usize {
        self.counts.iter().filter(|count| **count != 0).count()
    }

    /// iterates over all symbols with a count > 0, ordered by symbol value
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count != 0)
            .map(|(symbol, count)| (symbol as u8, *count))
    }
}

impl TryFrom<CountsTable> for FrequencyTable {
    type Error = HuffError;

    fn try_from(counts: CountsTable) -> Result<Self> {
        let table = FrequencyTable { counts };
        table.checked_total()?;
        Ok(table)
    }
}

impl core::fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_count_fns() {
        let test_data = get_test_data();

        let counts = count_simple(&test_data);
        assert_eq!(counts[A_BYTE as usize], 45);
        assert_eq!(counts[B_BYTE as usize], 35);
        assert_eq!(counts[C_BYTE as usize], 20);

        assert_eq!(count_multi(&test_data), counts);
        // remainder handling
        assert_eq!(count_multi(&test_data[..7]), count_simple(&test_data[..7]));
    }

    #[test]
    fn update_accumulates_chunks() {
        let test_data = get_test_data();
        let mut table = FrequencyTable::new();
        for chunk in test_data.chunks(7) {
            table.update(chunk).unwrap();
        }
        assert_eq!(table, FrequencyTable::from_data(&test_data));
        assert_eq!(table.total(), 100);
        assert_eq!(table.num_symbols(), 3);
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![(A_BYTE, 45), (B_BYTE, 35), (C_BYTE, 20)]
        );
    }

    #[test]
    fn from_counts_rejects_symbols_outside_alphabet() {
        let mut counts = vec![0_u64; 300];
        counts[10] = 3;
        assert_eq!(FrequencyTable::from_counts(&counts).unwrap().get(10), 3);

        counts[256] = 1;
        assert_eq!(
            FrequencyTable::from_counts(&counts),
            Err(HuffError::AlphabetViolation(256))
        );
        assert_eq!(
            FrequencyTable::from_counts(&[]),
            Err(HuffError::InvalidArgument("counts table is empty"))
        );
    }

    #[test]
    fn from_pairs() {
        let table = FrequencyTable::from_pairs(vec![(1, 4), (200, 2), (1, 1)]).unwrap();
        assert_eq!(table.get(1), 5);
        assert_eq!(table.get(200), 2);
        assert_eq!(table.num_symbols(), 2);

        assert_eq!(
            FrequencyTable::from_pairs(vec![(0x263A, 1)]),
            Err(HuffError::AlphabetViolation(0x263A))
        );
        assert!(FrequencyTable::from_pairs(vec![(1, u64::MAX), (1, 1)]).is_err());
    }

    #[test]
    fn total_overflow_is_rejected() {
        let overflow = Err(HuffError::InvalidArgument("total symbol count overflows u64"));
        assert_eq!(FrequencyTable::from_pairs(vec![(1, u64::MAX), (2, 1)]), overflow);

        let mut counts = [0_u64; ALPHABET_SIZE];
        counts[3] = u64::MAX - 1;
        counts[4] = 2;
        assert_eq!(FrequencyTable::from_counts(&counts), overflow);
        assert_eq!(FrequencyTable::try_from(counts), overflow);

        counts[4] = 1;
        let mut table = FrequencyTable::try_from(counts).unwrap();
        assert_eq!(table.total(), u64::MAX);
        assert!(table.update(b"a").is_err());
        assert_eq!(table.get(b'a'), 0);
        assert_eq!(table.update(b""), Ok(()));
    }

    #[test]
    fn empty_table() {
        let table = FrequencyTable::new();
        assert_eq!(table.total(), 0);
        assert_eq!(table.num_symbols(), 0);
    }
}
