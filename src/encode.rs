use bitstream::BitString;
use common::HuffError;
use common::Result;
use hufflpuff::CodeTable;

/// Encodes `input` with the codes of `table`.
///
/// Fails with [`HuffError::UnknownSymbol`] for the first symbol without a code.
#[inline]
pub fn encode(table: &CodeTable, input: &[u8]) -> Result<BitString> {
    // every code has at least one bit
    let mut out = BitString::with_capacity(input.len());
    encode_into(table, input, &mut out)?;
    Ok(out)
}

/// Appends the codes of `input` to `out`.
///
/// The codes are appended whole, so encoding consecutive chunks into the same output equals
/// encoding the concatenated chunks at once. On error `out` keeps the codes of the symbols
/// before the unknown one.
pub fn encode_into(table: &CodeTable, input: &[u8], out: &mut BitString) -> Result<()> {
    for symbol in input {
        huf_encode_symbol(*symbol, out, table)?;
    }
    Ok(())
}

#[inline]
fn huf_encode_symbol(symbol: u8, out: &mut BitString, table: &CodeTable) -> Result<()> {
    let code = table.get(symbol).ok_or(HuffError::UnknownSymbol(symbol))?;
    out.append(code);
    Ok(())
}
