use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap::ValueEnum;
use huffman_encoder::BitString;
use huffman_encoder::FrequencyTable;
use huffman_encoder::HuffmanEncoder;
use huffman_encoder::Statistics;
use huffman_encoder::DEFAULT_CHUNK_SIZE;
use log::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// 8 bits per byte, the last byte is padded with zeros
    Packed,
    /// one '0' or '1' character per bit
    Text,
}

#[derive(Parser, Debug)]
#[command(about = "Huffman encode a file and write a statistics report")]
struct Args {
    /// The file to encode
    input: PathBuf,
    /// Destination of the encoded bits
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,
    /// Destination of the statistics report
    #[arg(short, long, default_value = "statistics.txt")]
    statistics: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Packed)]
    format: OutputFormat,
    /// Number of bytes read and encoded at once
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,
    /// Also write the huffman tree in graphviz dot format to this file
    #[arg(long)]
    dot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let stats = run(&args)?;
    info!(
        "encoded {} bytes into {} bits ({} bytes packed)",
        stats.input_size,
        stats.output_bits,
        stats.output_size()
    );
    Ok(())
}

/// Counts the input in a first pass, encodes it chunk by chunk in a second one and writes the
/// statistics report.
fn run(args: &Args) -> anyhow::Result<Statistics> {
    anyhow::ensure!(args.chunk_size > 0, "chunk size must be at least 1");

    let mut counts = FrequencyTable::new();
    let input_size = for_each_chunk(&args.input, args.chunk_size, |chunk| {
        counts.update(chunk)?;
        Ok(())
    })?;
    debug!("analyzed {} bytes of {:?}", input_size, args.input);
    let encoder = HuffmanEncoder::from_frequencies(counts)?;

    let mut writer = BufWriter::new(
        File::create(&args.output)
            .with_context(|| format!("could not create {:?}", args.output))?,
    );
    let mut output_bits = 0_u64;
    // bits of the last, incomplete byte in packed mode
    let mut pending = BitString::new();
    for_each_chunk(&args.input, args.chunk_size, |chunk| {
        match args.format {
            OutputFormat::Text => {
                let coded = encoder.encode(chunk)?;
                output_bits += coded.len() as u64;
                write!(writer, "{}", coded)?;
            }
            OutputFormat::Packed => {
                let before = pending.len();
                encoder.encode_into(chunk, &mut pending)?;
                output_bits += (pending.len() - before) as u64;
                pending.flush_full_bytes(&mut writer)?;
            }
        }
        Ok(())
    })?;
    writer.write_all(pending.as_bytes())?;
    writer.flush()?;

    let stats = Statistics::new(encoder.code_table()?, encoder.frequencies()?, output_bits);
    let mut report = String::new();
    if args.format == OutputFormat::Text {
        // one character per bit in the output file
        report.push_str(&format!("Output file size: {} bytes\n", output_bits));
    }
    report.push_str(&stats.to_string());
    std::fs::write(&args.statistics, report)
        .with_context(|| format!("could not write {:?}", args.statistics))?;

    if let Some(dot_path) = &args.dot {
        std::fs::write(dot_path, encoder.tree()?.to_string())
            .with_context(|| format!("could not write {:?}", dot_path))?;
    }
    Ok(stats)
}

/// Reads the file in chunks of `chunk_size` and returns the number of bytes read.
fn for_each_chunk<F>(path: &Path, chunk_size: usize, fun: F) -> anyhow::Result<u64>
where
    F: FnMut(&[u8]) -> anyhow::Result<()>,
{
    let file =
        File::open(path).with_context(|| format!("the file {:?} could not be found", path))?;
    read_chunks(file, chunk_size, fun).with_context(|| format!("while processing {:?}", path))
}

/// Calls `fun` with every chunk read from `reader`, interrupted reads are retried.
fn read_chunks<R, F>(mut reader: R, chunk_size: usize, mut fun: F) -> anyhow::Result<u64>
where
    R: Read,
    F: FnMut(&[u8]) -> anyhow::Result<()>,
{
    let mut buffer = vec![0; chunk_size];
    let mut bytes_read = 0_u64;
    loop {
        let num_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(num_read) => num_read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        bytes_read += num_read as u64;
        fun(&buffer[..num_read])?;
    }
    Ok(bytes_read)
}
