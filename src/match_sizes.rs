use anyhow::{Context, Result, bail};
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

/// RepeatMasker `.fa.out` files open with a fixed column-name header
pub const HEADER_LINES: usize = 3;

/// Whitespace field count of a match record line
pub const MATCH_FIELD_COUNT: usize = 15;

/// Tally match sizes from a `.fa.out` reader
///
/// The first three lines are discarded unconditionally. Every remaining line
/// must be a 15-field match record; fields 6 and 7 (1-based) are the match's
/// 1-based inclusive start and end coordinates in the query sequence.
pub fn tally<R: BufRead>(reader: R) -> Result<FxHashMap<i64, u64>> {
    let mut sizes: FxHashMap<i64, u64> = FxHashMap::default();

    for line in reader.lines().skip(HEADER_LINES) {
        let line = line.context("Error reading match record")?;

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != MATCH_FIELD_COUNT {
            bail!("malformed match line: {}", line);
        }

        let seq_start: i64 = fields[5]
            .parse()
            .with_context(|| format!("Invalid match start coordinate in line: {}", line))?;
        let seq_end: i64 = fields[6]
            .parse()
            .with_context(|| format!("Invalid match end coordinate in line: {}", line))?;

        // Inclusive coordinates, so a match spanning 10..20 has size 11
        *sizes.entry(seq_end - (seq_start - 1)).or_insert(0) += 1;
    }

    Ok(sizes)
}

/// Write size/count pairs, one per line, in accumulator order
pub fn write_sizes(sizes: &FxHashMap<i64, u64>, path: &Path) -> Result<()> {
    let file =
        File::create(path).context(format!("Failed to create output file {:?}", path))?;
    let mut writer = BufWriter::new(file);

    for (size, count) in sizes {
        writeln!(writer, "{} {}", size, count)?;
    }
    writer.flush()?;

    Ok(())
}

/// Build the match-size histogram of a `.fa.out` file and write it out
///
/// As with the LCA pass, the output file is only created once the whole
/// input has been tallied successfully.
pub fn run(fa_out_path: &Path, out_path: &Path) -> Result<()> {
    let start_time = Instant::now();

    let file = File::open(fa_out_path)
        .context(format!("Failed to open match library {:?}", fa_out_path))?;
    let sizes = tally(BufReader::new(file))?;

    let total: u64 = sizes.values().sum();
    eprintln!(
        "Tallied {} match(es) across {} distinct size(s)",
        total,
        sizes.len()
    );

    write_sizes(&sizes, out_path)?;

    eprintln!("Completed match size pass in {:.2?}", start_time.elapsed());

    Ok(())
}
