use anyhow::{Context, Result, bail};
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

/// Whitespace field count of a k-mer/LCA record line
pub const RECORD_FIELD_COUNT: usize = 2;

/// Tally LCA label occurrences from a `.mins` reader
///
/// Only lines beginning with a tab are k-mer/LCA records; all other lines
/// (sequence headers, section text) are skipped regardless of content.
pub fn tally<R: BufRead>(reader: R) -> Result<FxHashMap<String, u64>> {
    let mut freqs: FxHashMap<String, u64> = FxHashMap::default();

    for line in reader.lines() {
        let line = line.context("Error reading minimizer record")?;
        if !line.starts_with('\t') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != RECORD_FIELD_COUNT {
            bail!("malformed line encountered: {}", line);
        }

        // First field is the k-mer itself; only the LCA label is tallied
        *freqs.entry(fields[1].to_string()).or_insert(0) += 1;
    }

    Ok(freqs)
}

/// Write label/count pairs, one per line, in accumulator order
pub fn write_freqs(freqs: &FxHashMap<String, u64>, path: &Path) -> Result<()> {
    let file =
        File::create(path).context(format!("Failed to create output file {:?}", path))?;
    let mut writer = BufWriter::new(file);

    for (label, count) in freqs {
        writeln!(writer, "{} {}", label, count)?;
    }
    writer.flush()?;

    Ok(())
}

/// Count LCA label frequencies in a `.mins` file and write them out
///
/// The whole file is tallied before the output file is created, so a
/// malformed record never leaves a partial `.lcafreq` behind.
pub fn run(mins_path: &Path, out_path: &Path) -> Result<()> {
    let start_time = Instant::now();

    let file = File::open(mins_path)
        .context(format!("Failed to open minimizer file {:?}", mins_path))?;
    let freqs = tally(BufReader::new(file))?;

    let total: u64 = freqs.values().sum();
    eprintln!(
        "Tallied {} LCA assignment(s) across {} distinct label(s)",
        total,
        freqs.len()
    );

    write_freqs(&freqs, out_path)?;

    eprintln!("Completed LCA frequency pass in {:.2?}", start_time.elapsed());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_tally_counts_labels() {
        let input = "\tATCG\tspeciesA\n\tGGTT\tspeciesA\n\tACGT\troot\n";
        let freqs = tally(Cursor::new(input)).unwrap();

        assert_eq!(freqs.get("speciesA"), Some(&2));
        assert_eq!(freqs.get("root"), Some(&1));
        assert_eq!(freqs.len(), 2);
    }

    #[test]
    fn test_tally_ignores_non_tab_lines() {
        let input = ">chr2L\nACGTACGTACGT\n\tATCG\tspeciesA\nnot a record at all\n";
        let freqs = tally(Cursor::new(input)).unwrap();

        assert_eq!(freqs.get("speciesA"), Some(&1));
        assert_eq!(freqs.len(), 1);
    }

    #[test]
    fn test_tally_rejects_extra_fields() {
        let input = "\tATCG\tspeciesA\textra\n";
        let err = tally(Cursor::new(input)).unwrap_err();

        assert!(err.to_string().contains("malformed line"));
    }

    #[test]
    fn test_tally_rejects_missing_label() {
        let input = "\tATCG\n";
        assert!(tally(Cursor::new(input)).is_err());
    }

    #[test]
    fn test_tally_empty_input() {
        let freqs = tally(Cursor::new("")).unwrap();
        assert!(freqs.is_empty());
    }
}
