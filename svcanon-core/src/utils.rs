use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = matches!(
        path.extension().and_then(OsStr::to_str),
        Some("gz") | Some("bgz")
    );
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    // 256KB buffer, SV call sets can carry very long INFO columns
    let reader = BufReader::with_capacity(256 * 1024, file);

    Ok(reader)
}

/// Remove every occurrence of "chr" from a chromosome or allele string.
pub fn strip_chr(value: &str) -> String {
    value.replace("chr", "")
}

/// Whether the path names a VCF file (`.vcf`, `.vcf.gz`, `.vcf.bgz`).
pub fn is_vcf_path(path: &Path) -> bool {
    path.file_name()
        .and_then(OsStr::to_str)
        .map(|name| name.split('.').skip(1).any(|ext| ext == "vcf"))
        .unwrap_or(false)
}

/// File name with every extension removed, e.g. `calls.vcf.gz` -> `calls`.
pub fn remove_all_extensions(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    match name.split_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use std::path::PathBuf;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("chr1", "1")]
    #[case("chrUn_random", "Un_random")]
    #[case("G]chr17:1584563]", "G]17:1584563]")]
    #[case("X", "X")]
    fn test_strip_chr(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_chr(input), expected);
    }

    #[rstest]
    #[case("calls.vcf", true)]
    #[case("calls.vcf.gz", true)]
    #[case("/tmp/dir.with.dots/calls.vcf.bgz", true)]
    #[case("calls.bed", false)]
    #[case("vcf", false)]
    fn test_is_vcf_path(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_vcf_path(&PathBuf::from(path)), expected);
    }

    #[rstest]
    fn test_remove_all_extensions() {
        assert_eq!(remove_all_extensions(Path::new("/a/b/calls.vcf.gz")), "calls");
        assert_eq!(remove_all_extensions(Path::new("calls")), "calls");
    }

    #[rstest]
    fn test_dynamic_reader_gz() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("lines.txt.gz");
        let file = File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        writeln!(encoder, "first").unwrap();
        writeln!(encoder, "second").unwrap();
        encoder.finish().unwrap();

        let reader = get_dynamic_reader(&path).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[rstest]
    fn test_dynamic_reader_missing_file() {
        assert!(get_dynamic_reader(Path::new("does/not/exist.vcf")).is_err());
    }
}
