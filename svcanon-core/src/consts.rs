/// Chromosome tokens (after "chr" removal) accepted for annotation, in karyotype order.
pub const VALID_CHROM: [&str; 26] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "X", "Y", "M", "MT",
];

/// The fixed columns of a VCF data line.
pub const VCF_COLUMNS: [&str; 9] = [
    "#CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER", "INFO", "FORMAT",
];

pub const SV_TYPE_COLUMN: &str = "SV_type";
pub const SAMPLES_ID_COLUMN: &str = "Samples_ID";

pub const DEFAULT_SV_MIN_SIZE: u64 = 50;

pub fn is_valid_chrom(chrom: &str) -> bool {
    VALID_CHROM.contains(&chrom)
}
