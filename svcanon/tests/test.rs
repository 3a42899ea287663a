use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;
use rstest::*;
use tempfile::{TempDir, tempdir};

use svcanon::core::models::SvType;
use svcanon::engine::{MemorySink, RunConfig, StreamDriver};
use svcanon::io::vcf::VcfReader;

#[fixture]
fn gzipped_vcf() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("calls.vcf.gz");

    let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    write!(
        encoder,
        "##fileformat=VCFv4.2\n\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tP1\tP2\n\
chrX\t1000\tcnv1\tN\t<CN0>\t.\tPASS\tSVTYPE=CNV;END=5000\tGT\t0/1\t0/0\n\
chrX\t1000\tcnv2\tN\t<CN3>\t.\tPASS\tSVTYPE=CNV;END=5000\tGT\t0/0\t1/1\n\
chr7\t200\tdup1\tN\t<DUP:TANDEM>\t.\tPASS\tEND=900;CIPOS=-10,10;CIEND=-10,10\tGT\t0/1\t0/1\n\
chr12\t46665455\tbnd1\tN\t]chr12:46677091]N\t.\tPASS\tSVTYPE=DUP;END=46677091;SVLEN=11636\tGT\t0/1\t0/0\n"
    )
    .unwrap();
    encoder.finish().unwrap();

    (dir, path)
}

mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    fn test_gzipped_vcf_through_umbrella(gzipped_vcf: (TempDir, PathBuf)) {
        let (_dir, path) = gzipped_vcf;
        let reader = VcfReader::from_path(&path).unwrap();
        assert_eq!(reader.samples(), ["P1".to_string(), "P2".to_string()]);

        let mut sink = MemorySink::default();
        let summary = StreamDriver::new(RunConfig::default())
            .run(reader, &mut sink)
            .unwrap();
        assert_eq!(summary.accepted, 4);

        let cnv_loss = &sink.accepted[0];
        assert_eq!(cnv_loss.sv_type, SvType::Literal("<CN0>".to_string()));
        assert_eq!(cnv_loss.id, "X_1000_5000_CNV_1");
        assert_eq!(cnv_loss.samples, vec!["P1".to_string()]);

        // same event key, different allele
        assert_eq!(sink.accepted[1].id, "X_1000_5000_CNV_2");
        assert_eq!(sink.accepted[1].samples, vec!["P2".to_string()]);

        let dup = &sink.accepted[2];
        assert_eq!((dup.start, dup.end), (190, 910));
        assert_eq!(dup.sv_type, SvType::Dup);

        let bnd = &sink.accepted[3];
        assert_eq!((bnd.start, bnd.end), (46665455, 46677091));
        assert_eq!(bnd.sv_type, SvType::Dup);
        assert_eq!(bnd.length, Some(11636));
    }

    #[rstest]
    fn test_ci_can_be_disabled(gzipped_vcf: (TempDir, PathBuf)) {
        let (_dir, path) = gzipped_vcf;
        let reader = VcfReader::from_path(&path).unwrap();

        let config = RunConfig {
            include_ci: false,
            ..RunConfig::default()
        };
        let mut sink = MemorySink::default();
        StreamDriver::new(config).run(reader, &mut sink).unwrap();

        let dup = &sink.accepted[2];
        assert_eq!((dup.start, dup.end), (200, 900));
    }
}
