use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use svcanon_core::utils::{is_vcf_path, remove_all_extensions};
use svcanon_engine::{OutputChannels, RunConfig, StreamDriver, survey_sources};
use svcanon_io::bed::{
    BedRecordWriter, RejectionLog, extract_bed_header, output_header_columns, write_header_file,
};
use svcanon_io::vcf::VcfReader;

use super::sources::track_sources;

pub const EMPTY_OUTPUT_BANNER: &str = "No SV to annotate in the SVinputFile - Exit without error.";

/// Config file (if any) with the command-line overrides applied on top.
pub fn load_config(matches: &ArgMatches) -> Result<RunConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => RunConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config file: {}", path))?,
        None => RunConfig::default(),
    };

    if let Some(size) = matches.get_one::<u64>("sv-min-size") {
        config.sv_min_size = *size;
    }
    if let Some(flag) = matches.get_one::<String>("include-ci") {
        config.include_ci = flag == "1";
    }
    if let Some(flag) = matches.get_one::<String>("sv-input-info") {
        config.sv_input_info = flag == "1";
    }

    config.validate()?;
    Ok(config)
}

/// Name of the rejection log for `input`, always a `.tsv` built from the extension-less stem.
/// "annotated" in the stem becomes "unannotated"; a stem without it gets `.unannotated` appended.
pub fn unannotated_file_name(input: &Path) -> String {
    let stem = remove_all_extensions(input);

    if stem.contains("unannotated") {
        format!("{}.tsv", stem)
    } else if stem.contains("annotated") {
        format!("{}.tsv", stem.replacen("annotated", "unannotated", 1))
    } else {
        format!("{}.unannotated.tsv", stem)
    }
}

pub fn run_normalize(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .map(PathBuf::from)
        .context("A path to an SV input file is required.")?;
    let out_dir = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .context("An output directory is required.")?;

    let config = load_config(matches)?;
    survey_sources(&track_sources(&config.annotation_tracks));

    create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;
    let stem = remove_all_extensions(&input);

    // BED input is already in interval form; only its header is split off
    if !is_vcf_path(&input) {
        let header_path = out_dir.join(format!("{}.header.tsv", stem));
        let count = extract_bed_header(&input, &header_path)?;
        info!(
            "{} header lines of {} written to {}",
            count,
            input.display(),
            header_path.display()
        );
        return Ok(());
    }

    let reader = VcfReader::from_path(&input)?;

    let columns = output_header_columns(reader.samples(), config.samples_id, config.sv_input_info);
    let header_path = out_dir.join(format!("{}.inputSV.header.tsv", stem));
    write_header_file(&header_path, &columns)
        .with_context(|| format!("Failed to write {}", header_path.display()))?;

    let bed_path = out_dir.join(format!("{}.inputSV.bed", stem));
    let log_path = out_dir.join(unannotated_file_name(&input));
    let mut channels = OutputChannels::new(
        BedRecordWriter::to_path(&bed_path, config.samples_id)
            .with_context(|| format!("Failed to create {}", bed_path.display()))?,
        RejectionLog::to_path(&log_path)
            .with_context(|| format!("Failed to open {}", log_path.display()))?,
    );

    let summary = StreamDriver::new(config).run(reader, &mut channels)?;
    channels.close()?;

    for (reason, count) in &summary.rejected {
        info!("rejected ({}): {}", reason, count);
    }

    if summary.is_empty() {
        println!("{}", EMPTY_OUTPUT_BANNER);
        return Ok(());
    }

    info!("Canonical SVs written to {}", bed_path.display());
    Ok(())
}
