use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::spectrum::Spectrum;
use crate::core::types::Detection;
use crate::matching::engine::{MatchOutcome, MatchingConfig, SpectrumMatcher, DEFAULT_THRESHOLD};
use crate::parsing::spectrum::parse_spectrum_file;
use crate::peaks::integrity::ShapeAssessment;

#[derive(Args)]
pub struct CheckArgs {
    /// Spectrum of the sample under test (plain text or .gz)
    #[arg(required = true)]
    pub test: PathBuf,

    /// Spectrum of the known reference material
    #[arg(required = true)]
    pub reference: PathBuf,

    /// Background spectrum recorded without a source present
    #[arg(required = true)]
    pub background: PathBuf,

    /// Number of channels to read from each spectrum
    #[arg(short, long)]
    pub bins: usize,

    /// Relative tolerance between test and reference peak areas, strictly between 0 and 1
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,
}

/// Execute check subcommand
///
/// # Errors
///
/// Returns an error if the threshold is out of range, a spectrum cannot be
/// read or parsed, or the comparison fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CheckArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<Detection> {
    let config = MatchingConfig::new(args.threshold)?;

    let test = read_spectrum(&args.test, args.bins, "test")?;
    let reference = read_spectrum(&args.reference, args.bins, "reference")?;
    let background = read_spectrum(&args.background, args.bins, "background")?;

    if verbose {
        for (role, spectrum) in [
            ("Test", &test),
            ("Reference", &reference),
            ("Background", &background),
        ] {
            eprintln!(
                "{role}: {} channels over {} s, total rate {:.3} counts/s",
                spectrum.bins(),
                spectrum.live_time,
                spectrum.total_rate()
            );
        }
    }

    let matcher = SpectrumMatcher::new(config);
    let outcome = matcher.analyze(
        Some(test.counts()),
        Some(reference.counts()),
        Some(background.counts()),
        args.bins,
    )?;

    match format {
        OutputFormat::Text => print_text_outcome(&outcome, verbose),
        OutputFormat::Json => print_json_outcome(&outcome, matcher.config())?,
        OutputFormat::Tsv => print_tsv_outcome(&outcome),
    }

    Ok(outcome.detection)
}

fn read_spectrum(path: &std::path::Path, bins: usize, role: &str) -> anyhow::Result<Spectrum> {
    parse_spectrum_file(path, bins)
        .map_err(|e| anyhow::anyhow!("Failed to read {role} spectrum {}: {e}", path.display()))
}

fn print_text_outcome(outcome: &MatchOutcome, verbose: bool) {
    if verbose {
        println!(
            "{} regions, {} matched",
            outcome.regions.len(),
            outcome.matched_regions()
        );
        for report in &outcome.regions {
            let shape = match report.shape {
                ShapeAssessment::TooSmall => "too small to measure".to_string(),
                ShapeAssessment::Measured(shape) => {
                    format!("FWHM {} FWTM {}", shape.fwhm, shape.fwtm)
                }
            };
            println!(
                "   {} {}: reference area {:.4}, test area {:.4}, contribution {:.4}, {}",
                report.region,
                if report.peak.is_match() { "MATCH" } else { "no match" },
                report.peak.reference_area,
                report.peak.test_area,
                report.peak.contribution,
                shape
            );
        }
        println!(
            "Confidence {:.4}, integrity {:.0}/{} channels ({:.1}% of region channels sound)",
            outcome.confidence,
            outcome.integrity,
            outcome.bins,
            outcome.sound_fraction * 100.0
        );
        println!();
    }

    println!("{}", outcome.integrity_status);
    println!("{}", outcome.detection);
}

fn print_json_outcome(outcome: &MatchOutcome, config: &MatchingConfig) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "detected": outcome.is_detected(),
        "verdict": outcome.detection.to_string(),
        "integrity_commentary": outcome.integrity_status.to_string(),
        "threshold": config.threshold,
        "matched_regions": outcome.matched_regions(),
        "outcome": outcome,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_outcome(outcome: &MatchOutcome) {
    println!("left\tpeak\tright\tintegrity\tfwhm\tfwtm\treference_area\ttest_area\tcontribution\tmatch");
    for report in &outcome.regions {
        let (fwhm, fwtm) = report
            .shape
            .shape()
            .map_or((String::new(), String::new()), |s| {
                (s.fwhm.to_string(), s.fwtm.to_string())
            });
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{:.6}\t{:.6}\t{:.6}\t{}",
            report.region.left,
            report.region.peak,
            report.region.right,
            report.integrity,
            fwhm,
            fwtm,
            report.peak.reference_area,
            report.peak.test_area,
            report.peak.contribution,
            report.peak.is_match()
        );
    }
}
