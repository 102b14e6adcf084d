use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::region::RegionList;
use crate::parsing::spectrum::parse_spectrum_file;
use crate::peaks::regions::find_regions;

#[derive(Args)]
pub struct RegionsArgs {
    /// Spectrum of the reference material (plain text or .gz)
    #[arg(required = true)]
    pub reference: PathBuf,

    /// Background spectrum to subtract before searching
    #[arg(long)]
    pub background: Option<PathBuf>,

    /// Number of channels to read from each spectrum
    #[arg(short, long)]
    pub bins: usize,
}

/// Execute regions subcommand
///
/// # Errors
///
/// Returns an error if a spectrum cannot be read or parsed, or the region
/// search cannot allocate its working buffer.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RegionsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let reference = parse_spectrum_file(&args.reference, args.bins).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read reference spectrum {}: {e}",
            args.reference.display()
        )
    })?;

    let background = match &args.background {
        Some(path) => Some(parse_spectrum_file(path, args.bins).map_err(|e| {
            anyhow::anyhow!("Failed to read background spectrum {}: {e}", path.display())
        })?),
        None => None,
    };

    if verbose {
        if let Some(channel) = reference.max_channel() {
            eprintln!(
                "Reference: {} channels, highest rate in channel {channel}",
                reference.bins()
            );
        }
    }

    let regions = find_regions(
        reference.counts(),
        background.as_ref().map(|b| b.counts()),
        args.bins,
    )?;

    match format {
        OutputFormat::Text => print_text_regions(&regions),
        OutputFormat::Json => print_json_regions(&regions)?,
        OutputFormat::Tsv => print_tsv_regions(&regions),
    }

    Ok(())
}

fn print_text_regions(regions: &RegionList) {
    if regions.is_empty() {
        println!("No peak regions found in reference spectrum");
        return;
    }

    let map: Vec<String> = regions.boundaries().iter().map(ToString::to_string).collect();
    println!("Region map: {}", map.join(" "));
    println!("\n{} regions:", regions.len());
    for (i, region) in regions.regions().enumerate() {
        println!("   #{} {} ({} channels)", i + 1, region, region.full_width());
    }
}

fn print_json_regions(regions: &RegionList) -> anyhow::Result<()> {
    let items: Vec<serde_json::Value> = regions
        .regions()
        .map(|r| {
            serde_json::json!({
                "left": r.left,
                "peak": r.peak,
                "right": r.right,
                "width": r.full_width(),
            })
        })
        .collect();

    let output = serde_json::json!({
        "boundaries": regions.boundaries(),
        "regions": items,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_regions(regions: &RegionList) {
    println!("index\tleft\tpeak\tright\twidth");
    for (i, region) in regions.regions().enumerate() {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            i + 1,
            region.left,
            region.peak,
            region.right,
            region.full_width()
        );
    }
}
