// allelepaths.rs - CLI entry point for the allele-path reconstructor

use indicatif::{ProgressBar, ProgressStyle};
use tilegraph::allele::{
    write_allele_call_table, write_allele_path_table, write_allele_table, write_callset_table,
};
use tilegraph::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<()> {
    let mut args: AlleleArgs = argh::from_env();

    // Handle generate config first
    if args.generate_config {
        let sample_config = tilegraph::cli::AlleleConfig::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    println!("🚀 allelepaths v{}", env!("CARGO_PKG_VERSION"));

    // Initialize digest registry and validate everything up front
    let registry = DigestRegistry::new();
    let validation = validate_allele_args(&args, &registry)?;
    let digest = registry
        .get(&args.digest)
        .ok_or_else(|| TileGraphError::config(format!("unknown digest '{}'", args.digest)))?;
    println!("🔨 Digest: {}", digest.name());

    // Check the cross-run contract before touching any tile stream
    if let Some(manifest_path) = &args.manifest {
        let manifest = RunManifest::load(manifest_path)?;
        manifest.check_compatible(&args.digest)?;
        if args.verbose {
            println!(
                "🔗 Manifest: format v{}, digest {}, created {}",
                manifest.format_version, manifest.digest, manifest.created
            );
        }
    }

    // Load the Sequence table of the prior builder run
    let seq_map = SequenceIdMap::load(&args.sequence)?;
    println!("📊 Sequence table: {} distinct content hashes", seq_map.len());

    // Register every sample first so call-set ids follow input order
    let mut walks = AlleleWalks::new(
        args.start_allele_id,
        args.start_callset_id,
        args.variantset_id,
    );
    for spec in &validation.inputs {
        walks.register_sample(&spec.name);
    }

    // Replay each sample's tile stream over the sequence graph
    let pb = if args.progress {
        let pb = ProgressBar::new(validation.inputs.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(pb)
    } else {
        None
    };

    for spec in &validation.inputs {
        let count = walks.replay_file(&spec.name, &spec.path, &seq_map, digest)?;
        if args.verbose {
            println!("  📥 {}: {} tiles replayed", spec.name, count);
        }
        if let Some(pb) = &pb {
            pb.inc(1);
            pb.set_message(format!("replayed: {}", spec.name));
        }
    }
    if let Some(pb) = &pb {
        pb.finish_with_message("replay complete");
    }

    println!(
        "🧬 Walks: {} samples, {} alleles, {} path items",
        walks.num_samples(),
        walks.num_alleles(),
        walks.num_path_items()
    );

    // Stage every output table, then publish them together
    let mut stage = OutputStage::new();
    write_callset_table(&mut stage, &args.callset, &walks)?;
    write_allele_table(&mut stage, &args.allele, &walks)?;
    write_allele_call_table(&mut stage, &args.allele_call, &walks)?;
    write_allele_path_table(&mut stage, &args.allele_path, &walks)?;
    stage.commit()?;

    println!("✅ CallSet table written to: {}", args.callset);
    println!("✅ Allele table written to: {}", args.allele);
    println!("✅ AllelePathItem table written to: {}", args.allele_path);
    Ok(())
}
