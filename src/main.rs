// main.rs - CLI entry point for the tile-graph builder

use indicatif::{ProgressBar, ProgressStyle};
use tilegraph::output::{
    write_fasta, write_fasta_csv, write_graphjoin_table, write_graphjoin_variantset,
    write_raw_dump, write_sequence_table,
};
use tilegraph::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<()> {
    let mut args: BuildArgs = argh::from_env();

    // Handle generate config first
    if args.generate_config {
        let sample_config = tilegraph::cli::BuildConfig::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    println!("🚀 tilegraph v{}", env!("CARGO_PKG_VERSION"));

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| TileGraphError::config(format!("failed to configure thread pool: {}", e)))?;
        if args.verbose {
            println!("🧵 Threads: {}", n);
        }
    }

    // Initialize digest registry and validate everything up front
    let registry = DigestRegistry::new();
    let validation = validate_build_args(&args, &registry)?;
    let digest = registry
        .get(&args.digest)
        .ok_or_else(|| TileGraphError::config(format!("unknown digest '{}'", args.digest)))?;
    println!("🔨 Digest: {}", digest.name());

    // Ingest all input FastJ files into the tile library
    let mut library = TileLibrary::new();
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
        let count = library.ingest_file(&spec.path, digest)?;
        if args.verbose {
            println!("  📥 {}: {} tiles", spec.name, count);
        }
        if let Some(pb) = &pb {
            pb.inc(1);
            pb.set_message(format!("loaded: {}", spec.name));
        }
    }
    if let Some(pb) = &pb {
        pb.finish_with_message("ingestion complete");
    }

    println!(
        "📊 Library: {} position keys, {} distinct variants, {} tiles observed",
        library.num_position_keys(),
        library.num_variants(),
        library.num_observations()
    );

    // Rank variants by observed frequency before any body identifier
    // is derived
    rank_library(&mut library);

    // Derive the frozen graph tables
    let params = GraphParams {
        start_sequence_id: args.start_sequence_id,
        start_graphjoin_id: args.start_graphjoin_id,
        fasta_id: args.fasta_id,
        variantset_id: args.variantset_id,
    };
    let tables = GraphTables::build(&library, digest, &params)?;
    println!(
        "🧬 Graph: {} distinct segments, {} joins",
        tables.num_segments(),
        tables.num_joins()
    );

    // Stage every output table, then publish them together
    let mut stage = OutputStage::new();
    write_fasta(&mut stage, &args.fasta, &tables)?;
    write_fasta_csv(&mut stage, &args.fasta_csv, params.fasta_id, &args.fasta)?;
    write_sequence_table(&mut stage, &args.sequence, &tables)?;
    write_graphjoin_table(&mut stage, &args.graphjoin, &tables)?;
    write_graphjoin_variantset(&mut stage, &args.graphjoin_variantset, &tables)?;
    if let Some(raw_path) = &args.raw_dump {
        write_raw_dump(&mut stage, raw_path, &library)?;
    }

    let manifest = RunManifest::now(
        &args.digest,
        params.fasta_id,
        params.start_sequence_id,
        params.start_graphjoin_id,
        params.variantset_id,
        tables.num_segments() as u64,
        tables.num_joins() as u64,
    );
    manifest.write(&mut stage, RunManifest::path_for(&args.sequence))?;

    stage.commit()?;

    println!("✅ Sequence table written to: {}", args.sequence);
    println!("✅ GraphJoin table written to: {}", args.graphjoin);
    println!("✅ FASTA written to: {}", args.fasta);
    Ok(())
}
