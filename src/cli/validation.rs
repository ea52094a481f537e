// validation.rs - Input validation utilities

use crate::cli::args::{AlleleArgs, BuildArgs};
use crate::error::{Result, TileGraphError};
use crate::hashers::DigestRegistry;
use std::path::Path;

/// One validated input file with its sample name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    pub name: String,
    pub path: String,
}

/// Parse an input argument: `NAME,PATH`, or a bare `PATH` whose name is
/// the path itself
pub fn parse_input_spec(raw: &str) -> InputSpec {
    match raw.split_once(',') {
        Some((name, path)) => InputSpec {
            name: name.to_string(),
            path: path.to_string(),
        },
        None => InputSpec {
            name: raw.to_string(),
            path: raw.to_string(),
        },
    }
}

pub struct ValidationResult {
    pub inputs: Vec<InputSpec>,
}

fn validate_digest(digest: &str, registry: &DigestRegistry) -> Result<()> {
    if !registry.has(digest) {
        let mut names = registry.names();
        names.sort_unstable();
        return Err(TileGraphError::config(format!(
            "invalid digest '{}'. Available: {}",
            digest,
            names.join(", ")
        )));
    }
    Ok(())
}

fn validate_inputs(raw: &[String]) -> Result<Vec<InputSpec>> {
    if raw.is_empty() {
        return Err(TileGraphError::config(
            "at least one --input file is required",
        ));
    }
    let mut inputs = Vec::with_capacity(raw.len());
    for arg in raw {
        let spec = parse_input_spec(arg);
        if spec.path.is_empty() {
            return Err(TileGraphError::config(format!("empty input path in '{}'", arg)));
        }
        if !Path::new(&spec.path).is_file() {
            return Err(TileGraphError::config(format!(
                "input file not found: {}",
                spec.path
            )));
        }
        inputs.push(spec);
    }
    Ok(inputs)
}

fn validate_output_path(label: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TileGraphError::config(format!("{} path is empty", label)));
    }
    Ok(())
}

/// Validate builder command line arguments
pub fn validate_build_args(args: &BuildArgs, registry: &DigestRegistry) -> Result<ValidationResult> {
    validate_digest(&args.digest, registry)?;
    let inputs = validate_inputs(&args.input)?;

    validate_output_path("--fasta", &args.fasta)?;
    validate_output_path("--fasta-csv", &args.fasta_csv)?;
    validate_output_path("--sequence", &args.sequence)?;
    validate_output_path("--graphjoin", &args.graphjoin)?;
    validate_output_path("--graphjoin-variantset", &args.graphjoin_variantset)?;

    Ok(ValidationResult { inputs })
}

/// Validate reconstructor command line arguments
pub fn validate_allele_args(
    args: &AlleleArgs,
    registry: &DigestRegistry,
) -> Result<ValidationResult> {
    validate_digest(&args.digest, registry)?;
    let inputs = validate_inputs(&args.input)?;

    if !Path::new(&args.sequence).is_file() {
        return Err(TileGraphError::config(format!(
            "sequence table not found: {}",
            args.sequence
        )));
    }
    validate_output_path("--callset", &args.callset)?;
    validate_output_path("--allele", &args.allele)?;
    validate_output_path("--allele-path", &args.allele_path)?;
    validate_output_path("--allele-call", &args.allele_call)?;

    Ok(ValidationResult { inputs })
}
