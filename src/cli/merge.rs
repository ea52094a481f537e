// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{AlleleArgs, AlleleConfig, BuildArgs, BuildConfig};
use crate::error::Result;

impl BuildArgs {
    /// Merge with configuration from file.
    /// CLI arguments take precedence over config file values.
    pub fn merge_with_config(mut self, config: BuildConfig) -> Self {
        // Input/Output
        if self.input.is_empty() {
            self.input = config.input.unwrap_or_default();
        }
        if self.fasta == "out.fa" && config.fasta.is_some() {
            self.fasta = config.fasta.unwrap();
        }
        if self.fasta_csv == "FASTA.csv" && config.fasta_csv.is_some() {
            self.fasta_csv = config.fasta_csv.unwrap();
        }
        if self.sequence == "out.sequence" && config.sequence.is_some() {
            self.sequence = config.sequence.unwrap();
        }
        if self.graphjoin == "out.graphjoin" && config.graphjoin.is_some() {
            self.graphjoin = config.graphjoin.unwrap();
        }
        if self.graphjoin_variantset == "out.graphjoin-variantset"
            && config.graphjoin_variantset.is_some()
        {
            self.graphjoin_variantset = config.graphjoin_variantset.unwrap();
        }
        if self.raw_dump.is_none() {
            self.raw_dump = config.raw_dump;
        }

        // Row identifiers (only override defaults, not explicit CLI values)
        if self.fasta_id == 1 && config.fasta_id.is_some() {
            self.fasta_id = config.fasta_id.unwrap();
        }
        if self.start_sequence_id == 1 && config.start_sequence_id.is_some() {
            self.start_sequence_id = config.start_sequence_id.unwrap();
        }
        if self.start_graphjoin_id == 1 && config.start_graphjoin_id.is_some() {
            self.start_graphjoin_id = config.start_graphjoin_id.unwrap();
        }
        if self.variantset_id == 0 && config.variantset_id.is_some() {
            self.variantset_id = config.variantset_id.unwrap();
        }

        // Core settings
        if self.digest == "md5" && config.digest.is_some() {
            self.digest = config.digest.unwrap();
        }
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Flags (CLI flags take precedence, config only sets if not set)
        if !self.progress && config.progress.unwrap_or(false) {
            self.progress = true;
        }
        if !self.verbose && config.verbose.unwrap_or(false) {
            self.verbose = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self> {
        let config = BuildConfig::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

impl AlleleArgs {
    /// Merge with configuration from file.
    /// CLI arguments take precedence over config file values.
    pub fn merge_with_config(mut self, config: AlleleConfig) -> Self {
        // Input/Output
        if self.input.is_empty() {
            self.input = config.input.unwrap_or_default();
        }
        if self.sequence == "out.sequence" && config.sequence.is_some() {
            self.sequence = config.sequence.unwrap();
        }
        if self.callset == "out.callset" && config.callset.is_some() {
            self.callset = config.callset.unwrap();
        }
        if self.allele == "out.allele" && config.allele.is_some() {
            self.allele = config.allele.unwrap();
        }
        if self.allele_path == "out.allelepath" && config.allele_path.is_some() {
            self.allele_path = config.allele_path.unwrap();
        }
        if self.allele_call == "out.allelecall" && config.allele_call.is_some() {
            self.allele_call = config.allele_call.unwrap();
        }
        if self.manifest.is_none() {
            self.manifest = config.manifest;
        }

        // Row identifiers
        if self.start_allele_id == 1 && config.start_allele_id.is_some() {
            self.start_allele_id = config.start_allele_id.unwrap();
        }
        if self.start_callset_id == 1 && config.start_callset_id.is_some() {
            self.start_callset_id = config.start_callset_id.unwrap();
        }
        if self.variantset_id == -1 && config.variantset_id.is_some() {
            self.variantset_id = config.variantset_id.unwrap();
        }

        // Core settings
        if self.digest == "md5" && config.digest.is_some() {
            self.digest = config.digest.unwrap();
        }

        // Flags
        if !self.progress && config.progress.unwrap_or(false) {
            self.progress = true;
        }
        if !self.verbose && config.verbose.unwrap_or(false) {
            self.verbose = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self> {
        let config = AlleleConfig::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
