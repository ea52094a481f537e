// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// tilegraph - Build Sequence, GraphJoin and FASTA tables from FastJ tile files
pub struct BuildArgs {
    /// input FastJ file as PATH or NAME,PATH (can be specified more than once)
    #[argh(option, short = 'i')]
    pub input: Vec<String>,

    /// FASTA output file (default: out.fa)
    #[argh(option, default = "String::from(\"out.fa\")")]
    pub fasta: String,

    /// FASTA SQL CSV output file (default: FASTA.csv)
    #[argh(option, default = "String::from(\"FASTA.csv\")")]
    pub fasta_csv: String,

    /// sequence table output file (default: out.sequence)
    #[argh(option, default = "String::from(\"out.sequence\")")]
    pub sequence: String,

    /// graph join table output file (default: out.graphjoin)
    #[argh(option, default = "String::from(\"out.graphjoin\")")]
    pub graphjoin: String,

    /// graph join / variant set association output file (default: out.graphjoin-variantset)
    #[argh(option, default = "String::from(\"out.graphjoin-variantset\")")]
    pub graphjoin_variantset: String,

    /// optional raw observation dump output file (positionKey,contentHash,frequency)
    #[argh(option)]
    pub raw_dump: Option<String>,

    /// id of the FASTA SQL row (default: 1)
    #[argh(option, default = "1")]
    pub fasta_id: u64,

    /// start id of Sequence SQL rows (default: 1)
    #[argh(option, default = "1")]
    pub start_sequence_id: u64,

    /// start id of GraphJoin SQL rows (default: 1)
    #[argh(option, default = "1")]
    pub start_graphjoin_id: u64,

    /// id of the VariantSet SQL row tagging emitted joins (default: 0)
    #[argh(option, default = "0")]
    pub variantset_id: i64,

    /// content digest: md5, sha256 (default: md5)
    #[argh(option, default = "String::from(\"md5\")")]
    pub digest: String,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// show per-file progress
    #[argh(switch)]
    pub progress: bool,

    /// verbose output
    #[argh(switch, short = 'V')]
    pub verbose: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}

#[derive(FromArgs)]
/// allelepaths - Reconstruct per-allele walks over an emitted Sequence table
pub struct AlleleArgs {
    /// input FastJ file as PATH or NAME,PATH (can be specified more than once)
    #[argh(option, short = 'i')]
    pub input: Vec<String>,

    /// sequence table produced by a compatible tilegraph run (default: out.sequence)
    #[argh(option, default = "String::from(\"out.sequence\")")]
    pub sequence: String,

    /// callSet table output file (default: out.callset)
    #[argh(option, default = "String::from(\"out.callset\")")]
    pub callset: String,

    /// allele table output file (default: out.allele)
    #[argh(option, default = "String::from(\"out.allele\")")]
    pub allele: String,

    /// allelePathItem table output file (default: out.allelepath)
    #[argh(option, default = "String::from(\"out.allelepath\")")]
    pub allele_path: String,

    /// alleleCall table output file (default: out.allelecall)
    #[argh(option, default = "String::from(\"out.allelecall\")")]
    pub allele_call: String,

    /// run manifest of the Sequence table; refuses incompatible runs
    #[argh(option)]
    pub manifest: Option<String>,

    /// start id of Allele SQL rows (default: 1)
    #[argh(option, default = "1")]
    pub start_allele_id: u64,

    /// start id of CallSet SQL rows (default: 1)
    #[argh(option, default = "1")]
    pub start_callset_id: u64,

    /// id of the VariantSet SQL row recorded in Allele rows (default: -1)
    #[argh(option, default = "-1")]
    pub variantset_id: i64,

    /// content digest: md5, sha256 (default: md5)
    #[argh(option, default = "String::from(\"md5\")")]
    pub digest: String,

    /// show per-file progress
    #[argh(switch)]
    pub progress: bool,

    /// verbose output
    #[argh(switch, short = 'V')]
    pub verbose: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
