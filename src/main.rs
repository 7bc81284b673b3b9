use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::LevelFilter;
use scel_reader::batch::{self, BatchConfig, LogFileSink};
use scel_reader::export::{manifest::DEFAULT_MANIFEST_NAME, text, ManifestMeta};
use scel_reader::{PinyinTableEnd, ReadOptions, ScelReader};

#[derive(Debug, Parser)]
#[command(name = "scel2txt", version, about = "Convert Sogou cell dictionaries (.scel) to text and Rime dictionaries")]
struct Cli {
    /// More log output (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert every .scel file under a directory and merge them into one Rime dictionary.
    Convert(ConvertArgs),

    /// Decode one file and print `word<TAB>pinyin` lines.
    Dump {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = PinyinEnd::Sentinel)]
        pinyin_end: PinyinEnd,
    },

    /// Show header, metadata and table statistics for one file.
    Info {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = PinyinEnd::Sentinel)]
        pinyin_end: PinyinEnd,
    },
}

#[derive(Debug, Args)]
struct ConvertArgs {
    /// Input directory, searched recursively.
    #[arg(long, default_value = "./scel")]
    input: PathBuf,
    /// Output directory; mirrors the input tree.
    #[arg(long, default_value = "./out")]
    output: PathBuf,
    /// File name of the merged dictionary, created in the output directory.
    #[arg(long, default_value = DEFAULT_MANIFEST_NAME)]
    manifest: String,
    /// Plain-text log of skipped and partially decoded files.
    #[arg(long, default_value = "error.log")]
    error_log: PathBuf,
    /// How the end of the pinyin table is found.
    #[arg(long, value_enum, default_value_t = PinyinEnd::Sentinel)]
    pinyin_end: PinyinEnd,
    /// `name` field of the merged dictionary.
    #[arg(long)]
    dict_name: Option<String>,
    /// `version` field of the merged dictionary.
    #[arg(long)]
    dict_version: Option<String>,
    /// `sort` field of the merged dictionary.
    #[arg(long)]
    sort: Option<String>,
    /// Write `use_preset_vocabulary: false`.
    #[arg(long, default_value_t = false)]
    no_preset_vocabulary: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PinyinEnd {
    /// Stop at the "zuo" syllable.
    Sentinel,
    /// Stop where the homophone-group table begins.
    Boundary,
}

impl From<PinyinEnd> for ReadOptions {
    fn from(end: PinyinEnd) -> Self {
        let pinyin_end = match end {
            PinyinEnd::Sentinel => PinyinTableEnd::Sentinel,
            PinyinEnd::Boundary => PinyinTableEnd::Boundary,
        };
        ReadOptions { pinyin_end }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    if quiet || verbose > 0 {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let res = match cli.cmd {
        Command::Convert(args) => run_convert(args),
        Command::Dump { file, pinyin_end } => run_dump(file, pinyin_end.into()),
        Command::Info { file, pinyin_end } => run_info(file, pinyin_end.into()),
    };

    if let Err(e) = res {
        eprintln!("ERROR: {:#}", e);
        std::process::exit(1);
    }
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let defaults = ManifestMeta::default();
    let config = BatchConfig {
        input_dir: args.input,
        output_dir: args.output,
        manifest_name: args.manifest,
        read: args.pinyin_end.into(),
        manifest: ManifestMeta {
            name: args.dict_name.unwrap_or(defaults.name),
            version: args.dict_version.unwrap_or(defaults.version),
            sort: args.sort.unwrap_or(defaults.sort),
            use_preset_vocabulary: !args.no_preset_vocabulary,
        },
    };

    let mut sink = LogFileSink::create(&args.error_log)
        .with_context(|| format!("creating error log {}", args.error_log.display()))?;
    let summary = batch::run(&config, &mut sink)
        .with_context(|| format!("converting {}", config.input_dir.display()))?;

    println!("{}", "=".repeat(60));
    println!("Converted: {} files", summary.converted.len());
    println!("Skipped:   {} files (see {})", summary.failed.len(), args.error_log.display());
    println!("Entries:   {}", summary.total_entries);
    println!("Manifest:  {}", summary.manifest_path.display());
    Ok(())
}

fn run_dump(file: PathBuf, options: ReadOptions) -> Result<()> {
    let reader = ScelReader::open(&file, options)
        .with_context(|| format!("reading {}", file.display()))?;
    let scan = reader.scan();
    if !scan.entries.is_empty() {
        println!("{}", text::serialize(&scan.entries));
    }
    if !scan.termination.is_structural() {
        log::warn!("{}: {}", file.display(), scan.termination);
    }
    Ok(())
}

fn run_info(file: PathBuf, options: ReadOptions) -> Result<()> {
    let reader = ScelReader::open(&file, options)
        .with_context(|| format!("reading {}", file.display()))?;
    let scan = reader.scan();

    println!("Cell dictionary: {}", file.display());
    println!("{}", "=".repeat(60));
    println!("  Header tag:     {:#04x}", reader.variant.tag());
    println!("  Records offset: {:#x}", reader.variant.records_offset());
    println!("  File size:      {} bytes", reader.file_len());
    println!("\nMetadata:");
    println!("  Title:       {}", reader.metadata.title);
    println!("  Category:    {}", reader.metadata.category);
    println!("  Description: {}", reader.metadata.description);
    println!("  Samples:     {}", reader.metadata.samples);
    println!("\nStatistics:");
    println!("  Pinyin syllables: {}", reader.pinyin_table().len());
    println!("  Entries:          {}", scan.entries.len());
    println!("  Scan ended:       {}", scan.termination);

    println!("\nSample entries (first 10):");
    for (i, entry) in scan.entries.iter().take(10).enumerate() {
        println!("  {}. {}", i + 1, text::format_entry(entry));
    }
    if scan.entries.len() > 10 {
        println!("  ... and {} more", scan.entries.len() - 10);
    }
    Ok(())
}
