use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use seqalign::align::{self, AlignmentMode, ScoringMatrix};
use seqalign::config::{Config, ScoringConfig};
use seqalign::spell::SpellChecker;
use seqalign::stats::{random_alignment, DistributionMeta, NullModel, ScoreDistribution};
use seqalign::util::alphabet::{self, Alphabet};
use seqalign::{io, AlignError};

#[derive(Parser, Debug)]
#[command(name = "seqalign", author, version, about = "Pairwise sequence alignment, null-model significance and spelling suggestions", arg_required_else_help = true)]
struct Cli {
    /// TOML config file; command-line options take precedence
    #[arg(short, long, global = true)]
    config: Option<String>,
    /// Worker threads for null-model trials and word scans (0 = all cores)
    #[arg(short = 't', long = "threads", global = true)]
    threads: Option<usize>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct ScoringArgs {
    /// Scoring matrix file: a header row of column symbols, then one row per symbol
    #[arg(short, long)]
    matrix: Option<String>,
    /// Built-in alphabet for the diag/off-diag/dash matrix
    #[arg(long, value_enum)]
    alphabet: Option<Alphabet>,
    #[arg(long, allow_negative_numbers = true)]
    diag: Option<i32>,
    #[arg(long = "off-diag", allow_negative_numbers = true)]
    off_diag: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    dash: Option<i32>,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    /// First sequence (file path, plain text or FASTA)
    x: String,
    /// Second sequence (file path, plain text or FASTA)
    y: String,
    /// Treat X and Y as literal sequences instead of file paths
    #[arg(long)]
    literal: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Align two sequences and print the optimal alignment
    Align {
        #[command(flatten)]
        seqs: SequenceArgs,
        /// Local (Smith-Waterman) instead of global (Needleman-Wunsch) alignment
        #[arg(long)]
        local: bool,
        #[command(flatten)]
        scoring: ScoringArgs,
    },
    /// Align a uniformly random sequence of Y's length against Y
    Random {
        /// Reference sequence (file path, plain text or FASTA)
        y: String,
        /// Treat Y as a literal sequence instead of a file path
        #[arg(long)]
        literal: bool,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        local: bool,
        #[command(flatten)]
        scoring: ScoringArgs,
    },
    /// Print the resolved scoring matrix in the format `--matrix` reads
    Matrix {
        #[command(flatten)]
        scoring: ScoringArgs,
    },
    /// Build the null distribution of local scores by shuffling Y
    Null {
        #[command(flatten)]
        seqs: SequenceArgs,
        #[arg(short = 'n', long)]
        trials: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
        /// Save the distribution (bincode) to this path
        #[arg(short, long)]
        out: Option<String>,
        /// Also report the z-score of the unshuffled local alignment
        #[arg(long)]
        observed: bool,
        #[arg(long, default_value_t = 40)]
        width: usize,
        #[command(flatten)]
        scoring: ScoringArgs,
    },
    /// Summarize a saved null distribution
    Stats {
        /// Distribution file written by `null --out`
        dist: String,
        /// Observed score to compute a z-score for
        #[arg(long, allow_negative_numbers = true)]
        score: Option<i32>,
        #[arg(long, default_value_t = 40)]
        width: usize,
    },
    /// List dictionary words at an exact edit distance from QUERY
    Spell {
        /// Word list, one word per line
        words: String,
        query: String,
        #[arg(short, long)]
        distance: usize,
        #[arg(long, value_enum, default_value_t = Alphabet::Lowercase)]
        alphabet: Alphabet,
    },
}

fn main() {
    let log_level = std::env::var("SEQALIGN_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        let code = if e.downcast_ref::<AlignError>().is_some() { 4 } else { 1 };
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = match cli.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let threads = cli.threads.unwrap_or(cfg.runtime.threads);
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| anyhow!("cannot initialize thread pool: {}", e))?;
    }
    debug!(threads = rayon::current_num_threads(), "thread pool ready");

    match cli.command {
        Commands::Align { seqs, local, scoring } => {
            let mode = if local { AlignmentMode::Local } else { AlignmentMode::Global };
            run_align(&seqs, mode, &scoring, &cfg)
        }
        Commands::Random { y, literal, seed, local, scoring } => {
            let mode = if local { AlignmentMode::Local } else { AlignmentMode::Global };
            run_random(&y, literal, seed, mode, &scoring, &cfg)
        }
        Commands::Matrix { scoring } => {
            let matrix = resolve_matrix(&scoring, &cfg.scoring)?;
            io::matrix::write_scoring_matrix(&matrix, std::io::stdout().lock())
        }
        Commands::Null { seqs, trials, seed, out, observed, width, scoring } => {
            let trials = trials.unwrap_or(cfg.null_model.trials);
            let seed = seed.or(cfg.null_model.seed);
            run_null(&seqs, trials, seed, out.as_deref(), observed, width, &scoring, &cfg)
        }
        Commands::Stats { dist, score, width } => run_stats(&dist, score, width),
        Commands::Spell { words, query, distance, alphabet } => run_spell(&words, &query, distance, alphabet),
    }
}

fn load_sequence(arg: &str, literal: bool) -> Result<Vec<u8>> {
    if literal {
        return Ok(arg.as_bytes().to_vec());
    }
    io::sequence::read_sequence(arg)
}

fn load_pair(seqs: &SequenceArgs) -> Result<(Vec<u8>, Vec<u8>)> {
    let x = load_sequence(&seqs.x, seqs.literal)?;
    let y = load_sequence(&seqs.y, seqs.literal)?;
    info!(len_x = x.len(), len_y = y.len(), "sequences loaded");
    Ok((x, y))
}

fn resolve_matrix(args: &ScoringArgs, cfg: &ScoringConfig) -> Result<ScoringMatrix> {
    if let Some(path) = &args.matrix {
        return io::matrix::read_scoring_matrix(path);
    }
    let cli_scalars = args.alphabet.is_some() || args.diag.is_some() || args.off_diag.is_some() || args.dash.is_some();
    if let (false, Some(path)) = (cli_scalars, &cfg.matrix) {
        return io::matrix::read_scoring_matrix(path);
    }

    let alphabet = args.alphabet.unwrap_or(cfg.alphabet);
    let diag = args.diag.unwrap_or(cfg.diag);
    let off_diag = args.off_diag.unwrap_or(cfg.off_diag);
    let dash = args.dash.unwrap_or(cfg.dash);
    debug!(?alphabet, diag, off_diag, dash, "building scoring matrix");
    Ok(ScoringMatrix::build(alphabet.symbols(), diag, off_diag, dash))
}

fn run_align(seqs: &SequenceArgs, mode: AlignmentMode, scoring: &ScoringArgs, cfg: &Config) -> Result<()> {
    let (x, y) = load_pair(seqs)?;
    let matrix = resolve_matrix(scoring, &cfg.scoring)?;
    let aln = align::align(&x, &y, &matrix, mode)?;

    println!("mode: {:?}", mode);
    println!("score: {}", aln.score);
    println!("{}", aln);
    println!("cigar: {}", aln.cigar());
    println!("identity: {:.2}%", aln.identity());
    Ok(())
}

fn run_random(
    y_arg: &str,
    literal: bool,
    seed: Option<u64>,
    mode: AlignmentMode,
    scoring: &ScoringArgs,
    cfg: &Config,
) -> Result<()> {
    let y = load_sequence(y_arg, literal)?;
    let matrix = resolve_matrix(scoring, &cfg.scoring)?;
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let (x, aln) = random_alignment(&y, &matrix, mode, &mut rng)?;

    println!("random: {}", alphabet::display(&x));
    println!("score: {}", aln.score);
    println!("{}", aln);
    println!("identity: {:.2}%", aln.identity());
    Ok(())
}

fn run_null(
    seqs: &SequenceArgs,
    trials: u64,
    seed: Option<u64>,
    out: Option<&str>,
    observed: bool,
    width: usize,
    scoring: &ScoringArgs,
    cfg: &Config,
) -> Result<()> {
    let (x, y) = load_pair(seqs)?;
    let matrix = resolve_matrix(scoring, &cfg.scoring)?;

    let mut dist = NullModel::new(&matrix).seed(seed).generate(&x, &y, trials)?;
    dist.set_meta(DistributionMeta {
        seed,
        build_args: Some(std::env::args().collect::<Vec<_>>().join(" ")),
        build_timestamp: Some(chrono::Utc::now().to_rfc3339()),
    });

    if let Some(path) = out {
        dist.save_to_file(path)
            .map_err(|e| anyhow!("cannot write distribution to '{}': {}", path, e))?;
        info!(path, "distribution saved");
    }

    let observed_score = if observed {
        let aln = align::align(&x, &y, &matrix, AlignmentMode::Local)?;
        println!("observed local alignment:\n{}", aln);
        Some(aln.score)
    } else {
        None
    };

    print_summary(&dist, observed_score, width);
    Ok(())
}

fn run_stats(path: &str, score: Option<i32>, width: usize) -> Result<()> {
    let dist = ScoreDistribution::load_from_file(path)
        .map_err(|e| anyhow!("cannot read distribution '{}': {}", path, e))?;
    let meta = dist.meta();
    if let Some(ts) = &meta.build_timestamp {
        println!("built: {}", ts);
    }
    if let Some(args) = &meta.build_args {
        println!("command: {}", args);
    }
    if let Some(seed) = meta.seed {
        println!("seed: {}", seed);
    }
    print_summary(&dist, score, width);
    Ok(())
}

fn print_summary(dist: &ScoreDistribution, observed: Option<i32>, width: usize) {
    println!("trials: {}", dist.trials());
    match (dist.mean(), dist.std_dev()) {
        (Some(mean), Some(sd)) => {
            println!("mean: {:.4}", mean);
            println!("std dev: {:.4}", sd);
        }
        _ => println!("mean: n/a (no trials)"),
    }
    if let Some(score) = observed {
        match dist.z_score(score) {
            Some(z) => println!("z-score of {}: {:.4}", score, z),
            None => println!("z-score of {}: undefined (degenerate distribution)", score),
        }
    }
    print!("{}", dist.render_histogram(width));
}

fn run_spell(words_path: &str, query: &str, distance: usize, alphabet: Alphabet) -> Result<()> {
    let words = io::words::read_words(words_path)?;
    let checker = SpellChecker::new(alphabet.symbols());
    let hits = checker.check(query, distance, &words)?;
    info!(query, distance, hits = hits.len(), "spelling suggestions");
    for w in hits {
        println!("{}", w);
    }
    Ok(())
}
