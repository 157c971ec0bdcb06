//! `freqmine` — mine frequent itemsets from a transaction file.
//!
//! Logs go to stderr (`RUST_LOG`, default `info`); results go to stdout.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use freqmine::fp::{build_fp_tree, frequent_singles};
use freqmine::{
    mine_index, Algorithm, Dataset, Delimiter, FrequentItemsets, InvertedIndex, ItemMultiplicity, MiningConfig,
    ParsePolicy, WorkerPool,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Apriori,
    FpGrowth,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Apriori => Algorithm::Apriori,
            AlgorithmArg::FpGrowth => Algorithm::FpGrowth,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "freqmine", version, about = "Frequent itemset mining (Apriori / FP-Growth)")]
struct Args {
    /// Dataset file, one transaction of integer item ids per line
    path: PathBuf,

    /// Minimum support as a fraction of all transactions
    #[arg(short, long, default_value_t = 0.01)]
    support: f64,

    /// Worker threads (0 = one per CPU)
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    #[arg(short, long, value_enum, default_value_t = AlgorithmArg::Apriori)]
    algorithm: AlgorithmArg,

    /// Field delimiter (default: any whitespace)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Count every occurrence of an item repeated within a transaction
    #[arg(long)]
    preserve_duplicates: bool,

    /// Skip non-numeric fields instead of failing
    #[arg(long)]
    skip_malformed: bool,

    /// Print every itemset of bucket K (itemsets of size K + 1)
    #[arg(long, value_name = "K")]
    show_level: Option<usize>,

    /// Print the FP-tree level by level
    #[arg(long)]
    show_tree: bool,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = MiningConfig::new(args.support)
        .with_parallelism(args.threads)
        .with_algorithm(args.algorithm.into())
        .with_multiplicity(if args.preserve_duplicates {
            ItemMultiplicity::Preserve
        } else {
            ItemMultiplicity::Collapse
        });
    let delimiter = args.delimiter.map_or(Delimiter::Whitespace, Delimiter::Char);
    let policy = if args.skip_malformed {
        ParsePolicy::SkipMalformed
    } else {
        ParsePolicy::Strict
    };

    let load_start = Instant::now();
    let dataset = Dataset::open(&args.path, delimiter, policy)
        .with_context(|| format!("loading {}", args.path.display()))?;
    let pool = WorkerPool::new(config.parallelism).context("starting worker pool")?;
    let index =
        InvertedIndex::build_with_max_item(dataset.transactions(), dataset.max_item(), &pool, config.multiplicity);
    let load_ms = load_start.elapsed().as_millis();

    if args.show_tree {
        let min_count = config.min_support_count(index.transaction_count());
        let tree = build_fp_tree(&index, &frequent_singles(&index, min_count));
        println!("{}", tree.render());
    }

    let mine_start = Instant::now();
    let result = mine_index(&index, &config, &pool);
    let mine_ms = mine_start.elapsed().as_millis();

    if args.json {
        let out = serde_json::json!({
            "config": config,
            "transactions": dataset.len(),
            "summary": result.summary(),
            "result": result,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_summary(&result, &config, dataset.len(), load_ms, mine_ms);
    if let Some(k) = args.show_level {
        print_level(&result, k);
    }
    Ok(())
}

fn print_summary(result: &FrequentItemsets, config: &MiningConfig, transactions: usize, load_ms: u128, mine_ms: u128) {
    println!(
        "transactions: {transactions}  threshold: {}  min support count: {}",
        config.support_threshold,
        config.min_support_count(transactions)
    );
    for level in result.iter_levels() {
        println!(
            "level {} ({}-itemsets): {}",
            level.itemset_size - 1,
            level.itemset_size,
            level.len()
        );
    }
    let summary = result.summary();
    println!(
        "total: {} itemsets, largest size {}",
        summary.total_itemsets, summary.max_itemset_size
    );
    println!("load + index: {load_ms} ms, {:?}: {mine_ms} ms", config.algorithm);
}

fn print_level(result: &FrequentItemsets, k: usize) {
    let Some(level) = result.level(k).filter(|level| !level.is_empty()) else {
        println!("level {k} is empty");
        return;
    };
    println!("level {k} ({}-itemsets):", level.itemset_size);
    for (items, support) in level.iter() {
        let items: Vec<String> = items.iter().map(ToString::to_string).collect();
        println!("{{{}}}\t{support}", items.join(", "));
    }
}
