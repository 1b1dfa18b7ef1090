use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use itertools::Itertools;
use log::{info, warn};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use lifeosc_core::dataset;
use lifeosc_core::io::{dump, ids};
use lifeosc_core::prelude::*;

/// Searches a small Game of Life grid for oscillators.
#[derive(Parser, Debug)]
#[command(name = "lifeosc", version)]
pub struct Cli {
    #[command(flatten)]
    grid: GridArgs,

    /// Log more (repeat for even more).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GridArgs {
    /// Number of cells along each edge of the grid.
    #[arg(long, default_value_t = DEFAULT_SIDE, global = true)]
    side: usize,
    /// Number of generations to simulate before giving up on a pattern.
    #[arg(long, default_value_t = DEFAULT_MAX_GENERATION, global = true)]
    max_generation: usize,
    /// Birth/survival rule.
    #[arg(long, default_value_t = LIFE, global = true)]
    rule: LifeRule,
}
impl GridArgs {
    fn config(&self) -> Result<GridConfig> {
        let config = GridConfig {
            side: self.side,
            max_generation: self.max_generation,
            rule: self.rule,
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search a range of pattern ids and print every oscillator found.
    Search {
        /// First id to check.
        #[arg(long, default_value_t = 0)]
        start: u64,
        /// Id after the last one to check.
        #[arg(long)]
        end: u64,
        /// Number of worker threads (defaults to one per core).
        #[arg(long)]
        threads: Option<usize>,
        /// Number of ids checked between writes.
        #[arg(long, default_value_t = SearchConfig::default().batch_size)]
        batch_size: u64,
        /// Stop after finding this many oscillators.
        #[arg(long)]
        limit: Option<u64>,
        /// File to write oscillator ids to, instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Classify individual pattern ids.
    Classify {
        /// Pattern ids.
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Print every generation of a pattern until it is classified.
    Show {
        /// Pattern id.
        id: String,
    },
    /// Write a human-readable dump of a list of oscillators.
    Dump {
        /// File listing oscillator ids, one per line.
        #[arg(long)]
        ids: PathBuf,
        /// Highest id covered by the search that produced the list.
        #[arg(long, default_value_t = MAX_CHECKED_VALUE)]
        max_checked: u64,
        /// File to write the dump to.
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Write a labeled dataset as JSON lines.
    Dataset {
        /// File listing oscillator ids, one per line.
        #[arg(long)]
        ids: PathBuf,
        /// First id to label.
        #[arg(long)]
        start: u64,
        /// Id after the last one to label.
        #[arg(long)]
        end: u64,
        /// Number of random non-oscillators to add.
        #[arg(long, default_value_t = 0)]
        negatives: usize,
        /// Seed for drawing non-oscillators.
        #[arg(long, default_value_t = 10)]
        seed: u64,
        /// Draw non-oscillators below this id (defaults to the highest id
        /// searched so far).
        #[arg(long)]
        upper: Option<u64>,
        /// Also add a copy of every record with its cells reversed.
        #[arg(long)]
        flip: bool,
        /// File to write the dataset to.
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Runs the command selected on the command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.grid.config()?;
    let classifier = Classifier::new(&config)?;
    match cli.command {
        Command::Search {
            start,
            end,
            threads,
            batch_size,
            limit,
            output,
        } => {
            let search_config = SearchConfig {
                threads,
                batch_size,
            };
            search(classifier, &search_config, start, end, limit, output.as_deref())
        }
        Command::Classify { ids } => classify(&classifier, &ids),
        Command::Show { id } => show(&classifier, &id),
        Command::Dump {
            ids,
            max_checked,
            output,
        } => {
            let oscillators = read_id_list(&ids, classifier.codec())?;
            let header = dump::header(&config, max_checked);
            dump::write_dump(create(&output)?, classifier.codec(), oscillators, &header)
                .with_context(|| format!("Failed to write dump to {}", output.display()))?;
            info!("Wrote dump to {}", output.display());
            Ok(())
        }
        Command::Dataset {
            ids,
            start,
            end,
            negatives,
            seed,
            upper,
            flip,
            output,
        } => {
            let oscillators: BTreeSet<_> = read_id_list(&ids, classifier.codec())?
                .into_iter()
                .collect();
            let codec = classifier.codec();
            let mut records = dataset::label_range(codec, &oscillators, start, end)?;
            if negatives > 0 {
                let upper = upper.unwrap_or_else(|| MAX_CHECKED_VALUE.min(codec.id_count()));
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                records.extend(dataset::sample_negatives(
                    &mut rng,
                    codec,
                    &oscillators,
                    upper,
                    negatives,
                )?);
            }
            if flip {
                let flipped = dataset::flipped(&records);
                records.extend(flipped);
            }
            dataset::write_jsonl(create(&output)?, &records)
                .with_context(|| format!("Failed to write dataset to {}", output.display()))?;
            info!(
                "Wrote {} records ({} oscillators) to {}",
                records.len(),
                records.iter().filter(|r| r.is_oscillator()).count(),
                output.display(),
            );
            Ok(())
        }
    }
}

fn search(
    classifier: Classifier,
    config: &SearchConfig,
    start: u64,
    end: u64,
    limit: Option<u64>,
    output: Option<&Path>,
) -> Result<()> {
    if limit == Some(0) {
        bail!("--limit must be at least 1");
    }
    let search = ParallelSearch::new(classifier, config)?;
    info!(
        "Searching ids {}..{} on {} threads",
        start,
        end,
        search.threads()
    );

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(create(path)?),
        None => Box::new(io::stdout()),
    };
    let mut remaining = limit;
    let mut write_error = None;
    let summary = search.stream(start, end, |found| {
        let take = match remaining {
            Some(n) => found.len().min(n as usize),
            None => found.len(),
        };
        if let Err(e) = ids::write_id_list(&mut out, found[..take].iter().copied()) {
            write_error = Some(e);
            return ControlFlow::Break(());
        }
        match &mut remaining {
            Some(n) => {
                *n -= take as u64;
                if *n == 0 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }
            None => ControlFlow::Continue(()),
        }
    })?;
    if let Some(e) = write_error {
        return Err(e).context("Failed to write oscillator ids");
    }

    if summary.stopped && summary.next < end {
        warn!("Stopped before the end of the range; continue with --start {}", summary.next);
    }
    info!(
        "Checked {} ids and found {} oscillators",
        summary.checked, summary.oscillators
    );
    Ok(())
}

fn classify(classifier: &Classifier, raw_ids: &[String]) -> Result<()> {
    for raw in raw_ids {
        let id = classifier.codec().parse_id(raw)?;
        let result = classifier.classify(id)?;
        println!(
            "{}: {} after {} generations",
            result.id, result.verdict, result.generations
        );
    }
    Ok(())
}

fn show(classifier: &Classifier, raw_id: &str) -> Result<()> {
    let id = classifier.codec().parse_id(raw_id)?;
    let trace = classifier.trace(id)?;
    let generations = trace
        .states
        .iter()
        .enumerate()
        .map(|(generation, grid)| format!("Generation {}:\n{}", generation, grid))
        .join("\n\n");
    println!("{}\n\n{}: {}", generations, id, trace.result.verdict);
    Ok(())
}

fn read_id_list(path: &Path, codec: &PatternCodec) -> Result<Vec<PatternId>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read id list from {}", path.display()))?;
    let list = ids::parse_id_list(&text, codec)
        .with_context(|| format!("Bad id list in {}", path.display()))?;
    info!("Read {} ids from {}", list.len(), path.display());
    Ok(list)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}
