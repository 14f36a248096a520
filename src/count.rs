// (c) Roel Kluin, 2023, GPL v3

use crate::build_threads::PartialBuilds;
use crate::graph::{SortedGraph, DEFAULT_CAPACITY};
use crate::kmer::{Kmer, KmerIter};
use crate::node::Node;
use ahash::AHashMap;
use anyhow::{anyhow, ensure, Result};
use bincode::serialize_into;
use clap::Args;
use flate2::read::MultiGzDecoder;
use noodles_fasta as fasta;
use noodles_fastq as fastq;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct CountCmd {
    /// Reads or reference, fasta or fastq, optionally gzipped
    #[arg(value_name = "FILE", required = true)]
    input: PathBuf,

    /// Length of the k-mers counted
    #[arg(short, long, default_value = "21")]
    kmerlen: u32,

    /// Number of threads building partial graphs
    #[arg(short, long, default_value = "1")]
    ct: usize,

    /// Wire each new k-mer to its first predecessor found (single thread only)
    #[arg(short, long)]
    wire: bool,

    /// Write the sorted nodes to this file
    #[arg(short, long, value_name = "OUTPUT")]
    out: Option<PathBuf>,

    /// Number of nodes to preallocate per graph
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,
}

/// where the sequences go: one graph, or threads each building a part.
enum Builder {
    Single {
        graph: SortedGraph<Kmer>,
        kmerlen: u32,
        wire: bool,
    },
    Threads(PartialBuilds),
}

impl Builder {
    fn new(cmd: &CountCmd) -> Result<Self> {
        if cmd.ct > 1 {
            ensure!(!cmd.wire, "wiring is only supported with a single thread");
            eprintln!("Using {} threads", cmd.ct);
            PartialBuilds::new(cmd.ct, cmd.kmerlen, cmd.capacity).map(Builder::Threads)
        } else {
            Kmer::new(cmd.kmerlen)?;
            Ok(Builder::Single {
                graph: SortedGraph::with_capacity(Node::new, cmd.capacity),
                kmerlen: cmd.kmerlen,
                wire: cmd.wire,
            })
        }
    }
    fn add(&mut self, seq: &[u8]) -> Result<()> {
        match self {
            Builder::Single {
                graph,
                kmerlen,
                wire: true,
            } => {
                for kmer in KmerIter::new(seq, *kmerlen)? {
                    graph.insert_and_wire(kmer);
                }
            }
            Builder::Single { graph, kmerlen, .. } => {
                graph.insert_many(KmerIter::new(seq, *kmerlen)?);
            }
            Builder::Threads(builds) => builds.push(seq.to_vec())?,
        }
        Ok(())
    }
    fn finish(self) -> Result<SortedGraph<Kmer>> {
        match self {
            Builder::Single { graph, .. } => Ok(graph),
            Builder::Threads(builds) => builds.finish(),
        }
    }
}

enum Format {
    Fasta,
    Fastq,
}

/// fastq if the name, without .gz, ends in .fq or .fastq.
fn detect_format(path: &Path) -> Format {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    if name.ends_with(".fq") || name.ends_with(".fastq") {
        Format::Fastq
    } else {
        Format::Fasta
    }
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| anyhow!("Error opening {:?}: {}", path, e))?;
    if path.extension().map_or(false, |ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

fn read_sequences<F>(path: &Path, mut f: F) -> Result<usize>
where
    F: FnMut(&[u8]) -> Result<()>,
{
    let reader = open_input(path)?;
    let mut n = 0;
    match detect_format(path) {
        Format::Fasta => {
            let mut fa = fasta::Reader::new(reader);
            for res in fa.records() {
                let record = res?;
                dbg_print!("Starting with record {}.", record.name());
                f(record.sequence().as_ref())?;
                n += 1;
            }
        }
        Format::Fastq => {
            let mut fq = fastq::Reader::new(reader);
            for res in fq.records() {
                let record = res?;
                f(record.sequence())?;
                n += 1;
            }
        }
    }
    Ok(n)
}

/// The output file is only created once the graph is built, a failed run
/// leaves nothing behind.
pub fn count(cmd: CountCmd) -> Result<()> {
    if let Some(out) = &cmd.out {
        ensure!(!out.exists(), "{out:?} already exists!");
    }
    eprintln!("Reading {:?}", cmd.input);
    let mut builder = Builder::new(&cmd)?;
    let n = read_sequences(&cmd.input, |seq| builder.add(seq))?;
    eprintln!("Processed {} sequences", n);

    let graph = builder.finish()?;
    make_stats(&graph);

    if let Some(out) = &cmd.out {
        eprintln!("Writing {out:?}");
        let out_file = BufWriter::new(File::create(out)?);
        if let Err(e) = serialize_into(out_file, graph.nodes()) {
            let _ = fs::remove_file(out);
            return Err(e.into());
        }
    }
    Ok(())
}

fn make_stats(graph: &SortedGraph<Kmer>) {
    let total = graph.total_observations();
    println!("{} distinct k-mers", graph.len());
    println!("{} k-mer observations (saturated counts capped)", total);

    let mut freq_counter: AHashMap<u8, usize> = AHashMap::new();
    for freq in graph.frequencies() {
        *freq_counter.entry(freq).or_insert(0) += 1;
    }
    if let Some(saturated) = freq_counter.get(&u8::MAX) {
        println!(
            "Saturated: {}\t{:.2}%",
            saturated,
            100.0 * *saturated as f64 / graph.len() as f64
        );
    }
    let mut count_vec: Vec<(&u8, &usize)> = freq_counter.iter().collect();
    count_vec.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    println!("frequency and k-mer count (top 20 at most)");
    for cv in count_vec.iter().take(20) {
        println!("{}\t{}", cv.0, cv.1);
    }
    println!("..");
}
