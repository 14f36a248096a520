extern crate sortgraph;

// target/release/sortgraph count -k 25 -c 8 reads.fq.gz -o reads.sg

use anyhow::Result;
use clap::{Parser, Subcommand};
use sortgraph::count;

#[derive(Subcommand, Debug)]
enum Commands {
    /// counts k-mers of reads or a reference in a sorted graph
    Count(count::CountCmd),
}

/// Build a sorted k-mer graph with occurrence counts and adjacency
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct SortGraph {
    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> Result<()> {
    let sortgraph = SortGraph::parse();
    if sortgraph.debug > 0 {
        eprintln!("{:?}", sortgraph);
    }

    match sortgraph.command {
        Some(Commands::Count(count_cmd)) => count::count(count_cmd),
        None => Ok(()),
    }
}
