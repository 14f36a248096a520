// Roel Kluin, 2023, GPL v3

use crate::graph::SortedGraph;
use crate::kmer::{Kmer, KmerIter};
use crate::node::Node;
use anyhow::{anyhow, ensure, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::iter::repeat;
use std::thread::{spawn, JoinHandle};

/// Each thread builds its own graph from the sequences it is sent. The graphs
/// are merged when the input is exhausted.
pub struct PartialBuilds {
    threads: Vec<JoinHandle<Result<()>>>,
    rx_in_main: Receiver<SortedGraph<Kmer>>,
    tx_to_thread: Vec<Sender<Vec<u8>>>,
    sent: usize,
}

fn gen_seq_channels(ct: usize) -> impl Iterator<Item = (Sender<Vec<u8>>, Receiver<Vec<u8>>)> {
    repeat(()).take(ct).map(|_| unbounded::<Vec<u8>>())
}

fn build_partial(
    rx_from_main: Receiver<Vec<u8>>,
    tx_to_main: Sender<SortedGraph<Kmer>>,
    kmerlen: u32,
    capacity: usize,
) -> Result<()> {
    let mut graph = SortedGraph::with_capacity(Node::new, capacity);
    for seq in rx_from_main.iter() {
        for kmer in KmerIter::new(&seq, kmerlen)? {
            graph.insert_one(kmer);
        }
    }
    dbg_print!("partial build done, {} nodes", graph.len());
    tx_to_main
        .send(graph)
        .map_err(|_| anyhow!("Main channel is disconnected?"))
}

impl PartialBuilds {
    pub fn new(ct: usize, kmerlen: u32, capacity: usize) -> Result<Self> {
        ensure!(ct != 0, "need at least one build thread");
        Kmer::new(kmerlen)?;

        let (tx_to_thread, rx_from_main): (Vec<_>, Vec<_>) = gen_seq_channels(ct).unzip();
        // to collect the results
        let (tx_to_main, rx_in_main) = unbounded::<SortedGraph<Kmer>>();

        let threads = rx_from_main
            .into_iter()
            .map(|rx| {
                let tx_to_main = tx_to_main.clone();
                spawn(move || build_partial(rx, tx_to_main, kmerlen, capacity))
            })
            .collect();
        Ok(PartialBuilds {
            threads,
            rx_in_main,
            tx_to_thread,
            sent: 0,
        })
    }

    /// hand a sequence to the next thread, round robin.
    pub fn push(&mut self, seq: Vec<u8>) -> Result<()> {
        let nr = self.sent % self.tx_to_thread.len();
        self.tx_to_thread[nr]
            .send(seq)
            .map_err(|_| anyhow!("channel to thread {} is disconnected", nr))?;
        self.sent += 1;
        Ok(())
    }

    /// close the channels, wait for the threads and merge their graphs.
    pub fn finish(self) -> Result<SortedGraph<Kmer>> {
        let PartialBuilds {
            threads,
            rx_in_main,
            tx_to_thread,
            sent,
        } = self;
        drop(tx_to_thread);
        dbg_print!("{} sequences sent to {} threads", sent, threads.len());

        for t in threads {
            t.join().map_err(|_| anyhow!("build thread panicked"))??;
        }
        let mut partial = rx_in_main.try_iter();
        let mut graph = partial
            .next()
            .ok_or_else(|| anyhow!("no graph received from build threads"))?;
        for other in partial {
            graph.merge_graph(other)?;
        }
        Ok(graph)
    }
}
