#[macro_use]
pub mod rdbg;
pub mod build_threads;
pub mod count;
pub mod graph;
pub mod key;
pub mod kmer;
pub mod new_types;
pub mod node;

pub use graph::{Lookup, SortedGraph};
pub use key::GraphKey;
pub use kmer::{Kmer, KmerIter};
pub use node::Node;
