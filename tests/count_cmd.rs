use bincode::deserialize_from;
use clap::Parser;
use sortgraph::count::{count, CountCmd};
use sortgraph::{Kmer, Node};
use std::fs::File;
use std::io::{BufReader, Write};

#[derive(Parser)]
struct Cli {
    #[command(flatten)]
    cmd: CountCmd,
}

fn count_cmd(args: &[&str]) -> CountCmd {
    let mut argv = vec!["sortgraph"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap().cmd
}

fn read_nodes(path: &std::path::Path) -> Vec<Node<Kmer>> {
    deserialize_from(BufReader::new(File::open(path).unwrap())).unwrap()
}

#[test]
fn test_count_fasta() {
    let mut temp_file = tempfile::Builder::new().suffix(".fa").tempfile().unwrap();
    writeln!(temp_file, ">seq1\nACGTACGT\n>seq2\nACGNACG").unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("graph.sg");

    let input = temp_file.path().to_str().unwrap();
    let output = out.to_str().unwrap();
    count(count_cmd(&["-k", "4", "--capacity", "64", "-o", output, input])).unwrap();

    // ACGT CGTA GTAC TACG ACGT; nothing spans the N in seq2.
    let nodes = read_nodes(&out);
    let keys: Vec<String> = nodes.iter().map(|n| n.key().to_string()).collect();
    let freqs: Vec<u8> = nodes.iter().map(|n| n.frequency()).collect();
    assert_eq!(keys, vec!["ACGT", "CGTA", "TACG", "GTAC"]);
    assert_eq!(freqs, vec![2, 1, 1, 1]);
    assert!(nodes.iter().all(|n| n.adjacency().is_empty()));

    // refuses to overwrite
    assert!(count(count_cmd(&["-k", "4", "--capacity", "64", "-o", output, input])).is_err());
}

#[test]
fn test_count_fastq_wired() {
    let mut temp_file = tempfile::Builder::new().suffix(".fastq").tempfile().unwrap();
    writeln!(temp_file, "@r1\nAACCG\n+\nIIIII").unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("graph.sg");

    let input = temp_file.path().to_str().unwrap();
    let output = out.to_str().unwrap();
    count(count_cmd(&["-k", "3", "-w", "--capacity", "8", "-o", output, input])).unwrap();

    let nodes = read_nodes(&out);
    let keys: Vec<String> = nodes.iter().map(|n| n.key().to_string()).collect();
    assert_eq!(keys, vec!["AAC", "ACC", "CCG"]);
    assert_eq!(nodes[0].successors(), [0, 1, 0, 0]);
    assert_eq!(nodes[1].predecessors(), [1, 0, 0, 0]);
    assert_eq!(nodes[1].successors(), [0, 0, 0, 1]);
    assert_eq!(nodes[2].predecessors(), [1, 0, 0, 0]);
}

#[test]
fn test_count_threads() {
    let mut temp_file = tempfile::Builder::new().suffix(".fa").tempfile().unwrap();
    for i in 0..10 {
        writeln!(temp_file, ">seq{}\nACGTTGCAACGTTGCA", i).unwrap();
    }
    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("graph.sg");

    let input = temp_file.path().to_str().unwrap();
    let output = out.to_str().unwrap();
    count(count_cmd(&["-k", "5", "-c", "4", "--capacity", "64", "-o", output, input])).unwrap();

    let nodes = read_nodes(&out);
    assert!(nodes.windows(2).all(|w| w[0].key() < w[1].key()));
    let total: u64 = nodes.iter().map(|n| u64::from(n.frequency())).sum();
    assert_eq!(total, 10 * 12);

    let wired = count_cmd(&["-k", "5", "-c", "4", "-w", input]);
    assert!(count(wired).is_err());
}

#[test]
fn test_missing_input() {
    assert!(count(count_cmd(&["-k", "4", "/nonexistent/reads.fa"])).is_err());
}

#[test]
fn test_failed_run_leaves_no_output() {
    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("graph.sg");
    let output = out.to_str().unwrap();

    let missing = count_cmd(&["-k", "4", "-o", output, "/nonexistent/reads.fa"]);
    assert!(count(missing).is_err());
    assert!(!out.exists());

    let mut temp_file = tempfile::Builder::new().suffix(".fa").tempfile().unwrap();
    writeln!(temp_file, ">seq1\nACGTACGT").unwrap();
    let input = temp_file.path().to_str().unwrap();

    assert!(count(count_cmd(&["-k", "40", "-o", output, input])).is_err());
    assert!(!out.exists());

    // a retry with valid settings is not blocked
    count(count_cmd(&["-k", "4", "--capacity", "8", "-o", output, input])).unwrap();
    assert_eq!(read_nodes(&out).len(), 4);
}
