//! A thin CLI front end. Loads a graph, compiles a regex, builds the
//! product, runs one evaluator, and prints the textual dump format.

use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use rpqdb::{Graph, Strategy, VertexId};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Bfs,
    Sn,
    Ospg,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Strategy {
        match arg {
            StrategyArg::Bfs => Strategy::Bfs,
            StrategyArg::Sn => Strategy::SemiNaive,
            StrategyArg::Ospg => Strategy::Ospg,
        }
    }
}

/// Evaluate a regular path query over a data graph.
#[derive(Debug, Parser)]
#[command(name = "rpqdb", version, about)]
struct Args {
    /// Path to a `src label dst` adjacency file.
    graph_file: String,

    /// Regex over the edge-label alphabet (`.`/`|`/`*`, grouping, literals).
    regex: String,

    /// Which reachability engine to run.
    #[arg(long, value_enum, default_value = "bfs")]
    strategy: StrategyArg,

    /// Restrict query sources to these vertices (default: every vertex).
    #[arg(long)]
    start: Vec<VertexId>,

    /// Restrict accepting vertices intersected into the result (default:
    /// whatever the product construction derives from the DFA).
    #[arg(long)]
    accept: Vec<VertexId>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let graph = match Graph::from_file(&args.graph_file) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let dfa = match rpqdb::compile(&args.regex) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut product = rpqdb::product(&graph, &dfa);

    // Product construction seeds every graph vertex as a potential source,
    // so `--start`/`--accept` narrow the set down here after the fact.
    if !args.start.is_empty() {
        let allowed: std::collections::HashSet<VertexId> = args.start.into_iter().collect();
        product.starting_vertices.retain(|v| allowed.contains(v));
    }
    if !args.accept.is_empty() {
        let allowed: std::collections::HashSet<VertexId> = args.accept.into_iter().collect();
        product.accepting_vertices.retain(|v| allowed.contains(v));
    }

    let result = rpqdb::evaluate(product, args.strategy.into(), None);
    print!("{result}");
    ExitCode::SUCCESS
}
