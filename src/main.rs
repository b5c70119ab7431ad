use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lazyseq::{HybridQueue, RoseArena, Seq, TraversalConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lazyseq", about = "Lazy sequence engine demos")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Order {
    Breadth,
    Depth,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the first Fibonacci numbers from a pair-based generator.
    Fib {
        /// How many numbers to print.
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
    /// Walk a dotted-label binary tree ("1" -> "1.1", "1.2", ...).
    Tree {
        /// Traversal order.
        #[arg(long, value_enum, default_value_t = Order::Breadth)]
        order: Order,
        /// Number of levels below the root.
        #[arg(long, default_value_t = 3)]
        depth: usize,
        /// Stop after this many labels.
        #[arg(long)]
        take: Option<usize>,
    },
    /// Split a number into halves until every part is 1, then list the parts.
    Halves {
        /// Number to split.
        value: u64,
        /// Traversal order.
        #[arg(long, value_enum, default_value_t = Order::Depth)]
        order: Order,
        /// Upper bound on tree nodes (including the root).
        #[arg(long, default_value_t = 1024)]
        max_nodes: usize,
    },
    /// Keep the first value of each residue class modulo `--modulo`.
    Distinct {
        /// Modulus used as the dedup key.
        #[arg(long, default_value_t = 2)]
        modulo: i64,
        /// Input values.
        values: Vec<i64>,
    },
    /// Drain a queue built from a seed plus appended items.
    Queue {
        /// Comma-separated seed items.
        #[arg(long, value_delimiter = ',')]
        seed: Vec<String>,
        /// Comma-separated items appended after the seed.
        #[arg(long, value_delimiter = ',')]
        append: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {err}"))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Fib { count } => run_fib(count),
        Commands::Tree { order, depth, take } => run_tree(order, depth, take),
        Commands::Halves {
            value,
            order,
            max_nodes,
        } => run_halves(value, order, max_nodes)?,
        Commands::Distinct { modulo, values } => run_distinct(modulo, values)?,
        Commands::Queue { seed, append } => run_queue(seed, append),
    }

    Ok(())
}

fn run_fib(count: usize) {
    let fib = Seq::from_vec(vec![0u128, 1]).extend_with_pairs(|a, b| a.checked_add(*b));
    for (idx, value) in fib.first(count).cursor().enumerate() {
        println!("{}\t{}", idx, value);
    }
}

fn config_for(order: Order) -> TraversalConfig {
    match order {
        Order::Breadth => TraversalConfig::breadth_first(),
        Order::Depth => TraversalConfig::depth_first(),
    }
}

fn run_tree(order: Order, depth: usize, take: Option<usize>) {
    let config = config_for(order).with_max_depth(depth);

    let labels = Seq::once("1".to_string()).traverse(config, |label: &String| {
        Seq::from_vec(vec![format!("{label}.1"), format!("{label}.2")])
    });
    let labels = match take {
        Some(n) => labels.first(n),
        None => labels,
    };
    for label in &labels {
        println!("{}", label);
    }
}

fn run_halves(value: u64, order: Order, max_nodes: usize) -> Result<()> {
    let arena = RoseArena::grow(value, usize::MAX, max_nodes, |n: &u64| {
        if *n <= 1 {
            Vec::new()
        } else {
            vec![n / 2, n - n / 2]
        }
    })
    .with_context(|| format!("failed to grow halving tree for {}", value))?;

    for id in &arena.node_ids(config_for(order)) {
        let depth = arena.depth(id).unwrap_or_default();
        if let Some(part) = arena.value(id) {
            println!("{}{}", "  ".repeat(depth), part);
        }
    }
    Ok(())
}

fn run_distinct(modulo: i64, values: Vec<i64>) -> Result<()> {
    if modulo == 0 {
        bail!("--modulo must be non-zero");
    }
    let kept = Seq::from_vec(values).distinct_by(move |x| x.rem_euclid(modulo));
    let rendered: Vec<String> = kept.cursor().map(|x| x.to_string()).collect();
    println!("{}", rendered.join(" "));
    Ok(())
}

fn run_queue(seed: Vec<String>, append: Vec<String>) {
    let mut queue = HybridQueue::new(Seq::from_vec(seed));
    queue.append(append);
    let drained: Vec<String> = queue.collect();
    println!("{}", drained.join(""));
}

