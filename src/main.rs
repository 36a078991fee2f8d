use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use anyhow::bail;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use quadtree::prelude::*;

mod positions;

const USAGE: &str = "usage: quadtree <positions-file> [--owned] [--fit] [--capacity N] [--max-depth N]";

/// Region used unless `--fit` is given.
const DEFAULT_BOUNDS: Aabb = Aabb::new(Point::new(-1000.0, -1000.0), Point::new(1000.0, 1000.0));
const DEFAULT_CAPACITY: usize = 4;

struct Options {
    path: PathBuf,

    /// Use `Quadtree` instead of `LinearQuadtree`
    owned: bool,

    /// Shrink the tree bounds to the loaded positions
    fit: bool,

    config: QuadtreeConfig,
}

fn parse_args() -> anyhow::Result<Options> {
    let mut args = std::env::args().skip(1);

    let mut path = None;
    let mut owned = false;
    let mut fit = false;
    let mut config = QuadtreeConfig::default().with_node_capacity(DEFAULT_CAPACITY);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--owned" => owned = true,
            "--fit" => fit = true,
            "--capacity" => {
                let n = args.next().context("--capacity expects a number")?;
                config.node_capacity = n.parse().with_context(|| format!("Invalid capacity \"{n}\""))?;
            }
            "--max-depth" => {
                let n = args.next().context("--max-depth expects a number")?;
                config.max_depth = n.parse().with_context(|| format!("Invalid max depth \"{n}\""))?;
            }
            "-h" | "--help" => bail!(USAGE),
            _ if path.is_none() => path = Some(PathBuf::from(arg)),
            _ => bail!("Unexpected argument \"{arg}\"\n{USAGE}"),
        }
    }

    let Some(path) = path else { bail!(USAGE) };

    Ok(Options {
        path,
        owned,
        fit,
        config,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = parse_args()?;

    let text = std::fs::read_to_string(&options.path)
        .with_context(|| format!("Failed to read {}", options.path.display()))?;
    let positions = positions::parse_positions(&text).context("Failed to parse positions")?;

    info!(count = positions.len(), path = %options.path.display(), "loaded positions");

    let bounds = if options.fit {
        Aabb::from_points(&positions)
    } else {
        DEFAULT_BOUNDS
    };

    if options.owned {
        let tree = Quadtree::with_config(bounds, options.config).context("Failed to build tree")?;
        run(tree, &positions)
    } else {
        let tree = LinearQuadtree::with_config(bounds, options.config).context("Failed to build tree")?;
        run(tree, &positions)
    }
}

/// Insert every position, look each one up again, then remove them in reverse order. Fails if
/// any position can't be inserted or removed.
fn run<S: SpatialIndex<usize>>(mut tree: S, positions: &[Point]) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut skipped = 0;
    for (i, &position) in positions.iter().enumerate() {
        if !tree.insert(i + 1, position) {
            warn!(id = i + 1, ?position, "position outside the tree");
            skipped += 1;
        }
    }

    if skipped > 0 {
        bail!("Failed to insert {skipped} of {} positions", positions.len());
    }

    info!(elements = tree.len(), height = tree.height(), "inserted");

    let found = positions
        .iter()
        .filter(|&&p| tree.find_nearest(p).is_some_and(|e| e.position == p))
        .count();

    info!(found, "looked up");

    let mut missing = 0;
    for (i, &position) in positions.iter().enumerate().rev() {
        if !tree.remove(&(i + 1), position) {
            warn!(id = i + 1, ?position, "failed to remove");
            missing += 1;
        }
    }

    if missing > 0 {
        bail!("Failed to remove {missing} of {} positions", positions.len());
    }

    info!(
        elements = tree.len(),
        height = tree.height(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "benchmark done"
    );

    Ok(())
}
