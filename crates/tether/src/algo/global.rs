use crate::algo::{GlobalOptions, collect_result};
use crate::error::Result;
use crate::geom::{Canvas, Point};
use crate::graph::{Graph, LayoutResult};
use crate::rng::XorShift64Star;

pub fn layout(graph: &Graph, canvas: &Canvas, opts: &GlobalOptions) -> Result<LayoutResult> {
    let mut rng = XorShift64Star::new(opts.random_seed);
    let positions = project(graph, canvas, opts, &mut rng);
    Ok(collect_result(
        graph,
        canvas,
        positions.into_iter().map(Some).collect(),
    ))
}

/// Runs the fixed-iteration stress projection and returns one position per node.
///
/// Every unordered pair is nudged toward its target distance by `learning_rate * (d - target)`
/// per iteration, applied to both endpoints; the whole set is clamped back inside the canvas
/// after each sweep. No convergence check: the result only depends on the inputs and `rng`.
pub fn project(
    graph: &Graph,
    canvas: &Canvas,
    opts: &GlobalOptions,
    rng: &mut XorShift64Star,
) -> Vec<Point> {
    let n = graph.len();
    let half = canvas.node_half_size;
    let (width, height) = (canvas.bounds.width, canvas.bounds.height);

    let mut positions: Vec<Point> = (0..n)
        .map(|_| {
            let x = rng.range(half, width - half);
            let y = rng.range(half, height - half);
            canvas.clamp(Point::new(x, y))
        })
        .collect();
    if n < 2 {
        return positions;
    }

    let targets = PairTargets::new(graph, canvas, opts);
    let learning_rate = if opts.learning_rate.is_finite() {
        opts.learning_rate.max(0.0)
    } else {
        0.0
    };

    for _ in 0..opts.iterations {
        for i in 0..n {
            for j in (i + 1)..n {
                let delta = positions[j] - positions[i];
                let distance = delta.length();
                let direction = if distance > 1e-9 {
                    delta * (1.0 / distance)
                } else {
                    separation_direction(i, j)
                };
                let step = direction * ((distance - targets.get(i, j)) * learning_rate);
                positions[i] += step;
                positions[j] -= step;
            }
        }
        for p in &mut positions {
            *p = canvas.clamp(*p);
        }
    }

    positions
}

/// Deterministic unit direction used when two nodes sit on exactly the same spot.
fn separation_direction(i: usize, j: usize) -> Point {
    let angle = ((i as f64) * 0.618_034 + (j as f64) * 0.414_214) * std::f64::consts::TAU;
    Point::from_angle(angle)
}

/// Upper-triangular table of target distances.
struct PairTargets {
    n: usize,
    values: Vec<f64>,
}

impl PairTargets {
    fn new(graph: &Graph, canvas: &Canvas, opts: &GlobalOptions) -> Self {
        let n = graph.len();
        let short_side = canvas.bounds.width.min(canvas.bounds.height);
        let scale = opts
            .scale_factor
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(short_side * 0.6);
        let min_separation = opts
            .min_separation
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(canvas.node_half_size * 2.0);
        let unconnected = (scale * opts.unconnected_factor.max(0.0)).max(min_separation);

        let mut values = vec![unconnected; n * n.saturating_sub(1) / 2];
        for ((a, b), weight) in graph.pair_weights() {
            let target = ((1.0 - weight) * scale).max(min_separation);
            values[Self::slot(n, a, b)] = target;
        }
        Self { n, values }
    }

    fn slot(n: usize, i: usize, j: usize) -> usize {
        debug_assert!(i < j && j < n);
        // Row `i` starts after rows 0..i, which hold (n-1) + (n-2) + ... + (n-i) entries.
        i * (2 * n - i - 1) / 2 + (j - i - 1)
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        self.values[Self::slot(self.n, i, j)]
    }
}
