use serde::Serialize;
use std::io::Read;
use tether::{
    CanvasBounds, CoAppearanceLog, Dataset, GraphView, LayoutConfig, NodeState, Point,
    RelationshipDataset, ViewMode,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Layout(tether::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<tether::Error> for CliError {
    fn from(value: tether::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Interactions,
    Drag,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    mode: ViewMode,
    width: f64,
    height: f64,
    seed: Option<u64>,
    threshold: Option<f64>,
    top_k: Option<usize>,
    node_size: Option<f64>,
    config: Option<String>,
    subject: Option<String>,
    node: Option<String>,
    to: Option<Point>,
    frame_ms: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DragFrame {
    t_ms: f64,
    x: f64,
    y: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DragOut<'a> {
    node_id: &'a str,
    home: Point,
    frames: Vec<DragFrame>,
}

fn usage() -> &'static str {
    "tether-cli\n\
\n\
USAGE:\n\
  tether-cli [layout] [--mode global|ego|similarity] [--width <w>] [--height <h>] [--seed <n>] [--threshold <t>] [--top-k <k>] [--node-size <half>] [--config <path>] [--pretty] [<path>|-]\n\
  tether-cli interactions --subject <id> [--pretty] [<path>|-]\n\
  tether-cli drag --node <id> --to <x>,<y> [--frame-ms <ms>] [--mode global|ego|similarity] [--width <w>] [--height <h>] [--config <path>] [--pretty] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - layout reads a relationship or score dataset and prints the render scene.\n\
  - interactions reads a co-appearance log ({\"chunks\": [[id, ...], ...]}) and prints a relationship dataset.\n\
  - drag grabs a node at its home position, drops it at <x>,<y> and prints the return animation frame by frame.\n\
  - Set RUST_LOG (e.g. RUST_LOG=tether=debug) for diagnostics on stderr.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_number<T: std::str::FromStr>(text: &str) -> Result<T, CliError> {
    text.trim().parse::<T>().map_err(|_| CliError::Usage(usage()))
}

fn parse_point(text: &str) -> Result<Point, CliError> {
    let Some((x, y)) = text.split_once(',') else {
        return Err(CliError::Usage(usage()));
    };
    let p = Point::new(parse_number(x)?, parse_number(y)?);
    if !p.is_finite() {
        return Err(CliError::Usage(usage()));
    }
    Ok(p)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        width: 800.0,
        height: 600.0,
        frame_ms: 16.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "interactions" => args.command = Command::Interactions,
            "drag" => args.command = Command::Drag,
            "--pretty" => args.pretty = true,
            "--mode" => {
                args.mode = next_value(&mut it)?
                    .parse::<ViewMode>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--width" => args.width = parse_number(next_value(&mut it)?)?,
            "--height" => args.height = parse_number(next_value(&mut it)?)?,
            "--seed" => args.seed = Some(parse_number(next_value(&mut it)?)?),
            "--threshold" => args.threshold = Some(parse_number(next_value(&mut it)?)?),
            "--top-k" => args.top_k = Some(parse_number(next_value(&mut it)?)?),
            "--node-size" => args.node_size = Some(parse_number(next_value(&mut it)?)?),
            "--config" => args.config = Some(next_value(&mut it)?.clone()),
            "--subject" => args.subject = Some(next_value(&mut it)?.clone()),
            "--node" => args.node = Some(next_value(&mut it)?.clone()),
            "--to" => args.to = Some(parse_point(next_value(&mut it)?)?),
            "--frame-ms" => {
                args.frame_ms = parse_number(next_value(&mut it)?)?;
                if !(args.frame_ms.is_finite() && args.frame_ms > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    match args.command {
        Command::Interactions if args.subject.is_none() => Err(CliError::Usage(usage())),
        Command::Drag if args.node.is_none() || args.to.is_none() => {
            Err(CliError::Usage(usage()))
        }
        _ => Ok(args),
    }
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

/// Config file first, then flag overrides on top.
fn load_config(args: &Args) -> Result<LayoutConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => LayoutConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => LayoutConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(threshold) = args.threshold {
        config.similarity.min_threshold = Some(threshold);
    }
    if let Some(k) = args.top_k {
        config.similarity.max_results = Some(k);
    }
    if let Some(half) = args.node_size {
        config.node_half_size = half;
    }
    Ok(config)
}

fn build_view(args: &Args) -> Result<GraphView, CliError> {
    let text = read_input(args.input.as_deref())?;
    let dataset: Dataset = serde_json::from_str(&text)?;
    let config = load_config(args)?;
    let bounds = CanvasBounds::new(args.width, args.height);
    tracing::debug!(
        mode = %args.mode,
        subject = dataset.subject_id(),
        width = args.width,
        height = args.height,
        "building view"
    );
    Ok(GraphView::new(
        dataset,
        args.mode,
        bounds,
        config,
        tether::FrameTasks::new(),
    )?)
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Layout => {
            let view = build_view(&args)?;
            write_json(&view.scene(), args.pretty)
        }
        Command::Interactions => {
            let text = read_input(args.input.as_deref())?;
            let log: CoAppearanceLog = serde_json::from_str(&text)?;
            let subject = args.subject.as_deref().unwrap_or_default();
            let dataset = RelationshipDataset::from_co_appearances(subject, &log);
            write_json(&dataset, args.pretty)
        }
        Command::Drag => {
            let (Some(node_id), Some(to)) = (args.node.as_deref(), args.to) else {
                return Err(CliError::Usage(usage()));
            };
            let mut view = build_view(&args)?;
            let home = view
                .layout()
                .position(node_id)
                .ok_or_else(|| tether::Error::UnknownNode {
                    id: node_id.to_string(),
                })?;

            view.on_pointer_down(node_id, home, 0.0)?;
            let dropped = view.on_pointer_move(to).unwrap_or(home);
            let mut frames = vec![DragFrame {
                t_ms: 0.0,
                x: dropped.x,
                y: dropped.y,
            }];

            if view.on_pointer_up(0.0) == Some(NodeState::Releasing) {
                let mut now = 0.0;
                loop {
                    now += args.frame_ms;
                    let Some(scene) = view.on_frame(now) else {
                        break;
                    };
                    if let Some(node) = scene.node(node_id) {
                        frames.push(DragFrame {
                            t_ms: now,
                            x: node.x,
                            y: node.y,
                        });
                    }
                }
            } else if let Some(settled) = view.controller().live_position(node_id) {
                frames.push(DragFrame {
                    t_ms: 0.0,
                    x: settled.x,
                    y: settled.y,
                });
            }

            write_json(
                &DragOut {
                    node_id,
                    home,
                    frames,
                },
                args.pretty,
            )
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
