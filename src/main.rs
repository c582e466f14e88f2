use std::error::Error;
use tracing_subscriber::EnvFilter;
use trackview::{
    parse_observations, AnchorMap, ColorRegistry, ExplorerEvent, ExplorerState, GeometrySynthesizer,
    OptionsManager,
};

const USAGE: &str = "Usage: trackview <observations.json> <anchors.geojson> \
[--config <options.json>] [--select id,id,...] [--pivot <epoch_s>] [--steps <n>]";

#[derive(Debug, Default)]
struct Args {
    observations_path: String,
    anchors_path: String,
    config_path: Option<String>,
    selection: Option<Vec<String>>,
    pivot: Option<i64>,
    steps: usize,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args, Box<dyn Error>> {
    let mut positional = Vec::new();
    let mut args = Args::default();

    while let Some(arg) = raw.next() {
        let mut value = |flag: &str| raw.next().ok_or_else(|| format!("{} needs a value\n{}", flag, USAGE));
        match arg.as_str() {
            "--config" => args.config_path = Some(value("--config")?),
            "--select" => {
                let ids = value("--select")?;
                args.selection = Some(ids.split(',').filter(|s| !s.is_empty()).map(str::to_string).collect());
            }
            "--pivot" => args.pivot = Some(value("--pivot")?.parse()?),
            "--steps" => args.steps = value("--steps")?.parse()?,
            "-h" | "--help" => return Err(USAGE.into()),
            _ => positional.push(arg),
        }
    }

    let [observations_path, anchors_path]: [String; 2] =
        positional.try_into().map_err(|_| USAGE.to_string())?;
    args.observations_path = observations_path;
    args.anchors_path = anchors_path;
    Ok(args)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let options = match &args.config_path {
        Some(path) => OptionsManager::from_file(path)?,
        None => OptionsManager::new(),
    };
    let options = options.options().clone();

    let observations = parse_observations(&std::fs::read_to_string(&args.observations_path)?)?;
    let anchors = AnchorMap::from_geojson(&std::fs::read_to_string(&args.anchors_path)?)?;

    let mut state = ExplorerState::new(options.time_bound, ColorRegistry::new())
        .apply(ExplorerEvent::Refresh(observations));

    let selection = args
        .selection
        .unwrap_or_else(|| state.trajectories().device_ids().map(str::to_string).collect());
    state = state.apply(ExplorerEvent::Select(selection));

    if let Some(pivot) = args.pivot {
        state = state.apply(ExplorerEvent::SetPivot(pivot));
    }
    for _ in 0..args.steps {
        state = state.apply(ExplorerEvent::StepForward);
    }

    let frame = state.render(&anchors, &GeometrySynthesizer::with_defaults(), &options);
    tracing::info!(
        paths = frame.paths.len(),
        circles = frame.geometry.device_circles.len(),
        anchor_circles = frame.geometry.anchor_circles.len(),
        "rendered frame"
    );
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args_with_flags() {
        let parsed = parse_args(args(&[
            "obs.json", "--select", "a,b", "anchors.geojson", "--pivot", "150", "--steps", "2",
        ]))
        .unwrap();
        assert_eq!(parsed.observations_path, "obs.json");
        assert_eq!(parsed.anchors_path, "anchors.geojson");
        assert_eq!(parsed.selection, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(parsed.pivot, Some(150));
        assert_eq!(parsed.steps, 2);
        assert_eq!(parsed.config_path, None);
    }

    #[test]
    fn test_parse_args_requires_both_inputs() {
        assert!(parse_args(args(&["obs.json"])).is_err());
        assert!(parse_args(args(&["obs.json", "anchors.geojson", "--pivot"])).is_err());
    }
}
