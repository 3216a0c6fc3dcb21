use crate::config::load_config;
use crate::dump::RouteDump;
use crate::model::Scene;
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "snapline",
    version,
    about = "Route a scene's connectors and dump the geometry as JSON"
)]
pub struct Args {
    /// Scene JSON file, or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON file (tolerance overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let input = read_input(args.input.as_deref())?;
    let scene: Scene = serde_json::from_str(&input)?;
    let dump = RouteDump::from_scene(&scene, &config);
    match args.output.as_deref() {
        Some(path) => dump.write_json(path)?,
        None => println!("{}", dump.to_json_pretty()?),
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_json_parses_with_defaults() {
        let json = r#"{
            "nodes": [
                {"id": "a", "position": {"x": 0, "y": 0}, "size": {"x": 100, "y": 80}}
            ],
            "connectors": [
                {
                    "id": "c",
                    "source": {"kind": "attached", "node_id": "a", "port": "right"},
                    "target": {"kind": "floating", "position": {"x": 300, "y": 200}}
                }
            ]
        }"#;
        let scene: Scene = serde_json::from_str(json).unwrap();
        assert_eq!(scene.connectors[0].label_position, 0.5);
        assert_eq!(scene.connectors[0].style.stroke_width, 2.0);
        assert!(scene.connectors[0].points.is_none());
    }
}
