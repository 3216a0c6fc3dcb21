use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::config::Config;
use crate::model::Scene;
use crate::route::{PathCommand, build_rounded_path, label_anchor, route_connector};

/// JSON snapshot of every routed connector in a scene, for inspection
/// and diffing. Not a persistence format; geometry is always recomputed
/// from the scene.
#[derive(Debug, Serialize)]
pub struct RouteDump {
    pub connectors: Vec<ConnectorDump>,
}

#[derive(Debug, Serialize)]
pub struct ConnectorDump {
    pub id: String,
    pub points: Vec<[f32; 2]>,
    pub total_length: f32,
    pub label_anchor: [f32; 2],
    pub commands: Vec<PathCommand>,
}

impl RouteDump {
    pub fn from_scene(scene: &Scene, config: &Config) -> Self {
        let connectors = scene
            .connectors
            .iter()
            .map(|connector| {
                let path = route_connector(connector, scene, &config.routing);
                let anchor = label_anchor(
                    &path.points,
                    connector.label_position,
                    connector.label_offset,
                );
                let commands =
                    build_rounded_path(&path.points, connector.style.corner_radius);
                ConnectorDump {
                    id: connector.id.clone(),
                    points: path.points.iter().map(|p| [p.x, p.y]).collect(),
                    total_length: path.total_length,
                    label_anchor: [anchor.x, anchor.y],
                    commands,
                }
            })
            .collect();
        Self { connectors }
    }

    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConnectorEndpoint, ConnectorModel, ConnectorStyle, NodeModel, Port, Vec2};

    #[test]
    fn dump_routes_every_connector() {
        let scene = Scene {
            nodes: vec![
                NodeModel {
                    id: "a".to_string(),
                    position: Vec2::new(0.0, 0.0),
                    size: Vec2::new(100.0, 100.0),
                },
                NodeModel {
                    id: "b".to_string(),
                    position: Vec2::new(300.0, 0.0),
                    size: Vec2::new(100.0, 100.0),
                },
            ],
            connectors: vec![ConnectorModel {
                id: "c1".to_string(),
                source: ConnectorEndpoint::attached("a", Port::Right),
                target: ConnectorEndpoint::attached("b", Port::Left),
                points: None,
                style: ConnectorStyle::default(),
                label_position: 0.5,
                label_offset: 0.0,
            }],
        };
        let dump = RouteDump::from_scene(&scene, &Config::default());
        assert_eq!(dump.connectors.len(), 1);
        let connector = &dump.connectors[0];
        assert_eq!(connector.points, vec![[100.0, 50.0], [300.0, 50.0]]);
        assert_eq!(connector.total_length, 200.0);
        assert_eq!(connector.label_anchor, [200.0, 50.0]);

        let json = dump.to_json_pretty().unwrap();
        assert!(json.contains("\"id\": \"c1\""), "unexpected dump: {json}");
    }
}
