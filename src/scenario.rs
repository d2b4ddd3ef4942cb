use anyhow::Result;
use serde::{Deserialize, Serialize};
use slabcast_geometry::{cast_nearest, CastOptions, FRect, IRect, Vec2};
use slabcast_input::{InputEvent, InputState, MouseButton};
use slabcast_testkit::ContactRecord;
use std::{fs, path::Path};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    #[serde(default)]
    anchor: Option<Vec2>,
    #[serde(default)]
    rects: Vec<FRect>,
    #[serde(default)]
    int_rects: Vec<IRect>,
    steps: Vec<ScenarioStep>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScenarioStep {
    tick: u64,
    #[serde(default)]
    events: Vec<InputEvent>,
}

/// Result of one scenario step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    #[serde(flatten)]
    pub record: ContactRecord,
    /// How long the left button has been held at this tick.
    pub left_held_ms: Option<u64>,
}

/// Deterministic replay of input events against a fixed set of rectangles.
///
/// Each step applies its events at `tick` milliseconds and then casts the
/// segment from the anchor to the pointer against every rectangle.
#[derive(Debug)]
pub struct Scenario {
    anchor: Option<Vec2>,
    rects: Vec<FRect>,
    steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load a scenario from an in-memory JSON string.
    pub fn from_json(contents: &str) -> Result<Self> {
        let file: ScenarioFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("scenario contains no steps");
        }
        if file
            .steps
            .windows(2)
            .any(|pair| pair[1].tick < pair[0].tick)
        {
            anyhow::bail!("scenario steps must be sorted by tick");
        }

        let mut rects = file.rects;
        rects.extend(file.int_rects.iter().map(IRect::to_frect));
        if rects.is_empty() {
            anyhow::bail!("scenario contains no rects");
        }

        Ok(Self {
            anchor: file.anchor,
            rects,
            steps: file.steps,
        })
    }

    pub fn rects(&self) -> &[FRect] {
        &self.rects
    }

    /// Replay every step. `default_anchor` is used when the file sets none.
    pub fn run(&self, options: &CastOptions, default_anchor: Vec2) -> Vec<FrameReport> {
        let anchor = self.anchor.unwrap_or(default_anchor);
        let mut input = InputState::new();
        let mut frames = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            input.begin_frame();
            for event in &step.events {
                input.handle_event(event, step.tick);
            }

            let ray = input.aim_ray(anchor);
            let hit = cast_nearest(&ray, &self.rects, options);
            debug!(tick = step.tick, ?ray, target = ?hit.map(|(index, _)| index), "scenario step");

            frames.push(FrameReport {
                record: ContactRecord {
                    tick: step.tick,
                    ray,
                    target: hit.map(|(index, _)| index),
                    contact: hit.map(|(_, contact)| contact),
                },
                left_held_ms: input.mouse.held_for(MouseButton::Left, step.tick),
            });
        }

        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slabcast_geometry::NegativeTime;

    const SCENARIO: &str = r#"{
        "anchor": [0.0, 5.0],
        "rects": [{"position": [12.0, 4.0], "size": [2.0, 2.0]}],
        "int_rects": [{"position": [4, 4], "size": [2, 2]}],
        "steps": [
            {"tick": 0, "events": [{"type": "mouse_motion", "x": 2.0, "y": 5.0}]},
            {"tick": 16, "events": [
                {"type": "mouse_down", "button": "left"},
                {"type": "mouse_motion", "x": 20.0, "y": 5.0}
            ]},
            {"tick": 48},
            {"tick": 64, "events": [{"type": "mouse_up", "button": "left"}]}
        ]
    }"#;

    #[test]
    fn scenario_rejects_unsorted_ticks() {
        let json = r#"{
            "rects": [{"position": [0.0, 0.0], "size": [1.0, 1.0]}],
            "steps": [{"tick": 2}, {"tick": 1}]
        }"#;
        let err = Scenario::from_json(json).unwrap_err();
        assert!(
            err.to_string().contains("sorted by tick"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn scenario_rejects_empty_input() {
        let no_steps = r#"{"rects": [{"position": [0.0, 0.0], "size": [1.0, 1.0]}], "steps": []}"#;
        assert!(Scenario::from_json(no_steps).is_err());

        let no_rects = r#"{"steps": [{"tick": 0}]}"#;
        let err = Scenario::from_json(no_rects).unwrap_err();
        assert!(err.to_string().contains("no rects"));
    }

    #[test]
    fn scenario_replays_hits_in_order() {
        let scenario = Scenario::from_json(SCENARIO).expect("scenario should parse");
        assert_eq!(scenario.rects().len(), 2);

        let frames = scenario.run(&CastOptions::default(), Vec2::ZERO);
        assert_eq!(frames.len(), 4);

        // Pointer stops short of both rects.
        assert_eq!(frames[0].record.target, None);
        assert_eq!(frames[0].left_held_ms, None);

        // Int rect (index 1) sits in front of the float rect.
        assert_eq!(frames[1].record.target, Some(1));
        let contact = frames[1].record.contact.expect("contact present");
        assert_eq!(contact.normal, Vec2::new(-1.0, 0.0));
        assert_eq!(frames[1].left_held_ms, Some(0));

        assert_eq!(frames[2].left_held_ms, Some(32));
        assert_eq!(frames[3].left_held_ms, None);
    }

    #[test]
    fn scenario_is_deterministic() {
        let scenario = Scenario::from_json(SCENARIO).unwrap();
        let options = CastOptions {
            negative_time: NegativeTime::Accept,
            ..Default::default()
        };
        assert_eq!(
            scenario.run(&options, Vec2::ZERO),
            scenario.run(&options, Vec2::ZERO)
        );
    }
}
