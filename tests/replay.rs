use radar_ring::config::RadarConfig;
use radar_ring::geo::GeoPoint;
use radar_ring::ring::{Color, JsonLinesSink};
use radar_ring::scenario::{Replay, ReplaySummary, Scenario};

const CONFIG: &str = include_str!("../demos/radar.yaml");
const WALK: &str = include_str!("../demos/walk.yaml");

#[test]
fn demo_config_is_the_reference_board() {
    let config = RadarConfig::from_str(CONFIG).unwrap();
    let defaults = RadarConfig::default();

    assert_eq!(config.geometry(), defaults.geometry());
    assert_eq!(config.ramp(), defaults.ramp());
    assert_eq!(config.colors.altimeter, Color::new(255, 142, 43));
}

#[test]
fn walk_replays_to_json_lines() {
    let scenario = Scenario::from_str(WALK).unwrap();
    let mut replay = Replay::new(RadarConfig::from_str(CONFIG).unwrap());
    let mut sink = JsonLinesSink::new(Vec::new());

    let summary = replay.run(&scenario, &mut sink, false).unwrap();
    assert_eq!(
        summary,
        ReplaySummary {
            ticks: 6,
            frames: 5,
            aborted: 1,
            no_fix: 1,
        }
    );

    let out = String::from_utf8(sink.into_inner()).unwrap();
    let frames: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(frames.len(), 5);

    // first tick has no fix: only the north marker
    let lit = frames[0]["pixels"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| **p != serde_json::json!([0, 0, 0]))
        .count();
    assert_eq!(lit, 1);

    assert_eq!(frames[0]["brightness"], 0.6);
    assert_eq!(frames[4]["brightness"], 1.0);

    let home = replay.renderer().home().home().unwrap();
    assert_eq!(home.position, GeoPoint::new(51.470, -0.450));
    assert!(home.vector.unwrap().distance_km > 2.0);

    let traffic = replay.traffic().lock().unwrap();
    assert_eq!(traffic.len(), 1);
    assert!(traffic["4ca2b1"].distance_km().is_some());
}
