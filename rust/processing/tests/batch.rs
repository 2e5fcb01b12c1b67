// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_relative_eq;
use roofmesh_geometry::BuilderKind;
use roofmesh_processing::{process_json, process_parts, BuildingPart, Config, Error};
use serde_json::json;

fn config() -> Config {
    Config {
        worker_threads: 2,
        ..Config::default()
    }
}

fn batch() -> serde_json::Value {
    json!([
        {
            "id": "house",
            "outer": [[0.0, 0.0], [20.0, 0.0], [20.0, 15.0], [0.0, 15.0]],
            "roof_shape": "hipped",
            "min_height": 6.0,
            "max_height": 10.0
        },
        {
            "id": "line",
            "outer": [[0.0, 0.0], [5.0, 0.0]],
            "roof_shape": "flat",
            "min_height": 3.0,
            "max_height": 3.0
        },
        {
            "id": "shed",
            "outer": [[0.0, 0.0], [10.0, 0.0], [10.0, 6.0], [0.0, 6.0]],
            "roof_shape": "skillion",
            "roof_direction": "S",
            "min_height": 2.0,
            "max_height": 3.0
        },
        {
            "id": "kiosk",
            "outer": [[0.0, 0.0], [4.0, 0.0], [0.0, 4.0]],
            "roof_shape": "gabled",
            "min_height": 2.0,
            "max_height": 3.0
        }
    ])
}

#[test]
fn test_batch_keeps_order_and_skips_unrenderable_parts() {
    let result = process_json(&batch().to_string(), &config()).unwrap();

    let ids: Vec<&str> = result.parts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["house", "shed", "kiosk"]);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].id, "line");

    assert_eq!(result.stats.total_parts, 4);
    assert_eq!(result.stats.meshed_parts, 3);
    assert_eq!(result.stats.skipped_parts, 1);
    assert_eq!(result.stats.builders[&BuilderKind::Ridge], 1);
    assert_eq!(result.stats.builders[&BuilderKind::Skillion], 1);
    assert_eq!(result.stats.builders[&BuilderKind::Pyramidal], 1);
}

#[test]
fn test_triangle_counts_add_up() {
    let result = process_json(&batch().to_string(), &config()).unwrap();
    let sum: usize = result.parts.iter().map(|p| p.triangle_count()).sum();

    assert_eq!(result.stats.total_triangles, sum);
    // hipped rectangle: 6, shed: 2 roof + 8 walls, kiosk pyramid: 3
    assert_eq!(sum, 6 + 10 + 3);
}

#[test]
fn test_compass_direction_tilts_the_shed() {
    let result = process_json(&batch().to_string(), &config()).unwrap();
    let shed = &result.parts[1];
    assert_eq!(shed.builder, BuilderKind::Skillion);

    // sloping down towards the south: low eave at y = 0, high one at y = 6
    for v in shed.roof.points.chunks(3) {
        let expected = if v[1] > 3.0 { 3.0 } else { 2.0 };
        assert_relative_eq!(v[2], expected, epsilon = 1e-4);
    }
}

#[test]
fn test_many_parts_in_parallel_keep_input_order() {
    let parts: Vec<BuildingPart> = (0..64)
        .map(|i| {
            let w = 10.0 + i as f32;
            BuildingPart {
                id: format!("part-{}", i),
                outer: vec![[0.0, 0.0], [w, 0.0], [w, 8.0], [0.0, 8.0]],
                holes: Vec::new(),
                roof_shape: Some(["gabled", "hipped", "dome", "mansard"][i % 4].to_string()),
                min_height: 0.0,
                max_height: 4.0,
                roof_orientation: None,
                roof_direction: None,
            }
        })
        .collect();

    let result = process_parts(&parts, &config()).unwrap();
    assert!(result.skipped.is_empty());
    for (i, part) in result.parts.iter().enumerate() {
        assert_eq!(part.id, format!("part-{}", i));
        assert!(part.roof.validate().is_ok());
    }
}

#[test]
fn test_result_serializes_to_json() {
    let result = process_json(&batch().to_string(), &config()).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["stats"]["meshed_parts"], 3);
    assert_eq!(value["parts"][0]["shape"], "hipped");
    assert_eq!(value["parts"][2]["builder"], "pyramidal");
}

#[test]
fn test_invalid_json_fails_the_batch() {
    let err = process_json("{\"id\": 1}", &config()).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}
