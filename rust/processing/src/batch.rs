// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parallel roof meshing of building part batches.

use crate::config::Config;
use crate::error::Result;
use rayon::prelude::*;
use roofmesh_core::{parse_direction, parse_orientation, GeometryBuffer, RoofRequest, RoofShape};
use roofmesh_geometry::{BuilderKind, Fallback, RoofRouter};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One building part as delivered by the map data source.
///
/// Roof attributes are the raw tag strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingPart {
    pub id: String,
    /// Outer ring, x/y pairs.
    pub outer: Vec<[f32; 2]>,
    #[serde(default)]
    pub holes: Vec<Vec<[f32; 2]>>,
    #[serde(default)]
    pub roof_shape: Option<String>,
    pub min_height: f32,
    pub max_height: f32,
    #[serde(default)]
    pub roof_orientation: Option<String>,
    #[serde(default)]
    pub roof_direction: Option<String>,
}

impl BuildingPart {
    /// Footprint polygon of this part.
    pub fn footprint(&self) -> GeometryBuffer {
        GeometryBuffer::from_rings(&self.outer, &self.holes)
    }

    /// Roof request from the tag strings.
    ///
    /// Unknown shapes degrade to flat and unknown directions to the default,
    /// both with a warning.
    pub fn request(&self) -> RoofRequest {
        let shape = match self.roof_shape.as_deref() {
            None => RoofShape::Flat,
            Some(tag) => tag.parse().unwrap_or_else(|err| {
                tracing::warn!(part = %self.id, error = %err, "Falling back to flat roof");
                RoofShape::Flat
            }),
        };

        let mut request = RoofRequest::new(shape, self.min_height, self.max_height)
            .with_orientation_across(self.roof_orientation.as_deref().is_some_and(parse_orientation));

        if let Some(tag) = self.roof_direction.as_deref() {
            match parse_direction(tag) {
                Ok(degrees) => request = request.with_direction(degrees),
                Err(err) => {
                    tracing::warn!(part = %self.id, error = %err, "Ignoring roof direction")
                }
            }
        }
        request
    }
}

/// A successfully meshed part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshedPart {
    pub id: String,
    pub shape: RoofShape,
    /// Builder that produced the roof.
    pub builder: BuilderKind,
    /// Builders that declined first, in order.
    pub fallbacks: Vec<(BuilderKind, Fallback)>,
    pub roof: GeometryBuffer,
    pub special: Option<GeometryBuffer>,
}

impl MeshedPart {
    /// Roof and filler triangles together.
    pub fn triangle_count(&self) -> usize {
        self.roof.triangle_count() + self.special.as_ref().map_or(0, |s| s.triangle_count())
    }
}

/// A part no builder could mesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedPart {
    pub id: String,
    pub reason: String,
}

/// Batch statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchStats {
    /// Number of parts in the input.
    pub total_parts: usize,
    pub meshed_parts: usize,
    pub skipped_parts: usize,
    /// Roof and filler triangles over all meshed parts.
    pub total_triangles: usize,
    /// Declined builder attempts over all meshed parts.
    pub total_fallbacks: usize,
    /// Meshed parts per successful builder.
    pub builders: FxHashMap<BuilderKind, usize>,
    /// Wall time of the batch (ms).
    pub processing_time_ms: u64,
}

/// Result of meshing a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResult {
    /// Meshed parts, in input order.
    pub parts: Vec<MeshedPart>,
    /// Skipped parts, in input order.
    pub skipped: Vec<SkippedPart>,
    pub stats: BatchStats,
}

enum PartOutcome {
    Meshed(MeshedPart),
    Skipped(SkippedPart),
}

/// Mesh a single part with a shared router.
fn mesh_part(router: &RoofRouter, part: &BuildingPart, special_parts: bool) -> PartOutcome {
    let request = part.request();
    match router.build(&part.footprint(), &request) {
        Ok(output) => PartOutcome::Meshed(MeshedPart {
            id: part.id.clone(),
            shape: request.shape,
            builder: output.builder,
            fallbacks: output.fallbacks.into_vec(),
            roof: output.roof,
            special: output.special.filter(|_| special_parts),
        }),
        Err(err) => {
            tracing::warn!(part = %part.id, error = %err, "Skipping building part");
            PartOutcome::Skipped(SkippedPart {
                id: part.id.clone(),
                reason: err.to_string(),
            })
        }
    }
}

/// Mesh all parts on a dedicated worker pool, keeping input order.
pub fn process_parts(parts: &[BuildingPart], config: &Config) -> Result<BatchResult> {
    let start = std::time::Instant::now();
    tracing::info!(
        parts = parts.len(),
        worker_threads = config.worker_threads,
        "Starting roof batch"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build()?;
    let router = RoofRouter::with_options(config.mesh_options());

    let outcomes: Vec<PartOutcome> = pool.install(|| {
        parts
            .par_iter()
            .map(|part| mesh_part(&router, part, config.special_parts))
            .collect()
    });

    let mut result = BatchResult::default();
    result.stats.total_parts = parts.len();
    for outcome in outcomes {
        match outcome {
            PartOutcome::Meshed(part) => {
                result.stats.total_triangles += part.triangle_count();
                result.stats.total_fallbacks += part.fallbacks.len();
                *result.stats.builders.entry(part.builder).or_insert(0) += 1;
                result.parts.push(part);
            }
            PartOutcome::Skipped(part) => result.skipped.push(part),
        }
    }
    result.stats.meshed_parts = result.parts.len();
    result.stats.skipped_parts = result.skipped.len();
    result.stats.processing_time_ms = start.elapsed().as_millis() as u64;

    tracing::info!(
        meshed = result.stats.meshed_parts,
        skipped = result.stats.skipped_parts,
        triangles = result.stats.total_triangles,
        fallbacks = result.stats.total_fallbacks,
        time_ms = result.stats.processing_time_ms,
        "Roof batch complete"
    );

    Ok(result)
}

/// Parse a JSON array of building parts and mesh them.
pub fn process_json(json: &str, config: &Config) -> Result<BatchResult> {
    let parts: Vec<BuildingPart> = serde_json::from_str(json)?;
    process_parts(&parts, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(id: &str, shape: Option<&str>) -> BuildingPart {
        BuildingPart {
            id: id.to_string(),
            outer: vec![[0.0, 0.0], [20.0, 0.0], [20.0, 15.0], [0.0, 15.0]],
            holes: Vec::new(),
            roof_shape: shape.map(str::to_string),
            min_height: 6.0,
            max_height: 10.0,
            roof_orientation: None,
            roof_direction: None,
        }
    }

    #[test]
    fn test_request_from_tags() {
        let mut p = part("a", Some("Half_Hipped"));
        p.roof_orientation = Some("across".into());
        p.roof_direction = Some("SE".into());
        let request = p.request();

        assert_eq!(request.shape, RoofShape::HalfHipped);
        assert!(request.orientation_across);
        assert_eq!(request.direction, Some(135.0));
    }

    #[test]
    fn test_unknown_tags_degrade() {
        let mut p = part("a", Some("zigzag"));
        p.roof_direction = Some("uphill".into());
        let request = p.request();

        assert_eq!(request.shape, RoofShape::Flat);
        assert_eq!(request.direction, None);
        assert_eq!(part("b", None).request().shape, RoofShape::Flat);
    }

    #[test]
    fn test_special_parts_can_be_disabled() {
        let router = RoofRouter::new();
        let gabled = part("g", Some("gabled"));

        let PartOutcome::Meshed(with) = mesh_part(&router, &gabled, true) else {
            panic!("gabled part should mesh");
        };
        let PartOutcome::Meshed(without) = mesh_part(&router, &gabled, false) else {
            panic!("gabled part should mesh");
        };
        assert!(with.special.is_some());
        assert!(without.special.is_none());
        assert_eq!(with.roof, without.roof);
    }
}
