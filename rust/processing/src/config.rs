// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch configuration loaded from environment variables.

use roofmesh_geometry::{MeshOptions, RidgeValidation, DEFAULT_SNAP_THRESHOLD};

/// Batch processing configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Number of worker threads for parallel meshing.
    pub worker_threads: usize,
    /// Distance below which ridge points are merged.
    pub snap_threshold: f64,
    /// How strictly implausible ridge geometry is rejected.
    pub ridge_validation: RidgeValidation,
    /// Emit filler geometry (gable ends, outline walls) next to the roof.
    pub special_parts: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Missing or unparsable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            worker_threads: lookup("ROOFMESH_WORKER_THREADS")
                .unwrap_or_else(|| num_cpus::get().to_string())
                .parse()
                .ok()
                .filter(|&n: &usize| n > 0)
                .unwrap_or_else(num_cpus::get),
            snap_threshold: lookup("ROOFMESH_SNAP_THRESHOLD")
                .unwrap_or_else(|| DEFAULT_SNAP_THRESHOLD.to_string())
                .parse()
                .ok()
                .filter(|&t: &f64| t.is_finite() && t >= 0.0)
                .unwrap_or(DEFAULT_SNAP_THRESHOLD),
            ridge_validation: lookup("ROOFMESH_RIDGE_VALIDATION")
                .unwrap_or_else(|| "strict".into())
                .parse()
                .unwrap_or_default(),
            special_parts: lookup("ROOFMESH_SPECIAL_PARTS")
                .unwrap_or_else(|| "true".into())
                .parse()
                .unwrap_or(true),
        }
    }

    /// Options handed to the roof router.
    pub fn mesh_options(&self) -> MeshOptions {
        MeshOptions::new()
            .with_snap_threshold(self.snap_threshold)
            .with_ridge_validation(self.ridge_validation)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
