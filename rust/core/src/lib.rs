// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # roofmesh core
//!
//! Data model shared by the roof mesh builders and their callers:
//!
//! - [`GeometryBuffer`]: flat polygon / triangle-mesh container
//! - [`RoofShape`]: the closed set of roof classifiers with their cross-section profiles
//! - [`RoofRequest`]: heights, orientation and direction for one building part
//!
//! ```rust
//! use roofmesh_core::{GeometryBuffer, RoofRequest, RoofShape};
//!
//! let footprint = GeometryBuffer::from_rings(
//!     &[[0.0, 0.0], [20.0, 0.0], [20.0, 15.0], [0.0, 15.0]],
//!     &[],
//! );
//! let shape: RoofShape = "gabled".parse().unwrap();
//! let request = RoofRequest::new(shape, 0.0, 5.0);
//!
//! assert!(footprint.validate().is_ok());
//! assert!(request.validate().is_ok());
//! ```

pub mod buffer;
pub mod error;
pub mod request;
pub mod roof;

pub use buffer::{GeometryBuffer, GeometryType, INDEX_SENTINEL};
pub use error::{Error, Result};
pub use request::{parse_direction, parse_orientation, RoofRequest};
pub use roof::{ProfilePoint, RoofFamily, RoofShape};
