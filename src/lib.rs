//
// Copyright 2025 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! # Intensity Segments
//!
//! A Rust library modelling a piecewise-constant integer function over the whole integer line.
//! The function is stored as a minimal, sorted set of breakpoints rather than one value per
//! position, so updates and snapshots cost the same no matter how wide the ranges are.
//!
//! ## Key Features
//!
//! - **Additive Range Updates**: Raise or lower the intensity of a half-open range with `add`
//! - **Absolute Range Updates**: Flatten a half-open range to one intensity with `set`
//! - **Minimal Representation**: Adjacent breakpoints with equal values are merged automatically
//! - **Localized Work**: Updates only touch the breakpoints in and next to the updated range
//! - **Overflow Safety**: Updates that would overflow are rejected before anything changes
//! - **Snapshots**: A compact `[[position,value],...]` text form, readable back with `parse`
//!
//! ## Usage Examples
//!
//! ```rust
//! use intensity_segments::IntensitySegments;
//!
//! let mut segments = IntensitySegments::new();
//! assert_eq!(segments.to_string(), "[]");
//!
//! segments.add(10..30, 1).unwrap();
//! assert_eq!(segments.to_string(), "[[10,1],[30,0]]");
//!
//! segments.add(20..40, 1).unwrap();
//! assert_eq!(segments.to_string(), "[[10,1],[20,2],[30,1],[40,0]]");
//!
//! segments.add(10..40, -2).unwrap();
//! assert_eq!(segments.to_string(), "[[10,-1],[20,0],[30,-1],[40,0]]");
//!
//! // Point lookups
//! assert_eq!(segments.value_at(25), 0);
//! assert_eq!(segments.value_at(35), -1);
//! assert_eq!(segments.value_at(i64::MAX), 0);
//! ```
//!
//! ## Breakpoint Semantics
//!
//! A breakpoint `[p, v]` means the intensity is `v` from `p` up to, but not including, the next
//! breakpoint. Left of the first breakpoint the intensity is 0. The last breakpoint usually
//! carries 0, closing the final segment.
//!
//! ## Snapshots
//!
//! ```rust
//! use intensity_segments::IntensitySegments;
//!
//! let segments: IntensitySegments = "[[10,-1],[15,5],[35,-1],[40,0]]".parse().unwrap();
//! assert_eq!(segments.value_at(20), 5);
//!
//! // serde produces the same text as Display
//! assert_eq!(serde_json::to_string(&segments).unwrap(), segments.to_string());
//! ```
//!
//! ## Error Handling
//!
//! Operations return `IntensityResult<T>` which can contain the following errors:
//!
//! - `IntensityError::InvalidRange`: The range is empty or reversed (`from >= to`)
//! - `IntensityError::Overflow`: An `add` would push an intensity outside `i64`
//! - `IntensityError::Malformed`: A snapshot is not sorted, not minimal, or not well formed
//! - `IntensityError::Parse` / `IntensityError::Script`: A script line failed
//!
//! A failed `add` or `set` never modifies the segments.
//!
//! ## Thread Safety
//!
//! `IntensitySegments` is a plain owned value. Mutation requires `&mut self`; wrap it in a
//! `Mutex` to share it between threads.
//!
//! ## License
//!
//! Licensed under the Apache License, Version 2.0.

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod command;
mod result;
mod segments;

pub use self::command::{Command, run_script};
pub use self::result::{IntensityError, IntensityResult};
pub use self::segments::{Breakpoints, IntensitySegments};
