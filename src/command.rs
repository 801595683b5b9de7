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

//! Line-oriented commands for driving an [`IntensitySegments`] from a script.
//!
//! Each non-empty line holds one command:
//!
//! ```text
//! # comments run to the end of the line
//! add 10 30 1
//! set 15 35 5
//! print
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::result::{IntensityError, IntensityResult};
use crate::segments::IntensitySegments;

/// A single operation against an [`IntensitySegments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Add `amount` over `[from, to)`.
    Add {
        /// Inclusive start.
        from: i64,
        /// Exclusive end.
        to: i64,
        /// Signed delta.
        amount: i64,
    },
    /// Override `[from, to)` with `amount`.
    Set {
        /// Inclusive start.
        from: i64,
        /// Exclusive end.
        to: i64,
        /// Absolute intensity.
        amount: i64,
    },
    /// Emit the current snapshot.
    Print,
}

impl Command {
    /// Applies this command to `segments`.
    ///
    /// Returns the snapshot text for [`Command::Print`] and `None` otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intensity_segments::{Command, IntensitySegments};
    ///
    /// let mut segments = IntensitySegments::new();
    /// let add: Command = "add 10 30 1".parse().unwrap();
    /// assert_eq!(add.apply(&mut segments).unwrap(), None);
    /// assert_eq!(
    ///     Command::Print.apply(&mut segments).unwrap().as_deref(),
    ///     Some("[[10,1],[30,0]]")
    /// );
    /// ```
    pub fn apply(&self, segments: &mut IntensitySegments) -> IntensityResult<Option<String>> {
        match *self {
            Command::Add { from, to, amount } => segments.add(from..to, amount).map(|()| None),
            Command::Set { from, to, amount } => segments.set(from..to, amount).map(|()| None),
            Command::Print => Ok(Some(segments.to_string())),
        }
    }
}

impl FromStr for Command {
    type Err = IntensityError;

    fn from_str(s: &str) -> IntensityResult<Self> {
        let mut tokens = s.split_whitespace();
        let name = tokens
            .next()
            .ok_or_else(|| IntensityError::parse("empty command"))?;

        let command = match name.to_ascii_lowercase().as_str() {
            "add" | "set" => {
                let mut arg = |label: &str| -> IntensityResult<i64> {
                    let token = tokens
                        .next()
                        .ok_or_else(|| IntensityError::parse(format!("{name}: missing {label}")))?;
                    token.parse().map_err(|err| {
                        IntensityError::parse(format!("{name}: invalid {label} '{token}': {err}"))
                    })
                };
                let (from, to, amount) = (arg("from")?, arg("to")?, arg("amount")?);
                if name.eq_ignore_ascii_case("add") {
                    Command::Add { from, to, amount }
                } else {
                    Command::Set { from, to, amount }
                }
            }
            "print" => Command::Print,
            _ => return Err(IntensityError::parse(format!("unknown command '{name}'"))),
        };

        if let Some(extra) = tokens.next() {
            return Err(IntensityError::parse(format!(
                "{name}: unexpected argument '{extra}'"
            )));
        }
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Add { from, to, amount } => write!(f, "add {from} {to} {amount}"),
            Command::Set { from, to, amount } => write!(f, "set {from} {to} {amount}"),
            Command::Print => f.write_str("print"),
        }
    }
}

/// Runs every command in `script` against `segments`, in order.
///
/// Blank lines and `#` comments are skipped. Returns the snapshots produced by `print`
/// commands. Execution stops at the first failing line; commands before it stay applied.
///
/// # Errors
///
/// The first parse or apply failure, tagged with its 1-based line number.
///
/// # Examples
///
/// ```rust
/// use intensity_segments::{run_script, IntensitySegments};
///
/// let mut segments = IntensitySegments::new();
/// let printed = run_script("add 10 30 1\nprint\nadd 20 40 1 # overlap\nprint", &mut segments).unwrap();
/// assert_eq!(printed, vec!["[[10,1],[30,0]]", "[[10,1],[20,2],[30,1],[40,0]]"]);
/// ```
pub fn run_script(script: &str, segments: &mut IntensitySegments) -> IntensityResult<Vec<String>> {
    let mut printed = Vec::new();
    for (idx, raw) in script.lines().enumerate() {
        let line = idx + 1;
        let text = raw.split_once('#').map_or(raw, |(code, _)| code).trim();
        if text.is_empty() {
            continue;
        }
        let command: Command = text.parse().map_err(|err: IntensityError| err.at_line(line))?;
        debug!(line, %command, "applying command");
        if let Some(snapshot) = command.apply(segments).map_err(|err| err.at_line(line))? {
            printed.push(snapshot);
        }
    }
    Ok(printed)
}
