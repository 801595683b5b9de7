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

//! Property tests comparing `IntensitySegments` against a dense per-position model.

use intensity_segments::{Command, IntensityError, IntensitySegments};
use proptest::prelude::*;

/// Every generated range lies inside `[-LIMIT, LIMIT)`.
const LIMIT: i64 = 64;

/// Dense reference: one intensity per position in `[-LIMIT, LIMIT)`, 0 everywhere else.
struct Model {
    values: Vec<i64>,
}

impl Model {
    fn new() -> Self {
        Model {
            values: vec![0; (2 * LIMIT) as usize],
        }
    }

    fn slots(&mut self, from: i64, to: i64) -> &mut [i64] {
        &mut self.values[(from + LIMIT) as usize..(to + LIMIT) as usize]
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Add { from, to, amount } => {
                self.slots(from, to).iter_mut().for_each(|v| *v += amount);
            }
            Command::Set { from, to, amount } => self.slots(from, to).fill(amount),
            Command::Print => {}
        }
    }

    fn value_at(&self, position: i64) -> i64 {
        if (-LIMIT..LIMIT).contains(&position) {
            self.values[(position + LIMIT) as usize]
        } else {
            0
        }
    }
}

fn range_strategy() -> impl Strategy<Value = (i64, i64)> {
    (-LIMIT..LIMIT - 1)
        .prop_flat_map(|from| (Just(from), (from + 1)..=LIMIT.min(from + 40)))
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        3 => (range_strategy(), -4i64..=4)
            .prop_map(|((from, to), amount)| Command::Add { from, to, amount }),
        2 => (range_strategy(), -4i64..=4)
            .prop_map(|((from, to), amount)| Command::Set { from, to, amount }),
    ]
}

fn command_sequence_strategy() -> impl Strategy<Value = Vec<Command>> {
    prop::collection::vec(command_strategy(), 0..40)
}

fn build(commands: &[Command]) -> IntensitySegments {
    let mut segments = IntensitySegments::new();
    for command in commands {
        command.apply(&mut segments).unwrap();
    }
    segments
}

fn assert_minimal(segments: &IntensitySegments) -> Result<(), TestCaseError> {
    for pair in segments.breakpoints().windows(2) {
        prop_assert!(pair[0].0 < pair[1].0, "positions not increasing in {}", segments);
        prop_assert_ne!(pair[0].1, pair[1].1, "redundant breakpoint in {}", segments);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn breakpoints_stay_sorted_and_minimal(commands in command_sequence_strategy()) {
        let mut segments = IntensitySegments::new();
        for command in &commands {
            command.apply(&mut segments).unwrap();
            assert_minimal(&segments)?;
        }
    }

    #[test]
    fn lookups_match_dense_model(commands in command_sequence_strategy()) {
        let mut segments = IntensitySegments::new();
        let mut model = Model::new();
        for command in &commands {
            command.apply(&mut segments).unwrap();
            model.apply(*command);
        }
        for position in -LIMIT - 4..LIMIT + 4 {
            prop_assert_eq!(segments.value_at(position), model.value_at(position), "at {}", position);
        }
        prop_assert_eq!(segments.value_at(i64::MIN), 0);
        prop_assert_eq!(segments.value_at(i64::MAX), 0);
    }

    #[test]
    fn set_twice_equals_set_once(
        commands in command_sequence_strategy(),
        (from, to) in range_strategy(),
        amount in -4i64..=4,
    ) {
        let mut segments = build(&commands);
        segments.set(from..to, amount).unwrap();
        let once = segments.to_string();
        segments.set(from..to, amount).unwrap();
        prop_assert_eq!(segments.to_string(), once);
    }

    #[test]
    fn adding_zero_changes_nothing(
        commands in command_sequence_strategy(),
        (from, to) in range_strategy(),
    ) {
        let mut segments = build(&commands);
        let before = segments.to_string();
        segments.add(from..to, 0).unwrap();
        prop_assert_eq!(segments.to_string(), before);
    }

    #[test]
    fn rejected_ranges_change_nothing(
        commands in command_sequence_strategy(),
        (from, to) in range_strategy(),
        amount in -4i64..=4,
    ) {
        let mut segments = build(&commands);
        let before = segments.clone();
        prop_assert_eq!(
            segments.add(to..from, amount),
            Err(IntensityError::InvalidRange { from: to, to: from })
        );
        prop_assert_eq!(
            segments.set(from..from, amount),
            Err(IntensityError::InvalidRange { from, to: from })
        );
        prop_assert_eq!(segments, before);
    }

    #[test]
    fn snapshots_parse_back(commands in command_sequence_strategy()) {
        let segments = build(&commands);
        let snapshot = segments.to_string();
        let restored: IntensitySegments = snapshot.parse().unwrap();
        prop_assert_eq!(restored, segments);
    }
}

#[test]
fn empty_segments_serialize_as_empty_list() {
    let segments = IntensitySegments::new();
    assert_eq!(segments.to_string(), "[]");
    assert_eq!(serde_json::to_string(&segments).unwrap(), "[]");
}
