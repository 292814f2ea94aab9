//! Binary replay layout. All integers little-endian.
//!
//! ```text
//! i64  seed
//! i64  starting_level, max_resets, lock_delay, base_gravity, gravity_increase
//! i8   objective tag
//! ...  objective payload (shape selected by the tag)
//! i64  action count
//! count x { i8 action code, i64 frame }
//! ```

use tracing::debug;

use termblocks_engine::ObjectiveSettings;
use termblocks_types::{Action, GlobalSettings, ObjectiveId};

use crate::error::ReplayError;
use crate::record::{ReplayAction, ReplayRecord};

const HEADER_LEN: usize = 8 * 6 + 1;
const ACTION_LEN: usize = 1 + 8;

pub fn encode(record: &ReplayRecord) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + 17 + record.actions.len() * ACTION_LEN);

    write_i64(&mut out, record.seed);
    let s = &record.settings;
    for value in [
        s.starting_level,
        s.max_resets,
        s.lock_delay,
        s.base_gravity,
        s.gravity_increase,
    ] {
        write_i64(&mut out, value);
    }

    out.push(record.objective.id().tag() as u8);
    match record.objective {
        ObjectiveSettings::LineClear { lines } => write_i64(&mut out, lines),
        ObjectiveSettings::Survival { garbage_interval } => write_i64(&mut out, garbage_interval),
        ObjectiveSettings::Endless => {}
        ObjectiveSettings::Cheese { garbage, endless } => {
            write_i64(&mut out, garbage);
            out.push(endless as u8);
        }
        ObjectiveSettings::ScoreAttack { duration_secs } => write_i64(&mut out, duration_secs),
    }

    write_i64(&mut out, record.actions.len() as i64);
    for a in &record.actions {
        out.push(a.action.code() as u8);
        write_i64(&mut out, a.frame);
    }

    debug!(
        bytes = out.len(),
        actions = record.actions.len(),
        "replay encoded"
    );
    out
}

pub fn decode(bytes: &[u8]) -> Result<ReplayRecord, ReplayError> {
    let mut r = Reader::new(bytes);

    let seed = r.read_i64()?;
    let settings = GlobalSettings {
        starting_level: r.read_i64()?,
        max_resets: r.read_i64()?,
        lock_delay: r.read_i64()?,
        base_gravity: r.read_i64()?,
        gravity_increase: r.read_i64()?,
    };

    let tag = r.read_i8()?;
    let objective = match ObjectiveId::from_tag(tag) {
        Some(ObjectiveId::LineClear) => ObjectiveSettings::LineClear {
            lines: r.read_i64()?,
        },
        Some(ObjectiveId::Survival) => ObjectiveSettings::Survival {
            garbage_interval: r.read_i64()?,
        },
        Some(ObjectiveId::Endless) => ObjectiveSettings::Endless,
        Some(ObjectiveId::Cheese) => ObjectiveSettings::Cheese {
            garbage: r.read_i64()?,
            endless: r.read_i8()? != 0,
        },
        Some(ObjectiveId::ScoreAttack) => ObjectiveSettings::ScoreAttack {
            duration_secs: r.read_i64()?,
        },
        None => return Err(ReplayError::UnknownObjective(tag)),
    };

    let count = r.read_i64()?;
    if count < 0 {
        return Err(ReplayError::NegativeActionCount(count));
    }
    let count = count as usize;

    // Bound the allocation by what the input can actually hold.
    let mut actions = Vec::with_capacity(count.min(r.remaining() / ACTION_LEN));
    let mut previous = i64::MIN;
    for index in 0..count {
        let code = r.read_i8()?;
        let frame = r.read_i64()?;
        let action = Action::from_code(code).ok_or(ReplayError::UnknownAction { index, code })?;
        if frame < previous {
            return Err(ReplayError::DecreasingFrame {
                index,
                frame,
                previous,
            });
        }
        previous = frame;
        actions.push(ReplayAction { action, frame });
    }

    if r.remaining() > 0 {
        return Err(ReplayError::TrailingBytes(r.remaining()));
    }

    debug!(seed, objective = %objective, actions = actions.len(), "replay decoded");
    Ok(ReplayRecord {
        seed,
        settings,
        objective,
        actions,
    })
}

fn write_i64(out: &mut Vec<u8>, value: i64) {
    out.extend_from_slice(&value.to_le_bytes());
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], ReplayError> {
        let available = self.remaining();
        if available < N {
            return Err(ReplayError::Truncated {
                offset: self.pos,
                needed: N,
                available,
            });
        }
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.bytes[self.pos..self.pos + N]);
        self.pos += N;
        Ok(buf)
    }

    fn read_i64(&mut self) -> Result<i64, ReplayError> {
        Ok(i64::from_le_bytes(self.take::<8>()?))
    }

    fn read_i8(&mut self) -> Result<i8, ReplayError> {
        Ok(i8::from_le_bytes(self.take::<1>()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(objective: ObjectiveSettings) -> ReplayRecord {
        let mut record = ReplayRecord::new(-42, GlobalSettings::default(), objective);
        record.push(Action::MoveLeft, 0);
        record.push(Action::RotateCcw, 0);
        record.push(Action::HardDrop, 17);
        record.push(Action::SwapHoldPiece, 400);
        record
    }

    #[test]
    fn test_round_trip_every_objective() {
        for objective in [
            ObjectiveSettings::LineClear { lines: 40 },
            ObjectiveSettings::Survival {
                garbage_interval: 300,
            },
            ObjectiveSettings::Endless,
            ObjectiveSettings::Cheese {
                garbage: 18,
                endless: true,
            },
            ObjectiveSettings::ScoreAttack { duration_secs: 120 },
        ] {
            let record = sample(objective);
            assert_eq!(decode(&encode(&record)).unwrap(), record);
        }
    }

    #[test]
    fn test_layout() {
        let record = sample(ObjectiveSettings::Endless);
        let bytes = encode(&record);
        assert_eq!(bytes.len(), HEADER_LEN + 8 + 4 * ACTION_LEN);
        assert_eq!(&bytes[..8], &(-42i64).to_le_bytes());
        assert_eq!(bytes[48], ObjectiveId::Endless.tag() as u8);
        assert_eq!(&bytes[49..57], &4i64.to_le_bytes());
        assert_eq!(bytes[57], Action::MoveLeft.code() as u8);
    }

    #[test]
    fn test_empty_input_is_truncated() {
        assert!(matches!(
            decode(&[]),
            Err(ReplayError::Truncated {
                offset: 0,
                needed: 8,
                ..
            })
        ));
    }

    #[test]
    fn test_cut_short_is_truncated() {
        let bytes = encode(&sample(ObjectiveSettings::LineClear { lines: 40 }));
        for len in [10, HEADER_LEN, bytes.len() - 1] {
            assert!(matches!(
                decode(&bytes[..len]),
                Err(ReplayError::Truncated { .. })
            ));
        }
    }

    #[test]
    fn test_unknown_objective_tag() {
        let mut bytes = encode(&sample(ObjectiveSettings::Endless));
        bytes[48] = 9;
        assert!(matches!(
            decode(&bytes),
            Err(ReplayError::UnknownObjective(9))
        ));
    }

    #[test]
    fn test_unknown_action_code() {
        let mut bytes = encode(&sample(ObjectiveSettings::Endless));
        bytes[57 + ACTION_LEN] = 13;
        assert!(matches!(
            decode(&bytes),
            Err(ReplayError::UnknownAction { index: 1, code: 13 })
        ));
    }

    #[test]
    fn test_negative_count() {
        let mut bytes = encode(&ReplayRecord::new(
            1,
            GlobalSettings::default(),
            ObjectiveSettings::Endless,
        ));
        let len = bytes.len();
        bytes[len - 8..].copy_from_slice(&(-1i64).to_le_bytes());
        assert!(matches!(
            decode(&bytes),
            Err(ReplayError::NegativeActionCount(-1))
        ));
    }

    #[test]
    fn test_decreasing_frames_rejected() {
        let mut bytes = encode(&sample(ObjectiveSettings::Endless));
        // Rewrite the third action's frame (17) to come before the second (0).
        let at = 57 + 2 * ACTION_LEN + 1;
        bytes[at..at + 8].copy_from_slice(&(-5i64).to_le_bytes());
        assert!(matches!(
            decode(&bytes),
            Err(ReplayError::DecreasingFrame {
                index: 2,
                frame: -5,
                previous: 0
            })
        ));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = encode(&sample(ObjectiveSettings::Endless));
        bytes.extend_from_slice(&[0, 0, 0]);
        assert!(matches!(decode(&bytes), Err(ReplayError::TrailingBytes(3))));
    }
}
