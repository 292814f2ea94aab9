use tracing::debug;

use termblocks_engine::Session;
use termblocks_types::Action;

use crate::record::ReplayRecord;

/// Records the gameplay actions a session accepts, stamped with the field
/// frame they were applied on.
#[derive(Debug)]
pub struct Recorder {
    record: ReplayRecord,
}

impl Recorder {
    pub fn new(session: &Session) -> Self {
        Self {
            record: ReplayRecord::from_config(session.config()),
        }
    }

    /// Forward `action` to the session and record it if it took effect.
    ///
    /// A `Reset` starts a fresh record for the new seed.
    pub fn apply(&mut self, session: &mut Session, action: Action) -> bool {
        let frame = session.field().frame_count();
        let applied = session.handle_action(action);
        if !applied {
            return false;
        }
        if action == Action::Reset {
            debug!(
                discarded = self.record.actions.len(),
                "recording restarted after reset"
            );
            self.record = ReplayRecord::from_config(session.config());
        } else if action.is_gameplay() {
            self.record.push(action, frame);
        }
        true
    }

    pub fn record(&self) -> &ReplayRecord {
        &self.record
    }

    pub fn into_record(self) -> ReplayRecord {
        self.record
    }
}
