use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use relay_bridge::{layer::OutboundMessage, prefix::IdentityPrefix, ILayer};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinRecord {
    pub name: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub names: Vec<String>,
}

#[derive(Debug, Default)]
pub struct LayerState {
    pub registered: bool,
    pub prefix: Option<IdentityPrefix>,
    pub seeded: usize,
    pub joins: Vec<JoinRecord>,
    pub renames: Vec<(String, String, String)>,
    pub messages: Vec<OutboundMessage>,
    pub fail_join: bool,
}

/// Records every notification it is given
#[derive(Debug, Default)]
pub struct RecordingLayer {
    pub state: Mutex<LayerState>,
}

impl RecordingLayer {
    pub fn set_registered(&self) {
        self.state.lock().registered = true;
    }

    pub fn fail_joins(&self) {
        self.state.lock().fail_join = true;
    }

    pub fn joins(&self) -> Vec<JoinRecord> {
        self.state.lock().joins.clone()
    }

    pub fn renames(&self) -> Vec<(String, String, String)> {
        self.state.lock().renames.clone()
    }

    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.state.lock().messages.clone()
    }

    pub fn message_count(&self) -> usize {
        self.state.lock().messages.len()
    }

    /// The first line of each message delivered so far
    pub fn first_lines(&self) -> Vec<String> {
        self.state
            .lock()
            .messages
            .iter()
            .map(|m| m.lines.first().cloned().unwrap_or_default())
            .collect()
    }
}

impl ILayer for RecordingLayer {
    fn set_client_prefix(&self, prefix: IdentityPrefix) {
        self.state.lock().prefix = Some(prefix);
    }

    fn is_registered(&self) -> bool {
        self.state.lock().registered
    }

    fn in_channel(&self, name: &str) -> bool {
        self.state.lock().joins.iter().any(|j| j.name == name)
    }

    fn seed_state(&self) -> anyhow::Result<()> {
        self.state.lock().seeded += 1;
        Ok(())
    }

    fn join(&self, name: &str, topic: &str, created_at: DateTime<Utc>, names: &[String]) -> anyhow::Result<()> {
        let mut state = self.state.lock();
        if state.fail_join {
            anyhow::bail!("connection closed");
        }
        state.joins.push(JoinRecord {
            name: name.to_owned(),
            topic: topic.to_owned(),
            created_at,
            names: names.to_vec(),
        });
        Ok(())
    }

    fn user_renamed(&self, room: &str, old: &str, new: &str) -> anyhow::Result<()> {
        self.state
            .lock()
            .renames
            .push((room.to_owned(), old.to_owned(), new.to_owned()));
        Ok(())
    }

    fn send_message(&self, message: &OutboundMessage) -> anyhow::Result<()> {
        self.state.lock().messages.push(message.clone());
        Ok(())
    }
}
