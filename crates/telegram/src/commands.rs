/// Follow-up actions an admin can send back from a lead notification.
/// The commands are keyed by the requester id embedded in the rendered
/// affordances.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminCommand {
    Answer { user_id: i64, reply: Option<String> },
    Close { user_id: i64 },
}

impl AdminCommand {
    /// Parses an admin-chat message. Returns `None` for anything that is
    /// not one of the two known commands; trailing text after
    /// `/answer_<id>` becomes the reply to forward.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let body = trimmed.strip_prefix('/')?;
        let (verb, tail) = match body.split_once(char::is_whitespace) {
            Some((verb, tail)) => (verb, tail.trim()),
            None => (body, ""),
        };

        if let Some(id) = parse_keyed_verb(verb, "answer_") {
            let reply = if tail.is_empty() { None } else { Some(tail.to_string()) };
            return Some(Self::Answer { user_id: id, reply });
        }
        if let Some(id) = parse_keyed_verb(verb, "close_") {
            return Some(Self::Close { user_id: id });
        }
        None
    }

    pub fn user_id(&self) -> i64 {
        match self {
            Self::Answer { user_id, .. } | Self::Close { user_id } => *user_id,
        }
    }
}

fn parse_keyed_verb(verb: &str, prefix: &str) -> Option<i64> {
    verb.strip_prefix(prefix)?.parse().ok()
}
