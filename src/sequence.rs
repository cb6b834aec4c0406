use serde::{Deserialize, Serialize};


// Tags every request so that responses racing each other can be told apart.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RequestSeq(u64);

impl RequestSeq {
    pub fn value(self) -> u64 { self.0 }
}

// What to do with a response that arrives after a response to a newer request was applied.
//
// Responses carry changes, not snapshots: `change_turn` toggles and `remove_tile` removes. Those
// always apply, whatever the policy, or the client would fall out of step with the server.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum ResponseOrdering {
    // Apply responses in whatever order they complete.
    AsReceived,
    // Skip the snapshot commands (`link_tiles`, `set_active_player`) of responses older than the
    // newest applied one, so that an old clickable set does not overwrite a newer one.
    #[default]
    DropStale,
}

#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ResponseVerdict {
    Apply,
    ApplyChangesOnly,
}

#[derive(Clone, Debug)]
pub struct RequestSequencer {
    ordering: ResponseOrdering,
    next: u64,
    latest_applied: Option<RequestSeq>,
}

impl RequestSequencer {
    pub fn new(ordering: ResponseOrdering) -> Self {
        RequestSequencer { ordering, next: 0, latest_applied: None }
    }

    pub fn latest_applied(&self) -> Option<RequestSeq> { self.latest_applied }

    pub fn issue(&mut self) -> RequestSeq {
        let seq = RequestSeq(self.next);
        self.next += 1;
        seq
    }

    pub fn accept(&mut self, seq: RequestSeq) -> ResponseVerdict {
        let stale = self.latest_applied.is_some_and(|latest| seq < latest);
        if stale && self.ordering == ResponseOrdering::DropStale {
            return ResponseVerdict::ApplyChangesOnly;
        }
        self.latest_applied = self.latest_applied.max(Some(seq));
        ResponseVerdict::Apply
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_order_responses_apply() {
        let mut seq = RequestSequencer::new(ResponseOrdering::DropStale);
        let a = seq.issue();
        let b = seq.issue();
        assert_eq!(seq.accept(a), ResponseVerdict::Apply);
        assert_eq!(seq.accept(b), ResponseVerdict::Apply);
    }

    #[test]
    fn stale_response_keeps_only_changes() {
        let mut seq = RequestSequencer::new(ResponseOrdering::DropStale);
        let a = seq.issue();
        let b = seq.issue();
        assert_eq!(seq.accept(b), ResponseVerdict::Apply);
        assert_eq!(seq.accept(a), ResponseVerdict::ApplyChangesOnly);
        assert_eq!(seq.latest_applied(), Some(b));
    }

    #[test]
    fn as_received_applies_everything() {
        let mut seq = RequestSequencer::new(ResponseOrdering::AsReceived);
        let a = seq.issue();
        let b = seq.issue();
        assert_eq!(seq.accept(b), ResponseVerdict::Apply);
        assert_eq!(seq.accept(a), ResponseVerdict::Apply);
        assert_eq!(seq.latest_applied(), Some(b));
    }
}
