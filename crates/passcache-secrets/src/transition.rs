//! Record lifecycle.
//!
//! | current         | salt required | action      |
//! |-----------------|---------------|-------------|
//! | absent          | either        | `Create`    |
//! | unkeyed         | yes           | `AddSalt`   |
//! | salted          | no            | `StripSalt` |
//! | unkeyed/salted  | matches       | `Keep`      |

use passcache_types::RecordState;

/// What has to happen to bring a record in line with a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Generate and publish a new record
    Create,
    /// Rewrite the record with a fresh salt
    AddSalt,
    /// Rewrite the record without its salt
    StripSalt,
    /// Leave the record alone
    Keep,
}

/// Decide the action for a record in `current` state.
pub fn next_action(current: Option<RecordState>, salt_required: bool) -> Action {
    match (current, salt_required) {
        (None, _) => Action::Create,
        (Some(RecordState::Unkeyed), true) => Action::AddSalt,
        (Some(RecordState::Salted), false) => Action::StripSalt,
        (Some(RecordState::Salted), true) | (Some(RecordState::Unkeyed), false) => Action::Keep,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        assert_eq!(next_action(None, false), Action::Create);
        assert_eq!(next_action(None, true), Action::Create);
        assert_eq!(next_action(Some(RecordState::Unkeyed), true), Action::AddSalt);
        assert_eq!(next_action(Some(RecordState::Salted), false), Action::StripSalt);
        assert_eq!(next_action(Some(RecordState::Salted), true), Action::Keep);
        assert_eq!(next_action(Some(RecordState::Unkeyed), false), Action::Keep);
    }
}
