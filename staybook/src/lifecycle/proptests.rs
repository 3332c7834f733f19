//! Property-based tests for the lifecycle table.

use super::{allowed_events, can_transition, next_status, ActorRole, EventKind, LifecycleEvent};
use crate::{Error, ReservationStatus};
use proptest::prelude::*;

fn status_strategy() -> impl Strategy<Value = ReservationStatus> {
    prop::sample::select(ReservationStatus::ALL.to_vec())
}

fn kind_strategy() -> impl Strategy<Value = EventKind> {
    prop::sample::select(EventKind::ALL.to_vec())
}

fn role_strategy() -> impl Strategy<Value = ActorRole> {
    prop::sample::select(ActorRole::ALL.to_vec())
}

fn event_for(kind: EventKind) -> LifecycleEvent {
    match kind {
        EventKind::Confirm => LifecycleEvent::Confirm,
        EventKind::Reject => LifecycleEvent::Reject {
            reason: "overbooked".to_string(),
        },
        EventKind::Cancel => LifecycleEvent::Cancel,
        EventKind::Complete => LifecycleEvent::Complete,
        EventKind::MarkNoShow => LifecycleEvent::MarkNoShow,
    }
}

proptest! {
    // Success exactly when the table allows it
    #[test]
    fn outcome_matches_table(
        from in status_strategy(),
        kind in kind_strategy(),
        role in role_strategy(),
    ) {
        let result = next_status(from, &event_for(kind), role);
        prop_assert_eq!(result.is_ok(), can_transition(from, kind, role));
        prop_assert_eq!(
            can_transition(from, kind, role),
            allowed_events(from, role).contains(&kind)
        );
    }

    // Closed states accept nothing, from anyone
    #[test]
    fn terminal_states_are_final(
        from in status_strategy(),
        kind in kind_strategy(),
        role in role_strategy(),
    ) {
        prop_assume!(from.is_terminal());
        let err = next_status(from, &event_for(kind), role).unwrap_err();
        let is_invalid_transition = matches!(err, Error::InvalidTransition { .. });
        prop_assert!(is_invalid_transition);
    }

    // Forbidden only appears when some role could have done it
    #[test]
    fn forbidden_implies_transition_exists(
        from in status_strategy(),
        kind in kind_strategy(),
        role in role_strategy(),
    ) {
        if let Err(Error::Forbidden { .. }) = next_status(from, &event_for(kind), role) {
            let someone_can = ActorRole::ALL
                .iter()
                .any(|other| can_transition(from, kind, *other));
            prop_assert!(someone_can);
        }
    }

    // Any successful transition leaves the active states or moves forward
    #[test]
    fn transitions_move_forward(
        from in status_strategy(),
        kind in kind_strategy(),
        role in role_strategy(),
    ) {
        if let Ok(to) = next_status(from, &event_for(kind), role) {
            prop_assert_ne!(to, from);
            prop_assert_ne!(to, ReservationStatus::Pending);
        }
    }
}
