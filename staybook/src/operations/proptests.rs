//! Property-based tests for the operations module.
//!
//! These exercise plans against an in-memory store, so the case counts are
//! kept lower than the pure calculator suites.

use proptest::prelude::*;

use crate::cancellation::CancellationPolicy;
use crate::collaborators::{PaymentCollaborator, RefundRequest, ReservationStore};
use crate::database::test_util::{create_test_database, d, new_reservation, ts};
use crate::error::Error;
use crate::lifecycle::{Actor, ActorRole, LifecycleEvent};
use crate::money::Money;
use crate::reservation::{ReservationStatus, UserId};

use super::{
    CancelOptions, CancelPlan, PlanAction, PlanExecutor, SweepPlan, TransitionOptions,
    TransitionPlan,
};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        .. ProptestConfig::default()
    })]

    // A plan either refunds the policy amount as it cancels or fails
    // without touching the reservation.
    #[test]
    fn cancel_refunds_policy_amount_or_changes_nothing(
        total in 0u64..10_000_000,
        day in 1u32..=20,
        hour in 0u32..24,
    ) {
        let db = create_test_database();
        let reservation = db
            .create(&new_reservation("alice", "101", d(20), d(22), total))
            .unwrap();
        let policy = CancellationPolicy::default();
        let now = ts(day, hour);
        let actor = Actor::new(UserId::new("alice").unwrap(), ActorRole::Guest);

        let decision = policy.evaluate(d(20), now, ReservationStatus::Pending);
        let planned = CancelPlan::new(CancelOptions::new(reservation.id(), actor, now), &policy)
            .build_plan(&db);

        match planned {
            Ok(plan) => {
                prop_assert!(decision.eligible);
                let expected = decision.refund_amount(Money::new(total));
                prop_assert!(expected <= Money::new(total));

                prop_assert_eq!(plan.len(), 1);
                let refund: Option<RefundRequest> = match &plan.actions[0] {
                    PlanAction::Cancel { refund, .. } => *refund,
                    other => return Err(TestCaseError::fail(format!("unexpected {other:?}"))),
                };
                if expected.is_zero() {
                    prop_assert!(refund.is_none());
                } else {
                    prop_assert_eq!(refund.map(|r| r.amount), Some(expected));
                }

                PlanExecutor::new(&db, &db).execute(&plan).unwrap();
                let stored = db.get(reservation.id()).unwrap().unwrap();
                prop_assert_eq!(stored.status(), ReservationStatus::Cancelled);
                let ledger = db.refunds_for(reservation.id()).unwrap();
                prop_assert_eq!(ledger.len(), usize::from(refund.is_some()));
            }
            Err(err) => {
                prop_assert!(!decision.eligible);
                let not_eligible = matches!(err, Error::CancellationNotEligible { .. });
                prop_assert!(not_eligible);
                let stored = db.get(reservation.id()).unwrap().unwrap();
                prop_assert_eq!(stored.status(), ReservationStatus::Pending);
                prop_assert!(db.refunds_for(reservation.id()).unwrap().is_empty());
            }
        }
    }

    // The sweep plans exactly the confirmed stays whose check-out has come.
    #[test]
    fn sweep_selects_due_stays(
        stays in prop::collection::vec((1u32..25, 1u32..5), 1..8),
        today in 1u32..30,
    ) {
        let db = create_test_database();
        let mut due = 0;
        for (index, (check_in, nights)) in stays.iter().enumerate() {
            let check_out = check_in + nights;
            let room = format!("room-{index}");
            let created = db
                .create(&new_reservation("alice", &room, d(*check_in), d(check_out), 100_000))
                .unwrap();
            let plan = TransitionPlan::new(TransitionOptions::new(
                created.id(),
                LifecycleEvent::Confirm,
                Actor::system(),
                ts(1, 0),
            ))
            .build_plan(&db)
            .unwrap();
            PlanExecutor::new(&db, &db).execute(&plan).unwrap();
            if check_out <= today {
                due += 1;
            }
        }

        let plan = SweepPlan::new(ts(today, 12)).build_plan(&db).unwrap();
        prop_assert_eq!(plan.len(), due);
    }
}
