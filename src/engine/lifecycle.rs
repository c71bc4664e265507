//! Leave request approval workflow.
//!
//! ```text
//!            approve (can_approve)
//!   NEW ─────────────────────────────▶ ACCEPTED
//!    │ │
//!    │ └─────────────────────────────▶ DENIED
//!    │       decline (can_approve)
//!    └──▶ deleted
//!         withdraw (requester only)
//! ```
//!
//! A transition whose precondition or authorization fails is absorbed as a
//! no-op. The caller learns the [`Outcome`] for logging but the outward
//! response is the same either way.
//!
//! Writes are conditional on the request still being `NEW`, so of two
//! racing decisions only one reaches the store.

use crate::error::AppResult;
use crate::model::employee::Employee;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::model::role::Role;
use crate::store::{Decision, LeaveStore};

/// Authorization predicates evaluated against the acting employee.
pub trait Authorization {
    /// May approve or decline requests of others.
    fn can_approve(&self, actor: &Employee) -> bool;
    /// May see and administer requests of all employees.
    fn can_manage(&self, actor: &Employee) -> bool;
}

/// Default policy derived from [`Role`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePolicy;

impl Authorization for RolePolicy {
    fn can_approve(&self, actor: &Employee) -> bool {
        matches!(
            actor.role,
            Role::Supervisor | Role::HeadOfDepartment | Role::Admin
        )
    }

    fn can_manage(&self, actor: &Employee) -> bool {
        matches!(actor.role, Role::HeadOfDepartment | Role::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Withdraw,
    Decline { reason: Option<String> },
    Approve,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Withdraw => "withdraw",
            Action::Decline { .. } => "decline",
            Action::Approve => "approve",
        }
    }
}

/// What a store write must do, if anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Delete { requester_id: u64 },
    Decide(Decision),
    Ignore(Ignored),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// Already `ACCEPTED` or `DENIED`.
    NotPending,
    NotAuthorized,
    NotFound,
    /// Another decision reached the store first.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Withdrawn,
    Approved,
    Declined,
    Ignored(Ignored),
}

/// Decides the effect of `action` by `actor` on `request` without touching
/// any store.
pub fn plan<A: Authorization>(
    request: &LeaveRequest,
    actor: &Employee,
    action: &Action,
    policy: &A,
) -> Plan {
    if request.status.is_terminal() {
        return Plan::Ignore(Ignored::NotPending);
    }

    match action {
        Action::Withdraw => {
            if actor.id != request.requester_id {
                return Plan::Ignore(Ignored::NotAuthorized);
            }
            Plan::Delete {
                requester_id: request.requester_id,
            }
        }
        Action::Decline { reason } => {
            if !policy.can_approve(actor) {
                return Plan::Ignore(Ignored::NotAuthorized);
            }
            Plan::Decide(Decision {
                status: LeaveStatus::Denied,
                approver_id: actor.id,
                declinement_reason: reason
                    .as_deref()
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_string),
            })
        }
        Action::Approve => {
            if !policy.can_approve(actor) {
                return Plan::Ignore(Ignored::NotAuthorized);
            }
            Plan::Decide(Decision {
                status: LeaveStatus::Accepted,
                approver_id: actor.id,
                declinement_reason: None,
            })
        }
    }
}

/// Loads the request, plans the transition and writes it conditionally.
pub async fn apply<S, A>(
    store: &S,
    request_id: u64,
    actor: &Employee,
    action: Action,
    policy: &A,
) -> AppResult<Outcome>
where
    S: LeaveStore,
    A: Authorization,
{
    let Some(request) = store.request(request_id).await? else {
        return Ok(log_outcome(request_id, actor, &action, Outcome::Ignored(Ignored::NotFound)));
    };

    let outcome = match plan(&request, actor, &action, policy) {
        Plan::Ignore(reason) => Outcome::Ignored(reason),
        Plan::Delete { requester_id } => {
            if store.delete_pending(request_id, requester_id).await? {
                Outcome::Withdrawn
            } else {
                Outcome::Ignored(Ignored::Superseded)
            }
        }
        Plan::Decide(decision) => {
            let status = decision.status;
            if !store.decide(request_id, decision).await? {
                Outcome::Ignored(Ignored::Superseded)
            } else if status == LeaveStatus::Accepted {
                Outcome::Approved
            } else {
                Outcome::Declined
            }
        }
    };

    Ok(log_outcome(request_id, actor, &action, outcome))
}

fn log_outcome(request_id: u64, actor: &Employee, action: &Action, outcome: Outcome) -> Outcome {
    match outcome {
        Outcome::Ignored(reason) => tracing::debug!(
            request_id,
            actor_id = actor.id,
            action = action.name(),
            reason = ?reason,
            "Leave transition ignored"
        ),
        applied => tracing::info!(
            request_id,
            actor_id = actor.id,
            action = action.name(),
            outcome = ?applied,
            "Leave transition applied"
        ),
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::leave_request::CreateLeave;
    use crate::store::memory::MemoryStore;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(id: u64, role: Role) -> Employee {
        Employee {
            id,
            first_name: format!("E{id}"),
            last_name: "Test".into(),
            email: format!("e{id}@company.de"),
            role,
            vacation_entitlement: 30,
            manual_vacation_correction: 0,
            country: "DE".into(),
            subdivision: Some("HE".into()),
        }
    }

    fn pending(id: u64, requester_id: u64) -> LeaveRequest {
        LeaveRequest {
            id,
            requester_id,
            approver_id: None,
            start_date: date(2024, 9, 2),
            end_date: date(2024, 9, 6),
            status: LeaveStatus::New,
            declinement_reason: None,
        }
    }

    fn store_with(request: LeaveRequest) -> MemoryStore {
        let store = MemoryStore::default();
        store.add_request(request);
        store
    }

    #[test]
    fn role_policy_capabilities() {
        let policy = RolePolicy;
        assert!(!policy.can_approve(&employee(1, Role::Employee)));
        assert!(policy.can_approve(&employee(1, Role::Supervisor)));
        assert!(!policy.can_manage(&employee(1, Role::Supervisor)));
        assert!(policy.can_manage(&employee(1, Role::HeadOfDepartment)));
        assert!(policy.can_manage(&employee(1, Role::Admin)));
    }

    #[test]
    fn plan_ignores_terminal_requests() {
        let mut request = pending(1, 1);
        request.status = LeaveStatus::Accepted;
        let boss = employee(2, Role::Admin);

        for action in [
            Action::Approve,
            Action::Decline { reason: None },
            Action::Withdraw,
        ] {
            assert_eq!(
                plan(&request, &boss, &action, &RolePolicy),
                Plan::Ignore(Ignored::NotPending)
            );
        }
    }

    #[test]
    fn plan_blank_reason_is_dropped() {
        let plan = plan(
            &pending(1, 1),
            &employee(2, Role::Supervisor),
            &Action::Decline {
                reason: Some("   ".into()),
            },
            &RolePolicy,
        );
        assert_eq!(
            plan,
            Plan::Decide(Decision {
                status: LeaveStatus::Denied,
                approver_id: 2,
                declinement_reason: None,
            })
        );
    }

    #[actix_web::test]
    async fn approve_sets_status_and_approver() {
        let store = store_with(pending(1, 1));
        let boss = employee(2, Role::Supervisor);

        let outcome = apply(&store, 1, &boss, Action::Approve, &RolePolicy).await.unwrap();
        assert_eq!(outcome, Outcome::Approved);

        let stored = store.request(1).await.unwrap().unwrap();
        assert_eq!(stored.status, LeaveStatus::Accepted);
        assert_eq!(stored.approver_id, Some(2));
    }

    #[actix_web::test]
    async fn second_approve_is_a_no_op() {
        let store = store_with(pending(1, 1));
        let boss = employee(2, Role::Supervisor);
        let other_boss = employee(3, Role::Admin);

        apply(&store, 1, &boss, Action::Approve, &RolePolicy).await.unwrap();
        let outcome = apply(&store, 1, &other_boss, Action::Approve, &RolePolicy)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Ignored(Ignored::NotPending));
        let stored = store.request(1).await.unwrap().unwrap();
        assert_eq!(stored.status, LeaveStatus::Accepted);
        assert_eq!(stored.approver_id, Some(2));
    }

    #[actix_web::test]
    async fn decline_records_reason() {
        let store = store_with(pending(1, 1));
        let boss = employee(2, Role::HeadOfDepartment);
        let action = Action::Decline {
            reason: Some("Team at minimum staffing".into()),
        };

        let outcome = apply(&store, 1, &boss, action, &RolePolicy).await.unwrap();
        assert_eq!(outcome, Outcome::Declined);

        let stored = store.request(1).await.unwrap().unwrap();
        assert_eq!(stored.status, LeaveStatus::Denied);
        assert_eq!(stored.approver_id, Some(2));
        assert_eq!(
            stored.declinement_reason.as_deref(),
            Some("Team at minimum staffing")
        );
    }

    #[actix_web::test]
    async fn plain_employee_cannot_approve_own_request() {
        let store = store_with(pending(1, 1));
        let requester = employee(1, Role::Employee);

        let outcome = apply(&store, 1, &requester, Action::Approve, &RolePolicy)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Ignored(Ignored::NotAuthorized));
        let stored = store.request(1).await.unwrap().unwrap();
        assert_eq!(stored.status, LeaveStatus::New);
        assert_eq!(stored.approver_id, None);
    }

    #[actix_web::test]
    async fn requester_withdraws_pending_request() {
        let store = store_with(pending(1, 1));

        let outcome = apply(&store, 1, &employee(1, Role::Employee), Action::Withdraw, &RolePolicy)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Withdrawn);
        assert!(store.request(1).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn only_requester_may_withdraw() {
        let store = store_with(pending(1, 1));

        let outcome = apply(&store, 1, &employee(2, Role::Admin), Action::Withdraw, &RolePolicy)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Ignored(Ignored::NotAuthorized));
        assert!(store.request(1).await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn withdraw_after_decision_keeps_request() {
        for status in [LeaveStatus::Accepted, LeaveStatus::Denied] {
            let mut request = pending(1, 1);
            request.status = status;
            request.approver_id = Some(2);
            let store = store_with(request.clone());

            let outcome =
                apply(&store, 1, &employee(1, Role::Employee), Action::Withdraw, &RolePolicy)
                    .await
                    .unwrap();

            assert_eq!(outcome, Outcome::Ignored(Ignored::NotPending));
            assert_eq!(store.request(1).await.unwrap(), Some(request));
        }
    }

    #[actix_web::test]
    async fn missing_request_is_ignored() {
        let store = MemoryStore::default();
        let outcome = apply(&store, 42, &employee(2, Role::Admin), Action::Approve, &RolePolicy)
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Ignored(Ignored::NotFound));
    }

    #[actix_web::test]
    async fn conditional_write_rejects_stale_decision() {
        let store = store_with(pending(1, 1));
        let decline = Decision {
            status: LeaveStatus::Denied,
            approver_id: 3,
            declinement_reason: None,
        };

        // both callers read NEW; the approval lands first
        let read = store.request(1).await.unwrap().unwrap();
        let approve = plan(&read, &employee(2, Role::Admin), &Action::Approve, &RolePolicy);
        let Plan::Decide(approval) = approve else {
            panic!("expected a decision, got {approve:?}");
        };
        assert!(store.decide(1, approval).await.unwrap());
        assert!(!store.decide(1, decline).await.unwrap());

        let stored = store.request(1).await.unwrap().unwrap();
        assert_eq!(stored.status, LeaveStatus::Accepted);
    }

    /// Hands out a `NEW` snapshot of a request that has since been decided,
    /// as seen by a caller who read just before a competing write.
    struct StaleRead {
        inner: MemoryStore,
        snapshot: LeaveRequest,
    }

    impl LeaveStore for StaleRead {
        async fn create_request(&self, requester_id: u64, form: &CreateLeave) -> AppResult<u64> {
            self.inner.create_request(requester_id, form).await
        }

        async fn request(&self, id: u64) -> AppResult<Option<LeaveRequest>> {
            Ok(Some(self.snapshot.clone()).filter(|r| r.id == id))
        }

        async fn requests_by(&self, requester_id: u64) -> AppResult<Vec<LeaveRequest>> {
            self.inner.requests_by(requester_id).await
        }

        async fn all_requests(&self) -> AppResult<Vec<LeaveRequest>> {
            self.inner.all_requests().await
        }

        async fn accepted_overlapping(
            &self,
            requester_id: Option<u64>,
            from: NaiveDate,
            to: NaiveDate,
        ) -> AppResult<Vec<LeaveRequest>> {
            self.inner.accepted_overlapping(requester_id, from, to).await
        }

        async fn delete_pending(&self, id: u64, requester_id: u64) -> AppResult<bool> {
            self.inner.delete_pending(id, requester_id).await
        }

        async fn decide(&self, id: u64, decision: Decision) -> AppResult<bool> {
            self.inner.decide(id, decision).await
        }
    }

    fn already_approved() -> (StaleRead, LeaveRequest) {
        let mut decided = pending(1, 1);
        decided.status = LeaveStatus::Accepted;
        decided.approver_id = Some(2);

        let store = StaleRead {
            inner: store_with(decided.clone()),
            snapshot: pending(1, 1),
        };
        (store, decided)
    }

    #[actix_web::test]
    async fn plain_employee_cannot_decline() {
        let store = store_with(pending(1, 1));
        let colleague = employee(5, Role::Employee);
        let action = Action::Decline {
            reason: Some("Not my call".into()),
        };

        let outcome = apply(&store, 1, &colleague, action, &RolePolicy).await.unwrap();

        assert_eq!(outcome, Outcome::Ignored(Ignored::NotAuthorized));
        let stored = store.request(1).await.unwrap().unwrap();
        assert_eq!(stored.status, LeaveStatus::New);
        assert_eq!(stored.approver_id, None);
        assert_eq!(stored.declinement_reason, None);
    }

    #[actix_web::test]
    async fn decline_losing_the_race_is_superseded() {
        let (store, decided) = already_approved();
        let action = Action::Decline {
            reason: Some("Too late".into()),
        };

        let outcome = apply(&store, 1, &employee(3, Role::Admin), action, &RolePolicy)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Ignored(Ignored::Superseded));
        assert_eq!(store.inner.request(1).await.unwrap(), Some(decided));
    }

    #[actix_web::test]
    async fn withdraw_losing_the_race_keeps_request() {
        let (store, decided) = already_approved();

        let outcome = apply(&store, 1, &employee(1, Role::Employee), Action::Withdraw, &RolePolicy)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Ignored(Ignored::Superseded));
        assert_eq!(store.inner.request(1).await.unwrap(), Some(decided));
    }
}
