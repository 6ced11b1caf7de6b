//! Scope policy gate.
//!
//! Authorizes mutating operations against the actor's role and organizational
//! affiliation. Rules are evaluated in order, first match wins:
//!
//! | Role     | Rule                                             |
//! |----------|--------------------------------------------------|
//! | Admin    | always allowed                                   |
//! | OrgRep   | allowed iff actor's org id == target org id      |
//! | DeptRep  | allowed iff actor's dept id == target dept id    |
//! | Staff    | allowed iff actor's dept id == target dept id    |
//! | unknown  | denied                                           |

use tracing::warn;

use crate::db::repository::FullRepository;
use crate::models::{Actor, Role};
use crate::scheduler::{SchedulerError, SchedulerResult};

/// Pure authorization rule over an already-resolved actor.
///
/// `None` (actor not found) is always denied. An actor whose own affiliation
/// is unset cannot match an affiliation-scoped rule.
pub fn authorize(actor: Option<&Actor>, target_dept_id: Option<i64>, target_org_id: Option<i64>) -> bool {
    let Some(actor) = actor else {
        return false;
    };

    match actor.role {
        Role::Admin => true,
        Role::OrgRep => match (actor.organization_id, target_org_id) {
            (Some(own), Some(target)) => own == target,
            _ => false,
        },
        Role::DeptRep | Role::Staff => match (actor.department_id, target_dept_id) {
            (Some(own), Some(target)) => own == target,
            _ => false,
        },
    }
}

/// Look up the actor and evaluate the scope rule.
pub async fn check_scope(
    repo: &dyn FullRepository,
    actor_username: &str,
    target_dept_id: Option<i64>,
    target_org_id: Option<i64>,
) -> SchedulerResult<bool> {
    let actor = repo.find_actor(actor_username).await?;
    if actor.is_none() {
        warn!(username = actor_username, "scope check for unknown actor");
    }
    Ok(authorize(actor.as_ref(), target_dept_id, target_org_id))
}

/// Enforce the scope rule, failing with `AccessDenied` when it does not hold.
/// A denied check must abort the calling mutation before any write.
pub async fn enforce_scope(
    repo: &dyn FullRepository,
    actor_username: &str,
    target_dept_id: Option<i64>,
    target_org_id: Option<i64>,
) -> SchedulerResult<()> {
    if check_scope(repo, actor_username, target_dept_id, target_org_id).await? {
        Ok(())
    } else {
        Err(SchedulerError::AccessDenied)
    }
}
