use std::str::FromStr;

use shared::{CallAssignmentRequest, SuccessResponse};
use uuid::Uuid;

use crate::application::listings::PROPERTY_NOT_FOUND;
use crate::application::ports::{CallAssignmentRepository, PropertyRepository, UserRepository};
use crate::application::{parse_id, Actor};
use crate::domain::{CallAssignment, HistoryAction, PropertyHistory, UserId, UserRole};
use crate::error::{AppError, Result};

pub const CONFIRMED_NOTE: &str = "Прозвон подтвержден";

/// Asks an agent to phone the owners of the given listings. Pairs that are
/// already assigned stay as they are.
pub async fn assign<C, P, U>(
    calls: &C,
    properties: &P,
    users: &U,
    actor: &Actor,
    request: CallAssignmentRequest,
) -> Result<SuccessResponse>
where
    C: CallAssignmentRepository + ?Sized,
    P: PropertyRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    actor.require_staff()?;
    let agent_raw = request
        .agent_id
        .filter(|a| !a.trim().is_empty())
        .filter(|_| !request.property_ids.is_empty())
        .ok_or_else(|| AppError::Validation("Invalid payload".to_string()))?;

    let agent_not_found = || AppError::NotFound("Agent not found".to_string());
    let agent_id = UserId::from_str(&agent_raw).map_err(|_| agent_not_found())?;
    let agent = users.find_by_id(&agent_id).await?.ok_or_else(agent_not_found)?;
    if agent.role() != UserRole::Agent {
        return Err(AppError::Validation("User is not an agent".to_string()));
    }

    let mut property_ids: Vec<Uuid> = Vec::with_capacity(request.property_ids.len());
    for raw in &request.property_ids {
        let id = parse_id(raw, PROPERTY_NOT_FOUND)?;
        if !property_ids.contains(&id) {
            property_ids.push(id);
        }
    }
    for id in &property_ids {
        if properties.find(*id).await?.is_none() {
            return Err(AppError::NotFound(PROPERTY_NOT_FOUND.to_string()));
        }
    }

    let note = format!("Назначен для прозвона агенту {}", agent.display_name());
    let assignments: Vec<CallAssignment> = property_ids
        .iter()
        .map(|id| CallAssignment::new(*id, agent_id))
        .collect();
    let history: Vec<PropertyHistory> = property_ids
        .iter()
        .map(|id| PropertyHistory::record(*id, actor.id, HistoryAction::Assigned, Some(note.clone())))
        .collect();

    let created = calls.assign(&assignments, &history).await?;
    tracing::info!(agent_id = %agent_id, requested = assignments.len(), created, "Call assignments created");
    Ok(SuccessResponse::ok())
}

/// The agent phoned the owner: the listing leaves the pinned list.
pub async fn confirm<C: CallAssignmentRepository + ?Sized>(calls: &C, actor: &Actor, id: &str) -> Result<SuccessResponse> {
    if !actor.is_agent() {
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }
    let not_found = || AppError::NotFound("Assignment not found".to_string());
    let id = parse_id(id, "Assignment not found")?;
    let assignment = calls
        .find(id)
        .await?
        .filter(|assignment| assignment.agent_id == actor.id)
        .ok_or_else(not_found)?;

    let history = PropertyHistory::record(
        assignment.property_id,
        actor.id,
        HistoryAction::Updated,
        Some(CONFIRMED_NOTE.to_string()),
    );
    calls.confirm(id, &history).await?;
    tracing::info!(assignment_id = %id, property_id = %assignment.property_id, "Call confirmed");
    Ok(SuccessResponse::ok())
}
