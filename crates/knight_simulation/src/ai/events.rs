//! Pathing events (ECS ↔ движок NavigationSystem)
//!
//! MoveTo fire-and-forget: ECS пишет MoveToRequest, движок строит путь
//! и отвечает PathResult на одном из следующих тиков.

use bevy::prelude::*;
use thiserror::Error;

/// Запрос к движку: идти к goal до acceptance radius
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MoveToRequest {
    pub entity: Entity,
    /// Монотонный id запроса (для отбрасывания устаревших ответов)
    pub request_id: u32,
    pub goal: Vec3,
    pub acceptance_radius: f32,
}

/// Почему путь не построен
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathFailure {
    #[error("no navigable path to goal")]
    NoPath,
    #[error("patrol goal cannot be resolved to a position")]
    InvalidGoal,
}

/// Ответ движка на MoveToRequest
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PathResult {
    pub entity: Entity,
    pub request_id: u32,
    /// Waypoints пути (world) или причина отказа
    pub outcome: Result<Vec<Vec3>, PathFailure>,
}
