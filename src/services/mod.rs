//! Quiz engine services and server health checks.

/// Answer checking.
pub mod evaluator;
/// Health check service.
pub mod health_service;
/// Quiz engine facade tying sessions to statistics persistence.
pub mod quiz_service;
