// Application layer - Use cases and repository seams
pub mod dashboard_repository;
pub mod sync_service;
