/*
 * Responsibility
 * - repo 層の公開インターフェース
 */
pub mod error;
pub mod pool;
pub mod store;
pub mod survey_repo;
