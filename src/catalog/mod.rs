//! Access to the backend store: skill catalog, technician roster, and
//! notification of the skills identified for a ticket.

pub mod client;
pub mod records;

pub use client::CatalogClient;

use async_trait::async_trait;

use crate::core::errors::RouterResult;
use crate::core::types::{Skill, Technician};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn fetch_skills(&self) -> RouterResult<Vec<Skill>>;

    async fn fetch_technicians(&self) -> RouterResult<Vec<Technician>>;

    /// Returns whether the store acknowledged the update.
    async fn record_ticket_skills(
        &self,
        ticket_id: Option<i64>,
        skills: &[Skill],
    ) -> RouterResult<bool>;
}
