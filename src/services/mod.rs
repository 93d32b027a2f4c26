//! Business logic services

pub mod packages;
pub mod stats;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub packages: packages::PackagesService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            packages: packages::PackagesService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        }
    }
}
