pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::configure;
pub use repositories::{DashboardRepository, MySqlDashboardRepository};
pub use services::DashboardService;
