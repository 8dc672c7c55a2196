pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    auth_service::AuthService, dataset::Dataset, map_service::MapService,
    report_service::ReportService, store::Store, user_service::UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn Store>,
    pub dataset: Arc<Dataset>,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub map_service: MapService,
    pub report_service: ReportService,
}

impl AppState {
    pub fn new(config: Arc<Config>, store: Arc<dyn Store>, dataset: Arc<Dataset>) -> Self {
        let auth_service = AuthService::new(store.clone(), config.clone());
        let user_service = UserService::new(store.clone());
        let map_service = MapService::new(dataset.clone());
        let report_service = ReportService::new(dataset.clone(), store.clone());

        Self {
            config,
            store,
            dataset,
            auth_service,
            user_service,
            map_service,
            report_service,
        }
    }
}
