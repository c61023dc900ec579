use std::sync::Arc;

use nutrigoal_core::application::NutrigoalService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: NutrigoalService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: NutrigoalService) -> Self {
        Self { args, service }
    }
}
