use std::sync::Arc;

use tera::Tera;

use crate::services::dishes_client::DishesClient;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub dishes: Arc<DishesClient>,
    pub templates: Arc<Tera>,
}

impl AppState {
    pub fn new(dishes: DishesClient, templates: Tera) -> Self {
        Self {
            dishes: Arc::new(dishes),
            templates: Arc::new(templates),
        }
    }
}
