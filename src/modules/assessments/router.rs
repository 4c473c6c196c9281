use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_assessment, delete_assessment, get_assessment, get_assessments, update_assessment,
};

pub fn init_assessments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_assessments).post(create_assessment))
        .route(
            "/{id}",
            get(get_assessment)
                .put(update_assessment)
                .delete(delete_assessment),
        )
}
