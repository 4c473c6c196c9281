use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_result, delete_result, delete_result_by_body, get_result, get_results, update_result,
};

pub fn init_results_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_results)
                .post(create_result)
                .delete(delete_result_by_body),
        )
        .route(
            "/{id}",
            get(get_result).put(update_result).delete(delete_result),
        )
}
