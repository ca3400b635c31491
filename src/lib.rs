#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else, clippy::missing_errors_doc)]

use crate::{
    routes::{
        index::get_index_route,
        students::{
            delete_student, internal_get_edit_student, internal_get_students,
            internal_post_close_popup, internal_post_dismiss_dialogs, post_new_student,
            post_update_student,
        },
    },
    state::RosterState,
};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

#[macro_use]
extern crate tracing;

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod maud_conveniences;
pub mod roster;
pub mod routes;
pub mod state;

pub fn router(state: RosterState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/students", post(post_new_student).delete(delete_student))
        .route("/students/update", post(post_update_student))
        .route("/internal/students", get(internal_get_students))
        .route("/internal/students/edit", get(internal_get_edit_student))
        .route("/internal/popup/close", post(internal_post_close_popup))
        .route(
            "/internal/dialogs/dismiss",
            post(internal_post_dismiss_dialogs),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
