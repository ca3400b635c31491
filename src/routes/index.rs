use crate::{
    maud_conveniences::title,
    routes::students::{ADD_FORM_ID, DIALOGS_ID, POPUP_ID, ROSTER_ID, render_add_form},
    state::RosterState,
};
use axum::extract::State;
use maud::{Markup, html};

pub async fn get_index_route(State(state): State<RosterState>) -> Markup {
    state.render(html! {
        div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-5xl w-full flex flex-col space-y-8" {
            (title("Student Management"))
            div id=(ROSTER_ID) hx-get="/internal/students" hx-trigger="load" hx-swap="none" {}
            div id=(ADD_FORM_ID) {
                (render_add_form())
            }
        }
        div id=(POPUP_ID) {}
        div id=(DIALOGS_ID) {}
    })
}
