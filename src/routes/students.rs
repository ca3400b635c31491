use crate::{
    data::{AddStudentForm, Student, UpdateStudentForm},
    maud_conveniences::{
        form_submit_button, render_dialogs, render_table, simple_form_element, subtitle, title,
    },
    roster::{Confirmation, EditPrefill, Popup},
    state::RosterState,
};
use axum::{
    Form,
    extract::{Query, State},
};
use maud::{Markup, html};
use serde::Deserialize;
use serde_json::json;

pub const ROSTER_ID: &str = "roster";
pub const ADD_FORM_ID: &str = "add_form";
pub const POPUP_ID: &str = "popup";
pub const DIALOGS_ID: &str = "dialogs";

/// Wraps `markup` so htmx swaps it in place of the element with this id.
fn out_of_band(id: &str, markup: Markup) -> Markup {
    html! {
        div id=(id) hx-swap-oob="true" {
            (markup)
        }
    }
}

fn optional_cell(field: Option<&String>) -> Markup {
    html! {
        @if let Some(value) = field {
            (value)
        }
    }
}

fn student_actions(student: &Student) -> Markup {
    let Some(unique_number) = student.unique_number() else {
        return html! {};
    };
    let edit_vals = json!({ "unique_number": unique_number.as_str() }).to_string();
    let delete_vals = json!({ "unique_number": unique_number.as_str(), "confirmed": true }).to_string();

    html! {
        div class="flex flex-row space-x-2" {
            button class="bg-blue-600 hover:bg-blue-800 font-bold py-1 px-3 rounded" hx-get="/internal/students/edit" hx-vals=(edit_vals) hx-swap="none" {
                "Edit"
            }
            button class="bg-red-600 hover:bg-red-800 font-bold py-1 px-3 rounded" hx-delete="/students" hx-vals=(delete_vals) hx-confirm={"Delete student " (unique_number.as_str()) "?"} hx-swap="none" {
                "Delete"
            }
        }
    }
}

/// The student table, one row per record in the order the backend sent them.
pub fn render_roster(students: &[Student]) -> Markup {
    let rows = students
        .iter()
        .map(|student| {
            [
                optional_cell(student.first_name.as_ref()),
                optional_cell(student.last_name.as_ref()),
                optional_cell(student.patronymic.as_ref()),
                optional_cell(student.birth_date.as_ref()),
                optional_cell(student.group_name.as_ref()),
                html! { (student.unique_number) },
                student_actions(student),
            ]
        })
        .collect();

    render_table(
        "Students",
        [
            "First Name",
            "Last Name",
            "Patronymic",
            "Birth Date",
            "Group",
            "Unique Number",
            "Actions",
        ],
        rows,
    )
}

pub fn render_add_form() -> Markup {
    html! {
        (subtitle("Add Student"))
        form id="add-student-form" hx-post="/students" hx-swap="none" class="p-4" {
            (simple_form_element("add-first-name", "first_name", "First Name", false, None, None))
            (simple_form_element("add-last-name", "last_name", "Last Name", false, None, None))
            (simple_form_element("add-patronymic", "patronymic", "Patronymic", false, None, None))
            (simple_form_element("add-birth-date", "birth_date", "Birth Date", false, Some("date"), None))
            (simple_form_element("add-group-name", "group_name", "Group", false, None, None))
            (simple_form_element("add-unique-number", "unique_number", "Unique Number", false, None, None))
            (form_submit_button(Some("Add Student")))
        }
    }
}

fn current_value(label: &str, field: Option<&String>) -> Markup {
    html! {
        p class="text-gray-200 font-semibold" {
            (label) ": "
            span class="font-medium" {(optional_cell(field))}
        }
    }
}

/// The edit overlay. Inputs start blank; anything left blank is not changed.
pub fn render_popup(popup: &Popup) -> Markup {
    let Popup::Visible(EditPrefill {
        unique_number,
        current,
    }) = popup
    else {
        return html! {};
    };

    html! {
        div id="popup-overlay" class="fixed inset-0 bg-black/60 flex items-center justify-center z-40" {
            div class="bg-gray-800 rounded shadow-md p-8 max-w-md w-full" {
                (title("Edit Student"))
                p class="text-gray-200 font-semibold mb-2" {
                    "Unique Number: "
                    span id="display-unique-number" class="font-medium" {(unique_number.as_str())}
                }
                div class="mb-4" {
                    (current_value("First Name", current.first_name.as_ref()))
                    (current_value("Last Name", current.last_name.as_ref()))
                    (current_value("Patronymic", current.patronymic.as_ref()))
                    (current_value("Birth Date", current.birth_date.as_ref()))
                    (current_value("Group", current.group_name.as_ref()))
                }
                form id="update-student-form" hx-post="/students/update" hx-swap="none" {
                    input type="hidden" id="update-unique-number" name="unique_number" value=(unique_number.as_str());
                    (simple_form_element("update-first-name", "first_name", "New First Name", false, None, None))
                    (simple_form_element("update-last-name", "last_name", "New Last Name", false, None, None))
                    (simple_form_element("update-patronymic", "patronymic", "New Patronymic", false, None, None))
                    (simple_form_element("update-birth-date", "birth_date", "New Birth Date", false, Some("date"), None))
                    (simple_form_element("update-group-name", "group_name", "New Group", false, None, None))
                    (form_submit_button(Some("Update Student")))
                }
                button id="close-popup" class="mt-4 bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" hx-post="/internal/popup/close" hx-swap="none" {
                    "Close"
                }
            }
        }
    }
}

async fn roster_fragment(state: &RosterState) -> Markup {
    out_of_band(ROSTER_ID, render_roster(&state.students().await))
}

async fn popup_fragment(state: &RosterState) -> Markup {
    out_of_band(POPUP_ID, render_popup(&state.popup().await))
}

/// Appends the queued dialogs to whatever is already on screen. With nothing queued the
/// response leaves `#dialogs` alone, so a concurrent response cannot wipe another's dialogs.
async fn dialogs_fragment(state: &RosterState) -> Markup {
    let dialogs = state.take_dialogs().await;
    if dialogs.is_empty() {
        return html! {};
    }

    html! {
        div hx-swap-oob={"beforeend:#" (DIALOGS_ID)} {
            (render_dialogs(&dialogs))
        }
    }
}

pub async fn internal_get_students(State(state): State<RosterState>) -> Markup {
    let _ = state.load_students().await; // surfaced as a dialog

    let roster = roster_fragment(&state).await;
    let dialogs = dialogs_fragment(&state).await;
    html! { (roster) (dialogs) }
}

pub async fn post_new_student(
    State(state): State<RosterState>,
    Form(form): Form<AddStudentForm>,
) -> Markup {
    let added = state.add_student(form).await.is_ok();

    let roster = roster_fragment(&state).await;
    let dialogs = dialogs_fragment(&state).await;
    html! {
        (roster)
        @if added {
            (out_of_band(ADD_FORM_ID, render_add_form()))
        }
        (dialogs)
    }
}

#[derive(Deserialize)]
pub struct UniqueNumberQuery {
    #[serde(default)]
    pub unique_number: String,
}

pub async fn internal_get_edit_student(
    State(state): State<RosterState>,
    Query(UniqueNumberQuery { unique_number }): Query<UniqueNumberQuery>,
) -> Markup {
    let _ = state.edit_student(&unique_number).await;

    let popup = popup_fragment(&state).await;
    let dialogs = dialogs_fragment(&state).await;
    html! { (popup) (dialogs) }
}

pub async fn post_update_student(
    State(state): State<RosterState>,
    Form(form): Form<UpdateStudentForm>,
) -> Markup {
    let _ = state.update_student(form).await;

    let roster = roster_fragment(&state).await;
    let popup = popup_fragment(&state).await;
    let dialogs = dialogs_fragment(&state).await;
    html! { (roster) (popup) (dialogs) }
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub unique_number: String,
    #[serde(default)]
    pub confirmed: bool,
}

pub async fn delete_student(
    State(state): State<RosterState>,
    Query(DeleteQuery {
        unique_number,
        confirmed,
    }): Query<DeleteQuery>,
) -> Markup {
    let _ = state
        .delete_student(&unique_number, Confirmation::from(confirmed))
        .await;

    let roster = roster_fragment(&state).await;
    let dialogs = dialogs_fragment(&state).await;
    html! { (roster) (dialogs) }
}

pub async fn internal_post_close_popup(State(state): State<RosterState>) -> Markup {
    state.close_popup().await;
    popup_fragment(&state).await
}

pub async fn internal_post_dismiss_dialogs() -> Markup {
    out_of_band(DIALOGS_ID, html! {})
}
