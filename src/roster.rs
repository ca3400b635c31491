//! The roster controller.
//!
//! [`Roster`] owns everything the page shows: the rendered rows, the edit popup and the queue of
//! dialogs waiting to be shown. Every operation calls the backend without holding the view lock and
//! only takes it to apply the outcome, so a handler always runs to completion on a consistent view
//! while several requests may be in flight at once. Whichever success is applied last wins.

use crate::{
    api::StudentApi,
    data::{AddStudentForm, NewStudent, Student, UniqueNumber, UpdateStudentForm},
    error::{RosterError, RosterResult},
};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub text: String,
}

impl Dialog {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Info,
            text: text.into(),
        }
    }

    pub fn error(error: &RosterError) -> Self {
        Self {
            kind: DialogKind::Error,
            text: error.to_string(),
        }
    }
}

/// The record currently loaded into the edit popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPrefill {
    pub unique_number: UniqueNumber,
    pub current: Student,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Popup {
    #[default]
    Hidden,
    Visible(EditPrefill),
}

impl Popup {
    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Visible(_))
    }
}

/// Answer to the "really delete?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Accepted
        } else {
            Self::Declined
        }
    }
}

#[derive(Debug, Default)]
struct RosterView {
    students: Vec<Student>,
    popup: Popup,
    dialogs: Vec<Dialog>,
}

#[derive(Debug)]
pub struct Roster {
    api: Arc<dyn StudentApi>,
    view: Mutex<RosterView>,
}

impl Roster {
    pub fn new(api: Arc<dyn StudentApi>) -> Self {
        Self {
            api,
            view: Mutex::new(RosterView::default()),
        }
    }

    /// Fetches every student and swaps the whole table in one go. A failure leaves the old rows.
    pub async fn load_students(&self) -> RosterResult<()> {
        match self.api.list_students().await {
            Ok(students) => {
                debug!(count = students.len(), "Loaded students");
                self.view.lock().await.students = students;
                Ok(())
            }
            Err(e) => Err(self.fail(e).await),
        }
    }

    /// Creates a student, then reloads. `Ok` means the add form should be cleared.
    pub async fn add_student(&self, form: AddStudentForm) -> RosterResult<()> {
        let student = NewStudent::from(form);
        debug!(?student, "Adding student");

        match self.api.add_student(&student).await {
            Ok(message) => {
                self.inform(message).await;
                self.refresh().await;
                Ok(())
            }
            Err(e) => Err(self.fail(e).await),
        }
    }

    /// Loads one student into the popup and shows it.
    pub async fn edit_student(&self, unique_number: &str) -> RosterResult<()> {
        let Some(requested) = UniqueNumber::new(unique_number) else {
            return Err(self.fail(RosterError::MissingUniqueNumber).await);
        };

        match self.api.get_student(&requested).await {
            Ok(current) => {
                let unique_number = current.unique_number().unwrap_or(requested);
                self.view.lock().await.popup = Popup::Visible(EditPrefill {
                    unique_number,
                    current,
                });
                Ok(())
            }
            Err(e) => Err(self.fail(e).await),
        }
    }

    /// Sends the non-empty fields of the update form. Hides the popup only on success.
    pub async fn update_student(&self, form: UpdateStudentForm) -> RosterResult<()> {
        let (unique_number, changes) = form.into_parts();
        let Some(unique_number) = unique_number else {
            return Err(self.fail(RosterError::MissingUniqueNumber).await);
        };
        debug!(%unique_number, ?changes, "Updating student");

        match self.api.update_student(&unique_number, &changes).await {
            Ok(message) => {
                {
                    let mut view = self.view.lock().await;
                    view.dialogs.push(Dialog::info(message));
                    view.popup = Popup::Hidden;
                }
                self.refresh().await;
                Ok(())
            }
            Err(e) => Err(self.fail(e).await),
        }
    }

    /// Deletes a student once the user has confirmed. Declining does nothing at all.
    pub async fn delete_student(
        &self,
        unique_number: &str,
        confirmation: Confirmation,
    ) -> RosterResult<()> {
        if confirmation == Confirmation::Declined {
            debug!(unique_number, "Delete declined");
            return Ok(());
        }
        let Some(unique_number) = UniqueNumber::new(unique_number) else {
            return Err(self.fail(RosterError::MissingUniqueNumber).await);
        };

        match self.api.delete_student(&unique_number).await {
            Ok(message) => {
                self.inform(message).await;
                self.refresh().await;
                Ok(())
            }
            Err(e) => Err(self.fail(e).await),
        }
    }

    pub async fn close_popup(&self) {
        self.view.lock().await.popup = Popup::Hidden;
    }

    pub async fn students(&self) -> Vec<Student> {
        self.view.lock().await.students.clone()
    }

    pub async fn popup(&self) -> Popup {
        self.view.lock().await.popup.clone()
    }

    /// Dialogs queued since the last call, oldest first.
    pub async fn take_dialogs(&self) -> Vec<Dialog> {
        std::mem::take(&mut self.view.lock().await.dialogs)
    }

    async fn refresh(&self) {
        // already surfaced as a dialog
        let _ = self.load_students().await;
    }

    async fn inform(&self, message: String) {
        self.view.lock().await.dialogs.push(Dialog::info(message));
    }

    async fn fail(&self, error: RosterError) -> RosterError {
        if error.is_local() {
            info!(?error, "Rejected locally");
        } else {
            warn!(?error, "Backend call failed");
        }
        self.view.lock().await.dialogs.push(Dialog::error(&error));
        error
    }
}
