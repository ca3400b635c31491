use crate::{
    api::{HttpStudentApi, StudentApi},
    config::RuntimeConfiguration,
    error::RosterResult,
    roster::Roster,
};
use maud::{DOCTYPE, Markup, html};
use std::{ops::Deref, sync::Arc};

#[derive(Clone, Debug)]
pub struct RosterState {
    roster: Arc<Roster>,
    config: RuntimeConfiguration,
}

impl RosterState {
    pub fn new(config: RuntimeConfiguration) -> RosterResult<Self> {
        let api = HttpStudentApi::new(&config.backend_config())?;
        info!(students_url = %api.students_url(), "Using student backend");

        Ok(Self::with_api(Arc::new(api), config))
    }

    pub fn with_api(api: Arc<dyn StudentApi>, config: RuntimeConfiguration) -> Self {
        Self {
            roster: Arc::new(Roster::new(api)),
            config,
        }
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    #[allow(clippy::unused_self)] //in case self is ever needed :)
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Students" }
                }
                body class="bg-gray-900 min-h-screen flex flex-col items-center p-8 text-white" {
                    (markup)
                }
            }
        }
    }
}

impl Deref for RosterState {
    type Target = Roster;

    fn deref(&self) -> &Self::Target {
        &self.roster
    }
}
