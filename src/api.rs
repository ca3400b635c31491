use crate::{
    config::BackendConfig,
    data::{ApiMessage, NewStudent, Student, StudentChanges, UniqueNumber},
    error::{
        BaseUrlCannotBeABaseSnafu, BuildClientSnafu, DecodeSnafu, Operation, RejectedSnafu,
        RosterResult, TransportSnafu,
    },
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use snafu::{OptionExt, ResultExt, ensure};
use std::fmt::Debug;
use url::Url;

/// The remote student store, one method per REST endpoint.
#[async_trait]
pub trait StudentApi: Debug + Send + Sync {
    async fn list_students(&self) -> RosterResult<Vec<Student>>;
    async fn get_student(&self, unique_number: &UniqueNumber) -> RosterResult<Student>;
    async fn add_student(&self, student: &NewStudent) -> RosterResult<String>;
    async fn update_student(
        &self,
        unique_number: &UniqueNumber,
        changes: &StudentChanges,
    ) -> RosterResult<String>;
    async fn delete_student(&self, unique_number: &UniqueNumber) -> RosterResult<String>;
}

#[derive(Debug, Clone)]
pub struct HttpStudentApi {
    client: Client,
    students_url: Url,
}

impl HttpStudentApi {
    pub fn new(config: &BackendConfig) -> RosterResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build().context(BuildClientSnafu)?,
            students_url: config.students_url().clone(),
        })
    }

    pub const fn students_url(&self) -> &Url {
        &self.students_url
    }

    /// `{students_url}/{unique_number}`, with the number escaped as a single path segment.
    pub fn student_url(&self, unique_number: &UniqueNumber) -> RosterResult<Url> {
        let mut url = self.students_url.clone();
        url.path_segments_mut()
            .ok()
            .context(BaseUrlCannotBeABaseSnafu {
                original: self.students_url.as_str(),
            })?
            .pop_if_empty()
            .push(unique_number.as_str());
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, operation: Operation) -> RosterResult<String> {
        let response = request.send().await.context(TransportSnafu { operation })?;
        let status = response.status();
        let body = response.text().await.context(TransportSnafu { operation })?;

        ensure!(
            status.is_success(),
            RejectedSnafu {
                operation,
                status,
                body
            }
        );
        Ok(body)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url, operation: Operation) -> RosterResult<T> {
        let body = self.send(self.client.get(url), operation).await?;
        serde_json::from_str(&body).context(DecodeSnafu {
            operation,
            body: body.as_str(),
        })
    }

    async fn mutate(&self, request: RequestBuilder, operation: Operation) -> RosterResult<String> {
        let body = self.send(request, operation).await?;
        // 204 No Content and friends
        if body.trim().is_empty() {
            return Ok(operation.success_message().to_string());
        }

        let reply: ApiMessage = serde_json::from_str(&body).context(DecodeSnafu {
            operation,
            body: body.as_str(),
        })?;

        match reply {
            ApiMessage {
                message: Some(message),
                ..
            } => Ok(message),
            ApiMessage { error: Some(_), .. } => RejectedSnafu {
                operation,
                status: StatusCode::OK,
                body,
            }
            .fail(),
            ApiMessage { .. } => Ok(operation.success_message().to_string()),
        }
    }
}

#[async_trait]
impl StudentApi for HttpStudentApi {
    async fn list_students(&self) -> RosterResult<Vec<Student>> {
        self.fetch(self.students_url.clone(), Operation::LoadStudents)
            .await
    }

    async fn get_student(&self, unique_number: &UniqueNumber) -> RosterResult<Student> {
        self.fetch(self.student_url(unique_number)?, Operation::FetchStudent)
            .await
    }

    async fn add_student(&self, student: &NewStudent) -> RosterResult<String> {
        let request = self.client.post(self.students_url.clone()).json(student);
        self.mutate(request, Operation::AddStudent).await
    }

    async fn update_student(
        &self,
        unique_number: &UniqueNumber,
        changes: &StudentChanges,
    ) -> RosterResult<String> {
        let request = self
            .client
            .put(self.student_url(unique_number)?)
            .json(changes);
        self.mutate(request, Operation::UpdateStudent).await
    }

    async fn delete_student(&self, unique_number: &UniqueNumber) -> RosterResult<String> {
        let request = self.client.delete(self.student_url(unique_number)?);
        self.mutate(request, Operation::DeleteStudent).await
    }
}
