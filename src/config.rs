use crate::error::{
    BadEnvVarSnafu, BaseUrlCannotBeABaseSnafu, ParseTimeoutSnafu, ParseUrlSnafu, RosterResult,
};
use dotenvy::var;
use snafu::{ResultExt, ensure};
use std::{env::VarError, sync::Arc, time::Duration};
use url::Url;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080/api/students/";
pub const DEFAULT_SERVER_IP: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    backend_config: Arc<BackendConfig>,
    server_ip: String,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        Ok(Self {
            backend_config: Arc::new(BackendConfig::new()?),
            server_ip: optional_env_var("ROSTER_SERVER_IP")?
                .unwrap_or_else(|| DEFAULT_SERVER_IP.to_string()),
        })
    }

    pub fn from_parts(backend_config: BackendConfig, server_ip: impl Into<String>) -> Self {
        Self {
            backend_config: Arc::new(backend_config),
            server_ip: server_ip.into(),
        }
    }

    pub fn backend_config(&self) -> Arc<BackendConfig> {
        self.backend_config.clone()
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    students_url: Url,
    request_timeout: Option<Duration>,
}

impl BackendConfig {
    pub fn new() -> RosterResult<Self> {
        let students_url = optional_env_var("ROSTER_BACKEND_URL")?
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let request_timeout = optional_env_var("ROSTER_REQUEST_TIMEOUT_SECS")?
            .map(parse_request_timeout)
            .transpose()?;

        Self::from_url(&students_url, request_timeout)
    }

    pub fn from_url(students_url: &str, request_timeout: Option<Duration>) -> RosterResult<Self> {
        let mut url = Url::parse(students_url).context(ParseUrlSnafu {
            original: students_url,
        })?;
        ensure!(
            !url.cannot_be_a_base(),
            BaseUrlCannotBeABaseSnafu {
                original: students_url
            }
        );

        // the collection endpoint is addressed with a trailing slash
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            students_url: url,
            request_timeout,
        })
    }

    pub const fn students_url(&self) -> &Url {
        &self.students_url
    }

    pub const fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

/// Whole seconds, as in `ROSTER_REQUEST_TIMEOUT_SECS=30`.
pub fn parse_request_timeout(secs: String) -> RosterResult<Duration> {
    let parsed = secs.trim().parse().map(Duration::from_secs);
    parsed.context(ParseTimeoutSnafu { original: secs })
}

fn optional_env_var(name: &'static str) -> RosterResult<Option<String>> {
    match var(name) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(None),
        Err(source) => Err(source).context(BadEnvVarSnafu { name }),
    }
}
