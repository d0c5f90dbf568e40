//! Name-to-ID resolution for applications, flags and environments
//!
//! The API is keyed by ID while the CLI is keyed by name. Every lookup goes
//! back to the server; nothing is cached, even within one invocation.

use tracing::debug;

use crate::api::{ApiClient, Transport};
use crate::domain::{Application, Environment, Flag};
use crate::error::{EntityKind, FmError, Result};

pub struct Resolver<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> Resolver<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Scan the organization's applications for an exact, case-sensitive name
    /// match. Duplicate names are not disambiguated: the first one listed wins.
    pub fn application(&self, name: &str) -> Result<Application> {
        let application = self
            .client
            .list_applications()?
            .into_iter()
            .find(|app| app.name == name)
            .ok_or_else(|| FmError::not_found(EntityKind::Application, name))?;
        debug!(name, id = %application.id, "resolved application");
        Ok(application)
    }

    /// Look a flag up by name within an application. A 404 from the API is
    /// reported as a missing flag with the API error kept as its cause.
    pub fn flag(&self, application_id: &str, name: &str) -> Result<Flag> {
        let flag = self.client.get_flag_by_name(application_id, name).map_err(|err| match err {
            FmError::Api { status: 404, .. } => FmError::NotFound {
                kind: EntityKind::Flag,
                name: name.to_string(),
                cause: Some(Box::new(err)),
            },
            other => other,
        })?;
        debug!(name, id = %flag.id, "resolved flag");
        Ok(flag)
    }

    pub fn environment(&self, name: &str) -> Result<Environment> {
        let environment = self
            .client
            .list_environments()?
            .into_iter()
            .find(|env| env.name == name)
            .ok_or_else(|| FmError::not_found(EntityKind::Environment, name))?;
        debug!(name, id = %environment.id, "resolved environment");
        Ok(environment)
    }
}
