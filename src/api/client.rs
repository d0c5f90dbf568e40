//! Typed calls against the feature management endpoints

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::transport::{ApiRequest, Transport};
use crate::domain::{
    Application, CreateFlagRequest, Environment, Flag, FlagConfiguration,
    FlagConfigurationResponse, FlagResponse, ListApplicationsResponse, ListEnvironmentsResponse,
    ListFlagsResponse,
};
use crate::error::{FmError, Result};

/// API client bound to one organization.
///
/// Environments and flags live under `/v2`, the application listing under
/// `/v1`. In legacy mode the organization ID stands in for the application ID
/// on every `/v2/applications/{id}/...` path; the mode is fixed per instance.
pub struct ApiClient<T> {
    transport: T,
    org_id: String,
    use_org_as_app: bool,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, org_id: impl Into<String>) -> Self {
        Self { transport, org_id: org_id.into(), use_org_as_app: false }
    }

    pub fn with_org_as_app(mut self, enabled: bool) -> Self {
        self.use_org_as_app = enabled;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_environments(&self) -> Result<Vec<Environment>> {
        let request =
            ApiRequest::get(["v2", "organizations", self.org_id.as_str(), "environments"]);
        let response: ListEnvironmentsResponse = self.call(&request)?;
        Ok(response.environments)
    }

    pub fn list_applications(&self) -> Result<Vec<Application>> {
        let request = ApiRequest::get(["v1", "organizations", self.org_id.as_str(), "services"])
            .query("typeFilter", "APPLICATION_FILTER");
        let response: ListApplicationsResponse = self.call(&request)?;
        Ok(response.service)
    }

    pub fn get_flag_by_name(&self, application_id: &str, name: &str) -> Result<Flag> {
        let request = ApiRequest::get(self.flags_path(application_id, &["by-name", name]));
        let response: FlagResponse = self.call(&request)?;
        Ok(response.flag)
    }

    pub fn list_flags(&self, application_id: &str) -> Result<Vec<Flag>> {
        let request = ApiRequest::get(self.flags_path(application_id, &[]));
        let response: ListFlagsResponse = self.call(&request)?;
        Ok(response.flags)
    }

    pub fn create_flag(&self, application_id: &str, flag: &CreateFlagRequest) -> Result<Flag> {
        let request =
            ApiRequest::new(Method::POST, self.flags_path(application_id, &[])).json(flag)?;
        let response: FlagResponse = self.call(&request)?;
        Ok(response.flag)
    }

    pub fn delete_flag(&self, application_id: &str, flag_id: &str) -> Result<()> {
        let request = ApiRequest::new(Method::DELETE, self.flags_path(application_id, &[flag_id]));
        self.transport.send(&request)?;
        Ok(())
    }

    pub fn get_flag_configuration(
        &self,
        application_id: &str,
        flag_id: &str,
        environment_id: &str,
    ) -> Result<FlagConfiguration> {
        let path = self.configuration_path(application_id, flag_id, environment_id);
        let request = ApiRequest::get(path);
        let response: FlagConfigurationResponse = self.call(&request)?;
        Ok(response.configuration)
    }

    /// Send only the given fields. The API treats this PUT as a partial
    /// update: fields absent from `changes` are left untouched.
    pub fn set_flag_configuration(
        &self,
        application_id: &str,
        flag_id: &str,
        environment_id: &str,
        changes: &Map<String, Value>,
    ) -> Result<()> {
        let path = self.configuration_path(application_id, flag_id, environment_id);
        let request = ApiRequest::new(Method::PUT, path).json(changes)?;
        self.transport.send(&request)?;
        Ok(())
    }

    fn call<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R> {
        let body = self.transport.send(request)?;
        serde_json::from_value(body)
            .map_err(|source| FmError::Decode { path: request.path(), source })
    }

    fn app_scope<'a>(&'a self, application_id: &'a str) -> &'a str {
        if self.use_org_as_app {
            &self.org_id
        } else {
            application_id
        }
    }

    fn flags_path(&self, application_id: &str, rest: &[&str]) -> Vec<String> {
        let mut segments: Vec<String> =
            ["v2", "applications", self.app_scope(application_id), "flags"]
                .iter()
                .map(|s| s.to_string())
                .collect();
        segments.extend(rest.iter().map(|s| s.to_string()));
        segments
    }

    fn configuration_path(
        &self,
        application_id: &str,
        flag_id: &str,
        environment_id: &str,
    ) -> Vec<String> {
        self.flags_path(application_id, &[flag_id, "configuration", "environments", environment_id])
    }
}
