/*
[INPUT]:  Project id, optional deployment and explicit credential
[OUTPUT]: Indexers serving a project deployment
[POS]:    HTTP layer - project endpoints
[UPDATE]: When project query parameters change
*/

use reqwest::Method;

use crate::auth::Credential;
use crate::http::{ConsumerHostClient, Result};
use crate::types::{ApiReply, ProjectIndexers, ProjectQuery};

impl ConsumerHostClient {
    /// Fetch the indexers (and their flex plans) of a project
    ///
    /// GET /projects/:projectId?deployment={deployment}
    pub async fn project_indexers(
        &self,
        credential: Option<&Credential>,
        query: &ProjectQuery,
    ) -> Result<ApiReply<ProjectIndexers>> {
        let mut builder = self.request(
            Method::GET,
            &["projects", query.project_id.as_str()],
            credential,
        )?;
        if let Some(deployment) = &query.deployment {
            builder = builder.query(&[("deployment", deployment)]);
        }
        self.send_json(builder).await
    }
}
