//! Sink URL builders

/// Business Central API root for an environment and company
pub fn business_central_base_url(environment: &str, environment_name: &str, company: &str) -> String {
    format!(
        "https://api.businesscentral.dynamics.com/v2.0/{}/{}/api/alletec/primavera/v2.0/companies({})",
        environment, environment_name, company
    )
}

/// Full URL of a collection path such as `/p6resources`
pub fn collection_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
