use crate::config::Config;
use crate::error::Result;
use crate::posts::post_store;
use crate::projects::project_store;

pub fn post_route(slug: &str) -> String {
    format!("/posts/{}", slug)
}

pub fn project_route(slug: &str) -> String {
    format!("/other-projects/{}", slug)
}

/// Every page of the exported site, detail pages included.
pub fn static_routes(post_slugs: &[String], project_slugs: &[String]) -> Vec<String> {
    let mut routes = vec!["/".to_string(), "/posts".to_string()];
    routes.extend(post_slugs.iter().map(|slug| post_route(slug)));
    routes.push("/other-projects".to_string());
    routes.extend(project_slugs.iter().map(|slug| project_route(slug)));
    routes.push("/bio".to_string());
    routes.push("/publications".to_string());
    routes
}

/// Routes of the site described by `config`. Drafts get no page.
pub fn site_routes(config: &Config) -> Result<Vec<String>> {
    let post_slugs = post_store(config).list_slugs()?;
    let project_slugs = project_store(config).list_slugs()?;
    Ok(static_routes(&post_slugs, &project_slugs))
}
