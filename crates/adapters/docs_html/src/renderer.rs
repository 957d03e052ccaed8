//! [`DocRenderer`] producing a static HTML site.

use askama::Template;

use virtapi_app::docs::DocSet;
use virtapi_app::ports::{DocRenderer, Site};
use virtapi_domain::error::ModelError;

use crate::error::RenderError;
use crate::views::{AreaView, IndexTemplate, ServiceLink, ServiceTemplate, service_href};

/// Renders `index.html` and `services/<name>.html` pages.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    title: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new("API Reference")
    }
}

impl HtmlRenderer {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

fn render_page(page: &str, template: &impl Template) -> Result<String, RenderError> {
    template.render().map_err(|source| RenderError::Template {
        page: page.to_owned(),
        source,
    })
}

impl DocRenderer for HtmlRenderer {
    fn render(&self, docs: &DocSet) -> Result<Site, ModelError> {
        let mut site = Site::default();

        let index = IndexTemplate {
            title: self.title.clone(),
            areas: docs
                .areas()
                .into_iter()
                .map(|(name, services)| AreaView {
                    name: name.to_owned(),
                    services: services.into_iter().map(ServiceLink::from).collect(),
                })
                .collect(),
        };
        site.insert("index.html", render_page("index.html", &index)?);

        for service in &docs.services {
            let path = service_href(&service.name.to_string());
            let page = ServiceTemplate::new(&self.title, service);
            let html = render_page(&path, &page)?;
            site.insert(path, html);
        }

        tracing::debug!(pages = site.len(), "documentation rendered");
        Ok(site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use virtapi_app::catalog::Catalog;
    use virtapi_app::checker::ModelChecker;
    use virtapi_domain::area::Area;
    use virtapi_domain::documentation::{Documentation, Metadata};
    use virtapi_domain::model::Model;
    use virtapi_domain::name::Name;
    use virtapi_domain::operation::Operation;
    use virtapi_domain::parameter::Parameter;
    use virtapi_domain::service::{Locator, Service};

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    fn docs() -> DocSet {
        let restore = Operation::builder()
            .name(name("restore"))
            .doc(
                Documentation::new(
                    "Restores a virtual machine snapshot.\n\n[source]\n----\nPOST /ovirt-engine/api/vms/123/snapshots/456/restore\n----\n",
                )
                .with_metadata(Metadata {
                    authors: vec!["Daniel Erez <derez@redhat.com>".to_owned()],
                    date: Some("14 Sep 2016".to_owned()),
                    status: Some("added".to_owned()),
                    since: None,
                }),
            )
            .parameter(Parameter::input(name("restore_memory"), "Boolean".parse().unwrap()))
            .constraint("optional(restore_memory)".parse().unwrap())
            .build()
            .unwrap();
        let id = Parameter::input(name("id"), "String".parse().unwrap());
        let model = Model::builder()
            .root(name("system"))
            .service(
                Service::builder()
                    .name(name("system"))
                    .locator(Locator::new(name("snapshot"), name("snapshot")).parameter(id))
                    .build()
                    .unwrap(),
            )
            .service(
                Service::builder()
                    .name(name("snapshot"))
                    .doc(Documentation::new("A <virtual machine> snapshot."))
                    .area(Area::new("Storage").unwrap())
                    .operation(restore)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        DocSet::build(&Catalog::assemble(model, &ModelChecker::default()))
    }

    #[test]
    fn should_render_index_and_one_page_per_service() {
        let site = HtmlRenderer::default().render(&docs()).unwrap();
        let paths: Vec<String> = site.pages().map(|p| p.path).collect();
        assert_eq!(
            paths,
            ["index.html", "services/snapshot.html", "services/system.html"]
        );
    }

    #[test]
    fn should_group_index_by_area() {
        let site = HtmlRenderer::new("oVirt API").render(&docs()).unwrap();
        let index = site.get("index.html").unwrap();
        assert!(index.contains("<title>oVirt API</title>"));
        assert!(index.contains("<h2>Storage</h2>"));
        assert!(index.contains("href=\"services/snapshot.html\""));
        assert!(index.contains("A &lt;virtual machine&gt; snapshot."));
    }

    #[test]
    fn should_render_operation_details() {
        let site = HtmlRenderer::default().render(&docs()).unwrap();
        let page = site.get("services/snapshot.html").unwrap();
        assert!(page.contains("SnapshotService"));
        assert!(page.contains("POST /{snapshot:id}/restore"));
        assert!(page.contains("<pre class=\"listing\"><code>POST /ovirt-engine/api/vms/123/snapshots/456/restore</code></pre>"));
        assert!(page.contains("restore_memory"));
        assert!(page.contains("2016-09-14"));
        assert!(page.contains("Daniel Erez &lt;derez@redhat.com&gt;"));
    }
}
