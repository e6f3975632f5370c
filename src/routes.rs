//! Route generation - one article page per post

use serde::Serialize;
use std::fmt;

use crate::content::ContentItem;
use crate::inventory::Inventory;

/// Path prefix shared by every article page
pub const ROUTE_PREFIX: &str = "articles";

/// The page path of a post: `articles/<slug>`, no trailing slash
pub fn route_path(slug: &str) -> String {
    format!("{}/{}", ROUTE_PREFIX, slug)
}

/// Template a route is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Post,
}

impl Template {
    /// Name of the template file in the renderer
    pub fn file_name(self) -> &'static str {
        match self {
            Template::Post => "post.html",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Data handed to the template so it can fetch its post again
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteContext {
    pub slug: String,
}

/// A page binding: path, template and context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: String,
    pub template: Template,
    pub context: RouteContext,
}

impl Route {
    /// The article route of a post
    pub fn for_item(item: &ContentItem) -> Self {
        Self {
            path: route_path(&item.slug),
            template: Template::Post,
            context: RouteContext {
                slug: item.slug.clone(),
            },
        }
    }
}

/// Receives the routes of a build
pub trait RouteRegistry {
    fn register(&mut self, route: Route);
}

/// In-memory route registry, consumed by the page generator
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteRegistry for RouteTable {
    fn register(&mut self, route: Route) {
        self.routes.push(route);
    }
}

impl IntoIterator for RouteTable {
    type Item = Route;
    type IntoIter = std::vec::IntoIter<Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.into_iter()
    }
}

/// Register one route per post and return how many were registered.
///
/// Cannot fail: the inventory already guarantees non-empty, unique slugs,
/// and a failed content query never produces an inventory.
pub fn generate_routes<R: RouteRegistry + ?Sized>(inventory: &Inventory, registry: &mut R) -> usize {
    for item in inventory.items() {
        tracing::info!("Slug {}", item.slug);
        registry.register(Route::for_item(item));
    }
    inventory.len()
}
