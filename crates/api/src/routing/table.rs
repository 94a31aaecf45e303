use serde::Serialize;

use super::{RouteError, RouteMethod};

/// One declared route, as it was written and as it is served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDefinition {
    #[serde(serialize_with = "serialize_method")]
    pub method: RouteMethod,
    /// Path relative to the enclosing scope.
    pub path: String,
    /// Path the router actually matches.
    pub full_path: String,
    pub action_id: String,
    /// Middleware names, outermost first.
    pub middlewares: Vec<&'static str>,
}

/// Declared routes in declaration order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<RouteDefinition>,
}

impl RouteTable {
    /// Record a route, rejecting anything axum would refuse to build.
    ///
    /// The same method on the same path is a duplicate. Two paths that only
    /// differ in parameter names (`/users/{id}` and `/users/{uid}`) cannot
    /// coexist in the matcher either.
    pub(crate) fn insert(&mut self, definition: RouteDefinition) -> Result<(), RouteError> {
        let shape = path_shape(&definition.full_path);

        for existing in &self.routes {
            if existing.full_path == definition.full_path {
                if existing.method == definition.method {
                    return Err(RouteError::DuplicateRoute {
                        method: definition.method,
                        path: definition.full_path,
                    });
                }
            } else if path_shape(&existing.full_path) == shape {
                return Err(RouteError::ConflictingRoute {
                    path: definition.full_path,
                    existing: existing.full_path.clone(),
                });
            }
        }

        self.routes.push(definition);
        Ok(())
    }

    /// Append every route of a closed child scope.
    pub(crate) fn absorb(&mut self, child: RouteTable) -> Result<(), RouteError> {
        for definition in child.routes {
            self.insert(definition)?;
        }
        Ok(())
    }

    pub fn find(&self, method: RouteMethod, full_path: &str) -> Option<&RouteDefinition> {
        self.routes
            .iter()
            .find(|r| r.method == method && r.full_path == full_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDefinition> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteDefinition;
    type IntoIter = std::slice::Iter<'a, RouteDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

/// `/users/{id}/x` -> `/users/{}/x`
fn path_shape(path: &str) -> String {
    path.split('/')
        .map(|segment| if segment.starts_with('{') { "{}" } else { segment })
        .collect::<Vec<_>>()
        .join("/")
}

fn serialize_method<Ser: serde::Serializer>(method: &RouteMethod, s: Ser) -> Result<Ser::Ok, Ser::Error> {
    s.serialize_str(method.as_str())
}
