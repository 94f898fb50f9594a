//! View registry.
//!
//! Merges the client views recorded in `views.json` with the routes the
//! server declares and renders the list the page router consumes:
//!
//! ```text
//! views.json ─┐
//!             ├─> Vec<AvailableView> ─> JSON | window.Vaadin.views = ...;
//! routes.json ┘
//! ```

mod literal;

pub use literal::literal_to_json;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::view::{ViewData, ViewIndex};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("cannot read `{}`", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid JSON in `{}`", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// One routable view, client or server side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableView {
    pub id: String,
    pub route: String,
    pub client_side: bool,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// A route declared by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRoute {
    pub path: String,
    #[serde(default)]
    pub title: Option<String>,
    pub component: String,
}

/// Client views in index order, then server routes in declaration order.
pub fn build_available_views(index: &ViewIndex, server: &[ServerRoute]) -> Vec<AvailableView> {
    index
        .iter()
        .map(|(id, data)| client_view(id, data))
        .chain(server.iter().map(server_view))
        .collect()
}

fn client_view(id: &str, data: &ViewData) -> AvailableView {
    let metadata = data
        .meta_value
        .as_deref()
        .and_then(literal_to_json)
        .filter(Value::is_object);
    if data.meta_value.is_some() && metadata.is_none() {
        crate::debug!("routes"; "{id}: meta is not a static object, ignored");
    }

    AvailableView {
        id: id.to_string(),
        route: derive_route(id),
        client_side: true,
        title: derive_title(id, &data.default_name, metadata.as_ref()),
        metadata,
    }
}

fn server_view(route: &ServerRoute) -> AvailableView {
    let url = format!("/{}", route.path.trim_start_matches('/'));
    AvailableView {
        id: url.clone(),
        route: url,
        client_side: false,
        title: route
            .title
            .clone()
            .unwrap_or_else(|| route.component.clone()),
        metadata: None,
    }
}

/// Route of a view file: `/home/index.tsx` → `/home`, `/about.tsx` → `/about`.
pub fn derive_route(id: &str) -> String {
    let path = id.replace('\\', "/");
    let path = path.trim_start_matches('/');
    let stem = match path.rfind('.') {
        Some(dot) if !path[dot..].contains('/') => &path[..dot],
        _ => path,
    };
    let stem = if stem == "index" {
        ""
    } else {
        stem.strip_suffix("/index").unwrap_or(stem)
    };
    format!("/{stem}")
}

/// `metadata.title`, else the default export name, else the id.
pub fn derive_title(id: &str, default_name: &str, metadata: Option<&Value>) -> String {
    let title = match metadata.and_then(|m| m.get("title")) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => default_name.to_string(),
        Some(other) => other.to_string(),
    };
    if title.trim().is_empty() {
        id.to_string()
    } else {
        title
    }
}

pub fn load_views(path: &Path) -> Result<ViewIndex, RegistryError> {
    let text = read(path)?;
    ViewIndex::from_json(&text).map_err(|source| RegistryError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_server_routes(path: &Path) -> Result<Vec<ServerRoute>, RegistryError> {
    let text = read(path)?;
    serde_json::from_str(&text).map_err(|source| RegistryError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, RegistryError> {
    fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn render_json(views: &[AvailableView], pretty: bool) -> String {
    let json = if pretty {
        serde_json::to_string_pretty(views)
    } else {
        serde_json::to_string(views)
    };
    json.unwrap_or_else(|_| String::from("[]"))
}

/// Script assigning the list to `window.Vaadin.views`, `None` when empty.
pub fn render_script(views: &[AvailableView]) -> Option<String> {
    if views.is_empty() {
        return None;
    }
    Some(format!("window.Vaadin.views = {};", render_json(views, false)))
}
