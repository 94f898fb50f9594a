//! Print the available views for the page router.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::RoutesArgs;
use crate::config::ProjectConfig;
use crate::registry::{
    ServerRoute, build_available_views, load_server_routes, load_views, render_json, render_script,
};
use crate::utils::path::resolve_path;

pub fn run_routes(args: &RoutesArgs, config: &ProjectConfig) -> Result<()> {
    let output = render_routes(args, config)?;
    match &args.output {
        Some(path) => {
            fs::write(path, &output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            crate::log!("write"; "{}", path.display());
        }
        None if output.is_empty() => {}
        None => println!("{output}"),
    }
    Ok(())
}

/// Registry output as text; empty for a script with no views.
pub fn render_routes(args: &RoutesArgs, config: &ProjectConfig) -> Result<String> {
    let views_path = args
        .views
        .as_deref()
        .map(|p| resolve_path(p, &config.base))
        .unwrap_or_else(|| config.build_context().views_json_path());
    let index = load_views(&views_path)?;
    let server = server_routes(args.server.as_deref(), config)?;

    let views = build_available_views(&index, &server);
    crate::debug!("routes"; "{} client, {} server", index.len(), server.len());

    Ok(if args.script {
        render_script(&views).unwrap_or_default()
    } else {
        render_json(&views, args.pretty)
    })
}

/// An explicit `--server` file must exist; the configured one is optional.
fn server_routes(explicit: Option<&Path>, config: &ProjectConfig) -> Result<Vec<ServerRoute>> {
    let path: PathBuf = match explicit {
        Some(path) => resolve_path(path, &config.base),
        None if config.routes.server.is_file() => config.routes.server.clone(),
        None => return Ok(Vec::new()),
    };
    Ok(load_server_routes(&path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{ViewData, ViewIndex};
    use tempfile::TempDir;

    fn args() -> RoutesArgs {
        RoutesArgs {
            views: None,
            server: None,
            script: false,
            pretty: false,
            output: None,
        }
    }

    fn project(temp: &TempDir) -> ProjectConfig {
        let mut config = ProjectConfig::default();
        config.base = temp.path().to_path_buf();
        config.build.normalize(temp.path());
        config.routes.normalize(temp.path());

        let mut index = ViewIndex::new();
        index.insert("/home/index.tsx", ViewData::new("Home").with_meta("{title: 'Start'}"));
        let views_json = config.build_context().views_json_path();
        fs::create_dir_all(views_json.parent().unwrap()).unwrap();
        fs::write(views_json, index.serialize()).unwrap();
        config
    }

    #[test]
    fn test_client_views_only() {
        let temp = TempDir::new().unwrap();
        let config = project(&temp);
        let json = render_routes(&args(), &config).unwrap();
        assert_eq!(
            json,
            r#"[{"id":"/home/index.tsx","route":"/home","clientSide":true,"title":"Start","metadata":{"title":"Start"}}]"#
        );
    }

    #[test]
    fn test_configured_server_routes() {
        let temp = TempDir::new().unwrap();
        let config = project(&temp);
        fs::write(
            &config.routes.server,
            r#"[{"path": "flow", "title": "Flow view", "component": "FlowView"}]"#,
        )
        .unwrap();

        let mut args = args();
        args.script = true;
        let script = render_routes(&args, &config).unwrap();
        assert!(script.starts_with("window.Vaadin.views = ["));
        assert!(script.contains(r#""id":"/flow","route":"/flow","clientSide":false"#));
    }

    #[test]
    fn test_explicit_server_file_must_exist() {
        let temp = TempDir::new().unwrap();
        let config = project(&temp);
        let mut args = args();
        args.server = Some(temp.path().join("missing.json"));
        assert!(render_routes(&args, &config).is_err());
    }

    #[test]
    fn test_empty_script_is_blank() {
        let temp = TempDir::new().unwrap();
        let config = project(&temp);
        let views = temp.path().join("empty.json");
        fs::write(&views, "{}").unwrap();

        let mut args = args();
        args.views = Some(views);
        args.script = true;
        assert_eq!(render_routes(&args, &config).unwrap(), "");
    }
}
