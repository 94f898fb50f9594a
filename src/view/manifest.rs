//! Artifact writer.
//!
//! Two outputs are derived from the index:
//!
//! ```text
//! <parent(out_dir)>/views.json   {"/home/index.tsx":{"metaValue":"...","defaultName":"Home"}}
//! <root>/generated/views.ts      import Home from '../views/home/index.js'
//!                                const views = { '/home/index.tsx': Home };
//!                                export default views;
//! ```
//!
//! Both files are written independently and failures are only logged.

use std::fs;
use std::io;
use std::path::Path;

use rustc_hash::FxHashSet;

use super::ViewIndex;
use crate::plugin::BuildContext;

/// Binding used for anonymous default exports.
const ANONYMOUS_BINDING: &str = "View";

/// Outcome of one artifact write pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteReport {
    pub json: bool,
    pub manifest: bool,
}

impl WriteReport {
    pub fn is_complete(&self) -> bool {
        self.json && self.manifest
    }
}

/// Write `views.json` and the generated manifest for `index`.
pub fn write_artifacts(ctx: &BuildContext, index: &ViewIndex) -> WriteReport {
    let json = write_logged(&ctx.views_json_path(), &index.serialize());
    let manifest = write_logged(
        &ctx.manifest_path(),
        &render_manifest(index, &ctx.views_import_base()),
    );
    WriteReport { json, manifest }
}

fn write_logged(path: &Path, content: &str) -> bool {
    match write_file(path, content) {
        Ok(()) => {
            crate::debug!("write"; "{}", path.display());
            true
        }
        Err(e) => {
            crate::log!("error"; "failed to write {}: {}", path.display(), e);
            false
        }
    }
}

fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

/// Render the manifest module.
///
/// `import_base` is the module specifier of the views directory as seen from
/// the manifest (normally `../views`).
pub fn render_manifest(index: &ViewIndex, import_base: &str) -> String {
    let mut bindings = Bindings::default();
    let entries: Vec<_> = index
        .iter()
        .map(|(key, data)| (key, bindings.claim(&data.default_name)))
        .collect();

    let mut out = String::new();
    for (key, binding) in &entries {
        out.push_str(&format!(
            "import {binding} from '{}'\n",
            escape_literal(&import_specifier(import_base, key))
        ));
    }
    if !entries.is_empty() {
        out.push('\n');
    }

    let pairs: Vec<_> = entries
        .iter()
        .map(|(key, binding)| format!("'{}': {binding}", escape_literal(key)))
        .collect();
    if pairs.is_empty() {
        out.push_str("const views = {};\n");
    } else {
        out.push_str(&format!("const views = {{ {} }};\n", pairs.join(", ")));
    }
    out.push_str("export default views;");
    out
}

/// Module specifier for a view: original extension replaced by `.js`.
fn import_specifier(import_base: &str, key: &str) -> String {
    let key = key.replace('\\', "/");
    let stem = match Path::new(&key).extension().and_then(|e| e.to_str()) {
        Some(ext) => &key[..key.len() - ext.len() - 1],
        None => key.as_str(),
    };
    let base = import_base.trim_end_matches('/');
    if stem.starts_with('/') {
        format!("{base}{stem}.js")
    } else {
        format!("{base}/{stem}.js")
    }
}

/// Escape text for a single-quoted JS string literal.
fn escape_literal(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Local binding names already used in the manifest.
#[derive(Default)]
struct Bindings {
    used: FxHashSet<String>,
}

impl Bindings {
    /// Claim `name`, or a numbered variant when it is empty or taken.
    fn claim(&mut self, name: &str) -> String {
        let base = if name.is_empty() { ANONYMOUS_BINDING } else { name };
        let mut candidate = base.to_string();
        let mut counter = 2;
        while self.used.contains(&candidate) {
            candidate = format!("{base}{counter}");
            counter += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

/// Relative module path from `from_dir` to `to_dir`, `/`-separated.
///
/// Falls back to the absolute target when the two share no prefix.
pub fn relative_specifier(from_dir: &Path, to_dir: &Path) -> String {
    let from: Vec<_> = from_dir.components().collect();
    let to: Vec<_> = to_dir.components().collect();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();
    if common == 0 {
        return to_dir.to_string_lossy().replace('\\', "/");
    }

    let mut parts: Vec<String> = vec!["..".to_string(); from.len() - common];
    parts.extend(
        to[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    if parts.is_empty() || parts[0] != ".." {
        parts.insert(0, ".".to_string());
    }
    parts.join("/")
}
