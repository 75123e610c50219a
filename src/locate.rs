use crate::error::{Error, Result};
use ignore::WalkBuilder;
use roxmltree::{Document, Node};
use std::path::{Path, PathBuf};
use tokio::fs;

const SCHEME_EXTENSION: &str = "xcscheme";
const SCHEME_DIR: &str = "xcschemes";
const WORKSPACE_CONTENTS: &str = "contents.xcworkspacedata";

/// Where to look for scheme files: exactly one of a project bundle or a
/// workspace that references project bundles.
#[derive(Debug, Clone)]
pub enum SchemeSource {
    Project(PathBuf),
    Workspace(PathBuf),
}

impl SchemeSource {
    /// The project path wins when both are supplied; the workspace is only
    /// consulted as a fallback.
    pub fn from_args(project: Option<PathBuf>, workspace: Option<PathBuf>) -> Result<Self> {
        match (project, workspace) {
            (Some(project), _) => Ok(SchemeSource::Project(project)),
            (None, Some(workspace)) => Ok(SchemeSource::Workspace(workspace)),
            (None, None) => Err(Error::InvalidInput(
                "either a project or a workspace path is required".to_string(),
            )),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            SchemeSource::Project(path) | SchemeSource::Workspace(path) => path,
        }
    }
}

pub async fn locate_schemes(source: &SchemeSource, scheme: Option<&str>) -> Result<Vec<PathBuf>> {
    if let Some(name) = scheme {
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "scheme name must not be empty".to_string(),
            ));
        }
    }

    ensure_exists(source.path()).await?;

    let paths = match source {
        SchemeSource::Project(project) => schemes_in_project(project, scheme),
        SchemeSource::Workspace(workspace) => schemes_in_workspace(workspace, scheme).await?,
    };

    if paths.is_empty() {
        return Err(match scheme {
            Some(name) => Error::SchemeNotFound(name.to_string()),
            None => Error::NoSchemes,
        });
    }

    Ok(paths)
}

async fn ensure_exists(path: &Path) -> Result<()> {
    if fs::metadata(path).await.is_err() {
        return Err(Error::InvalidInput(format!(
            "path not found: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Matches `{xcshareddata,xcuserdata}/**/xcschemes/<name>.xcscheme` under the
/// project bundle. Results are sorted so discovery order is deterministic.
fn schemes_in_project(project: &Path, scheme: Option<&str>) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for subtree in ["xcshareddata", "xcuserdata"] {
        let root = project.join(subtree);
        if !root.is_dir() {
            continue;
        }

        // Scheme files live inside the .xcodeproj bundle, which is often
        // hidden from standard walks by gitignore rules.
        let walker = WalkBuilder::new(&root).standard_filters(false).build();

        for entry in walker.flatten() {
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != SCHEME_EXTENSION) {
                continue;
            }
            if path
                .parent()
                .and_then(|dir| dir.file_name())
                .is_none_or(|dir| dir != SCHEME_DIR)
            {
                continue;
            }
            if let Some(name) = scheme {
                if path.file_stem().is_none_or(|stem| stem != name) {
                    continue;
                }
            }

            found.push(path.to_path_buf());
        }
    }

    found.sort();
    found
}

async fn schemes_in_workspace(workspace: &Path, scheme: Option<&str>) -> Result<Vec<PathBuf>> {
    let contents = workspace_contents_path(workspace).await;
    let data = fs::read_to_string(&contents)
        .await
        .map_err(|source| Error::Read {
            path: contents.clone(),
            source,
        })?;

    // Relative file references resolve against the directory that contains
    // the .xcworkspace itself.
    let base = workspace.parent().unwrap_or(Path::new("")).to_path_buf();
    let projects = parse_workspace_refs(&data, &contents, &base)?;

    let mut found = Vec::new();
    for project in projects {
        found.extend(schemes_in_project(&project, scheme));
    }

    found.sort();
    found.dedup();
    Ok(found)
}

async fn workspace_contents_path(workspace: &Path) -> PathBuf {
    match fs::metadata(workspace).await {
        Ok(meta) if meta.is_dir() => workspace.join(WORKSPACE_CONTENTS),
        _ => workspace.to_path_buf(),
    }
}

fn parse_workspace_refs(xml: &str, path: &Path, base: &Path) -> Result<Vec<PathBuf>> {
    let doc = Document::parse(xml).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let root = doc.root_element();
    if root.tag_name().name() != "Workspace" {
        return Err(Error::Parse {
            path: path.to_path_buf(),
            detail: format!(
                "expected Workspace root element, found {}",
                root.tag_name().name()
            ),
        });
    }

    let mut refs = Vec::new();
    collect_refs(root, path, base, &mut refs)?;
    Ok(refs)
}

fn collect_refs(node: Node, path: &Path, base: &Path, refs: &mut Vec<PathBuf>) -> Result<()> {
    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "FileRef" => {
                let location = child.attribute("location").ok_or_else(|| Error::Parse {
                    path: path.to_path_buf(),
                    detail: "FileRef without a location attribute".to_string(),
                })?;
                refs.push(resolve_location(location, base));
            }
            "Group" => {
                let group_base = match child.attribute("location") {
                    Some(location) => resolve_location(location, base),
                    None => base.to_path_buf(),
                };
                collect_refs(child, path, &group_base, refs)?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Workspace locations carry a kind prefix: `group:` and `container:` are
/// relative to the enclosing document, `absolute:` is a full path, `self:`
/// names the enclosing directory itself.
fn resolve_location(location: &str, base: &Path) -> PathBuf {
    let (kind, rest) = location.split_once(':').unwrap_or(("group", location));
    match kind {
        "absolute" => PathBuf::from(rest),
        "self" => base.to_path_buf(),
        _ => base.join(rest),
    }
}
