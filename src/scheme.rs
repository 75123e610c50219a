use crate::error::{Error, Result};
use roxmltree::{Document, Node};
use std::path::Path;
use tokio::fs;

const TEST_BUNDLE_SUFFIX: &str = ".xctest";

/// One test bundle target inside a scheme's test action, with the identifiers
/// of the tests marked not to run.
#[derive(Debug, Clone)]
pub struct Testable {
    pub name: String,
    pub skipped_tests: Vec<String>,
}

pub async fn parse_scheme(path: &Path) -> Result<Vec<Testable>> {
    let data = fs::read_to_string(path)
        .await
        .map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

    parse_scheme_xml(&data, path)
}

fn parse_scheme_xml(xml: &str, path: &Path) -> Result<Vec<Testable>> {
    let doc = Document::parse(xml).map_err(|e| parse_error(path, e.to_string()))?;

    let root = doc.root_element();
    if root.tag_name().name() != "Scheme" {
        return Err(parse_error(
            path,
            format!(
                "expected Scheme root element, found {}",
                root.tag_name().name()
            ),
        ));
    }

    let test_action = child_element(root, "TestAction")
        .ok_or_else(|| parse_error(path, "missing TestAction section".to_string()))?;

    let mut testables = Vec::new();
    let Some(container) = child_element(test_action, "Testables") else {
        return Ok(testables);
    };

    for reference in container
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "TestableReference")
    {
        testables.push(parse_testable(reference, path)?);
    }

    Ok(testables)
}

fn parse_testable(reference: Node, path: &Path) -> Result<Testable> {
    // The primary buildable reference is by convention the first one listed.
    let buildable = child_element(reference, "BuildableReference").ok_or_else(|| {
        parse_error(
            path,
            "TestableReference without a BuildableReference".to_string(),
        )
    })?;

    let product = buildable.attribute("BuildableName").ok_or_else(|| {
        parse_error(
            path,
            "BuildableReference without a BuildableName attribute".to_string(),
        )
    })?;

    let name = product
        .strip_suffix(TEST_BUNDLE_SUFFIX)
        .unwrap_or(product)
        .to_string();

    let mut skipped_tests = Vec::new();
    if let Some(skipped) = child_element(reference, "SkippedTests") {
        for test in skipped
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "Test")
        {
            let identifier = test.attribute("Identifier").ok_or_else(|| {
                parse_error(path, "Test without an Identifier attribute".to_string())
            })?;
            skipped_tests.push(identifier.to_string());
        }
    }

    Ok(Testable {
        name,
        skipped_tests,
    })
}

fn child_element<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn parse_error(path: &Path, detail: String) -> Error {
    Error::Parse {
        path: path.to_path_buf(),
        detail,
    }
}
