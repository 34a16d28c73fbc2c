mod common;

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use common::{relative_entries, write_tree};
use ndc::context::Context;
use ndc::error::{Error, Result};
use ndc::processor::{is_rendered_name_valid, render_name, Processor};
use ndc::renderer::MiniJinjaRenderer;
use ndc::store::{AssetEntry, AssetKind, DirStore, TemplateStore};
use tempfile::TempDir;

fn context() -> Context {
    let mut context = Context::new();
    context.insert("ProjectName", "Orders");
    context.insert("ServiceName", "orders");
    context.insert("Port", 8080_i64);
    context.insert("IncludeCache", false);
    context.insert("Services", Vec::<String>::new());
    context
}

fn sample_templates(root: &Path) {
    write_tree(
        root,
        &[
            ("svc/README.md", "# {{.ProjectName}}\n"),
            (
                "svc/src/{{.ProjectName}}Api/Program.cs",
                "var port = {{.Port}};\n",
            ),
            (
                "svc/src/{{.ProjectName}}.Api/{{.ServiceName}}.json",
                "{\"cache\": {{.IncludeCache}}}\n",
            ),
            ("svc/terraform/main.tf", "name = \"{{.ServiceName}}\"\n"),
        ],
    );
    fs::create_dir_all(root.join("svc/docs")).unwrap();
}

#[test]
fn test_materialize_mirrors_template_tree() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    sample_templates(templates.path());

    let ctx = context();
    let store = DirStore::new(templates.path());
    let renderer = MiniJinjaRenderer::new();
    let dest = output.path().join("orders");
    let generated = Processor::new(&store, &renderer, &ctx)
        .materialize("svc", &dest)
        .unwrap();

    // Every template entry maps to exactly one destination entry.
    let mut expected: Vec<PathBuf> = relative_entries(&templates.path().join("svc"))
        .into_iter()
        .map(|path| {
            path.components()
                .map(|c| render_name(c.as_os_str().to_str().unwrap(), &ctx).unwrap())
                .collect()
        })
        .collect();
    expected.sort();
    assert_eq!(relative_entries(&dest), expected);

    assert_eq!(generated.root, dest);
    assert_eq!(generated.files.len(), 4);
    assert_eq!(generated.directories.len(), 5);
    assert!(generated.directories.contains(&dest.join("docs")));

    assert_eq!(
        fs::read_to_string(dest.join("src/OrdersApi/Program.cs")).unwrap(),
        "var port = 8080;\n"
    );
    assert_eq!(
        fs::read_to_string(dest.join("src/Orders.Api/orders.json")).unwrap(),
        "{\"cache\": false}\n"
    );
    assert_eq!(
        fs::read_to_string(dest.join("README.md")).unwrap(),
        "# Orders\n"
    );
}

#[test]
fn test_materialize_matches_expected_tree() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let expected = TempDir::new().unwrap();
    sample_templates(templates.path());
    write_tree(
        expected.path(),
        &[
            ("README.md", "# Orders\n"),
            ("src/OrdersApi/Program.cs", "var port = 8080;\n"),
            ("src/Orders.Api/orders.json", "{\"cache\": false}\n"),
            ("terraform/main.tf", "name = \"orders\"\n"),
        ],
    );
    fs::create_dir_all(expected.path().join("docs")).unwrap();

    let ctx = context();
    let store = DirStore::new(templates.path());
    let renderer = MiniJinjaRenderer::new();
    Processor::new(&store, &renderer, &ctx)
        .materialize("svc", output.path())
        .unwrap();

    assert!(!dir_diff::is_different(output.path(), expected.path()).unwrap());
}

#[test]
fn test_rerun_overwrites_files() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    sample_templates(templates.path());

    let ctx = context();
    let store = DirStore::new(templates.path());
    let renderer = MiniJinjaRenderer::new();
    let processor = Processor::new(&store, &renderer, &ctx);
    let dest = output.path().join("orders");

    processor.materialize("svc", &dest).unwrap();
    let readme = dest.join("README.md");
    fs::write(&readme, "edited by hand, and longer than the template\n").unwrap();

    processor.materialize("svc", &dest).unwrap();
    assert_eq!(fs::read_to_string(&readme).unwrap(), "# Orders\n");
}

#[test]
fn test_unknown_placeholder_names_the_file() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_tree(templates.path(), &[("svc/src/Program.cs", "{{.Missing}}")]);

    let ctx = context();
    let store = DirStore::new(templates.path());
    let renderer = MiniJinjaRenderer::new();
    let err = Processor::new(&store, &renderer, &ctx)
        .materialize("svc", output.path())
        .unwrap_err();

    match &err {
        Error::TemplateError { path, .. } => assert_eq!(path, "svc/src/Program.cs"),
        other => panic!("expected TemplateError, got {other:?}"),
    }
    assert!(err.to_string().contains("svc/src/Program.cs"));
}

#[test]
fn test_failure_keeps_earlier_output() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_tree(
        templates.path(),
        &[
            ("svc/a.txt", "{{.ProjectName}}"),
            ("svc/b.txt", "{{if .IncludeCache}}"),
            ("svc/c.txt", "never reached"),
        ],
    );

    let ctx = context();
    let store = DirStore::new(templates.path());
    let renderer = MiniJinjaRenderer::new();
    let result = Processor::new(&store, &renderer, &ctx).materialize("svc", output.path());

    assert!(matches!(result, Err(Error::SyntaxError { ref path, .. }) if path == "svc/b.txt"));
    assert_eq!(
        fs::read_to_string(output.path().join("a.txt")).unwrap(),
        "Orders"
    );
    assert!(!output.path().join("b.txt").exists());
    assert!(!output.path().join("c.txt").exists());
}

#[test]
fn test_bad_directory_name() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_tree(templates.path(), &[("svc/{{.Services}}/x.txt", "x")]);

    let ctx = context();
    let store = DirStore::new(templates.path());
    let renderer = MiniJinjaRenderer::new();
    let result = Processor::new(&store, &renderer, &ctx).materialize("svc", output.path());
    assert!(matches!(result, Err(Error::NameError { .. })));
}

#[test]
fn test_missing_template_root() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let ctx = context();
    let store = DirStore::new(templates.path());
    let renderer = MiniJinjaRenderer::new();
    let result = Processor::new(&store, &renderer, &ctx).materialize("svc", output.path());
    assert!(matches!(result, Err(Error::AssetError { ref path, .. }) if path == "svc"));
}

/// Store that serves a fixed tree and fails to read one path.
struct FlakyStore {
    broken: &'static str,
    reads: RefCell<Vec<String>>,
}

impl TemplateStore for FlakyStore {
    fn list(&self, path: &str) -> Result<Vec<AssetEntry>> {
        let names: &[(&str, AssetKind)] = match path {
            "root" => &[("nested", AssetKind::Directory), ("top.txt", AssetKind::File)],
            "root/nested" => &[("inner.txt", AssetKind::File)],
            _ => &[],
        };
        Ok(names
            .iter()
            .map(|(name, kind)| AssetEntry {
                name: name.to_string(),
                kind: *kind,
            })
            .collect())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.reads.borrow_mut().push(path.to_string());
        if path == self.broken {
            return Err(Error::AssetError {
                path: path.to_string(),
                reason: "simulated read failure".to_string(),
            });
        }
        Ok(b"{{.ProjectName}}".to_vec())
    }
}

#[test]
fn test_store_failure_aborts_walk() {
    let output = TempDir::new().unwrap();
    let store = FlakyStore {
        broken: "root/nested/inner.txt",
        reads: RefCell::new(Vec::new()),
    };

    let ctx = context();
    let renderer = MiniJinjaRenderer::new();
    let err = Processor::new(&store, &renderer, &ctx)
        .materialize("root", output.path())
        .unwrap_err();

    assert!(err.to_string().contains("root/nested/inner.txt"));
    // Directories are walked in listing order, so top.txt is never read.
    assert_eq!(*store.reads.borrow(), vec!["root/nested/inner.txt"]);
    assert!(output.path().join("nested").is_dir());
    assert!(!output.path().join("top.txt").exists());
}

#[test]
fn test_render_name_rules() {
    let ctx = context();
    assert_eq!(render_name("{{.ProjectName}}.sln", &ctx).unwrap(), "Orders.sln");
    assert_eq!(render_name("{{.ProjectName}}Api", &ctx).unwrap(), "OrdersApi");
    assert_eq!(render_name("{{.Port}}", &ctx).unwrap(), "8080");
    assert!(matches!(
        render_name("{{.Nope}}.cs", &ctx),
        Err(Error::NameError { .. })
    ));
    assert!(!is_rendered_name_valid("."));
    assert!(!is_rendered_name_valid("a\\b"));
}
