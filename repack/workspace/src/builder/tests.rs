use std::path::Path;

use repack_common::{
    file_provider::{FsFileProvider, MemoryFileProvider},
    CompileContext,
};
use repack_error::{BuildError, DiagnosticKind, Diagnostics, LexError, ParseError};

use crate::{Predicate, PredicateType, Workspace, WorkspaceBuilder};

fn build(provider: MemoryFileProvider) -> (Option<Workspace>, Diagnostics) {
    let mut ctx = CompileContext::default();
    WorkspaceBuilder::new(&mut ctx, provider, "pack")
        .build()
        .into_parts()
}

fn build_errors(diagnostics: &Diagnostics) -> Vec<BuildError> {
    diagnostics
        .iter()
        .filter_map(|diagnostic| match &diagnostic.kind {
            DiagnosticKind::Build(err) => Some(err.clone()),
            _ => None,
        })
        .collect()
}

fn textures() -> MemoryFileProvider {
    MemoryFileProvider::default()
        .with_file("pack/textures/sword.png", "")
        .with_file("pack/textures/local.png", "")
        .with_file("pack/textures/global.png", "")
        .with_file("pack/models/bow.json", "")
}

#[test]
fn local_shadows_global() {
    let provider = textures()
        .with_file(
            "pack/a.rep",
            "let name = \"local\"\nany for { items = \"textures/$(name)\" }",
        )
        .with_file("pack/b.rep", "global name = \"global\"");
    let (workspace, diagnostics) = build(provider);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    let workspace = workspace.unwrap();
    let block = workspace.match_predicates().next().unwrap();
    assert_eq!(
        block.predicates,
        vec![Predicate::SetAll {
            kind: PredicateType::Items,
            texture: "textures/local.png".to_string(),
            token: repack_parser::Token::synthetic("\"textures/$(name)\""),
        }]
    );
    assert_eq!(workspace.globals.get("name").unwrap().value, "global");
}

#[test]
fn globals_are_visible_in_other_files() {
    let provider = textures()
        .with_file("pack/a.rep", "any for { items = \"textures/$(name)\" }")
        .with_file("pack/b.rep", "global name = \"global\"");
    let (workspace, diagnostics) = build(provider);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    let workspace = workspace.unwrap();
    let block = workspace.match_predicates().next().unwrap();
    assert!(matches!(
        &block.predicates[0],
        Predicate::SetAll { texture, .. } if texture == "textures/global.png"
    ));
}

#[test]
fn unresolved_variable() {
    let provider = textures().with_file(
        "pack/a.rep",
        "match { nbt.display.Name = \"$(missing)Sword\" } for { items = \"textures/sword\" }",
    );
    let (workspace, diagnostics) = build(provider);
    assert!(workspace.is_none());
    assert_eq!(
        build_errors(&diagnostics),
        vec![BuildError::UnresolvedVariable {
            name: "missing".to_string()
        }]
    );
    let location = diagnostics.iter().next().unwrap().location.unwrap();
    assert_eq!((location.line, location.column), (1, 28));
}

#[test]
fn globals_from_later_files() {
    let provider = textures()
        .with_file(
            "pack/a.rep",
            "let sword = \"$(dir)/sword\"\nglobal local = \"$(dir)/local\"\nany for { items = \"$(sword)\" }",
        )
        .with_file("pack/b.rep", "global dir = \"$(base)\"\nglobal base = \"textures\"");
    let (workspace, diagnostics) = build(provider);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    let workspace = workspace.unwrap();
    assert_eq!(
        workspace.files[0].variables.get("sword").unwrap().value,
        "textures/sword"
    );
    assert_eq!(workspace.globals.get("local").unwrap().value, "textures/local");
    assert_eq!(workspace.globals.get("dir").unwrap().value, "textures");
}

#[test]
fn variable_cycles_are_unresolved() {
    let provider = textures().with_file(
        "pack/a.rep",
        "let a = \"$(b)\"\nlet b = \"$(a)\"",
    );
    let (workspace, diagnostics) = build(provider);
    assert!(workspace.is_none());
    assert_eq!(
        build_errors(&diagnostics),
        vec![BuildError::UnresolvedVariable {
            name: "a".to_string()
        }]
    );
}

#[test]
fn variables_reference_earlier_variables() {
    let provider = textures().with_file(
        "pack/a.rep",
        "let dir = \"textures\"\nlet sword = \"$(dir)/sword\"\nany for { items = \"$(sword)\" }",
    );
    let (workspace, diagnostics) = build(provider);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let workspace = workspace.unwrap();
    assert_eq!(
        workspace.files[0].variables.get("sword").unwrap().value,
        "textures/sword"
    );
}

#[test]
fn redefinition_keeps_first_value() {
    let provider = textures().with_file(
        "pack/a.rep",
        "let a = \"first\"\nlet a = \"second\"\nglobal a = \"global\"",
    );
    let (workspace, diagnostics) = build(provider);
    assert!(workspace.is_none());
    assert_eq!(
        build_errors(&diagnostics),
        vec![BuildError::VariableRedefined {
            name: "a".to_string()
        }]
    );
    let location = diagnostics.iter().next().unwrap().location.unwrap();
    assert_eq!((location.line, location.column), (2, 5));
}

#[test]
fn missing_assets() {
    let provider = textures().with_file(
        "pack/a.rep",
        "any for {\n  items { sword = \"textures/axe\" }\n  items { bow model = \"models/crossbow\" }\n}\ncopy { \"extra\" => \"assets\" }",
    );
    let (workspace, diagnostics) = build(provider);
    assert!(workspace.is_none());

    let missing: Vec<_> = build_errors(&diagnostics)
        .into_iter()
        .map(|err| match err {
            BuildError::MissingAsset { kind, path, .. } => (kind.to_string(), path),
            other => panic!("Unexpected error {other}"),
        })
        .collect();
    assert_eq!(
        missing,
        vec![
            ("texture".to_string(), "textures/axe".to_string()),
            ("model".to_string(), "models/crossbow".to_string()),
            ("copy source".to_string(), "extra".to_string())
        ]
    );
}

#[test]
fn assets_must_be_files() {
    let provider = textures().with_file(
        "pack/a.rep",
        "any for { items = \"\" }\nany for { items = \"textures\" }\nany for { items { bow model = \"models\" } }\ncopy { \"\" => \"assets\" }",
    );
    let (workspace, diagnostics) = build(provider);
    assert!(workspace.is_none());

    let missing: Vec<_> = build_errors(&diagnostics)
        .into_iter()
        .map(|err| match err {
            BuildError::MissingAsset { kind, path, .. } => (kind.to_string(), path),
            other => panic!("Unexpected error {other}"),
        })
        .collect();
    assert_eq!(
        missing,
        vec![
            ("texture".to_string(), String::new()),
            ("texture".to_string(), "textures".to_string()),
            ("model".to_string(), "models".to_string()),
            ("copy source".to_string(), String::new())
        ]
    );
}

#[test]
fn asset_paths_get_their_extension() {
    let provider = textures().with_file(
        "pack/a.rep",
        "any for {\n  items { sword = \"textures/sword.png\" }\n  items { bow model = \"models/bow\" }\n}",
    );
    let (workspace, diagnostics) = build(provider);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    let workspace = workspace.unwrap();
    let block = workspace.match_predicates().next().unwrap();
    let targets: Vec<_> = block
        .predicates
        .iter()
        .filter_map(Predicate::target)
        .map(|target| target.path().to_string())
        .collect();
    assert_eq!(targets, vec!["textures/sword.png", "models/bow.json"]);
}

#[test]
fn weights() {
    let provider = textures().with_file(
        "pack/a.rep",
        "match { #weight = \"5\" } for { items = \"textures/sword\" }\nmatch { a = \"b\" } for { items = \"textures/sword\" }",
    );
    let (workspace, diagnostics) = build(provider);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let weights: Vec<_> = workspace
        .unwrap()
        .match_predicates()
        .map(|block| block.weight)
        .collect();
    assert_eq!(weights, vec![5, 0]);

    for weight in ["heavy", " 2 "] {
        let provider = textures().with_file(
            "pack/a.rep",
            format!("match {{ #weight = \"{weight}\" }} for {{ items = \"textures/sword\" }}"),
        );
        let (workspace, diagnostics) = build(provider);
        assert!(workspace.is_none());
        assert_eq!(
            build_errors(&diagnostics),
            vec![BuildError::InvalidWeight {
                value: weight.to_string()
            }]
        );
    }
}

#[test]
fn every_file_is_checked() {
    let provider = textures()
        .with_file("pack/a.rep", "let a = \"unterminated")
        .with_file("pack/b.rep", "for {}")
        .with_file("pack/c.rep", "any for { items = \"textures/sword\" }");
    let (workspace, diagnostics) = build(provider);
    assert!(workspace.is_none());

    let kinds: Vec<_> = diagnostics.iter().map(|diag| diag.kind.clone()).collect();
    assert!(matches!(
        kinds[..],
        [
            DiagnosticKind::Lex(LexError::UnterminatedString),
            DiagnosticKind::Parse(ParseError::MisplacedChainedScope { .. })
        ]
    ));
}

#[test]
fn copies_and_any() {
    let provider = textures().with_file(
        "pack/a.rep",
        "copy { \"textures\" => \"assets/minecraft/textures/custom\", \"models/bow.json\" => \"bow.json\" }\nany for { elytras = \"textures/sword\" }",
    );
    let (workspace, diagnostics) = build(provider);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    let workspace = workspace.unwrap();
    let copies: Vec<_> = workspace
        .copies()
        .map(|copy| (copy.from.as_str(), copy.to.as_str()))
        .collect();
    assert_eq!(
        copies,
        vec![
            ("textures", "assets/minecraft/textures/custom"),
            ("models/bow.json", "bow.json")
        ]
    );

    let block = workspace.match_predicates().next().unwrap();
    assert!(block.conditions.is_empty());
    assert_eq!(block.weight, 0);
    assert_eq!(block.token.text(), "any");
}

#[test]
fn empty_workspace() {
    let (workspace, diagnostics) = build(textures());
    assert!(diagnostics.is_empty());
    assert!(workspace.unwrap().is_empty());
}

#[test]
fn missing_input_directory() {
    let mut ctx = CompileContext::default();
    let outcome = WorkspaceBuilder::new(
        &mut ctx,
        FsFileProvider,
        Path::new("this/directory/does/not/exist"),
    )
    .build();
    assert!(outcome.value.is_none());
    assert!(matches!(
        build_errors(&outcome.diagnostics)[..],
        [BuildError::InvalidInputDirectory { .. }]
    ));
}
