mod common;

use std::fs;

use common::TestPack;
use repack::{
    common::Config,
    error::{BuildError, DiagnosticKind, Warning},
    pack_format, CompileError,
};

fn textures() -> TestPack {
    TestPack::new()
        .with_file("textures/fire.png", "fire texture")
        .with_file("textures/foo.png", "foo texture")
        .with_file("other/foo.png", "other foo texture")
        .with_file("models/bow.json", "{}")
}

#[test]
fn compiles_pack() {
    let pack = textures().with_file(
        "swords.rep",
        "let tex = \"textures\"\nmatch { display.Name = \"Fire Sword\" } for {\n  items { sword } = \"$(tex)/fire\"\n}",
    );
    let warnings = pack.compile_ok();
    assert!(warnings.is_empty());

    assert_eq!(
        pack.read_properties("fire"),
        "type=item\nitems=wooden_sword stone_sword iron_sword golden_sword diamond_sword netherite_sword\ntexture.wooden_sword=fire\ntexture.stone_sword=fire\ntexture.iron_sword=fire\ntexture.golden_sword=fire\ntexture.diamond_sword=fire\ntexture.netherite_sword=fire\nnbt.display.Name=Fire Sword\n"
    );
    assert_eq!(
        pack.read("assets/minecraft/optifine/cit/fire.png"),
        "fire texture"
    );
    assert!(!pack.exists("pack.mcmeta"));
}

#[test]
fn same_texture_merges() {
    let pack = textures().with_file(
        "a.rep",
        "any for {\n  items { bow = \"textures/fire\" }\n  items { crossbow = \"textures/fire.png\" }\n}",
    );
    pack.compile_ok();

    assert_eq!(
        pack.read_properties("fire"),
        "type=item\nitems=bow crossbow\ntexture.bow=fire\ntexture.crossbow=fire\n"
    );
    assert!(!pack.exists("assets/minecraft/optifine/cit/fire1.properties"));
}

#[test]
fn weights() {
    let pack = textures()
        .with_file("a.rep", "match { #weight = \"5\" } for { items = \"textures/fire\" }")
        .with_file("b.rep", "any for { items = \"textures/foo\" }");
    pack.compile_ok();

    assert_eq!(pack.read_properties("fire"), "type=item\ntexture=fire\nweight=5\n");
    assert_eq!(pack.read_properties("foo"), "type=item\ntexture=foo\n");
}

#[test]
fn name_collisions() {
    let pack = textures().with_file(
        "a.rep",
        "any for { items = \"textures/foo\" }\nany for { elytras = \"other/foo\" }",
    );
    pack.compile_ok();

    assert_eq!(pack.read_properties("foo"), "type=item\ntexture=foo\n");
    assert_eq!(pack.read_properties("foo1"), "type=elytra\ntexture=foo1\n");
    assert_eq!(
        pack.read("assets/minecraft/optifine/cit/foo.png"),
        "foo texture"
    );
    assert_eq!(
        pack.read("assets/minecraft/optifine/cit/foo1.png"),
        "other foo texture"
    );
}

#[test]
fn models_and_copies() {
    let pack = textures()
        .with_file("extra/sounds/a.ogg", "a")
        .with_file("extra/b.txt", "b")
        .with_file(
            "a.rep",
            "any for { items { bow model = \"models/bow\" } }\ncopy { \"extra\" => \"assets/minecraft/custom\" }",
        );
    pack.compile_ok();

    assert_eq!(
        pack.read_properties("bow"),
        "type=item\nitems=bow\nmodel=bow.json\n"
    );
    assert_eq!(pack.read("assets/minecraft/optifine/cit/bow.json"), "{}");
    assert_eq!(pack.read("assets/minecraft/custom/sounds/a.ogg"), "a");
    assert_eq!(pack.read("assets/minecraft/custom/b.txt"), "b");
}

#[test]
fn missing_for() {
    let pack = textures().with_file("a.rep", "match { display.Name = \"x\" }");
    let (result, config) = pack.compile(Config::default());

    let Err(CompileError::Failed(diagnostics)) = result else {
        panic!("Expected the compilation to fail");
    };
    let message = config.format_diagnostics(&diagnostics);
    assert!(
        message.contains("missing FOR_STATEMENT after MATCH_STATEMENT"),
        "{message}"
    );
    assert!(!pack.output().exists());
}

#[test]
fn directories_are_not_textures() {
    let pack = textures().with_file(
        "a.rep",
        "any for { items = \"textures\" }\nany for { armor = \"\" }",
    );
    let (result, _) = pack.compile(Config::default());

    let Err(CompileError::Failed(diagnostics)) = result else {
        panic!("Expected the compilation to fail");
    };
    let missing: Vec<_> = diagnostics
        .iter()
        .filter_map(|diagnostic| match &diagnostic.kind {
            DiagnosticKind::Build(BuildError::MissingAsset { path, .. }) => Some(path.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(missing, vec!["textures", ""]);
    assert!(!pack.output().exists());
}

#[test]
fn errors_keep_old_output() {
    let pack = textures().with_file("a.rep", "any for { items = \"textures/missing\" }");
    fs::create_dir_all(pack.output()).unwrap();
    fs::write(pack.output().join("old.txt"), "old").unwrap();

    let (result, _) = pack.compile(Config::default());
    let Err(CompileError::Failed(diagnostics)) = result else {
        panic!("Expected the compilation to fail");
    };
    assert!(diagnostics
        .errors()
        .any(|diagnostic| matches!(diagnostic.kind, DiagnosticKind::Build(BuildError::MissingAsset { .. }))));
    assert_eq!(pack.read("old.txt"), "old");
}

#[test]
fn stale_output_is_removed() {
    let pack = textures().with_file("a.rep", "any for { items = \"textures/fire\" }");
    fs::create_dir_all(pack.output()).unwrap();
    fs::write(pack.output().join("old.txt"), "old").unwrap();

    pack.compile_ok();
    assert!(!pack.exists("old.txt"));
    assert!(pack.exists("assets/minecraft/optifine/cit/fire.properties"));
}

#[test]
fn keep_output() {
    let pack = textures().with_file("a.rep", "any for { items = \"textures/fire\" }");
    fs::create_dir_all(pack.output()).unwrap();
    fs::write(pack.output().join("old.txt"), "old").unwrap();

    let config = Config {
        clean_output: false,
        ..Config::default()
    };
    let (result, _) = pack.compile(config);
    assert!(result.is_ok());
    assert_eq!(pack.read("old.txt"), "old");
}

#[test]
fn pack_mcmeta() {
    let pack = textures().with_file("a.rep", "any for { items = \"textures/fire\" }");
    let config = Config {
        pack_format: Some(pack_format("1.19.4").unwrap()),
        pack_description: "Fire swords".to_string(),
        ..Config::default()
    };
    let (result, _) = pack.compile(config);
    assert!(result.is_ok());
    assert_eq!(
        pack.read("pack.mcmeta"),
        "{\n  \"pack\": {\n    \"pack_format\": 13,\n    \"description\": \"Fire swords\"\n  }\n}\n"
    );
}

#[test]
fn unknown_version() {
    assert!(matches!(
        pack_format("0.9"),
        Err(CompileError::UnknownVersion { version }) if version == "0.9"
    ));
}

#[test]
fn warnings_are_returned() {
    let pack = textures().with_file("a.rep", "any for { items { nothing = \"textures/fire\" } }");
    let warnings = pack.compile_ok();

    assert_eq!(warnings.len(), 1);
    assert!(matches!(
        &warnings.iter().next().unwrap().kind,
        DiagnosticKind::Warning(Warning::NoItemMatches { key }) if key == "nothing"
    ));
}

#[test]
fn missing_input_directory() {
    let pack = TestPack::new();
    let mut config = repack::CompileConfig::new(Config::default());
    let result = config.compile_to(&pack.input().join("missing"), &pack.output());

    let Err(CompileError::Failed(diagnostics)) = result else {
        panic!("Expected the compilation to fail");
    };
    assert!(matches!(
        diagnostics.iter().next().unwrap().kind,
        DiagnosticKind::Build(BuildError::InvalidInputDirectory { .. })
    ));
}
