use std::fs;

use cocktails::assets::{AssetResolver, DirAssets};
use cocktails::catalog::Catalog;

#[test]
fn extends_merges_parent_and_resolves_relative_paths() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path();
    fs::write(
        root.join("base.toml"),
        r#"
[ui]
tick_ms = 250

[timer]
minutes = 1
seconds = 30
"#,
    )
    .expect("write base");
    fs::write(
        root.join("cocktails.toml"),
        r#"
extends = "base.toml"

[timer]
seconds = 15

[assets]
dir = "icons"

[catalog]
extra = ["more.toml"]
"#,
    )
    .expect("write config");

    let cfg = cocktails::config::load(&root.join("cocktails.toml")).expect("load");
    assert_eq!(cfg.ui.tick_ms, 250);
    assert_eq!(cfg.timer.selector().total_seconds(), 75);
    assert_eq!(cfg.assets_dir(), Some(root.join("icons")));
    assert_eq!(cfg.extra_catalogs(), vec![root.join("more.toml")]);
    assert_eq!(cfg.log.level, "info");
}

#[test]
fn extends_cycle_is_rejected() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let root = tmp.path();
    fs::write(root.join("a.toml"), "extends = \"b.toml\"\n").unwrap();
    fs::write(root.join("b.toml"), "extends = \"a.toml\"\n").unwrap();
    let err = cocktails::config::load(&root.join("a.toml")).unwrap_err();
    assert!(err.to_string().contains("cycle"), "{err}");
}

#[test]
fn missing_explicit_config_is_an_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    assert!(cocktails::config::load_or_default(Some(tmp.path().join("nope.toml").as_path())).is_err());
}

#[test]
fn extra_recipes_append_and_never_shadow_builtins() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("more.toml");
    fs::write(
        &path,
        r#"
[[recipes]]
id = "mojito"
name = "Mojito"
ingredients = ["40 ml rumu", "mięta"]
steps = ["1. Ugnieć miętę.", "2. Dodaj rum."]

[[recipes]]
id = "jag"
name = "Impostor"
"#,
    )
    .unwrap();

    let mut catalog = Catalog::builtin();
    assert_eq!(catalog.extend_from_file(&path).unwrap(), 2);
    assert_eq!(catalog.len(), 6);
    assert_eq!(catalog.find_by_id("mojito").unwrap().steps.len(), 2);
    assert_eq!(catalog.find_by_id("jag").unwrap().name, "Jager o Poranku");
}

#[test]
fn rejected_recipe_file_leaves_catalog_untouched() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("partial.toml");
    fs::write(
        &path,
        r#"
[[recipes]]
id = "mojito"
name = "Mojito"

[[recipes]]
id = "  "
name = "Blank"
"#,
    )
    .unwrap();

    let mut catalog = Catalog::builtin();
    let err = catalog.extend_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("empty id"), "{err}");
    assert_eq!(catalog.len(), 4);
    assert!(catalog.find_by_id("mojito").is_none());
}

#[test]
fn broken_recipe_file_is_reported() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("bad.toml");
    fs::write(&path, "[[recipes]]\nname = 3\n").unwrap();
    let mut catalog = Catalog::builtin();
    assert!(catalog.extend_from_file(&path).is_err());
    assert_eq!(catalog.len(), 4);
}

#[test]
fn dir_assets_resolve_icons_and_degrade_on_miss() {
    let tmp = tempfile::tempdir().expect("tempdir");
    fs::write(tmp.path().join("jag.txt"), "  \\_/\n   |\n  _|_\n").unwrap();
    let assets = DirAssets::new(tmp.path());

    let icon = assets.icon("jag").expect("icon");
    assert_eq!(icon.lines, vec!["  \\_/", "   |", "  _|_"]);
    assert!(assets.icon("cal").is_none());
    assert!(DirAssets::new(tmp.path().join("missing")).icon("jag").is_none());
}
