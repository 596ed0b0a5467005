use cocktails::catalog::Catalog;
use cocktails::report::{self, ShowOutput};

#[test]
fn show_unknown_id_reports_not_found() {
    let catalog = Catalog::builtin();
    for json in [false, true] {
        let out = report::show(&catalog, "doesnotexist", json).expect("show");
        assert_eq!(
            out,
            ShowOutput::NotFound("Cocktail not found: doesnotexist".to_string())
        );
    }
}

#[test]
fn show_known_id_prints_ingredients_then_steps() {
    let catalog = Catalog::builtin();
    let ShowOutput::Found(text) = report::show(&catalog, "jag", false).expect("show") else {
        panic!("jag should resolve");
    };
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Jager o Poranku");
    assert_eq!(lines[3], "  - 50 ml Jägermeister");
    assert!(text.contains("Steps:\n  1. Wlej Jägermeister"));
    assert_eq!(lines.last(), Some(&"  5. Podawaj ze słomką i udekoruj kawałkiem pomarańczy (opcjonalnie)."));
}

#[test]
fn show_json_round_trips_the_record() {
    let catalog = Catalog::builtin();
    let ShowOutput::Found(text) = report::show(&catalog, "ananas", true).expect("show") else {
        panic!("ananas should resolve");
    };
    let v: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(v["name"], "Ananasowe Uniesienie");
    assert_eq!(v["steps"].as_array().map(Vec::len), Some(5));
}

#[test]
fn list_prints_one_line_per_recipe() {
    let catalog = Catalog::builtin();
    let text = report::list(&catalog, false).expect("list");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("jag"));
    assert!(lines[0].ends_with("Jager o Poranku"));
}
