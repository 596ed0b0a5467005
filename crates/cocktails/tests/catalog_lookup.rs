use cocktails::catalog::Catalog;

#[test]
fn find_by_id_returns_seed_record() {
    let catalog = Catalog::builtin();
    let jag = catalog.find_by_id("jag").expect("jag in catalog");
    assert_eq!(jag.name, "Jager o Poranku");
    assert_eq!(jag.ingredients.len(), 3);
    assert_eq!(jag.ingredients[0], "50 ml Jägermeister");
    assert_eq!(jag.steps.len(), 5);
    assert_eq!(
        jag.steps[0],
        "1. Wlej Jägermeister do szklanki (najlepiej typu highball)."
    );
}

#[test]
fn every_seed_id_resolves_to_its_name() {
    let catalog = Catalog::builtin();
    let expected = [
        ("jag", "Jager o Poranku", 3),
        ("cal", "Californication", 5),
        ("ccc", "212 Cocktail", 5),
        ("ananas", "Ananasowe Uniesienie", 5),
    ];
    assert_eq!(catalog.len(), expected.len());
    for ((id, name, ingredients), r) in expected.iter().zip(catalog.recipes()) {
        assert_eq!(r.id, *id);
        let found = catalog.find_by_id(id).expect("seed id");
        assert_eq!(found.name, *name);
        assert_eq!(found.ingredients.len(), *ingredients);
        assert_eq!(found.ingredients.last().map(String::as_str), Some("Lód"));
    }
}

#[test]
fn unknown_or_malformed_ids_are_not_found() {
    let catalog = Catalog::builtin();
    assert!(catalog.find_by_id("doesnotexist").is_none());
    assert!(catalog.find_by_id("").is_none());
    assert!(catalog.find_by_id("JAG").is_none());
    assert!(catalog.find_by_id(" jag").is_none());
}

#[test]
fn recipes_serialize_to_json() {
    let catalog = Catalog::builtin();
    let cal = catalog.find_by_id("cal").unwrap();
    let v = serde_json::to_value(cal).unwrap();
    assert_eq!(v["id"], "cal");
    assert_eq!(v["ingredients"][1], "25 ml likieru pomarańczowego (np. Cointreau)");
}
