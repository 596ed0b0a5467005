use std::fmt::Write as _;

use crate::catalog::{Catalog, Recipe};
use crate::error::Result;
use crate::ui::NOT_FOUND_MESSAGE;

/// Outcome of `cocktails show`: text for stdout, or the stderr message for a
/// lookup miss (the command then exits with status 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowOutput {
    Found(String),
    NotFound(String),
}

pub fn show(catalog: &Catalog, id: &str, json: bool) -> Result<ShowOutput> {
    let Some(recipe) = catalog.find_by_id(id) else {
        return Ok(ShowOutput::NotFound(format!("{NOT_FOUND_MESSAGE}: {id}")));
    };
    if json {
        return Ok(ShowOutput::Found(serde_json::to_string_pretty(recipe)?));
    }
    Ok(ShowOutput::Found(recipe_text(recipe)))
}

pub fn list(catalog: &Catalog, json: bool) -> Result<String> {
    if json {
        let all: Vec<&Recipe> = catalog.recipes().collect();
        return Ok(serde_json::to_string_pretty(&all)?);
    }
    let mut out = String::new();
    for r in catalog.recipes() {
        let _ = writeln!(out, "{:<10} {}", r.id, r.name);
    }
    Ok(out.trim_end().to_string())
}

fn recipe_text(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", recipe.name);
    let _ = writeln!(out);
    let _ = writeln!(out, "Ingredients:");
    for ing in &recipe.ingredients {
        let _ = writeln!(out, "  - {ing}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Steps:");
    for step in &recipe.steps {
        let _ = writeln!(out, "  {step}");
    }
    out.trim_end().to_string()
}
