use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::text::sanitize_display_text;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}

impl Recipe {
    fn new(id: &str, name: &str, ingredients: &[&str], steps: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            steps: steps.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn sanitized(self) -> Self {
        Self {
            id: sanitize_display_text(&self.id),
            name: sanitize_display_text(&self.name),
            ingredients: self
                .ingredients
                .iter()
                .map(|s| sanitize_display_text(s))
                .collect(),
            steps: self.steps.iter().map(|s| sanitize_display_text(s)).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecipeFile {
    #[serde(default)]
    recipes: Vec<Recipe>,
}

/// Fixed, ordered collection of recipes. Lookup is by exact id; the first
/// record with a given id wins.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            recipes: seed_recipes(),
        }
    }

    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn get(&self, idx: usize) -> Option<&Recipe> {
        self.recipes.get(idx)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Appends the `[[recipes]]` entries of a TOML file. Returns how many
    /// records were added.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<usize> {
        let data = fs::read_to_string(path)
            .map_err(|e| Error::msg(format!("failed to read recipes {}: {e}", path.display())))?;
        let file: RecipeFile = toml::from_str(&data)
            .map_err(|e| Error::msg(format!("TOML parse error in {}: {e}", path.display())))?;

        // Nothing is added unless the whole file is valid.
        let mut incoming = Vec::with_capacity(file.recipes.len());
        for recipe in file.recipes {
            let recipe = recipe.sanitized();
            if recipe.id.is_empty() {
                return Err(Error::msg(format!(
                    "recipe with empty id in {}",
                    path.display()
                )));
            }
            incoming.push(recipe);
        }

        for (i, recipe) in incoming.iter().enumerate() {
            let earlier = self.find_by_id(&recipe.id).is_some()
                || incoming[..i].iter().any(|r| r.id == recipe.id);
            if earlier {
                warn!(
                    id = %recipe.id,
                    file = %path.display(),
                    "duplicate recipe id; earlier record shadows it"
                );
            }
        }
        let added = incoming.len();
        self.recipes.extend(incoming);
        debug!(file = %path.display(), added, "loaded extra recipes");
        Ok(added)
    }
}

fn seed_recipes() -> Vec<Recipe> {
    vec![
        Recipe::new(
            "jag",
            "Jager o Poranku",
            &["50 ml Jägermeister", "150 ml soku pomarańczowego", "Lód"],
            &[
                "1. Wlej Jägermeister do szklanki (najlepiej typu highball).",
                "2. Dodaj lód do szklanki.",
                "3. Zalej sokiem pomarańczowym.",
                "4. Delikatnie wymieszaj.",
                "5. Podawaj ze słomką i udekoruj kawałkiem pomarańczy (opcjonalnie).",
            ],
        ),
        Recipe::new(
            "cal",
            "Californication",
            &[
                "50 ml wódki",
                "25 ml likieru pomarańczowego (np. Cointreau)",
                "50 ml soku żurawinowego",
                "25 ml soku z limonki",
                "Lód",
            ],
            &[
                "1. Wlej wszystkie składniki do shakera.",
                "2. Dodaj lód do shakera.",
                "3. Wstrząśnij mocno przez 10-15 sekund.",
                "4. Przelej do schłodzonego kieliszka do martini.",
                "5. Udekoruj skórką limonki lub pomarańczy (opcjonalnie).",
            ],
        ),
        Recipe::new(
            "ccc",
            "212 Cocktail",
            &[
                "40 ml wódki",
                "20 ml likieru granatowego (np. Pama)",
                "20 ml soku z limonki",
                "10 ml syropu cukrowego",
                "Lód",
            ],
            &[
                "1. Wlej wódkę, likier granatowy, sok z limonki i syrop cukrowy do shakera.",
                "2. Dodaj lód do shakera.",
                "3. Wstrząśnij przez 10-15 sekund.",
                "4. Przelej do schłodzonego kieliszka koktajlowego.",
                "5. Udekoruj skórką limonki lub granatem (opcjonalnie).",
            ],
        ),
        Recipe::new(
            "ananas",
            "Ananasowe Uniesienie",
            &[
                "50 ml rumu białego",
                "100 ml soku ananasowego",
                "25 ml soku z limonki",
                "10 ml syropu kokosowego (np. Malibu)",
                "Lód",
            ],
            &[
                "1. Wlej rum, sok ananasowy, sok z limonki i syrop kokosowy do shakera.",
                "2. Dodaj lód do shakera.",
                "3. Wstrząśnij przez 10-15 sekund.",
                "4. Przelej do szklanki typu highball.",
                "5. Udekoruj kawałkiem ananasa lub limonki (opcjonalnie).",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_are_unique() {
        let catalog = Catalog::builtin();
        let mut ids: Vec<&str> = catalog.recipes().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn first_record_wins_on_duplicate_ids() {
        let catalog = Catalog::from_recipes(vec![
            Recipe::new("x", "first", &[], &[]),
            Recipe::new("x", "second", &[], &[]),
        ]);
        assert_eq!(catalog.find_by_id("x").map(|r| r.name.as_str()), Some("first"));
    }
}
