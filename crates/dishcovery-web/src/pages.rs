//! Server-rendered HTML pages
//!
//! Templates are compiled into the binary and registered once at startup.
//! Everything interpolated with `{{ }}` is HTML-escaped by handlebars.

use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;
use serde_json::json;

use dishcovery::Recipe;

const TEMPLATES: &[(&str, &str)] = &[
    ("home", include_str!("../templates/home.hbs")),
    ("browse", include_str!("../templates/browse.hbs")),
    ("recipe_detail", include_str!("../templates/recipe_detail.hbs")),
    ("cook_mode", include_str!("../templates/cook_mode.hbs")),
    ("search_results", include_str!("../templates/search_results.hbs")),
    ("pantry", include_str!("../templates/pantry.hbs")),
];

const PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("../templates/partials/header.hbs")),
    ("footer", include_str!("../templates/partials/footer.hbs")),
];

/// One row of the search results page
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub slug: String,
    pub time: i64,
    pub tags: Vec<String>,
}

impl From<&Recipe> for SearchHit {
    fn from(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            slug: recipe.slug.clone(),
            time: recipe.time_total,
            tags: vec![
                recipe.cuisine.clone(),
                format!("{} servings", recipe.servings),
            ],
        }
    }
}

/// A recipe on the pantry page with the ingredients the pantry lacks
#[derive(Debug, Clone, Serialize)]
pub struct PantryMatch<'a> {
    pub recipe: &'a Recipe,
    pub missing: Vec<String>,
    pub ready: bool,
}

pub struct Pages {
    registry: Handlebars<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_helper("titlecase", Box::new(titlecase_helper));

        for (name, source) in PARTIALS {
            registry.register_partial(name, *source)?;
        }
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, *source)?;
        }

        tracing::debug!(
            "Registered {} page templates and {} partials",
            TEMPLATES.len(),
            PARTIALS.len()
        );
        Ok(Self { registry })
    }

    pub fn home(&self, north: &[&Recipe], south: &[&Recipe]) -> Result<String, RenderError> {
        self.registry.render(
            "home",
            &json!({
                "title": "Dishcovery",
                "north_recipes": north,
                "south_recipes": south,
            }),
        )
    }

    pub fn browse(
        &self,
        heading: &str,
        recipes: &[&Recipe],
        cuisines: &[String],
    ) -> Result<String, RenderError> {
        self.registry.render(
            "browse",
            &json!({
                "title": heading,
                "heading": heading,
                "recipes": recipes,
                "cuisines": cuisines,
            }),
        )
    }

    /// Detail page; `None` renders the "Not Found" placeholder recipe
    pub fn detail(&self, recipe: Option<&Recipe>) -> Result<String, RenderError> {
        let placeholder;
        let recipe = match recipe {
            Some(r) => r,
            None => {
                placeholder = not_found_recipe();
                &placeholder
            }
        };
        self.registry.render(
            "recipe_detail",
            &json!({ "title": recipe.title, "r": recipe }),
        )
    }

    pub fn cook(&self, recipe: Option<&Recipe>) -> Result<String, RenderError> {
        let title = recipe.map_or("Not Found", |r| r.title.as_str());
        self.registry
            .render("cook_mode", &json!({ "title": title, "r": recipe }))
    }

    pub fn search_results(
        &self,
        query: &str,
        cuisine: &str,
        results: &[SearchHit],
    ) -> Result<String, RenderError> {
        self.registry.render(
            "search_results",
            &json!({
                "title": "Search",
                "q": query,
                "cuisine": cuisine,
                "results": results,
            }),
        )
    }

    pub fn pantry(
        &self,
        have: &[String],
        cuisine: &str,
        matches: &[PantryMatch<'_>],
    ) -> Result<String, RenderError> {
        self.registry.render(
            "pantry",
            &json!({
                "title": "Pantry to Plate",
                "have": have.join(", "),
                "has_pantry": !have.is_empty(),
                "cuisine": cuisine,
                "matches": matches,
            }),
        )
    }
}

fn not_found_recipe() -> Recipe {
    Recipe::new(
        "",
        "Not Found",
        "-",
        0,
        0,
        Vec::new(),
        vec!["This recipe does not exist.".to_string()],
    )
}

/// Uppercase the first letter of every run of letters, lowercase the rest.
///
/// `"north indian"` becomes `"North Indian"`, `"o'brien"` becomes `"O'Brien"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

fn titlecase_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    out.write(&handlebars::html_escape(&title_case(param)))?;
    Ok(())
}
