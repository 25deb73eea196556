//! Catalog command: list the built-in module library.

use crate::cli::common::{print_json, CliResult};
use crate::models::catalog::{categories, templates_of_kind};
use crate::models::{CatalogCategory, ModuleKind, ModuleTemplate};
use clap::Args;
use serde::Serialize;

/// List module templates
#[derive(Debug, Clone, Args)]
pub struct CatalogArgs {
    /// Only show templates of this kind (cabinet, counter, appliance, sink, island)
    #[arg(short, long)]
    pub kind: Option<ModuleKind>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct CategoriesResponse {
    categories: Vec<CatalogCategory>,
    count: usize,
}

#[derive(Serialize)]
struct TemplatesResponse {
    kind: ModuleKind,
    templates: Vec<ModuleTemplate>,
    count: usize,
}

impl CatalogArgs {
    /// Execute the catalog command
    pub fn execute(&self) -> CliResult<()> {
        if let Some(kind) = self.kind {
            let templates = templates_of_kind(kind);
            if self.json {
                return print_json(&TemplatesResponse {
                    kind,
                    count: templates.len(),
                    templates,
                });
            }
            println!("{} templates:", kind.display_name());
            for template in &templates {
                print_template(template);
            }
            return Ok(());
        }

        let categories = categories();
        if self.json {
            let count = categories.iter().map(|c| c.modules.len()).sum();
            return print_json(&CategoriesResponse { categories, count });
        }

        for category in &categories {
            println!("{}", category.name);
            for template in &category.modules {
                print_template(template);
            }
            println!();
        }
        Ok(())
    }
}

fn print_template(template: &ModuleTemplate) {
    println!(
        "  {:<20} {:<10} {:>4} x {:<4} €{:<5} {}",
        template.name,
        template.kind,
        template.width,
        template.height,
        template.price,
        template.materials.join(", ")
    );
}
