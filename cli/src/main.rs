mod seed;

use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use skillet_core::{catalog, inventory, logbook, report, Datastore, ItemRef, Shortfall};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "skillet")]
#[command(about = "Demo mode for the skillet nutrition engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed sample data, assemble a recipe, log a day of meals, and report
    /// totals against goals
    Demo {
        /// Emit the final report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Convert a quantity between two units of a seeded ingredient
    Convert {
        /// Ingredient name, e.g. "Rice"
        ingredient: String,
        quantity: f64,
        /// Source unit name
        from: String,
        /// Target unit name
        to: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Demo { json } => demo(json),
        Commands::Convert {
            ingredient,
            quantity,
            from,
            to,
        } => convert(&ingredient, quantity, &from, &to),
    }
}

fn print_shortfalls(shortfalls: &[Shortfall]) {
    for shortfall in shortfalls {
        println!("  warning: {}", shortfall.message());
    }
}

fn demo(json: bool) -> Result<()> {
    let (mut store, ingredients, recipes) = seed::seed()?;
    let find = |name: &str, table: &[(String, uuid::Uuid)]| {
        table
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id)
            .expect("seed data is fixed")
    };

    let bowl = find("Rice and Bean Bowl", &recipes);
    let yogurt = find("Greek Yogurt", &ingredients);
    let rice = find("Rice", &ingredients);
    let now = Utc::now();

    println!("Assembling 4 servings of Rice and Bean Bowl...");
    let assembled = inventory::assemble_recipe(&mut store, bowl, 4.0, "servings")?;
    print_shortfalls(&assembled.shortfalls);

    println!("Logging meals...");
    let breakfast = logbook::log_food(
        &mut store,
        ItemRef::Ingredient(yogurt),
        2.0,
        "serving",
        now,
        Some("breakfast"),
    )?;
    print_shortfalls(&breakfast.shortfalls);

    let lunch = logbook::log_food(
        &mut store,
        ItemRef::Recipe(bowl),
        1.0,
        "servings",
        now,
        Some("lunch"),
    )?;
    print_shortfalls(&lunch.shortfalls);

    let dinner = logbook::log_food(
        &mut store,
        ItemRef::Ingredient(rice),
        2.0,
        "cup",
        now,
        Some("dinner"),
    )?;
    print_shortfalls(&dinner.shortfalls);

    let totals = report::totals_for_day(&store, now.date_naive());
    let goals = store.goals();

    if json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
        return Ok(());
    }

    println!("\nNutrient totals for today:");
    for (key, total) in &totals {
        match report::progress(key, &totals, &goals) {
            Some(percent) => println!(
                "  {key}: {:.1} {} ({percent:.0}% of goal)",
                total.amount, total.unit
            ),
            None => println!("  {key}: {:.1} {}", total.amount, total.unit),
        }
    }

    println!("\nInventory on hand:");
    for entry in store.inventory() {
        let name = match entry.item {
            ItemRef::Ingredient(id) => store.ingredient(id).map(|i| i.name),
            ItemRef::Recipe(id) => store.recipe(id).map(|r| r.name),
        };
        println!(
            "  {}: {:.2} {}",
            name.as_deref().unwrap_or("unknown"),
            entry.quantity,
            entry.unit
        );
    }

    println!("\nRecent meals:");
    for meal in logbook::recent_meals(&store, 5) {
        let name = meal
            .ingredient
            .map(|i| i.name)
            .or(meal.recipe.map(|r| r.name))
            .unwrap_or_else(|| "unknown".to_string());
        let calories = meal
            .nutrients
            .iter()
            .find(|n| n.nutrient_key == "calories")
            .map_or(0.0, |n| n.amount);
        println!(
            "  {} — {:.2} {} ({:.0} kcal)",
            name, meal.entry.quantity, meal.entry.unit, calories
        );
    }

    Ok(())
}

fn convert(ingredient: &str, quantity: f64, from: &str, to: &str) -> Result<()> {
    let (store, _, _) = seed::seed()?;

    let matches = catalog::search_ingredients(&store, ingredient);
    let Some(found) = matches.first() else {
        bail!("no seeded ingredient matches {ingredient:?}");
    };

    let units = store.units_for(found.id);
    let converted = skillet_core::try_convert(found.id, &units, quantity, from, to)?;
    println!("{quantity} {from} of {} = {converted} {to}", found.name);

    Ok(())
}
