//! FS Blends CLI - browse the catalog and manage the persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # List candles in the dessert collection
//! fsblends catalog --type candle --collection dessert
//!
//! # Show the variant table of a product
//! fsblends variants gourmet-treat
//!
//! # Resolve a selection to its variant
//! fsblends resolve gourmet-treat --size 8oz --color black
//!
//! # Add to the cart, then show it
//! fsblends cart add gourmet-treat --size 8oz --color black --qty 2
//! fsblends cart show
//! ```
//!
//! # Commands
//!
//! - `catalog` - List products
//! - `variants` - List a product's variants and available options
//! - `resolve` - Resolve or repair a size/color selection
//! - `cart` - Show and edit the cart persisted under `FSBLENDS_DATA_DIR`

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use fsblends_core::{CandleCollection, CandleSize, ContainerColor, ProductType};
use fsblends_storefront::{AppState, StorefrontConfig};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "fsblends")]
#[command(author, version, about = "FS Blends storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog {
        /// Only products of this type (e.g. candle, wax-melt)
        #[arg(short, long = "type")]
        product_type: Option<ProductType>,

        /// Only candles in this collection (classic, dessert)
        #[arg(short, long)]
        collection: Option<CandleCollection>,
    },
    /// Show a product's variants and the options offered to shoppers
    Variants {
        /// Product slug
        slug: String,
    },
    /// Resolve a size/color selection, repairing it when it is not valid
    Resolve {
        /// Product slug
        slug: String,

        /// Candle size (6oz, 8oz, 10oz)
        #[arg(short, long)]
        size: Option<CandleSize>,

        /// Container color (black, white)
        #[arg(short, long)]
        color: Option<ContainerColor>,

        /// Print the resolved variant as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show line items and totals
    Show,
    /// Add a product to the cart
    Add {
        /// Product slug
        slug: String,

        /// Candle size; optional for single-variant products
        #[arg(short, long)]
        size: Option<CandleSize>,

        /// Container color
        #[arg(short, long)]
        color: Option<ContainerColor>,

        /// Units to add (clamped to 1..=10)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        qty: i64,
    },
    /// Add one unit to a line
    Inc {
        /// Line id (e.g. gourmet-treat-8oz-black)
        line: String,
    },
    /// Remove one unit from a line
    Dec {
        /// Line id
        line: String,
    },
    /// Remove a line
    Remove {
        /// Line id
        line: String,
    },
    /// Empty the cart
    Clear,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fsblends_storefront=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let mut state = AppState::from_config(config)?;

    match cli.command {
        Commands::Catalog {
            product_type,
            collection,
        } => commands::catalog::list(state.catalog(), product_type, collection),
        Commands::Variants { slug } => commands::catalog::variants(state.catalog(), &slug)?,
        Commands::Resolve {
            slug,
            size,
            color,
            json,
        } => commands::catalog::resolve(state.catalog(), &slug, size, color, json)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(state.cart()),
            CartAction::Add {
                slug,
                size,
                color,
                qty,
            } => commands::cart::add(&mut state, &slug, size, color, qty)?,
            CartAction::Inc { line } => commands::cart::increment(state.cart_mut(), &line)?,
            CartAction::Dec { line } => commands::cart::decrement(state.cart_mut(), &line)?,
            CartAction::Remove { line } => commands::cart::remove(state.cart_mut(), &line)?,
            CartAction::Clear => commands::cart::clear(state.cart_mut()),
        },
    }
    Ok(())
}
