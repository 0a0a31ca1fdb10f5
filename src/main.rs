use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use shopcart::catalog::{Catalog, StaticCatalog};
use shopcart::checkout::{complete_checkout, CheckoutSelection, OrderDraft};
use shopcart::config::Config;
use shopcart::logging::init_tracing;
use shopcart::storage::FileStorage;
use shopcart::{CartAction, CartState, CartStore, ProductId};

#[derive(Parser, Debug)]
#[command(name = "shopcart", version, about = "Storefront shopping cart")]
struct Cli {
    /// Path to config.toml (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the directory the cart is stored in
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Override the catalog file used by `add`
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the cart and its totals
    Show,
    /// Add a catalog product to the cart
    Add {
        id: String,
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },
    /// Increase a line item's quantity by one
    Inc { id: String },
    /// Decrease a line item's quantity by one, removing it at zero
    Dec { id: String },
    /// Remove a line item
    Remove { id: String },
    /// Empty the cart
    Clear,
    /// Dispatch a raw JSON action, e.g. '{"type":"CLEAR_CART"}'
    Dispatch { action: String },
    /// Build an order from selected products; --confirm clears the cart
    Checkout {
        /// Products to check out (default: the whole cart)
        ids: Vec<String>,
        #[arg(long)]
        confirm: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    if let Some(dir) = cli.storage_dir.clone() {
        config.storage.dir = dir;
    }
    if let Some(path) = cli.catalog.clone() {
        config.catalog.path = Some(path);
    }

    let store = CartStore::open(
        FileStorage::new(config.storage.dir.clone()),
        config.storage.key.clone(),
    )?;

    match cli.command {
        Command::Show => {}
        Command::Add { id, qty } => {
            let Some(path) = config.catalog.path.as_deref() else {
                bail!("no catalog configured; set catalog.path or pass --catalog");
            };
            let catalog = StaticCatalog::load_from(path)?;
            let product_id = ProductId::new(id);
            let Some(product) = catalog.snapshot(&product_id) else {
                bail!("product '{product_id}' not found in catalog");
            };
            store.dispatch(CartAction::add_quantity(product, qty));
        }
        Command::Inc { id } => store.dispatch(CartAction::increase(ProductId::new(id))),
        Command::Dec { id } => store.dispatch(CartAction::decrease(ProductId::new(id))),
        Command::Remove { id } => store.dispatch(CartAction::remove(ProductId::new(id))),
        Command::Clear => store.dispatch(CartAction::ClearCart),
        Command::Dispatch { action } => {
            let action: CartAction =
                serde_json::from_str(&action).context("parsing action JSON")?;
            store.dispatch(action);
        }
        Command::Checkout { ids, confirm } => {
            let state = store.state();
            let selection = if ids.is_empty() {
                CheckoutSelection::all(&state)
            } else {
                CheckoutSelection::new(ids.into_iter().map(ProductId::new))
            };
            let draft = OrderDraft::from_cart(&state, &selection, &config.delivery)?;
            print_draft(&config, &draft);
            if confirm {
                complete_checkout(&store, &draft);
                println!("Order placed. Cart cleared.");
            }
            return Ok(());
        }
    }

    print_cart(&config, &store);
    Ok(())
}

fn print_cart(config: &Config, store: &CartStore) {
    let state: CartState = store.state();
    if state.is_empty() {
        println!("Cart is empty.");
        return;
    }

    let money = |amount| config.display.format_amount(amount);
    for item in state.iter() {
        let stock = if item.product.in_stock { "" } else { " (out of stock)" };
        println!(
            "{:<16} {:<28} {:>4} x {:>10} = {:>12}{}",
            item.product.id,
            item.product.title,
            item.quantity,
            money(item.product.price),
            money(item.line_total()),
            stock
        );
    }

    let totals = store.totals(&config.delivery);
    println!("Items:    {}", totals.item_count);
    println!("Subtotal: {}", money(totals.subtotal));
    println!("Delivery: {}", money(totals.delivery_fee));
    println!("Total:    {}", money(totals.total));
}

fn print_draft(config: &Config, draft: &OrderDraft) {
    let money = |amount| config.display.format_amount(amount);
    println!("Order ({} items)", draft.item_count());
    for item in &draft.items {
        println!(
            "  {:<16} {:>4} x {:>10}",
            item.product.id,
            item.quantity,
            money(item.product.price)
        );
    }
    println!("Subtotal: {}", money(draft.subtotal));
    println!("Delivery: {}", money(draft.delivery_fee));
    println!("Total:    {}", money(draft.total));
}
