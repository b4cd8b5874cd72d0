//! ZenPlay CLI - drive the cart and order stores from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Fill a cart and check out
//! zp-cli cart add --id p1 --name "Bamboo yoga mat" --price 49.99
//! zp-cli cart update p1 2
//! zp-cli checkout --first-name Jane --last-name Wanjiru --email jane@example.com \
//!     --phone 0700000000 --address "12 Moi Avenue" --city Nairobi
//!
//! # Produce a hash for ZENPLAY_ADMIN_PASSWORD_HASH, then log in
//! zp-cli admin hash-password 'my-password1'
//! zp-cli admin login 'my-password1'
//!
//! # Manage orders
//! zp-cli orders stats
//! zp-cli orders list --all
//! zp-cli orders status ORD-1A2B3C4D Completed
//! zp-cli orders delete ORD-1A2B3C4D
//! ```
//!
//! # Commands
//!
//! - `cart` - Show and edit the shopper's cart
//! - `checkout` - Turn the cart into a pending order
//! - `admin` - Log in, log out, hash the admin password
//! - `orders` - Dashboard statistics, listings and order management
//!
//! Logs go to stderr. Set `RUST_LOG` to change the filter and
//! `ZENPLAY_LOG_FORMAT=json` for JSON lines.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zenplay_core::{OrderStatus, Price};

mod commands;

#[derive(Parser)]
#[command(name = "zp-cli")]
#[command(author, version, about = "ZenPlay cart and order tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the current cart
    Checkout(CheckoutArgs),
    /// Admin session and password tools
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Manage orders (requires an admin session)
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart lines and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        #[arg(long)]
        id: String,

        /// Product name
        #[arg(long)]
        name: String,

        /// Unit price, e.g. 19.99
        #[arg(long)]
        price: Price,

        /// Image path or URL
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Remove a product's line
    Remove {
        /// Product id
        id: String,
    },
    /// Set a line's quantity (values below 1 are ignored)
    Update {
        /// Product id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Args)]
struct CheckoutArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    /// Delivery notes
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Start an admin session
    Login {
        /// Admin password
        password: String,
    },
    /// End the admin session
    Logout,
    /// Print an Argon2 hash for `ZENPLAY_ADMIN_PASSWORD_HASH`
    HashPassword {
        /// Password to hash (min 8 chars, a letter and a number)
        password: String,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders, newest first
    List {
        /// Show every order instead of the recent ones
        #[arg(long)]
        all: bool,
    },
    /// Show one order in detail
    Show {
        /// Order id
        id: String,
    },
    /// Print order count, revenue and pending count
    Stats,
    /// Set an order's status
    Status {
        /// Order id
        id: String,

        /// `Pending`, `Processed` or `Completed`
        status: OrderStatus,
    },
    /// Delete an order
    Delete {
        /// Order id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing with `EnvFilter`, writing to stderr.
///
/// Defaults to info level for our crates if `RUST_LOG` is not set.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "zenplay=info,zp_cli=info".into());

    let json = std::env::var("ZENPLAY_LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => {
            let cart = commands::cart::open()?;
            match action {
                CartAction::Show => commands::cart::show(&cart),
                CartAction::Add {
                    id,
                    name,
                    price,
                    image,
                } => commands::cart::add(&cart, id, name, price, image)?,
                CartAction::Remove { id } => commands::cart::remove(&cart, id)?,
                CartAction::Update { id, quantity } => {
                    commands::cart::update(&cart, id, quantity)?;
                }
                CartAction::Clear => commands::cart::clear(&cart)?,
            }
        }
        Commands::Checkout(args) => {
            let cart = commands::cart::open()?;
            commands::cart::checkout(
                &cart,
                zenplay_storefront::CheckoutForm {
                    first_name: args.first_name,
                    last_name: args.last_name,
                    email: args.email,
                    phone: args.phone,
                    address: args.address,
                    city: args.city,
                    notes: args.notes,
                },
            )?;
        }
        Commands::Admin { action } => match action {
            AdminAction::Login { password } => commands::admin::login(&password)?,
            AdminAction::Logout => commands::admin::logout()?,
            AdminAction::HashPassword { password } => commands::admin::hash_password(&password)?,
        },
        Commands::Orders { action } => {
            let admin = commands::orders::open()?;
            match action {
                OrdersAction::List { all } => commands::orders::list(&admin, all)?,
                OrdersAction::Show { id } => commands::orders::show(&admin, id)?,
                OrdersAction::Stats => commands::orders::stats(&admin)?,
                OrdersAction::Status { id, status } => {
                    commands::orders::set_status(&admin, id, status)?;
                }
                OrdersAction::Delete { id, yes } => commands::orders::delete(&admin, id, yes)?,
            }
        }
    }
    Ok(())
}
