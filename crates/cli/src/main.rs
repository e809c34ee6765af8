//! Food Delivery CLI - migrations and ordering operations.
//!
//! # Usage
//!
//! ```bash
//! # Apply the ordering schema
//! fd-cli migrate
//!
//! # Register a customer and browse
//! fd-cli customer register --name Alice --phone 555-0100 --address "1 Main St" \
//!     --email alice@example.com --password hunter2
//! fd-cli restaurants
//! fd-cli menu 1
//!
//! # Place an order (menu item:quantity:unit price)
//! fd-cli order place --customer 1 --restaurant 1 --item 1:2:8.99 --item 2:1:3.00
//!
//! # Deliver it
//! fd-cli delivery assign --order 1 --person 1
//! fd-cli delivery status 1 delivered
//! ```
//!
//! Results are printed to stdout as JSON. Logs go to stderr, filtered by
//! `RUST_LOG`; set `LOG_FORMAT=json` for structured log lines.
//!
//! # Environment Variables
//!
//! - `DB_NAME`, `DB_USER`, `DB_PASSWORD`, `DB_HOST`, `DB_PORT` - `PostgreSQL`
//!   connection settings (a `.env` file is honored)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use food_delivery_core::{
    CustomerId, DeliveryId, DeliveryPersonId, Email, Money, OrderId, RestaurantId,
};
use food_delivery_ordering::models::{NewPayment, NewReview};
use food_delivery_ordering::{DatabaseConfig, Gateway, OrderingService};

mod commands;

use commands::order::LineItemArg;

#[derive(Parser)]
#[command(name = "fd-cli")]
#[command(author, version, about = "Food delivery ordering tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Register and look up customers
    Customer {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// List active restaurants
    Restaurants,
    /// List the available menu items of a restaurant
    Menu {
        restaurant_id: RestaurantId,
    },
    /// Place and inspect orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Review a restaurant for an order
    Review {
        #[arg(long)]
        order: OrderId,

        #[arg(long)]
        customer: CustomerId,

        #[arg(long)]
        restaurant: RestaurantId,

        #[arg(long)]
        rating: i32,

        #[arg(long)]
        comment: Option<String>,
    },
    /// Record a payment for an order
    Pay {
        #[arg(long)]
        order: OrderId,

        /// Amount, e.g. `20.98` or `$20.98`
        #[arg(long)]
        amount: Money,

        /// Payment method (`card`, `cash`, ...)
        #[arg(long)]
        method: String,
    },
    /// Assign deliveries and track their status
    Delivery {
        #[command(subcommand)]
        action: DeliveryAction,
    },
}

#[derive(Subcommand)]
enum CustomerAction {
    /// Register a new customer
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        address: String,

        #[arg(long)]
        email: Email,

        /// Plaintext password; only its Argon2id hash is stored
        #[arg(long)]
        password: String,
    },
    /// Show a customer by email
    Show {
        #[arg(long)]
        email: Email,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// Place an order; the total is computed from the items
    Place {
        #[arg(long)]
        customer: CustomerId,

        #[arg(long)]
        restaurant: RestaurantId,

        /// Line item as `menu_item_id:quantity:unit_price`, repeatable
        #[arg(long = "item")]
        items: Vec<LineItemArg>,
    },
    /// List a customer's orders, newest first
    List {
        #[arg(long)]
        customer: CustomerId,
    },
    /// Show an order with its items and payments
    Show { order_id: OrderId },
}

#[derive(Subcommand)]
enum DeliveryAction {
    /// Assign a delivery person to an order
    Assign {
        #[arg(long)]
        order: OrderId,

        #[arg(long)]
        person: DeliveryPersonId,
    },
    /// Set the status of a delivery (`delivered` stamps the delivery time)
    Status {
        delivery_id: DeliveryId,
        status: String,
    },
    /// Show a delivery
    Show { delivery_id: DeliveryId },
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "food_delivery_ordering=info,food_delivery_cli=info".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");
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

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let service = OrderingService::new(Gateway::new(DatabaseConfig::from_env()));

    match cli.command {
        Commands::Migrate => commands::migrate::run(service.gateway()).await?,
        Commands::Customer { action } => match action {
            CustomerAction::Register {
                name,
                phone,
                address,
                email,
                password,
            } => {
                let registration = commands::customer::Registration {
                    name,
                    phone,
                    address,
                    email,
                    password: password.into(),
                };
                commands::customer::register(&service, registration).await?;
            }
            CustomerAction::Show { email } => commands::customer::show(&service, &email).await?,
        },
        Commands::Restaurants => commands::catalog::restaurants(&service).await?,
        Commands::Menu { restaurant_id } => commands::catalog::menu(&service, restaurant_id).await?,
        Commands::Order { action } => match action {
            OrderAction::Place {
                customer,
                restaurant,
                items,
            } => commands::order::place(&service, customer, restaurant, &items).await?,
            OrderAction::List { customer } => commands::order::list(&service, customer).await?,
            OrderAction::Show { order_id } => commands::order::show(&service, order_id).await?,
        },
        Commands::Review {
            order,
            customer,
            restaurant,
            rating,
            comment,
        } => {
            let review = NewReview {
                order_id: order,
                customer_id: customer,
                restaurant_id: restaurant,
                rating,
                comments: comment,
            };
            commands::order::review(&service, &review).await?;
        }
        Commands::Pay {
            order,
            amount,
            method,
        } => {
            let payment = NewPayment {
                order_id: order,
                amount,
                payment_method: method,
            };
            commands::order::pay(&service, &payment).await?;
        }
        Commands::Delivery { action } => match action {
            DeliveryAction::Assign { order, person } => {
                commands::delivery::assign(&service, order, person).await?;
            }
            DeliveryAction::Status {
                delivery_id,
                status,
            } => commands::delivery::set_status(&service, delivery_id, status.into()).await?,
            DeliveryAction::Show { delivery_id } => {
                commands::delivery::show(&service, delivery_id).await?;
            }
        },
    }
    Ok(())
}
