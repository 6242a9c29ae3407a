use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use estate_gateway::api::ApiClient;
use estate_gateway::models::{Locale, Property, PropertyType};
use estate_gateway::query::{PropertyFilters, SortOrder};
use estate_gateway::ApiConfig;
use tracing::info;

#[derive(Parser)]
#[command(name = "estate-gateway")]
#[command(about = "Query the brokerage property API")]
#[command(version)]
struct Cli {
    /// API base URL (overrides ESTATE_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Print names in Russian where available
    #[arg(long, global = true)]
    ru: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search listings
    List {
        #[arg(long)]
        property_type: Option<PropertyType>,
        #[arg(long)]
        developer: Option<String>,
        #[arg(long)]
        city: Option<String>,
        /// Area id, repeatable
        #[arg(long = "area")]
        areas: Vec<String>,
        /// Comma-separated bedroom counts, e.g. 1,2
        #[arg(long)]
        bedrooms: Option<String>,
        #[arg(long)]
        size_from: Option<f64>,
        #[arg(long)]
        size_to: Option<f64>,
        #[arg(long)]
        price_from: Option<f64>,
        #[arg(long)]
        price_to: Option<f64>,
        #[arg(long)]
        search: Option<String>,
        /// name, price, size or createdAt
        #[arg(long)]
        sort_by: Option<String>,
        #[arg(long)]
        sort_order: Option<SortOrder>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        /// Print raw JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Show one listing
    Get {
        id: String,
        #[arg(long)]
        json: bool,
    },

    /// Summarize the public reference data
    PublicData {
        /// Ignore the cached snapshot
        #[arg(long)]
        refresh: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "estate_gateway=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let locale = if cli.ru { Locale::Ru } else { Locale::En };

    let mut config = ApiConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    info!("🏙️  Estate Gateway → {}", config.base_url);

    let client = ApiClient::new(&config).context("Failed to create API client")?;

    match cli.command {
        Commands::List {
            property_type,
            developer,
            city,
            areas,
            bedrooms,
            size_from,
            size_to,
            price_from,
            price_to,
            search,
            sort_by,
            sort_order,
            page,
            limit,
            json,
        } => {
            let filters = PropertyFilters {
                property_type,
                developer_id: developer,
                city_id: city,
                area_id: None,
                area_ids: areas,
                bedrooms,
                size_from,
                size_to,
                price_from,
                price_to,
                search,
                sort_by,
                sort_order,
                page,
                limit,
            };

            let properties = client
                .get_properties(&filters)
                .await
                .context("Property search failed")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&properties)?);
            } else {
                info!("✅ Found {} properties\n", properties.len());
                for (i, property) in properties.iter().enumerate() {
                    print_summary(i + 1, property, locale);
                }
            }
        }

        Commands::Get { id, json } => {
            let property = client
                .get_property(&id)
                .await
                .with_context(|| format!("Failed to load property {id}"))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&property)?);
            } else {
                print_summary(1, &property, locale);
                if !property.description.is_empty() {
                    println!("   {}", property.description);
                }
                let facilities: Vec<&str> =
                    property.facilities.iter().map(|f| f.name(locale)).collect();
                if !facilities.is_empty() {
                    println!("   Facilities: {}", facilities.join(", "));
                }
            }
        }

        Commands::PublicData { refresh } => {
            let data = client
                .get_public_data(refresh)
                .await
                .context("Failed to fetch public data")?;

            println!("Properties: {}", data.properties.len());
            println!("Countries:  {}", data.countries.len());
            println!("Cities:     {}", data.cities.len());
            println!("Areas:      {}", data.areas.len());
            println!("Developers: {}", data.developers.len());
            println!("Facilities: {}", data.facilities.len());
            for area in &data.areas {
                println!("   • {} ({})", area.name(locale), area.id);
            }
        }
    }

    Ok(())
}

fn print_summary(index: usize, property: &Property, locale: Locale) {
    let price = property
        .price_aed()
        .map(|aed| format!("{:.0} AED", aed))
        .unwrap_or_else(|| "price on request".to_string());

    println!("{}. {} [{}] ({})", index, property.name, property.property_type(), price);
    println!(
        "   {} bedrooms, {} m²",
        property.bedrooms_label(),
        property
            .listed_size()
            .map_or_else(|| "-".to_string(), |s| format!("{}", s))
    );
    if let Some(area) = property.area_name(locale) {
        println!("   Area: {}", area);
    }
    if let Some(developer) = &property.developer {
        println!("   Developer: {}", developer.name);
    }
    println!("   ID: {}", property.id);
    println!();
}
