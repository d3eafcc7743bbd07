//! One-shot proximity search from the command line.

use std::sync::Arc;

use clap::Args;
use nearpro_core::{
    min_price, Category, Coordinate, ProximitySearchService, SearchQuery, SearchResult,
    DEFAULT_RADIUS_METERS,
};
use nearpro_db::PgProfessionalDirectory;
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Latitude of the search origin, in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: f64,
    /// Longitude of the search origin, in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: f64,
    /// Search radius in meters
    #[arg(long, default_value_t = DEFAULT_RADIUS_METERS)]
    pub radius: u32,
    /// BARBER, TATTOO_ARTIST or MANICURIST
    #[arg(long)]
    pub category: Option<Category>,
    /// Minimum average rating, 0 to 5
    #[arg(long)]
    pub min_rating: Option<f64>,
    /// Only professionals whose cheapest service costs at most this much
    #[arg(long)]
    pub max_price: Option<Decimal>,
}

impl SearchArgs {
    pub(crate) fn to_query(&self) -> anyhow::Result<SearchQuery> {
        let origin = Coordinate::new(self.latitude, self.longitude)?;
        let mut query = SearchQuery::new(origin).with_radius_meters(self.radius)?;
        if let Some(category) = self.category {
            query = query.with_category(category);
        }
        if let Some(min_rating) = self.min_rating {
            query = query.with_min_rating(min_rating)?;
        }
        if let Some(max_price) = self.max_price {
            query = query.with_max_price(max_price)?;
        }
        Ok(query)
    }
}

/// # Errors
///
/// Returns an error if the arguments are out of range or the directory query
/// fails.
pub(crate) async fn run(pool: sqlx::PgPool, args: &SearchArgs) -> anyhow::Result<()> {
    let query = args.to_query()?;
    let service = ProximitySearchService::new(Arc::new(PgProfessionalDirectory::new(pool)));
    let results = service.find_nearby(&query).await?;

    if results.is_empty() {
        println!(
            "no available professionals within {}m of ({}, {})",
            query.radius_meters(),
            args.latitude,
            args.longitude
        );
        return Ok(());
    }

    println!(
        "{:<8}{:<30}{:<15}{:>10}{:>8}{:>12}",
        "ID", "NAME", "CATEGORY", "DISTANCE", "RATING", "FROM"
    );
    for result in &results {
        println!("{}", format_row(result));
    }
    Ok(())
}

fn format_row(result: &SearchResult) -> String {
    let name = if result.display_name.chars().count() > 28 {
        format!("{}...", result.display_name.chars().take(25).collect::<String>())
    } else {
        result.display_name.clone()
    };
    let from = min_price(&result.prices).map_or_else(|| "-".to_string(), |p| p.to_string());
    format!(
        "{:<8}{:<30}{:<15}{:>9}m{:>8.1}{:>12}",
        result.id,
        name,
        result.category.as_str(),
        result.distance_meters,
        result.rating_average,
        from
    )
}
