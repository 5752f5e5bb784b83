//! Dashboard aggregation service.
//!
//! A pure function of the three repositories' current contents: one pass
//! over the rental list against lookup maps built once from the movie and
//! customer lists. Rentals whose movie or customer no longer exists fall
//! back to the denormalized names they carry, with membership defaulting
//! to Basic.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    money, trailing_months, Clock, CustomerId, MembershipTier, MovieId, YearMonth,
};
use crate::domain::rental::Rental;
use crate::store::{CustomerRepository, MovieRepository, RentalRepository};

/// Number of entries in the top-movie and top-customer lists.
const TOP_LIST_SIZE: usize = 5;
/// Number of rentals shown in the recent-activity feed.
const RECENT_RENTALS: usize = 10;
/// Months covered by the trailing trend series, current month included.
const TREND_MONTHS: usize = 6;

/// Aggregated dashboard figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub total_rentals: usize,
    pub total_revenue: f64,
    pub average_revenue_per_rental: f64,
    pub top_movies: Vec<TopMovie>,
    pub top_customers: Vec<TopCustomer>,
    pub revenue_by_genre: Vec<GenreRevenue>,
    pub revenue_by_membership: Vec<MembershipRevenue>,
    pub recent_rentals: Vec<Rental>,
    pub monthly_trend: Vec<MonthlyTrendPoint>,
}

/// A movie ranked by rental count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopMovie {
    pub movie_id: MovieId,
    pub movie_name: String,
    pub rental_count: usize,
    pub revenue: f64,
}

/// A customer ranked by total spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCustomer {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub total_spend: f64,
    pub rental_count: usize,
}

/// Revenue attributed to one genre. Rentals whose movie cannot be resolved
/// or has no genre are grouped under the "Unknown" label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreRevenue {
    pub genre: String,
    pub revenue: f64,
}

/// Revenue attributed to one membership tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRevenue {
    pub tier: MembershipTier,
    pub revenue: f64,
    pub unique_customers: usize,
}

/// One month of the trailing trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrendPoint {
    pub month: YearMonth,
    pub rental_count: usize,
    pub revenue: f64,
    pub late_fees: f64,
}

/// Builds [`DashboardData`] from the current repository contents.
///
/// Repository locks are taken one at a time through the repositories' own
/// methods; the aggregation itself runs on plain snapshots.
#[derive(Clone)]
pub struct DashboardService {
    rentals: RentalRepository,
    movies: MovieRepository,
    customers: CustomerRepository,
    clock: Arc<dyn Clock>,
}

impl DashboardService {
    /// Creates the service over the given repositories.
    pub fn new(
        rentals: RentalRepository,
        movies: MovieRepository,
        customers: CustomerRepository,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rentals,
            movies,
            customers,
            clock,
        }
    }

    /// Computes the full dashboard.
    pub fn build(&self) -> DashboardData {
        let today = self.clock.today();
        let rentals = self.rentals.get_all();
        let movie_index: HashMap<MovieId, crate::domain::Movie> = self
            .movies
            .get_all()
            .into_iter()
            .map(|m| (m.id, m))
            .collect();
        let customer_index: HashMap<CustomerId, crate::domain::Customer> = self
            .customers
            .get_all()
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let months = trailing_months(today, TREND_MONTHS);
        let month_window: HashSet<YearMonth> = months.iter().copied().collect();

        let mut total_revenue = 0.0;
        let mut per_movie: HashMap<MovieId, TopMovie> = HashMap::new();
        let mut per_customer: HashMap<CustomerId, TopCustomer> = HashMap::new();
        let mut per_genre: HashMap<String, f64> = HashMap::new();
        let mut per_tier: HashMap<MembershipTier, (f64, HashSet<CustomerId>)> = HashMap::new();
        let mut per_month: HashMap<YearMonth, MonthlyTrendPoint> = HashMap::new();

        for rental in &rentals {
            let cost = rental.total_cost(today);
            total_revenue += cost;

            let movie = movie_index.get(&rental.movie_id);
            let movie_name = movie
                .map(|m| m.name.clone())
                .unwrap_or_else(|| rental.movie_name.clone());
            let entry = per_movie.entry(rental.movie_id).or_insert_with(|| TopMovie {
                movie_id: rental.movie_id,
                movie_name,
                rental_count: 0,
                revenue: 0.0,
            });
            entry.rental_count += 1;
            entry.revenue += cost;

            let customer = customer_index.get(&rental.customer_id);
            let customer_name = customer
                .map(|c| c.name.clone())
                .unwrap_or_else(|| rental.customer_name.clone());
            let entry = per_customer
                .entry(rental.customer_id)
                .or_insert_with(|| TopCustomer {
                    customer_id: rental.customer_id,
                    customer_name,
                    total_spend: 0.0,
                    rental_count: 0,
                });
            entry.total_spend += cost;
            entry.rental_count += 1;

            let genre_label = movie
                .and_then(|m| m.genre)
                .map(|g| g.display_name().to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            *per_genre.entry(genre_label).or_insert(0.0) += cost;

            let tier = customer
                .map(|c| c.membership)
                .unwrap_or(MembershipTier::Basic);
            let (revenue, uniques) = per_tier.entry(tier).or_insert((0.0, HashSet::new()));
            *revenue += cost;
            uniques.insert(rental.customer_id);

            let month = YearMonth::of(rental.rental_date);
            if month_window.contains(&month) {
                let point = per_month.entry(month).or_insert(MonthlyTrendPoint {
                    month,
                    rental_count: 0,
                    revenue: 0.0,
                    late_fees: 0.0,
                });
                point.rental_count += 1;
                point.revenue += cost;
                point.late_fees += rental.late_fee;
            }
        }

        let mut top_movies: Vec<TopMovie> = per_movie.into_values().collect();
        top_movies.sort_by(|a, b| {
            b.rental_count
                .cmp(&a.rental_count)
                .then_with(|| b.revenue.partial_cmp(&a.revenue).unwrap_or(std::cmp::Ordering::Equal))
        });
        top_movies.truncate(TOP_LIST_SIZE);
        for movie in &mut top_movies {
            movie.revenue = money::round_cents(movie.revenue);
        }

        let mut top_customers: Vec<TopCustomer> = per_customer.into_values().collect();
        top_customers.sort_by(|a, b| {
            b.total_spend
                .partial_cmp(&a.total_spend)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.rental_count.cmp(&a.rental_count))
        });
        top_customers.truncate(TOP_LIST_SIZE);
        for customer in &mut top_customers {
            customer.total_spend = money::round_cents(customer.total_spend);
        }

        let mut revenue_by_genre: Vec<GenreRevenue> = per_genre
            .into_iter()
            .map(|(genre, revenue)| GenreRevenue {
                genre,
                revenue: money::round_cents(revenue),
            })
            .collect();
        revenue_by_genre.sort_by(|a, b| {
            b.revenue
                .partial_cmp(&a.revenue)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.genre.cmp(&b.genre))
        });

        let mut revenue_by_membership: Vec<MembershipRevenue> = per_tier
            .into_iter()
            .map(|(tier, (revenue, uniques))| MembershipRevenue {
                tier,
                revenue: money::round_cents(revenue),
                unique_customers: uniques.len(),
            })
            .collect();
        revenue_by_membership.sort_by_key(|entry| entry.tier.rank());

        let mut recent_rentals = rentals.clone();
        recent_rentals.sort_by(|a, b| b.rental_date.cmp(&a.rental_date));
        recent_rentals.truncate(RECENT_RENTALS);

        let monthly_trend: Vec<MonthlyTrendPoint> = months
            .into_iter()
            .map(|month| {
                let mut point = per_month.remove(&month).unwrap_or(MonthlyTrendPoint {
                    month,
                    rental_count: 0,
                    revenue: 0.0,
                    late_fees: 0.0,
                });
                point.revenue = money::round_cents(point.revenue);
                point.late_fees = money::round_cents(point.late_fees);
                point
            })
            .collect();

        DashboardData {
            total_rentals: rentals.len(),
            total_revenue: money::round_cents(total_revenue),
            average_revenue_per_rental: money::average_or_zero(total_revenue, rentals.len()),
            top_movies,
            top_customers,
            revenue_by_genre,
            revenue_by_membership,
            recent_rentals,
            monthly_trend,
        }
    }
}
