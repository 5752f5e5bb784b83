//! Customer activity reporting service.
//!
//! Builds a per-customer report: rental summary, genre breakdown, trailing
//! monthly activity, a 0-100 loyalty score, and qualitative insights.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    money, trailing_months, whole_months_between, Clock, CustomerId, DomainError, Genre,
    MembershipTier, MovieId, RentalStatus, YearMonth,
};
use crate::domain::rental::Rental;
use crate::store::{CustomerRepository, MovieRepository, RentalRepository};

/// Months covered by the trailing activity series.
const ACTIVITY_MONTHS: usize = 6;
/// Days of silence after which a customer counts as inactive.
const INACTIVITY_THRESHOLD_DAYS: i64 = 30;
/// Rentals needed to count as a frequent renter.
const FREQUENT_RENTER_THRESHOLD: usize = 10;
/// Total spend above which the high-spend insight fires.
const HIGH_SPEND_THRESHOLD: f64 = 100.0;
/// Rentals after which a Basic member is nudged to upgrade.
const UPGRADE_SUGGESTION_THRESHOLD: usize = 5;

/// Cap on loyalty points from rental frequency.
const LOYALTY_FREQUENCY_CAP: u32 = 30;
/// Cap on loyalty points from on-time returns.
const LOYALTY_ON_TIME_CAP: u32 = 25;
/// Cap on loyalty points from spend (one point per ten dollars).
const LOYALTY_SPEND_CAP: u32 = 20;
/// Cap on loyalty points from account age (one point per month).
const LOYALTY_AGE_CAP: u32 = 15;

/// Severity tag attached to each insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSeverity {
    Info,
    Positive,
    Warning,
}

/// A qualitative observation about a customer's behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub severity: InsightSeverity,
    pub message: String,
}

impl Insight {
    fn info(message: impl Into<String>) -> Self {
        Self {
            severity: InsightSeverity::Info,
            message: message.into(),
        }
    }

    fn positive(message: impl Into<String>) -> Self {
        Self {
            severity: InsightSeverity::Positive,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: InsightSeverity::Warning,
            message: message.into(),
        }
    }
}

/// Aggregate figures over one customer's rental history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub total_rentals: usize,
    pub active_rentals: usize,
    pub overdue_rentals: usize,
    pub returned_rentals: usize,
    pub total_spend: f64,
    pub total_late_fees: f64,
    /// Mean days between rental and return, over returned rentals only.
    pub average_rental_duration_days: Option<f64>,
    pub average_spend_per_rental: f64,
    pub first_rental_date: Option<NaiveDate>,
    pub last_rental_date: Option<NaiveDate>,
    /// Share of returned rentals that came back without a late fee.
    pub on_time_return_percentage: f64,
}

/// One genre's share of a customer's rentals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreActivity {
    pub genre: Genre,
    pub rental_count: usize,
    pub total_spend: f64,
    /// Share of ALL the customer's rentals, not just genre-resolvable ones.
    pub percentage: f64,
}

/// One month of the trailing activity series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyActivityPoint {
    pub month: YearMonth,
    pub rental_count: usize,
    pub spend: f64,
}

/// Full per-customer activity report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityReport {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub membership: MembershipTier,
    pub summary: ActivitySummary,
    pub genre_breakdown: Vec<GenreActivity>,
    pub monthly_activity: Vec<MonthlyActivityPoint>,
    /// 0-100 composite of frequency, punctuality, spend, account age, and
    /// membership tier.
    pub loyalty_score: u32,
    pub insights: Vec<Insight>,
}

/// Builds [`ActivityReport`]s from repository snapshots.
#[derive(Clone)]
pub struct CustomerActivityService {
    customers: CustomerRepository,
    movies: MovieRepository,
    rentals: RentalRepository,
    clock: Arc<dyn Clock>,
}

impl CustomerActivityService {
    /// Creates the service over the given repositories.
    pub fn new(
        customers: CustomerRepository,
        movies: MovieRepository,
        rentals: RentalRepository,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            customers,
            movies,
            rentals,
            clock,
        }
    }

    /// Builds the activity report for one customer.
    ///
    /// Fails with a not-found error if the customer does not exist.
    pub fn activity_report(&self, customer_id: CustomerId) -> Result<ActivityReport, DomainError> {
        let customer = self.customers.get(customer_id)?;
        let today = self.clock.today();

        let history: Vec<Rental> = self
            .rentals
            .get_all()
            .into_iter()
            .filter(|r| r.customer_id == customer_id)
            .collect();

        let summary = Self::summarize(&history, today);
        let genre_breakdown = self.genre_breakdown(&history, today);
        let monthly_activity = Self::monthly_activity(&history, today);
        let loyalty_score = Self::loyalty_score(&customer.membership, &summary, customer.member_since, today);
        let insights = Self::insights(&customer.membership, &summary, &genre_breakdown, today);

        Ok(ActivityReport {
            customer_id,
            customer_name: customer.name,
            membership: customer.membership,
            summary,
            genre_breakdown,
            monthly_activity,
            loyalty_score,
            insights,
        })
    }

    fn summarize(history: &[Rental], today: NaiveDate) -> ActivitySummary {
        let mut summary = ActivitySummary {
            total_rentals: history.len(),
            active_rentals: 0,
            overdue_rentals: 0,
            returned_rentals: 0,
            total_spend: 0.0,
            total_late_fees: 0.0,
            average_rental_duration_days: None,
            average_spend_per_rental: 0.0,
            first_rental_date: None,
            last_rental_date: None,
            on_time_return_percentage: 0.0,
        };

        let mut duration_total = 0i64;
        let mut on_time_returns = 0usize;
        for rental in history {
            match rental.status {
                RentalStatus::Active => summary.active_rentals += 1,
                RentalStatus::Overdue => summary.overdue_rentals += 1,
                RentalStatus::Returned => summary.returned_rentals += 1,
            }
            summary.total_spend += rental.total_cost(today);
            summary.total_late_fees += rental.late_fee;

            if let Some(returned) = rental.return_date {
                duration_total += (returned - rental.rental_date).num_days();
                if rental.late_fee == 0.0 {
                    on_time_returns += 1;
                }
            }

            summary.first_rental_date = Some(match summary.first_rental_date {
                Some(first) if first <= rental.rental_date => first,
                _ => rental.rental_date,
            });
            summary.last_rental_date = Some(match summary.last_rental_date {
                Some(last) if last >= rental.rental_date => last,
                _ => rental.rental_date,
            });
        }

        summary.total_spend = money::round_cents(summary.total_spend);
        summary.total_late_fees = money::round_cents(summary.total_late_fees);
        summary.average_spend_per_rental =
            money::average_or_zero(summary.total_spend, summary.total_rentals);
        if summary.returned_rentals > 0 {
            summary.average_rental_duration_days = Some(
                (duration_total as f64 / summary.returned_rentals as f64 * 100.0).round() / 100.0,
            );
            summary.on_time_return_percentage =
                (on_time_returns as f64 / summary.returned_rentals as f64 * 10000.0).round()
                    / 100.0;
        }
        summary
    }

    fn genre_breakdown(&self, history: &[Rental], today: NaiveDate) -> Vec<GenreActivity> {
        let movie_index: HashMap<MovieId, Option<Genre>> = self
            .movies
            .get_all()
            .into_iter()
            .map(|m| (m.id, m.genre))
            .collect();

        let mut per_genre: HashMap<Genre, GenreActivity> = HashMap::new();
        for rental in history {
            // Rentals whose movie is gone or genre-less are skipped here;
            // they still count toward the percentage denominator.
            let genre = match movie_index.get(&rental.movie_id).copied().flatten() {
                Some(genre) => genre,
                None => continue,
            };
            let entry = per_genre.entry(genre).or_insert(GenreActivity {
                genre,
                rental_count: 0,
                total_spend: 0.0,
                percentage: 0.0,
            });
            entry.rental_count += 1;
            entry.total_spend += rental.total_cost(today);
        }

        let total = history.len();
        let mut breakdown: Vec<GenreActivity> = per_genre
            .into_values()
            .map(|mut entry| {
                entry.total_spend = money::round_cents(entry.total_spend);
                entry.percentage =
                    (entry.rental_count as f64 / total as f64 * 10000.0).round() / 100.0;
                entry
            })
            .collect();
        breakdown.sort_by(|a, b| {
            b.rental_count
                .cmp(&a.rental_count)
                .then_with(|| a.genre.display_name().cmp(b.genre.display_name()))
        });
        breakdown
    }

    fn monthly_activity(history: &[Rental], today: NaiveDate) -> Vec<MonthlyActivityPoint> {
        let months = trailing_months(today, ACTIVITY_MONTHS);
        let mut per_month: HashMap<YearMonth, MonthlyActivityPoint> = months
            .iter()
            .map(|month| {
                (
                    *month,
                    MonthlyActivityPoint {
                        month: *month,
                        rental_count: 0,
                        spend: 0.0,
                    },
                )
            })
            .collect();

        for rental in history {
            let month = YearMonth::of(rental.rental_date);
            if let Some(point) = per_month.get_mut(&month) {
                point.rental_count += 1;
                point.spend += rental.total_cost(today);
            }
        }

        months
            .into_iter()
            .map(|month| {
                let mut point = per_month.remove(&month).unwrap_or(MonthlyActivityPoint {
                    month,
                    rental_count: 0,
                    spend: 0.0,
                });
                point.spend = money::round_cents(point.spend);
                point
            })
            .collect()
    }

    /// Composite 0-100 score: frequency (up to 30), on-time rate (up to
    /// 25), spend (1 per $10, up to 20), account age (1 per month, up to
    /// 15), plus the membership tier bonus.
    fn loyalty_score(
        membership: &MembershipTier,
        summary: &ActivitySummary,
        member_since: Option<NaiveDate>,
        today: NaiveDate,
    ) -> u32 {
        let frequency = (summary.total_rentals as u32).min(LOYALTY_FREQUENCY_CAP);
        let on_time = ((summary.on_time_return_percentage / 100.0) * LOYALTY_ON_TIME_CAP as f64)
            .round() as u32;
        let spend = ((summary.total_spend / 10.0) as u32).min(LOYALTY_SPEND_CAP);
        let age = member_since
            .map(|since| whole_months_between(since, today))
            .unwrap_or(0)
            .min(LOYALTY_AGE_CAP);

        (frequency + on_time + spend + age + membership.loyalty_bonus()).min(100)
    }

    fn insights(
        membership: &MembershipTier,
        summary: &ActivitySummary,
        genre_breakdown: &[GenreActivity],
        today: NaiveDate,
    ) -> Vec<Insight> {
        if summary.total_rentals == 0 {
            return vec![Insight::info(
                "No rental history yet. Browse the catalog to get started.",
            )];
        }

        let mut insights = Vec::new();

        if summary.overdue_rentals > 0 {
            insights.push(Insight::warning(format!(
                "{} rental(s) are overdue. Return them to avoid further late fees.",
                summary.overdue_rentals
            )));
        }

        if summary.total_rentals >= FREQUENT_RENTER_THRESHOLD {
            insights.push(Insight::positive(format!(
                "Frequent renter: {} rentals and counting.",
                summary.total_rentals
            )));
        }

        if summary.returned_rentals > 0 && summary.on_time_return_percentage >= 100.0 {
            insights.push(Insight::positive(
                "Every rental so far has come back on time.",
            ));
        }

        if let Some(top) = genre_breakdown.first() {
            insights.push(Insight::info(format!(
                "{} is the most rented genre ({} rentals).",
                top.genre.display_name(),
                top.rental_count
            )));
        }

        if summary.total_spend > HIGH_SPEND_THRESHOLD {
            insights.push(Insight::positive(format!(
                "Total spend of ${:.2} puts this customer among the store's best.",
                summary.total_spend
            )));
        }

        if *membership == MembershipTier::Basic
            && summary.total_rentals >= UPGRADE_SUGGESTION_THRESHOLD
        {
            insights.push(Insight::info(
                "Rents often on a Basic membership. A Silver upgrade would pay off.",
            ));
        }

        if let Some(last) = summary.last_rental_date {
            if (today - last).num_days() > INACTIVITY_THRESHOLD_DAYS {
                insights.push(Insight::warning(format!(
                    "No rentals in the last {} days.",
                    (today - last).num_days()
                )));
            }
        }

        insights
    }
}
