use serde::{Deserialize, Serialize};

/// Occupied (furnished, lived-in) vs vacant (empty) home
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StagingType {
    Occupied,
    Vacant,
}

/// Property and staging parameters supplied by the quote form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteDetails {
    /// Total square footage of the property
    pub square_footage: u32,

    pub bedrooms: u32,
    pub bathrooms: u32,
    pub living_areas: u32,
    pub offices: u32,
    pub dining_spaces: u32,

    /// Driving distance from downtown, in miles
    pub distance_from_downtown: f64,

    pub outdoor_staging: bool,
    pub multi_floor: bool,
    pub staging_type: StagingType,
}

impl QuoteDetails {
    /// Sanity-check the numeric domain before quoting. The engine itself is
    /// total and will happily quote garbage; callers validate first.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if !self.distance_from_downtown.is_finite() || self.distance_from_downtown < 0.0 {
            return Err(QuoteError::InvalidDistance(self.distance_from_downtown));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("Distance from downtown must be a finite, non-negative number of miles, got {0}")]
    InvalidDistance(f64),
}

/// Per-room dollar rates for one staging type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomRates {
    pub bedroom: i64,
    pub bathroom: i64,
    pub living_area: i64,
    pub office: i64,
    pub dining_space: i64,
}

/// Rate card for the quote engine. The defaults are the published rates;
/// the base price covers a kitchen and entryway regardless of room counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRates {
    pub occupied_base: i64,
    pub vacant_base: i64,
    pub occupied: RoomRates,
    pub vacant: RoomRates,

    /// Miles beyond which the travel surcharge applies (strict inequality)
    pub distance_threshold_miles: f64,
    pub distance_adjustment: i64,

    pub multi_floor_adjustment: i64,

    /// Square footage at which the large-home surcharge applies (inclusive)
    pub large_square_footage_threshold: u32,
    pub large_square_footage_adjustment: i64,

    pub outdoor_adjustment: i64,

    /// Variance band applied to the unrounded total for the estimate range
    pub range_variance: f64,
}

impl Default for QuoteRates {
    fn default() -> Self {
        Self {
            occupied_base: 500,
            vacant_base: 800,
            occupied: RoomRates {
                bedroom: 250,
                bathroom: 100,
                living_area: 250,
                office: 100,
                dining_space: 100,
            },
            vacant: RoomRates {
                bedroom: 500,
                bathroom: 100,
                living_area: 500,
                office: 250,
                dining_space: 250,
            },
            distance_threshold_miles: 20.0,
            distance_adjustment: 500,
            multi_floor_adjustment: 250,
            large_square_footage_threshold: 3500,
            large_square_footage_adjustment: 1000,
            outdoor_adjustment: 250,
            range_variance: 0.15,
        }
    }
}

/// One room category in the itemized breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomLine {
    pub count: u32,
    pub rate: i64,
    pub subtotal: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

/// Fully itemized quote. Every count, rate, and subtotal is exposed so a
/// consumer can render an invoice without recomputing anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    pub staging_type: StagingType,
    pub base_price: i64,
    pub bedrooms: RoomLine,
    pub bathrooms: RoomLine,
    pub living_areas: RoomLine,
    pub offices: RoomLine,
    pub dining_spaces: RoomLine,
    pub distance_adjustment: i64,
    pub multi_floor_adjustment: i64,
    pub large_square_footage_adjustment: i64,
    pub outdoor_adjustment: i64,
    pub total_estimate: i64,
    pub price_range: PriceRange,
}

/// Staging quote engine
pub struct QuoteEngine {
    rates: QuoteRates,
}

impl QuoteEngine {
    pub fn new(rates: QuoteRates) -> Self {
        Self { rates }
    }

    /// Compute an itemized quote. Deterministic, no side effects; integer
    /// arithmetic throughout, with rounding deferred to the range bounds.
    pub fn quote(&self, details: &QuoteDetails) -> QuoteBreakdown {
        let (base_price, rates) = match details.staging_type {
            StagingType::Occupied => (self.rates.occupied_base, &self.rates.occupied),
            StagingType::Vacant => (self.rates.vacant_base, &self.rates.vacant),
        };

        let bedrooms = room_line(details.bedrooms, rates.bedroom);
        let bathrooms = room_line(details.bathrooms, rates.bathroom);
        let living_areas = room_line(details.living_areas, rates.living_area);
        let offices = room_line(details.offices, rates.office);
        let dining_spaces = room_line(details.dining_spaces, rates.dining_space);

        let distance_adjustment = if details.distance_from_downtown > self.rates.distance_threshold_miles {
            self.rates.distance_adjustment
        } else {
            0
        };
        let multi_floor_adjustment = if details.multi_floor {
            self.rates.multi_floor_adjustment
        } else {
            0
        };
        let large_square_footage_adjustment =
            if details.square_footage >= self.rates.large_square_footage_threshold {
                self.rates.large_square_footage_adjustment
            } else {
                0
            };
        let outdoor_adjustment = if details.outdoor_staging {
            self.rates.outdoor_adjustment
        } else {
            0
        };

        let total_estimate = base_price
            + bedrooms.subtotal
            + bathrooms.subtotal
            + living_areas.subtotal
            + offices.subtotal
            + dining_spaces.subtotal
            + distance_adjustment
            + multi_floor_adjustment
            + large_square_footage_adjustment
            + outdoor_adjustment;

        // Both bounds derive from the unrounded total and round independently,
        // so the range is not necessarily centered on a rounded total.
        let price_range = PriceRange {
            min: round_to_hundred(total_estimate as f64 * (1.0 - self.rates.range_variance)),
            max: round_to_hundred(total_estimate as f64 * (1.0 + self.rates.range_variance)),
        };

        QuoteBreakdown {
            staging_type: details.staging_type,
            base_price,
            bedrooms,
            bathrooms,
            living_areas,
            offices,
            dining_spaces,
            distance_adjustment,
            multi_floor_adjustment,
            large_square_footage_adjustment,
            outdoor_adjustment,
            total_estimate,
            price_range,
        }
    }
}

impl Default for QuoteEngine {
    fn default() -> Self {
        Self::new(QuoteRates::default())
    }
}

/// Quote with the published rate card
pub fn calculate_staging_quote(details: &QuoteDetails) -> QuoteBreakdown {
    QuoteEngine::default().quote(details)
}

fn room_line(count: u32, rate: i64) -> RoomLine {
    RoomLine {
        count,
        rate,
        subtotal: count as i64 * rate,
    }
}

/// Round to the nearest multiple of 100, halves rounding up
fn round_to_hundred(value: f64) -> i64 {
    ((value / 100.0).round() * 100.0) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(staging_type: StagingType) -> QuoteDetails {
        QuoteDetails {
            square_footage: 1000,
            bedrooms: 0,
            bathrooms: 0,
            living_areas: 0,
            offices: 0,
            dining_spaces: 0,
            distance_from_downtown: 5.0,
            outdoor_staging: false,
            multi_floor: false,
            staging_type,
        }
    }

    #[test]
    fn test_occupied_base_only() {
        let quote = calculate_staging_quote(&details(StagingType::Occupied));

        assert_eq!(quote.base_price, 500);
        assert_eq!(quote.total_estimate, 500);
        // 425 -> 400, 575 -> 600
        assert_eq!(quote.price_range, PriceRange { min: 400, max: 600 });
    }

    #[test]
    fn test_vacant_fully_loaded() {
        let mut d = details(StagingType::Vacant);
        d.bedrooms = 3;
        d.bathrooms = 2;
        d.living_areas = 1;
        d.distance_from_downtown = 25.0;
        d.multi_floor = true;
        d.square_footage = 4000;
        d.outdoor_staging = true;

        let quote = calculate_staging_quote(&d);

        assert_eq!(quote.base_price, 800);
        assert_eq!(quote.bedrooms.subtotal, 1500);
        assert_eq!(quote.bathrooms.subtotal, 200);
        assert_eq!(quote.living_areas.subtotal, 500);
        assert_eq!(quote.offices.subtotal, 0);
        assert_eq!(quote.dining_spaces.subtotal, 0);
        assert_eq!(quote.distance_adjustment, 500);
        assert_eq!(quote.multi_floor_adjustment, 250);
        assert_eq!(quote.large_square_footage_adjustment, 1000);
        assert_eq!(quote.outdoor_adjustment, 250);
        assert_eq!(quote.total_estimate, 5000);
    }

    #[test]
    fn test_distance_boundary_is_strict() {
        let mut d = details(StagingType::Occupied);
        d.distance_from_downtown = 20.0;
        assert_eq!(calculate_staging_quote(&d).distance_adjustment, 0);

        d.distance_from_downtown = 20.0001;
        assert_eq!(calculate_staging_quote(&d).distance_adjustment, 500);
    }

    #[test]
    fn test_square_footage_boundary_is_inclusive() {
        let mut d = details(StagingType::Vacant);
        d.square_footage = 3499;
        assert_eq!(calculate_staging_quote(&d).large_square_footage_adjustment, 0);

        d.square_footage = 3500;
        assert_eq!(calculate_staging_quote(&d).large_square_footage_adjustment, 1000);
    }

    #[test]
    fn test_bathroom_rate_invariant_across_staging_type() {
        let mut occupied = details(StagingType::Occupied);
        occupied.bathrooms = 3;
        let mut vacant = details(StagingType::Vacant);
        vacant.bathrooms = 3;

        let occupied_quote = calculate_staging_quote(&occupied);
        let vacant_quote = calculate_staging_quote(&vacant);

        assert_eq!(occupied_quote.bathrooms.rate, 100);
        assert_eq!(vacant_quote.bathrooms.rate, 100);

        // Every other category differs between the two rate cards
        let rates = QuoteRates::default();
        assert_ne!(rates.occupied.bedroom, rates.vacant.bedroom);
        assert_ne!(rates.occupied.living_area, rates.vacant.living_area);
        assert_ne!(rates.occupied.office, rates.vacant.office);
        assert_ne!(rates.occupied.dining_space, rates.vacant.dining_space);
    }

    #[test]
    fn test_total_is_exact_sum_of_components() {
        for staging_type in [StagingType::Occupied, StagingType::Vacant] {
            for bedrooms in [0, 1, 4] {
                for multi_floor in [false, true] {
                    for square_footage in [900, 3500, 5200] {
                        let d = QuoteDetails {
                            square_footage,
                            bedrooms,
                            bathrooms: 2,
                            living_areas: 1,
                            offices: 1,
                            dining_spaces: 1,
                            distance_from_downtown: 22.5,
                            outdoor_staging: true,
                            multi_floor,
                            staging_type,
                        };
                        let q = calculate_staging_quote(&d);

                        let sum = q.base_price
                            + q.bedrooms.subtotal
                            + q.bathrooms.subtotal
                            + q.living_areas.subtotal
                            + q.offices.subtotal
                            + q.dining_spaces.subtotal
                            + q.distance_adjustment
                            + q.multi_floor_adjustment
                            + q.large_square_footage_adjustment
                            + q.outdoor_adjustment;
                        assert_eq!(q.total_estimate, sum);
                    }
                }
            }
        }
    }

    #[test]
    fn test_range_bounds_are_round_hundreds_around_total() {
        let mut d = details(StagingType::Vacant);
        d.bedrooms = 2;
        d.bathrooms = 1;

        let q = calculate_staging_quote(&d);
        assert!(q.price_range.min <= q.total_estimate);
        assert!(q.total_estimate <= q.price_range.max);
        assert_eq!(q.price_range.min % 100, 0);
        assert_eq!(q.price_range.max % 100, 0);
    }

    #[test]
    fn test_validate_rejects_bad_distance() {
        let mut d = details(StagingType::Occupied);
        d.distance_from_downtown = -1.0;
        assert!(d.validate().is_err());

        d.distance_from_downtown = f64::NAN;
        assert!(d.validate().is_err());

        d.distance_from_downtown = 0.0;
        assert!(d.validate().is_ok());
    }
}
