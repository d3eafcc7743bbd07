use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::geo::Coordinate;
use crate::professional::Category;

pub const DEFAULT_RADIUS_METERS: u32 = 5_000;
pub const MIN_RADIUS_METERS: u32 = 100;

/// A validated proximity search request.
///
/// Constructed through [`SearchQuery::new`] and the `with_*` setters, each of
/// which enforces its own bound, so a `SearchQuery` value is always in range.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    origin: Coordinate,
    radius_meters: u32,
    category: Option<Category>,
    min_rating: Option<f64>,
    max_price: Option<Decimal>,
}

impl SearchQuery {
    #[must_use]
    pub fn new(origin: Coordinate) -> Self {
        Self {
            origin,
            radius_meters: DEFAULT_RADIUS_METERS,
            category: None,
            min_rating: None,
            max_price: None,
        }
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::RadiusTooSmall`] below [`MIN_RADIUS_METERS`].
    pub fn with_radius_meters(mut self, radius_meters: u32) -> Result<Self, ValidationError> {
        if radius_meters < MIN_RADIUS_METERS {
            return Err(ValidationError::RadiusTooSmall {
                radius: radius_meters,
                min: MIN_RADIUS_METERS,
            });
        }
        self.radius_meters = radius_meters;
        Ok(self)
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidMinRating`] outside `[0, 5]`.
    pub fn with_min_rating(mut self, min_rating: f64) -> Result<Self, ValidationError> {
        if !(0.0..=5.0).contains(&min_rating) {
            return Err(ValidationError::InvalidMinRating(min_rating));
        }
        self.min_rating = Some(min_rating);
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::NegativeMaxPrice`] for negative ceilings.
    pub fn with_max_price(mut self, max_price: Decimal) -> Result<Self, ValidationError> {
        if max_price.is_sign_negative() && !max_price.is_zero() {
            return Err(ValidationError::NegativeMaxPrice(max_price));
        }
        self.max_price = Some(max_price);
        Ok(self)
    }

    #[must_use]
    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    #[must_use]
    pub fn radius_meters(&self) -> u32 {
        self.radius_meters
    }

    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    #[must_use]
    pub fn min_rating(&self) -> Option<f64> {
        self.min_rating
    }

    #[must_use]
    pub fn max_price(&self) -> Option<Decimal> {
        self.max_price
    }
}
