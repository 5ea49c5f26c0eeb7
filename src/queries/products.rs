//! Listing-query construction and mutation validation for products.
//!
//! Everything in this module is a pure transformation: raw, untrusted input
//! goes in, and either a validated specification or exactly one error comes
//! out. Nothing here touches storage; the service layer consumes the
//! resulting [`ProductListQuery`] value.

use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::errors::ServiceError;

pub const MAX_PAGE_SIZE: u64 = 100;
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_NAME_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Raw listing parameters as they arrive on the query string.
///
/// Numeric fields deserialize permissively (out-of-range values are clamped
/// during [`ProductListQuery::build`], never rejected); string fields are
/// normalized before any validation runs.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductListParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_dir: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub min_price: Option<Decimal>,
    #[serde(default)]
    pub max_price: Option<Decimal>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for ProductListParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            sort_by: None,
            sort_dir: None,
            name: None,
            min_price: None,
            max_price: None,
        }
    }
}

/// Sort keys accepted by the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Price,
    CreatedAt,
}

impl SortField {
    /// Case-insensitive parse; returns `None` for unknown fields.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("name") {
            Some(Self::Name)
        } else if raw.eq_ignore_ascii_case("price") {
            Some(Self::Price)
        } else if raw.eq_ignore_ascii_case("createdAt") {
            Some(Self::CreatedAt)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::CreatedAt => "createdAt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A validated, normalized listing specification.
///
/// Construction either succeeds with every field inside its documented range
/// or fails with a single error; there is no partially-valid state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListQuery {
    pub page: u64,
    pub page_size: u64,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub name_contains: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl ProductListQuery {
    /// Validates and normalizes raw listing parameters.
    ///
    /// Checks run in a fixed order and the first failing one wins:
    /// sortBy, sortDir, price range, minPrice, maxPrice, name-filter length.
    /// Out-of-range `page`/`pageSize` are clamped, and blank sort inputs fall
    /// back to `createdAt`/`desc`; neither is an error.
    pub fn build(params: &ProductListParams) -> Result<Self, ServiceError> {
        let page = params.page.max(1) as u64;
        let page_size = params.page_size.clamp(1, MAX_PAGE_SIZE as i64) as u64;

        let sort_field = match normalize_optional(params.sort_by.as_deref()) {
            Some(raw) => SortField::parse(raw).ok_or(ServiceError::InvalidSortField)?,
            None => SortField::CreatedAt,
        };

        let sort_direction = match normalize_optional(params.sort_dir.as_deref()) {
            Some(raw) => SortDirection::parse(raw).ok_or(ServiceError::InvalidSortDirection)?,
            None => SortDirection::Desc,
        };

        if let (Some(min_price), Some(max_price)) = (params.min_price, params.max_price) {
            if min_price > max_price {
                return Err(ServiceError::InvalidPriceRange);
            }
        }

        if let Some(min_price) = params.min_price {
            if min_price < Decimal::ZERO {
                return Err(ServiceError::InvalidMinPrice);
            }
        }

        if let Some(max_price) = params.max_price {
            if max_price < Decimal::ZERO {
                return Err(ServiceError::InvalidMaxPrice);
            }
        }

        let name_contains = match normalize_optional(params.name.as_deref()) {
            Some(trimmed) => {
                if trimmed.chars().count() > MAX_NAME_LENGTH {
                    return Err(ServiceError::InvalidNameFilter);
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        Ok(Self {
            page,
            page_size,
            sort_field,
            sort_direction,
            name_contains,
            min_price: params.min_price,
            max_price: params.max_price,
        })
    }

    /// Zero-based row offset of the requested window.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// Treats blank or whitespace-only optional strings as absent.
fn normalize_optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Number of pages needed for `total_items` rows at `page_size` rows per page.
/// Zero when there are no matching rows.
pub fn page_count(total_items: u64, page_size: u64) -> u64 {
    if total_items == 0 {
        0
    } else {
        (total_items + page_size - 1) / page_size
    }
}

/// Normalized create/update payload, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductMutation {
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

/// Validates a create/update payload under the shared rule set.
///
/// Checks run in a fixed order: name presence, name length, description
/// length, price positivity. On success the returned mutation carries the
/// trimmed name, the trimmed-or-empty description and the price unchanged.
pub fn validate_mutation(
    name: Option<&str>,
    description: Option<&str>,
    price: Decimal,
) -> Result<ProductMutation, ServiceError> {
    let name = match normalize_optional(name) {
        Some(trimmed) => trimmed,
        None => return Err(ServiceError::InvalidName("Name is required.".to_string())),
    };

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ServiceError::InvalidName(
            "Name cannot be longer than 200 characters.".to_string(),
        ));
    }

    let description = description.map(str::trim).unwrap_or_default().to_string();
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ServiceError::InvalidDescription);
    }

    if price <= Decimal::ZERO {
        return Err(ServiceError::InvalidPrice);
    }

    Ok(ProductMutation {
        name: name.to_string(),
        description,
        price,
    })
}
