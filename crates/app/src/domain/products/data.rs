//! Products Data

use crate::domain::products::errors::ProductsServiceError;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub slug: String,
    pub name: String,

    /// Unit price in whole rupiah.
    pub price: u64,
}

impl NewProduct {
    /// Check the product can be addressed by the cart endpoints and stored.
    ///
    /// # Errors
    ///
    /// Returns an error for empty or non `[a-z0-9-]` slugs, blank names, and
    /// prices beyond the `BIGINT` column.
    pub fn validate(&self) -> Result<(), ProductsServiceError> {
        let slug_ok = !self.slug.is_empty()
            && !self.slug.starts_with('-')
            && self
                .slug
                .bytes()
                .all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-');

        if !slug_ok {
            return Err(ProductsServiceError::InvalidSlug(self.slug.clone()));
        }

        if self.name.trim().is_empty() {
            return Err(ProductsServiceError::MissingName);
        }

        if i64::try_from(self.price).is_err() {
            return Err(ProductsServiceError::PriceOutOfRange(self.price));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(slug: &str, name: &str, price: u64) -> NewProduct {
        NewProduct {
            slug: slug.to_string(),
            name: name.to_string(),
            price,
        }
    }

    #[test]
    fn url_safe_products_are_valid() {
        assert!(product("linen-shirt-2", "Linen Shirt", 1000).validate().is_ok());
    }

    #[test]
    fn slugs_outside_url_alphabet_are_rejected() {
        for slug in ["", "Linen", "linen shirt", "linen/shirt", "-linen"] {
            assert!(
                matches!(
                    product(slug, "Linen", 1).validate(),
                    Err(ProductsServiceError::InvalidSlug(_))
                ),
                "{slug:?} should be rejected"
            );
        }
    }

    #[test]
    fn blank_names_and_huge_prices_are_rejected() {
        assert!(matches!(
            product("linen", "  ", 1).validate(),
            Err(ProductsServiceError::MissingName)
        ));
        assert!(matches!(
            product("linen", "Linen", u64::MAX).validate(),
            Err(ProductsServiceError::PriceOutOfRange(u64::MAX))
        ));
    }
}
