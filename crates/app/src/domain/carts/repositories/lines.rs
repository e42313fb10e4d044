//! Cart Lines Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    carts::{
        records::{CartId, CartLineId, CartLineRecord},
        size::Size,
    },
    products::records::ProductRecord,
    users::records::UserId,
};

use super::carts::try_get_amount;

const GET_CART_LINES_SQL: &str = include_str!("../sql/get_cart_lines.sql");
const FIND_CART_LINE_SQL: &str = include_str!("../sql/find_cart_line.sql");
const UPSERT_CART_LINE_SQL: &str = include_str!("../sql/upsert_cart_line.sql");
const DECREMENT_CART_LINE_SQL: &str = include_str!("../sql/decrement_cart_line.sql");
const DELETE_CART_LINE_SQL: &str = include_str!("../sql/delete_cart_line.sql");
const TOGGLE_CART_LINE_SQL: &str = include_str!("../sql/toggle_cart_line.sql");
const COUNT_CART_LINES_SQL: &str = include_str!("../sql/count_cart_lines.sql");
const CHECK_OUT_SELECTED_LINES_SQL: &str = include_str!("../sql/check_out_selected_lines.sql");
const MOVE_UNSELECTED_LINES_SQL: &str = include_str!("../sql/move_unselected_lines.sql");

/// Selected and unselected line counts of one cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineCounts {
    pub selected: i64,
    pub unselected: i64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartLinesRepository;

impl PgCartLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lines of every given cart, grouped by cart then insertion order.
    pub(crate) async fn get_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        carts: &[CartId],
    ) -> Result<Vec<CartLineRecord>, sqlx::Error> {
        let ids: Vec<i64> = carts.iter().map(|cart| cart.into_i64()).collect();

        query_as::<Postgres, CartLineRecord>(GET_CART_LINES_SQL)
            .bind(ids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        product_slug: &str,
        size: Size,
    ) -> Result<Option<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(FIND_CART_LINE_SQL)
            .bind(cart.into_i64())
            .bind(product_slug)
            .bind(size.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Insert a quantity-one line or bump the existing line's quantity,
    /// refreshing its unit price from the product.
    pub(crate) async fn upsert_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        user: UserId,
        product: &ProductRecord,
        size: Size,
    ) -> Result<(), sqlx::Error> {
        let price_i64 = i64::try_from(product.price).map_err(|e| sqlx::Error::ColumnDecode {
            index: "unit_price".to_string(),
            source: Box::new(e),
        })?;

        query(UPSERT_CART_LINE_SQL)
            .bind(cart.into_i64())
            .bind(user.into_i64())
            .bind(product.id.into_i64())
            .bind(size.as_str())
            .bind(price_i64)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn decrement_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: CartLineId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DECREMENT_CART_LINE_SQL)
            .bind(line.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: CartLineId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_LINE_SQL)
            .bind(line.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn toggle_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: CartLineId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(TOGGLE_CART_LINE_SQL)
            .bind(line.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<LineCounts, sqlx::Error> {
        let (selected, unselected): (i64, i64) = query_as(COUNT_CART_LINES_SQL)
            .bind(cart.into_i64())
            .fetch_one(&mut **tx)
            .await?;

        Ok(LineCounts {
            selected,
            unselected,
        })
    }

    pub(crate) async fn check_out_selected_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CHECK_OUT_SELECTED_LINES_SQL)
            .bind(cart.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn move_unselected_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        from: CartId,
        to: CartId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MOVE_UNSELECTED_LINES_SQL)
            .bind(from.into_i64())
            .bind(to.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let size: String = row.try_get("size")?;
        let size = size.parse::<Size>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "size".to_string(),
            source: Box::new(e),
        })?;

        let quantity: i32 = row.try_get("quantity")?;
        let quantity = u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: CartLineId::from_i64(row.try_get("id")?),
            cart_id: CartId::from_i64(row.try_get("cart_id")?),
            user_id: UserId::from_i64(row.try_get("user_id")?),
            product_id: row.try_get::<i64, _>("product_id")?.into(),
            product_slug: row.try_get("product_slug")?,
            product_name: row.try_get("product_name")?,
            size,
            quantity,
            unit_price: try_get_amount(row, "unit_price")?,
            subtotal: try_get_amount(row, "subtotal")?,
            selected: row.try_get("selected")?,
            checked_out: row.try_get("checked_out")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
