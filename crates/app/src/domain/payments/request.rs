//! Charge Requests

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{
    carts::records::{CartId, CartRecord},
    payments::method::PaymentMethod,
    users::records::{UserId, UserRecord},
};

/// Message printed on convenience store receipts.
pub const CSTORE_MESSAGE: &str = "Terimakasih sudah berbelanja";

/// Longest item name the gateway accepts.
const ITEM_NAME_MAX_CHARS: usize = 50;

const USERNAME_HASH_CHARS: usize = 8;

/// Gateway charge payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeRequest {
    pub payment_type: String,
    pub transaction_details: TransactionDetails,
    pub customer_details: CustomerDetails,
    pub item_details: Vec<ItemDetail>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gopay: Option<GopayOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cstore: Option<CstoreOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDetails {
    pub order_id: String,
    pub gross_amount: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub id: String,
    pub name: String,
    pub size: String,
    pub price: u64,
    pub quantity: u32,
    pub subtotal: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GopayOptions {
    pub enable_callback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CstoreOptions {
    pub store: String,
    pub message: String,
    pub alfamart_free_text: String,
}

/// First characters of the SHA-256 hex digest of a username.
#[must_use]
pub fn username_hash(username: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(username.as_bytes()));

    digest.chars().take(USERNAME_HASH_CHARS).collect()
}

/// Format: `{PREFIX}-{user_id}-{cart_id}-{YYYYMMDD}{username_hash}-{total}`
#[must_use]
pub fn order_id(
    method: PaymentMethod,
    user: UserId,
    username: &str,
    cart: CartId,
    total: u64,
    today: Date,
) -> String {
    format!(
        "{}-{user}-{cart}-{:04}{:02}{:02}{}-{total}",
        method.order_prefix(),
        today.year(),
        today.month(),
        today.day(),
        username_hash(username),
    )
}

/// Build the charge payload for a cart's selected lines.
#[must_use]
pub fn build_charge_request(
    user: &UserRecord,
    cart: &CartRecord,
    method: PaymentMethod,
    today: Date,
) -> ChargeRequest {
    let item_details = cart
        .selected_lines()
        .map(|line| ItemDetail {
            id: format!("{}-{}", line.product_slug, line.size),
            name: line.product_name.chars().take(ITEM_NAME_MAX_CHARS).collect(),
            size: line.size.to_string(),
            price: line.unit_price,
            quantity: line.quantity,
            subtotal: line.subtotal,
        })
        .collect();

    let (gopay, cstore) = match method {
        PaymentMethod::Gopay => (
            Some(GopayOptions {
                enable_callback: true,
            }),
            None,
        ),
        PaymentMethod::Cstore(store) => (
            None,
            Some(CstoreOptions {
                store: store.as_str().to_string(),
                message: CSTORE_MESSAGE.to_string(),
                alfamart_free_text: CSTORE_MESSAGE.to_string(),
            }),
        ),
    };

    ChargeRequest {
        payment_type: method.payment_type().to_string(),
        transaction_details: TransactionDetails {
            order_id: order_id(method, user.id, &user.username, cart.id, cart.total, today),
            gross_amount: cart.total,
        },
        customer_details: CustomerDetails {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        },
        item_details,
        gopay,
        cstore,
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};

    use crate::domain::{
        carts::{
            Size,
            records::{CartLineId, CartLineRecord},
        },
        payments::method::Store,
    };

    use super::*;

    fn user() -> UserRecord {
        UserRecord {
            id: UserId::from_i64(7),
            email: "puny@example.com".to_string(),
            username: "punyUser".to_string(),
            first_name: "Puny".to_string(),
            last_name: None,
            is_active: true,
            is_admin: false,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn line(id: i64, slug: &str, quantity: u32, unit_price: u64, selected: bool) -> CartLineRecord {
        CartLineRecord {
            id: CartLineId::from_i64(id),
            cart_id: CartId::from_i64(42),
            user_id: UserId::from_i64(7),
            product_id: id.into(),
            product_slug: slug.to_string(),
            product_name: format!("Product {slug}"),
            size: Size::S,
            quantity,
            unit_price,
            subtotal: unit_price * u64::from(quantity),
            selected,
            checked_out: false,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn cart() -> CartRecord {
        CartRecord {
            id: CartId::from_i64(42),
            user_id: UserId::from_i64(7),
            checked_out: false,
            total: 2000,
            lines: vec![line(1, "tee", 2, 1000, true), line(2, "cap", 1, 300, false)],
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn username_hash_is_stable_prefix_of_sha256() {
        let hash = username_hash("punyUser");

        assert_eq!(hash.len(), 8);
        assert_eq!(hash, username_hash("punyUser"));
        assert!(
            format!("{:x}", Sha256::digest(b"punyUser")).starts_with(&hash),
            "hash should be the digest prefix"
        );
    }

    #[test]
    fn order_id_follows_composite_format() {
        let id = order_id(
            PaymentMethod::Gopay,
            UserId::from_i64(7),
            "punyUser",
            CartId::from_i64(42),
            1000,
            date(2024, 3, 9),
        );

        assert_eq!(id, format!("GOPAY-7-42-20240309{}-1000", username_hash("punyUser")));
    }

    #[test]
    fn gopay_request_carries_selected_lines_and_callback() {
        let request = build_charge_request(&user(), &cart(), PaymentMethod::Gopay, date(2024, 1, 2));

        assert_eq!(request.payment_type, "gopay");
        assert_eq!(request.transaction_details.gross_amount, 2000);
        assert!(request.transaction_details.order_id.starts_with("GOPAY-7-42-20240102"));
        assert!(request.transaction_details.order_id.ends_with("-2000"));
        assert_eq!(request.item_details.len(), 1, "unselected lines are not charged");
        assert_eq!(request.item_details[0].quantity, 2);
        assert_eq!(request.item_details[0].subtotal, 2000);
        assert_eq!(request.item_details[0].size, "S");
        assert_eq!(request.gopay, Some(GopayOptions { enable_callback: true }));
        assert!(request.cstore.is_none());
        assert_eq!(request.customer_details.email, "puny@example.com");
    }

    #[test]
    fn cstore_request_names_store_and_receipt_message() {
        let request = build_charge_request(
            &user(),
            &cart(),
            PaymentMethod::Cstore(Store::Indomaret),
            date(2024, 1, 2),
        );

        let cstore = request.cstore.expect("cstore options");

        assert_eq!(request.payment_type, "cstore");
        assert!(request.transaction_details.order_id.starts_with("CSTORE-"));
        assert_eq!(cstore.store, "indomaret");
        assert_eq!(cstore.message, CSTORE_MESSAGE);
        assert_eq!(cstore.alfamart_free_text, CSTORE_MESSAGE);
        assert!(request.gopay.is_none());
    }

    #[test]
    fn serialized_request_omits_unused_method_options() {
        let request = build_charge_request(&user(), &cart(), PaymentMethod::Gopay, date(2024, 1, 2));

        let json = serde_json::to_value(&request).expect("serialize");

        assert!(json.get("cstore").is_none());
        assert_eq!(json["gopay"]["enable_callback"], true);
        assert_eq!(json["transaction_details"]["gross_amount"], 2000);
    }
}
