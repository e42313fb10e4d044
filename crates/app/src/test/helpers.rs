//! Test Helpers

use crate::{
    domain::{
        products::{
            ProductsService, ProductsServiceError, data::NewProduct, records::ProductRecord,
        },
        users::{UsersService, UsersServiceError, data::NewUser, records::UserRecord},
    },
    test::TestContext,
};

pub(crate) async fn create_user(
    ctx: &TestContext,
    email: &str,
    is_admin: bool,
) -> Result<UserRecord, UsersServiceError> {
    let username = email.split('@').next().unwrap_or(email).to_string();

    ctx.users
        .create_user(NewUser {
            email: email.to_string(),
            username,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            is_admin,
        })
        .await
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    slug: &str,
    price: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            slug: slug.to_string(),
            name: format!("Product {slug}"),
            price,
        })
        .await
}
