//! Customer delivery addresses. Read path for order validation; always
//! scoped to the owning identity.

use diesel::prelude::*;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::models::{CustomerAddress, NewCustomerAddress};
use crate::schema;

#[derive(Debug, Clone)]
pub struct CreateAddress {
    pub recipient_name: String,
    pub address_line1: String,
    pub city: String,
    pub postal_code: String,
    pub delivery_instructions: Option<String>,
}

pub fn create_address(
    conn: &mut PgConnection,
    actor: Uuid,
    input: CreateAddress,
) -> Result<i32, ServiceError> {
    let id = diesel::insert_into(schema::customer_addresses::table)
        .values(&NewCustomerAddress {
            user_id: actor,
            recipient_name: input.recipient_name,
            address_line1: input.address_line1,
            city: input.city,
            postal_code: input.postal_code,
            delivery_instructions: input.delivery_instructions,
        })
        .returning(schema::customer_addresses::id)
        .get_result::<i32>(conn)?;

    Ok(id)
}

pub fn list_addresses(
    conn: &mut PgConnection,
    actor: Uuid,
) -> Result<Vec<CustomerAddress>, ServiceError> {
    let addresses = schema::customer_addresses::table
        .filter(schema::customer_addresses::user_id.eq(actor))
        .order(schema::customer_addresses::id.asc())
        .select(CustomerAddress::as_select())
        .load::<CustomerAddress>(conn)?;

    Ok(addresses)
}
