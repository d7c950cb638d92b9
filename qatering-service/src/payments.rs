//! Payment method reference data. The payment lifecycle after order
//! placement belongs to the gateway collaborator, not this crate.

use diesel::prelude::*;

use crate::error::ServiceError;
use crate::models::PaymentMethod;
use crate::schema;

pub fn list_payment_methods(conn: &mut PgConnection) -> Result<Vec<PaymentMethod>, ServiceError> {
    let methods = schema::payment_methods::table
        .filter(schema::payment_methods::is_active.eq(true))
        .order(schema::payment_methods::id.asc())
        .select(PaymentMethod::as_select())
        .load::<PaymentMethod>(conn)?;

    Ok(methods)
}
