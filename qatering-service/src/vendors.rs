//! Vendor profile store. One profile per user identity; mutations are
//! restricted to the owning identity.

use diesel::prelude::*;
use uuid::Uuid;

use crate::auth::resolve_vendor_for;
use crate::error::ServiceError;
use crate::models::{NewVendor, Vendor, VendorStatus};
use crate::pagination::{self, Page};
use crate::schema;

#[derive(Debug, Clone)]
pub struct CreateVendor {
    pub business_name: String,
    pub business_description: Option<String>,
    pub support_phone: Option<String>,
}

#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = schema::vendors)]
pub struct VendorChanges {
    pub business_name: Option<String>,
    pub business_description: Option<String>,
    pub support_phone: Option<String>,
    pub status: Option<VendorStatus>,
}

impl VendorChanges {
    fn is_noop(&self) -> bool {
        self.business_name.is_none()
            && self.business_description.is_none()
            && self.support_phone.is_none()
            && self.status.is_none()
    }
}

/// Registers a vendor profile for the acting identity. New profiles start in
/// pending approval.
pub fn create_vendor(
    conn: &mut PgConnection,
    actor: Uuid,
    input: CreateVendor,
) -> Result<i32, ServiceError> {
    if resolve_vendor_for(conn, actor)?.is_some() {
        return Err(ServiceError::Conflict("user already has a vendor profile"));
    }

    let id = diesel::insert_into(schema::vendors::table)
        .values(&NewVendor {
            user_id: actor,
            business_name: input.business_name,
            business_description: input.business_description,
            support_phone: input.support_phone,
            status: VendorStatus::PendingApproval,
        })
        .returning(schema::vendors::id)
        .get_result::<i32>(conn)?;

    Ok(id)
}

pub fn update_vendor(
    conn: &mut PgConnection,
    actor: Uuid,
    vendor_id: i32,
    changes: VendorChanges,
) -> Result<(), ServiceError> {
    let existing = schema::vendors::table
        .find(vendor_id)
        .select(Vendor::as_select())
        .first::<Vendor>(conn)
        .optional()?
        .ok_or(ServiceError::NotFound("vendor"))?;

    if existing.user_id != actor {
        return Err(ServiceError::Forbidden("not authorized"));
    }
    if changes.is_noop() {
        return Ok(());
    }

    diesel::update(schema::vendors::table.find(vendor_id))
        .set(&changes)
        .execute(conn)?;

    Ok(())
}

/// Public listing, ascending id cursor, optional case-insensitive search on
/// the business name.
pub fn list_vendors(
    conn: &mut PgConnection,
    search: Option<&str>,
    cursor: Option<i32>,
    limit: Option<i64>,
) -> Result<Page<Vendor>, ServiceError> {
    let limit = pagination::clamp_limit(limit);

    let mut query = schema::vendors::table
        .select(Vendor::as_select())
        .into_boxed();

    if let Some(search) = search {
        query = query.filter(schema::vendors::business_name.ilike(format!("%{search}%")));
    }
    if let Some(cursor) = cursor {
        query = query.filter(schema::vendors::id.gt(cursor));
    }

    let rows = query
        .order(schema::vendors::id.asc())
        .limit(limit + 1)
        .load::<Vendor>(conn)?;

    Ok(pagination::paginate(rows, limit, |v| v.id))
}

pub fn get_vendor(conn: &mut PgConnection, vendor_id: i32) -> Result<Vendor, ServiceError> {
    schema::vendors::table
        .find(vendor_id)
        .select(Vendor::as_select())
        .first::<Vendor>(conn)
        .optional()?
        .ok_or(ServiceError::NotFound("vendor"))
}
