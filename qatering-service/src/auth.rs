//! Access control gate.
//!
//! A user identity owns at most one vendor profile. The profile is resolved
//! once per operation and threaded through as a typed [`ActingVendor`]
//! capability; it must not be cached across requests since a user may
//! register a vendor profile mid-session.

use diesel::prelude::*;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::{models, schema};

/// The resolved vendor capability for the acting identity. All vendor-side
/// ownership checks compare against this value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActingVendor {
    pub vendor_id: i32,
    pub user_id: Uuid,
}

pub fn resolve_vendor_for(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<Option<ActingVendor>, ServiceError> {
    let vendor = schema::vendors::table
        .filter(schema::vendors::user_id.eq(user_id))
        .select(models::Vendor::as_select())
        .first(conn)
        .optional()?;

    Ok(vendor.map(|v| ActingVendor {
        vendor_id: v.id,
        user_id: v.user_id,
    }))
}

pub fn require_vendor_for(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<ActingVendor, ServiceError> {
    resolve_vendor_for(conn, user_id)?.ok_or(ServiceError::Forbidden("no vendor profile found"))
}
