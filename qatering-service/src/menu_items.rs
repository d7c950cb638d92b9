//! Menu item catalog. Read path for order validation; writes restricted to
//! the owning vendor.

use bigdecimal::{BigDecimal, Zero};
use diesel::prelude::*;
use uuid::Uuid;

use crate::auth::require_vendor_for;
use crate::error::ServiceError;
use crate::models::{MenuItem, NewMenuItem, Vendor};
use crate::pagination::{self, Page};
use crate::schema;

#[derive(Debug, Clone)]
pub struct CreateMenuItem {
    pub item_name: String,
    pub description: Option<String>,
    pub unit_price: BigDecimal,
    pub image_url: Option<String>,
    pub is_available: bool,
}

#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = schema::menu_items)]
pub struct MenuItemChanges {
    pub item_name: Option<String>,
    pub description: Option<String>,
    pub unit_price: Option<BigDecimal>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

impl MenuItemChanges {
    fn is_noop(&self) -> bool {
        self.item_name.is_none()
            && self.description.is_none()
            && self.unit_price.is_none()
            && self.image_url.is_none()
            && self.is_available.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MenuItemFilter {
    pub vendor_id: Option<i32>,
    pub is_available: Option<bool>,
    pub search: Option<String>,
}

fn check_price(price: &BigDecimal) -> Result<(), ServiceError> {
    if price < &BigDecimal::zero() {
        return Err(ServiceError::InvalidRequest(
            "price must not be negative".to_string(),
        ));
    }
    Ok(())
}

/// Creates an item under the acting identity's vendor profile.
pub fn create_menu_item(
    conn: &mut PgConnection,
    actor: Uuid,
    input: CreateMenuItem,
) -> Result<i32, ServiceError> {
    let vendor = require_vendor_for(conn, actor)?;
    check_price(&input.unit_price)?;

    let id = diesel::insert_into(schema::menu_items::table)
        .values(&NewMenuItem {
            vendor_id: vendor.vendor_id,
            item_name: input.item_name,
            description: input.description,
            unit_price: input.unit_price.with_scale(2),
            is_available: input.is_available,
            image_url: input.image_url,
        })
        .returning(schema::menu_items::id)
        .get_result::<i32>(conn)?;

    Ok(id)
}

/// Loads an item together with its vendor so ownership can be checked
/// against the acting identity.
fn load_owned(
    conn: &mut PgConnection,
    actor: Uuid,
    item_id: i32,
) -> Result<MenuItem, ServiceError> {
    let (item, vendor) = schema::menu_items::table
        .inner_join(schema::vendors::table)
        .filter(schema::menu_items::id.eq(item_id))
        .select((MenuItem::as_select(), Vendor::as_select()))
        .first::<(MenuItem, Vendor)>(conn)
        .optional()?
        .ok_or(ServiceError::NotFound("menu item"))?;

    if vendor.user_id != actor {
        return Err(ServiceError::Forbidden("not authorized"));
    }
    Ok(item)
}

pub fn update_menu_item(
    conn: &mut PgConnection,
    actor: Uuid,
    item_id: i32,
    mut changes: MenuItemChanges,
) -> Result<(), ServiceError> {
    load_owned(conn, actor, item_id)?;
    if let Some(price) = changes.unit_price.take() {
        check_price(&price)?;
        changes.unit_price = Some(price.with_scale(2));
    }
    if changes.is_noop() {
        return Ok(());
    }

    diesel::update(schema::menu_items::table.find(item_id))
        .set(&changes)
        .execute(conn)?;

    Ok(())
}

/// Deletes an item owned by the acting identity. Items already snapshotted
/// into an order are retained by the order lines and cannot be deleted.
pub fn delete_menu_item(
    conn: &mut PgConnection,
    actor: Uuid,
    item_id: i32,
) -> Result<(), ServiceError> {
    load_owned(conn, actor, item_id)?;

    match diesel::delete(schema::menu_items::table.find(item_id)).execute(conn) {
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            _,
        )) => Err(ServiceError::Conflict("item is referenced by existing orders")),
        Err(err) => Err(err.into()),
        Ok(_) => Ok(()),
    }
}

/// Public listing, ascending id cursor.
pub fn list_menu_items(
    conn: &mut PgConnection,
    filter: MenuItemFilter,
    cursor: Option<i32>,
    limit: Option<i64>,
) -> Result<Page<MenuItem>, ServiceError> {
    let limit = pagination::clamp_limit(limit);

    let mut query = schema::menu_items::table
        .select(MenuItem::as_select())
        .into_boxed();

    if let Some(vendor_id) = filter.vendor_id {
        query = query.filter(schema::menu_items::vendor_id.eq(vendor_id));
    }
    if let Some(is_available) = filter.is_available {
        query = query.filter(schema::menu_items::is_available.eq(is_available));
    }
    if let Some(search) = filter.search {
        query = query.filter(schema::menu_items::item_name.ilike(format!("%{search}%")));
    }
    if let Some(cursor) = cursor {
        query = query.filter(schema::menu_items::id.gt(cursor));
    }

    let rows = query
        .order(schema::menu_items::id.asc())
        .limit(limit + 1)
        .load::<MenuItem>(conn)?;

    Ok(pagination::paginate(rows, limit, |m| m.id))
}

pub fn get_menu_item(conn: &mut PgConnection, item_id: i32) -> Result<MenuItem, ServiceError> {
    schema::menu_items::table
        .find(item_id)
        .select(MenuItem::as_select())
        .first::<MenuItem>(conn)
        .optional()?
        .ok_or(ServiceError::NotFound("menu item"))
}
