//! Order placement and fulfillment workflow.
//!
//! Placement validates the request against live menu data, snapshots prices
//! into line items, and commits order + order items + payment as one atomic
//! transaction. No read lock spans validation and commit: a price or
//! availability change in between is accepted, the snapshot taken at
//! validation time wins. Status progression is vendor-authorized through the
//! access control gate.

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::auth::{require_vendor_for, resolve_vendor_for};
use crate::error::ServiceError;
use crate::models::{
    MenuItem, NewOrder, NewOrderItem, NewPayment, Order, OrderItem, OrderStatus, Payment,
    PaymentStatus,
};
use crate::pagination::{self, Page};
use crate::schema;

#[derive(Debug, Clone)]
pub struct OrderLineRequest {
    pub menu_item_id: i32,
    pub quantity: i32,
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub vendor_id: i32,
    pub delivery_address_id: i32,
    pub payment_method_id: i32,
    pub required_delivery_time: Option<DateTime<Utc>>,
    pub items: Vec<OrderLineRequest>,
}

/// Whose orders a listing should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRole {
    Customer,
    Vendor,
}

/// An order with its line snapshots (each carrying its menu-item reference)
/// and its payment record.
#[derive(Debug, PartialEq)]
pub struct OrderWithLines {
    pub order: Order,
    pub items: Vec<(OrderItem, MenuItem)>,
    pub payment: Payment,
}

/// A validated line ready to insert, price snapshotted from the catalog row.
#[derive(Debug, PartialEq)]
struct LineSnapshot {
    menu_item_id: i32,
    quantity: i32,
    unit_price_snapshot: BigDecimal,
    special_requests: Option<String>,
}

/// Validates every requested line against the fetched catalog rows and
/// computes the order total. Pure over its inputs; the catalog read happens
/// before, the transactional write after.
fn price_lines(
    requests: &[OrderLineRequest],
    catalog: &[MenuItem],
    vendor_id: i32,
) -> Result<(BigDecimal, Vec<LineSnapshot>), ServiceError> {
    let mut total = BigDecimal::zero();
    let mut lines = Vec::with_capacity(requests.len());

    for request in requests {
        if request.quantity < 1 {
            return Err(ServiceError::InvalidRequest(
                "quantity must be at least 1".to_string(),
            ));
        }
        let item = catalog
            .iter()
            .find(|m| m.id == request.menu_item_id)
            .ok_or_else(|| ServiceError::InvalidRequest("some items not found".to_string()))?;
        if !item.is_available {
            return Err(ServiceError::InvalidRequest(format!(
                "item {} is unavailable",
                item.item_name
            )));
        }
        if item.vendor_id != vendor_id {
            return Err(ServiceError::InvalidRequest(
                "items must be from the same vendor".to_string(),
            ));
        }

        total += item.unit_price.clone() * BigDecimal::from(request.quantity);
        lines.push(LineSnapshot {
            menu_item_id: item.id,
            quantity: request.quantity,
            unit_price_snapshot: item.unit_price.clone(),
            special_requests: request.special_requests.clone(),
        });
    }

    Ok((total.with_scale(2), lines))
}

/// Places an order for the acting customer. Either all of {order, order
/// items, payment} become visible together or none do; the new order id is
/// returned on commit.
pub fn place_order(
    conn: &mut PgConnection,
    customer_id: Uuid,
    input: PlaceOrder,
) -> Result<i32, ServiceError> {
    if input.items.is_empty() {
        return Err(ServiceError::InvalidRequest(
            "order must contain at least one item".to_string(),
        ));
    }

    let address = schema::customer_addresses::table
        .filter(schema::customer_addresses::id.eq(input.delivery_address_id))
        .filter(schema::customer_addresses::user_id.eq(customer_id))
        .select(schema::customer_addresses::id)
        .first::<i32>(conn)
        .optional()?;
    if address.is_none() {
        return Err(ServiceError::InvalidRequest(
            "invalid delivery address".to_string(),
        ));
    }

    let mut item_ids: Vec<i32> = input.items.iter().map(|i| i.menu_item_id).collect();
    item_ids.sort_unstable();
    item_ids.dedup();

    let catalog = schema::menu_items::table
        .filter(schema::menu_items::id.eq_any(&item_ids))
        .select(MenuItem::as_select())
        .load::<MenuItem>(conn)?;
    if catalog.len() != item_ids.len() {
        return Err(ServiceError::InvalidRequest(
            "some items not found".to_string(),
        ));
    }

    let (total_amount, lines) = price_lines(&input.items, &catalog, input.vendor_id)?;

    conn.transaction::<_, ServiceError, _>(|conn| {
        let order_id = diesel::insert_into(schema::orders::table)
            .values(&NewOrder {
                customer_id,
                vendor_id: input.vendor_id,
                delivery_address_id: input.delivery_address_id,
                order_status: OrderStatus::Pending,
                total_amount: total_amount.clone(),
                required_delivery_time: input.required_delivery_time,
            })
            .returning(schema::orders::id)
            .get_result::<i32>(conn)?;

        let order_items = lines
            .into_iter()
            .map(|line| NewOrderItem {
                order_id,
                menu_item_id: line.menu_item_id,
                quantity: line.quantity,
                unit_price_snapshot: line.unit_price_snapshot,
                special_requests: line.special_requests,
            })
            .collect::<Vec<_>>();
        diesel::insert_into(schema::order_items::table)
            .values(&order_items)
            .execute(conn)?;

        diesel::insert_into(schema::payments::table)
            .values(&NewPayment {
                order_id,
                payment_method_id: input.payment_method_id,
                amount: total_amount,
                payment_status: PaymentStatus::Pending,
            })
            .execute(conn)?;

        Ok(order_id)
    })
}

fn load_order_details(
    conn: &mut PgConnection,
    order: Order,
) -> Result<OrderWithLines, ServiceError> {
    let items = schema::order_items::table
        .inner_join(schema::menu_items::table)
        .filter(schema::order_items::order_id.eq(order.id))
        .select((OrderItem::as_select(), MenuItem::as_select()))
        .load::<(OrderItem, MenuItem)>(conn)?;
    let payment = schema::payments::table
        .filter(schema::payments::order_id.eq(order.id))
        .select(Payment::as_select())
        .first(conn)?;

    Ok(OrderWithLines {
        order,
        items,
        payment,
    })
}

/// Lists orders visible to the actor, most recent first. Vendors see orders
/// placed against their profile, customers their own. The cursor bounds the
/// descending scan: a cursor `c` returns orders with `id < c`.
pub fn list_orders(
    conn: &mut PgConnection,
    actor: Uuid,
    role: ListRole,
    status: Option<OrderStatus>,
    cursor: Option<i32>,
    limit: Option<i64>,
) -> Result<Page<OrderWithLines>, ServiceError> {
    let limit = pagination::clamp_limit(limit);

    let mut query = schema::orders::table
        .select(Order::as_select())
        .into_boxed();

    match role {
        ListRole::Vendor => {
            let vendor = require_vendor_for(conn, actor)?;
            query = query.filter(schema::orders::vendor_id.eq(vendor.vendor_id));
        }
        ListRole::Customer => {
            query = query.filter(schema::orders::customer_id.eq(actor));
        }
    }

    if let Some(status) = status {
        query = query.filter(schema::orders::order_status.eq(status));
    }
    if let Some(cursor) = cursor {
        query = query.filter(schema::orders::id.lt(cursor));
    }

    let rows = query
        .order(schema::orders::id.desc())
        .limit(limit + 1)
        .load::<Order>(conn)?;

    let page = pagination::paginate(rows, limit, |o| o.id);
    let items = page
        .items
        .into_iter()
        .map(|order| load_order_details(conn, order))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Page {
        items,
        next_cursor: page.next_cursor,
    })
}

/// Point read, restricted to the ordering customer and the owning vendor.
pub fn get_order(
    conn: &mut PgConnection,
    actor: Uuid,
    order_id: i32,
) -> Result<OrderWithLines, ServiceError> {
    let order = schema::orders::table
        .find(order_id)
        .select(Order::as_select())
        .first::<Order>(conn)
        .optional()?
        .ok_or(ServiceError::NotFound("order"))?;

    if order.customer_id != actor {
        let owns = resolve_vendor_for(conn, actor)?
            .is_some_and(|v| v.vendor_id == order.vendor_id);
        if !owns {
            return Err(ServiceError::Forbidden("not authorized to view this order"));
        }
    }

    load_order_details(conn, order)
}

/// Persists a new status once vendor ownership passes. Any of the six
/// statuses is accepted from any current value; no transition graph is
/// enforced. Concurrent updates are last-writer-wins at the store layer.
pub fn update_status(
    conn: &mut PgConnection,
    actor: Uuid,
    order_id: i32,
    new_status: OrderStatus,
) -> Result<(), ServiceError> {
    let order = schema::orders::table
        .find(order_id)
        .select(Order::as_select())
        .first::<Order>(conn)
        .optional()?
        .ok_or(ServiceError::NotFound("order"))?;

    let authorized = resolve_vendor_for(conn, actor)?
        .is_some_and(|v| v.vendor_id == order.vendor_id);
    if !authorized {
        return Err(ServiceError::Forbidden(
            "not authorized to update this order",
        ));
    }

    diesel::update(schema::orders::table.find(order_id))
        .set(schema::orders::order_status.eq(new_status))
        .execute(conn)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn menu_item(id: i32, vendor_id: i32, price: &str, available: bool) -> MenuItem {
        MenuItem {
            id,
            vendor_id,
            item_name: format!("Item {id}"),
            description: None,
            unit_price: BigDecimal::from_str(price).unwrap(),
            is_available: available,
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn line(menu_item_id: i32, quantity: i32) -> OrderLineRequest {
        OrderLineRequest {
            menu_item_id,
            quantity,
            special_requests: None,
        }
    }

    #[test]
    fn total_is_sum_of_price_snapshots() {
        let catalog = vec![
            menu_item(1, 7, "25000.00", true),
            menu_item(2, 7, "15000.50", true),
        ];
        let (total, lines) = price_lines(&[line(1, 2), line(2, 3)], &catalog, 7).unwrap();

        assert_eq!(total, BigDecimal::from_str("95001.50").unwrap());
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0].unit_price_snapshot,
            BigDecimal::from_str("25000.00").unwrap()
        );
        assert_eq!(lines[0].quantity, 2);
    }

    #[test]
    fn single_line_example() {
        let catalog = vec![menu_item(1, 7, "25000.00", true)];
        let (total, lines) = price_lines(&[line(1, 2)], &catalog, 7).unwrap();

        assert_eq!(total, BigDecimal::from_str("50000.00").unwrap());
        assert_eq!(
            lines[0].unit_price_snapshot,
            BigDecimal::from_str("25000.00").unwrap()
        );
    }

    #[test]
    fn repeated_item_lines_each_get_a_snapshot() {
        let catalog = vec![menu_item(1, 7, "10.00", true)];
        let (total, lines) = price_lines(&[line(1, 1), line(1, 2)], &catalog, 7).unwrap();

        assert_eq!(total, BigDecimal::from_str("30.00").unwrap());
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn rejects_unavailable_item_by_name() {
        let catalog = vec![menu_item(1, 7, "25000.00", false)];
        let err = price_lines(&[line(1, 1)], &catalog, 7).unwrap_err();

        match err {
            ServiceError::InvalidRequest(msg) => {
                assert_eq!(msg, "item Item 1 is unavailable")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_mixed_vendor_cart() {
        let catalog = vec![
            menu_item(1, 7, "25000.00", true),
            menu_item(2, 8, "15000.00", true),
        ];
        let err = price_lines(&[line(1, 1), line(2, 1)], &catalog, 7).unwrap_err();

        match err {
            ServiceError::InvalidRequest(msg) => {
                assert_eq!(msg, "items must be from the same vendor")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_unresolved_item() {
        let catalog = vec![menu_item(1, 7, "25000.00", true)];
        let err = price_lines(&[line(1, 1), line(99, 1)], &catalog, 7).unwrap_err();

        assert!(matches!(err, ServiceError::InvalidRequest(_)));
    }

    #[test]
    fn rejects_zero_quantity() {
        let catalog = vec![menu_item(1, 7, "25000.00", true)];
        let err = price_lines(&[line(1, 0)], &catalog, 7).unwrap_err();

        assert!(matches!(err, ServiceError::InvalidRequest(_)));
    }
}
