//! End-to-end workflow tests against a live PostgreSQL instance.
//!
//! Run with `cargo test -- --ignored` after pointing DATABASE_URL at a
//! migrated database. Each test resets the tables it touches.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use diesel::prelude::*;
use uuid::Uuid;

use qatering_service::models::{
    NewCustomerAddress, NewMenuItem, NewVendor, OrderItem, OrderStatus, Payment, PaymentStatus,
    VendorStatus,
};
use qatering_service::orders::{self, ListRole, OrderLineRequest, PlaceOrder};
use qatering_service::error::ServiceError;
use qatering_service::{establish_connection, menu_items, run_migrations, schema, vendors};

fn setup_database() -> PgConnection {
    let mut conn = establish_connection();
    run_migrations(&mut conn);

    diesel::delete(schema::payments::table).execute(&mut conn).unwrap();
    diesel::delete(schema::order_items::table).execute(&mut conn).unwrap();
    diesel::delete(schema::orders::table).execute(&mut conn).unwrap();
    diesel::delete(schema::menu_items::table).execute(&mut conn).unwrap();
    diesel::delete(schema::customer_addresses::table).execute(&mut conn).unwrap();
    diesel::delete(schema::vendors::table).execute(&mut conn).unwrap();
    conn
}

fn seed_vendor(conn: &mut PgConnection, user_id: Uuid) -> i32 {
    diesel::insert_into(schema::vendors::table)
        .values(&NewVendor {
            user_id,
            business_name: "Test Catering".to_string(),
            business_description: None,
            support_phone: None,
            status: VendorStatus::Active,
        })
        .returning(schema::vendors::id)
        .get_result(conn)
        .unwrap()
}

fn seed_menu_item(conn: &mut PgConnection, vendor_id: i32, price: &str, available: bool) -> i32 {
    diesel::insert_into(schema::menu_items::table)
        .values(&NewMenuItem {
            vendor_id,
            item_name: "Nasi Kotak".to_string(),
            description: None,
            unit_price: BigDecimal::from_str(price).unwrap(),
            is_available: available,
            image_url: None,
        })
        .returning(schema::menu_items::id)
        .get_result(conn)
        .unwrap()
}

fn seed_address(conn: &mut PgConnection, user_id: Uuid) -> i32 {
    diesel::insert_into(schema::customer_addresses::table)
        .values(&NewCustomerAddress {
            user_id,
            recipient_name: "Test Customer".to_string(),
            address_line1: "Jl. Test 1".to_string(),
            city: "Jakarta".to_string(),
            postal_code: "12345".to_string(),
            delivery_instructions: None,
        })
        .returning(schema::customer_addresses::id)
        .get_result(conn)
        .unwrap()
}

fn payment_method_id(conn: &mut PgConnection) -> i32 {
    schema::payment_methods::table
        .filter(schema::payment_methods::code.eq("COD"))
        .select(schema::payment_methods::id)
        .first(conn)
        .unwrap()
}

fn place(
    conn: &mut PgConnection,
    customer: Uuid,
    vendor_id: i32,
    address_id: i32,
    items: Vec<OrderLineRequest>,
) -> Result<i32, ServiceError> {
    let method = payment_method_id(conn);
    orders::place_order(
        conn,
        customer,
        PlaceOrder {
            vendor_id,
            delivery_address_id: address_id,
            payment_method_id: method,
            required_delivery_time: None,
            items,
        },
    )
}

fn line(menu_item_id: i32, quantity: i32) -> OrderLineRequest {
    OrderLineRequest {
        menu_item_id,
        quantity,
        special_requests: None,
    }
}

fn table_counts(conn: &mut PgConnection) -> (i64, i64, i64) {
    let orders = schema::orders::table.count().get_result(conn).unwrap();
    let items = schema::order_items::table.count().get_result(conn).unwrap();
    let payments = schema::payments::table.count().get_result(conn).unwrap();
    (orders, items, payments)
}

#[test]
#[ignore]
fn place_order_commits_order_lines_and_payment_together() {
    let conn = &mut setup_database();
    let vendor_user = Uuid::new_v4();
    let customer = Uuid::new_v4();
    let vendor_id = seed_vendor(conn, vendor_user);
    let item_id = seed_menu_item(conn, vendor_id, "25000.00", true);
    let address_id = seed_address(conn, customer);

    let order_id = place(conn, customer, vendor_id, address_id, vec![line(item_id, 2)]).unwrap();

    let order = orders::get_order(conn, customer, order_id).unwrap();
    assert_eq!(order.order.order_status, OrderStatus::Pending);
    assert_eq!(
        order.order.total_amount,
        BigDecimal::from_str("50000.00").unwrap()
    );
    assert_eq!(order.items.len(), 1);
    let (order_item, menu_item) = &order.items[0];
    assert_eq!(order_item.quantity, 2);
    assert_eq!(
        order_item.unit_price_snapshot,
        BigDecimal::from_str("25000.00").unwrap()
    );
    assert_eq!(menu_item.id, item_id);
    assert_eq!(order.payment.payment_status, PaymentStatus::Pending);
    assert_eq!(
        order.payment.amount,
        BigDecimal::from_str("50000.00").unwrap()
    );
}

#[test]
#[ignore]
fn line_snapshot_is_immune_to_later_price_change() {
    let conn = &mut setup_database();
    let vendor_user = Uuid::new_v4();
    let customer = Uuid::new_v4();
    let vendor_id = seed_vendor(conn, vendor_user);
    let item_id = seed_menu_item(conn, vendor_id, "25000.00", true);
    let address_id = seed_address(conn, customer);

    let order_id = place(conn, customer, vendor_id, address_id, vec![line(item_id, 1)]).unwrap();

    diesel::update(schema::menu_items::table.find(item_id))
        .set(schema::menu_items::unit_price.eq(BigDecimal::from_str("99000.00").unwrap()))
        .execute(conn)
        .unwrap();

    let order = orders::get_order(conn, customer, order_id).unwrap();
    assert_eq!(
        order.items[0].0.unit_price_snapshot,
        BigDecimal::from_str("25000.00").unwrap()
    );
    assert_eq!(
        order.order.total_amount,
        BigDecimal::from_str("25000.00").unwrap()
    );
}

#[test]
#[ignore]
fn mixed_vendor_cart_writes_nothing() {
    let conn = &mut setup_database();
    let customer = Uuid::new_v4();
    let vendor_a = seed_vendor(conn, Uuid::new_v4());
    let vendor_b = diesel::insert_into(schema::vendors::table)
        .values(&NewVendor {
            user_id: Uuid::new_v4(),
            business_name: "Other Catering".to_string(),
            business_description: None,
            support_phone: None,
            status: VendorStatus::Active,
        })
        .returning(schema::vendors::id)
        .get_result(conn)
        .unwrap();
    let item_a = seed_menu_item(conn, vendor_a, "10000.00", true);
    let item_b = seed_menu_item(conn, vendor_b, "12000.00", true);
    let address_id = seed_address(conn, customer);

    let err = place(
        conn,
        customer,
        vendor_a,
        address_id,
        vec![line(item_a, 1), line(item_b, 1)],
    )
    .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidRequest(_)));
    assert_eq!(table_counts(conn), (0, 0, 0));
}

#[test]
#[ignore]
fn foreign_delivery_address_is_rejected() {
    let conn = &mut setup_database();
    let customer = Uuid::new_v4();
    let other_customer = Uuid::new_v4();
    let vendor_id = seed_vendor(conn, Uuid::new_v4());
    let item_id = seed_menu_item(conn, vendor_id, "10000.00", true);
    let foreign_address = seed_address(conn, other_customer);

    let err = place(conn, customer, vendor_id, foreign_address, vec![line(item_id, 1)])
        .unwrap_err();

    match err {
        ServiceError::InvalidRequest(msg) => assert_eq!(msg, "invalid delivery address"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(table_counts(conn), (0, 0, 0));
}

#[test]
#[ignore]
fn empty_cart_is_rejected() {
    let conn = &mut setup_database();
    let customer = Uuid::new_v4();
    let vendor_id = seed_vendor(conn, Uuid::new_v4());
    let address_id = seed_address(conn, customer);

    let err = place(conn, customer, vendor_id, address_id, vec![]).unwrap_err();

    assert!(matches!(err, ServiceError::InvalidRequest(_)));
}

#[test]
#[ignore]
fn failed_payment_insert_rolls_back_order_and_lines() {
    let conn = &mut setup_database();
    let customer = Uuid::new_v4();
    let vendor_id = seed_vendor(conn, Uuid::new_v4());
    let item_id = seed_menu_item(conn, vendor_id, "10000.00", true);
    let address_id = seed_address(conn, customer);

    // Validation passes; the payment insert inside the transaction hits the
    // payment_methods foreign key and the already-written order and line
    // rows roll back with it.
    let err = orders::place_order(
        conn,
        customer,
        PlaceOrder {
            vendor_id,
            delivery_address_id: address_id,
            payment_method_id: -1,
            required_delivery_time: None,
            items: vec![line(item_id, 1)],
        },
    )
    .unwrap_err();

    assert!(matches!(err, ServiceError::Internal(_)));
    assert_eq!(table_counts(conn), (0, 0, 0));
}

#[test]
#[ignore]
fn item_referenced_by_an_order_cannot_be_deleted() {
    let conn = &mut setup_database();
    let owner_user = Uuid::new_v4();
    let customer = Uuid::new_v4();
    let vendor_id = seed_vendor(conn, owner_user);
    let item_id = seed_menu_item(conn, vendor_id, "10000.00", true);
    let address_id = seed_address(conn, customer);
    place(conn, customer, vendor_id, address_id, vec![line(item_id, 1)]).unwrap();

    let err = menu_items::delete_menu_item(conn, owner_user, item_id).unwrap_err();

    match err {
        ServiceError::Conflict(msg) => assert_eq!(msg, "item is referenced by existing orders"),
        other => panic!("unexpected error: {other:?}"),
    }
    let still_there = menu_items::get_menu_item(conn, item_id).unwrap();
    assert_eq!(still_there.id, item_id);
}

#[test]
#[ignore]
fn update_status_requires_the_owning_vendor() {
    let conn = &mut setup_database();
    let owner_user = Uuid::new_v4();
    let other_vendor_user = Uuid::new_v4();
    let customer = Uuid::new_v4();
    let vendor_id = seed_vendor(conn, owner_user);
    diesel::insert_into(schema::vendors::table)
        .values(&NewVendor {
            user_id: other_vendor_user,
            business_name: "Other Catering".to_string(),
            business_description: None,
            support_phone: None,
            status: VendorStatus::Active,
        })
        .execute(conn)
        .unwrap();
    let item_id = seed_menu_item(conn, vendor_id, "10000.00", true);
    let address_id = seed_address(conn, customer);
    let order_id = place(conn, customer, vendor_id, address_id, vec![line(item_id, 1)]).unwrap();

    let err = orders::update_status(conn, other_vendor_user, order_id, OrderStatus::Confirmed)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    // A customer identity without any vendor profile is rejected the same way.
    let err = orders::update_status(conn, customer, order_id, OrderStatus::Confirmed).unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    let order = orders::get_order(conn, customer, order_id).unwrap();
    assert_eq!(order.order.order_status, OrderStatus::Pending);
}

#[test]
#[ignore]
fn owner_may_set_any_status_no_transition_graph_is_enforced() {
    let conn = &mut setup_database();
    let owner_user = Uuid::new_v4();
    let customer = Uuid::new_v4();
    let vendor_id = seed_vendor(conn, owner_user);
    let item_id = seed_menu_item(conn, vendor_id, "10000.00", true);
    let address_id = seed_address(conn, customer);
    let order_id = place(conn, customer, vendor_id, address_id, vec![line(item_id, 1)]).unwrap();

    orders::update_status(conn, owner_user, order_id, OrderStatus::Completed).unwrap();
    let order = orders::get_order(conn, customer, order_id).unwrap();
    assert_eq!(order.order.order_status, OrderStatus::Completed);

    // Even a backwards move out of a terminal state is persisted.
    orders::update_status(conn, owner_user, order_id, OrderStatus::Pending).unwrap();
    let order = orders::get_order(conn, customer, order_id).unwrap();
    assert_eq!(order.order.order_status, OrderStatus::Pending);
}

#[test]
#[ignore]
fn list_orders_pages_most_recent_first() {
    let conn = &mut setup_database();
    let owner_user = Uuid::new_v4();
    let customer = Uuid::new_v4();
    let vendor_id = seed_vendor(conn, owner_user);
    let item_id = seed_menu_item(conn, vendor_id, "10000.00", true);
    let address_id = seed_address(conn, customer);

    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(place(conn, customer, vendor_id, address_id, vec![line(item_id, 1)]).unwrap());
    }

    let page = orders::list_orders(conn, customer, ListRole::Customer, None, None, Some(4)).unwrap();
    let listed: Vec<i32> = page.items.iter().map(|o| o.order.id).collect();
    assert_eq!(listed, vec![ids[4], ids[3], ids[2], ids[1]]);
    assert_eq!(page.next_cursor, Some(ids[1]));

    let rest =
        orders::list_orders(conn, customer, ListRole::Customer, None, page.next_cursor, Some(4))
            .unwrap();
    let listed: Vec<i32> = rest.items.iter().map(|o| o.order.id).collect();
    assert_eq!(listed, vec![ids[0]]);
    assert_eq!(rest.next_cursor, None);

    // The vendor sees the same orders through its own profile.
    let vendor_page =
        orders::list_orders(conn, owner_user, ListRole::Vendor, None, None, None).unwrap();
    assert_eq!(vendor_page.items.len(), 5);
}

#[test]
#[ignore]
fn list_orders_as_vendor_requires_a_profile() {
    let conn = &mut setup_database();
    let stranger = Uuid::new_v4();

    let err = orders::list_orders(conn, stranger, ListRole::Vendor, None, None, None).unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}

#[test]
#[ignore]
fn status_filter_matches_exactly() {
    let conn = &mut setup_database();
    let owner_user = Uuid::new_v4();
    let customer = Uuid::new_v4();
    let vendor_id = seed_vendor(conn, owner_user);
    let item_id = seed_menu_item(conn, vendor_id, "10000.00", true);
    let address_id = seed_address(conn, customer);

    let first = place(conn, customer, vendor_id, address_id, vec![line(item_id, 1)]).unwrap();
    let _second = place(conn, customer, vendor_id, address_id, vec![line(item_id, 1)]).unwrap();
    orders::update_status(conn, owner_user, first, OrderStatus::Confirmed).unwrap();

    let page = orders::list_orders(
        conn,
        customer,
        ListRole::Customer,
        Some(OrderStatus::Confirmed),
        None,
        None,
    )
    .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].order.id, first);
}

#[test]
#[ignore]
fn second_vendor_profile_for_one_identity_conflicts() {
    let conn = &mut setup_database();
    let user = Uuid::new_v4();
    seed_vendor(conn, user);

    let err = vendors::create_vendor(
        conn,
        user,
        vendors::CreateVendor {
            business_name: "Another Business".to_string(),
            business_description: None,
            support_phone: None,
        },
    )
    .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[test]
#[ignore]
fn unavailable_item_is_named_in_the_failure() {
    let conn = &mut setup_database();
    let customer = Uuid::new_v4();
    let vendor_id = seed_vendor(conn, Uuid::new_v4());
    let item_id = seed_menu_item(conn, vendor_id, "10000.00", false);
    let address_id = seed_address(conn, customer);

    let err = place(conn, customer, vendor_id, address_id, vec![line(item_id, 1)]).unwrap_err();

    match err {
        ServiceError::InvalidRequest(msg) => assert_eq!(msg, "item Nasi Kotak is unavailable"),
        other => panic!("unexpected error: {other:?}"),
    }

    // Validation fails before any write starts; no line or payment rows appear.
    let items: Vec<OrderItem> = schema::order_items::table
        .select(OrderItem::as_select())
        .load(conn)
        .unwrap();
    assert!(items.is_empty());
    let payments: Vec<Payment> = schema::payments::table
        .select(Payment::as_select())
        .load(conn)
        .unwrap();
    assert!(payments.is_empty());
}
