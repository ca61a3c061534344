use std::collections::HashMap;

use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit::log_audit,
    dto::orders::{CreateOrderRequest, UpdateOrderRequest},
    entity::order_items::{
        ActiveModel as OrderItemActive, Column as OrderItemColumn, Entity as OrderItems,
        Model as OrderItemModel,
    },
    entity::orders::{
        ActiveModel as OrderActive, Column as OrderColumn, Entity as Orders, Model as OrderModel,
    },
    entity::products::{Column as ProductColumn, Entity as Products, Model as ProductModel},
    entity::users::{Column as UserColumn, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::OrderStatus,
    state::AppState,
};

/// One order line joined with its product. `product` is `None` when the
/// catalog row has since been removed.
pub struct OrderItemRecord {
    pub item: OrderItemModel,
    pub product: Option<ProductModel>,
}

/// An order with its lines. `user` is only populated on admin listings.
pub struct OrderRecord {
    pub order: OrderModel,
    pub items: Vec<OrderItemRecord>,
    pub user: Option<UserModel>,
}

pub async fn place_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<OrderRecord> {
    payload.validate()?;

    let txn = state.orm.begin().await?;

    let mut product_ids: Vec<Uuid> = payload.items.iter().map(|l| l.product_id).collect();
    product_ids.sort_unstable();
    product_ids.dedup();

    let mut products: HashMap<Uuid, ProductModel> = HashMap::new();
    for product in Products::find()
        .filter(ProductColumn::Id.is_in(product_ids))
        .all(&txn)
        .await?
    {
        products.insert(product.id, product);
    }

    let mut total: i64 = 0;
    let mut lines = Vec::with_capacity(payload.items.len());
    for line in &payload.items {
        let product = products.get(&line.product_id).cloned().ok_or_else(|| {
            AppError::NotFound(format!("Product {} not found", line.product_id))
        })?;
        total += product.price * i64::from(line.quantity);
        lines.push((line, product));
    }

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        total: Set(total),
        status: Set("PENDING".into()),
        address: Set(Some(payload.address)),
        phone: Set(None),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(lines.len());
    for (line, product) in lines {
        let item = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(line.product_id),
            quantity: Set(line.quantity),
            // Price frozen at placement; later catalog edits leave it alone.
            unit_price: Set(product.price),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;

        items.push(OrderItemRecord {
            item,
            product: Some(product),
        });
    }

    txn.commit().await?;

    log_audit(
        &state.pool,
        Some(user.user_id),
        "order_create",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "total": total })),
    )
    .await;

    Ok(OrderRecord {
        order,
        items,
        user: None,
    })
}

pub async fn list_orders(state: &AppState, user: &AuthUser) -> AppResult<Vec<OrderRecord>> {
    let orders = Orders::find()
        .filter(OrderColumn::UserId.eq(user.user_id))
        .order_by_desc(OrderColumn::CreatedAt)
        .all(&state.orm)
        .await?;

    let mut items_by_order = load_items(&state.orm, &orders).await?;

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = items_by_order.remove(&order.id).unwrap_or_default();
            OrderRecord {
                order,
                items,
                user: None,
            }
        })
        .collect())
}

pub async fn list_all_orders(state: &AppState, user: &AuthUser) -> AppResult<Vec<OrderRecord>> {
    ensure_admin(user)?;

    let orders = Orders::find()
        .order_by_desc(OrderColumn::CreatedAt)
        .all(&state.orm)
        .await?;

    let mut items_by_order = load_items(&state.orm, &orders).await?;

    let mut user_ids: Vec<Uuid> = orders.iter().map(|o| o.user_id).collect();
    user_ids.sort_unstable();
    user_ids.dedup();
    let mut users: HashMap<Uuid, UserModel> = HashMap::new();
    if !user_ids.is_empty() {
        for owner in Users::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&state.orm)
            .await?
        {
            users.insert(owner.id, owner);
        }
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = items_by_order.remove(&order.id).unwrap_or_default();
            let owner = users.get(&order.user_id).cloned();
            OrderRecord {
                order,
                items,
                user: owner,
            }
        })
        .collect())
}

pub async fn update_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderRequest,
) -> AppResult<OrderRecord> {
    ensure_admin(user)?;

    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    let mut active: OrderActive = order.clone().into();
    let mut changed = false;

    if let Some(raw) = payload.status.as_deref() {
        let next = OrderStatus::parse(raw)
            .ok_or_else(|| AppError::BadRequest("Invalid status".to_string()))?;
        let current = OrderStatus::parse(&order.status).ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "order {} carries unknown status {}",
                order.id,
                order.status
            ))
        })?;
        // Re-sending the current status is a no-op, not a transition.
        if current != next {
            if !current.can_transition_to(next) {
                return Err(AppError::BadRequest(format!(
                    "Cannot change order status from {} to {}",
                    current.as_str(),
                    next.as_str()
                )));
            }
            active.status = Set(next.as_str().to_string());
            changed = true;
        }
    }

    if let Some(address) = payload.address {
        active.address = Set(Some(address));
        changed = true;
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
        changed = true;
    }

    // A status resend can leave nothing to write; skip the empty UPDATE.
    let order = if changed {
        active.update(&state.orm).await?
    } else {
        order
    };

    let mut items_by_order = load_items(&state.orm, std::slice::from_ref(&order)).await?;
    let items = items_by_order.remove(&order.id).unwrap_or_default();

    log_audit(
        &state.pool,
        Some(user.user_id),
        "order_update",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id })),
    )
    .await;

    Ok(OrderRecord {
        order,
        items,
        user: None,
    })
}

async fn load_items<C: ConnectionTrait>(
    conn: &C,
    orders: &[OrderModel],
) -> AppResult<HashMap<Uuid, Vec<OrderItemRecord>>> {
    let mut grouped: HashMap<Uuid, Vec<OrderItemRecord>> = HashMap::new();
    if orders.is_empty() {
        return Ok(grouped);
    }

    let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let items = OrderItems::find()
        .filter(OrderItemColumn::OrderId.is_in(order_ids))
        .order_by_asc(OrderItemColumn::CreatedAt)
        .all(conn)
        .await?;

    let mut product_ids: Vec<Uuid> = items.iter().map(|i| i.product_id).collect();
    product_ids.sort_unstable();
    product_ids.dedup();
    let mut products: HashMap<Uuid, ProductModel> = HashMap::new();
    if !product_ids.is_empty() {
        for product in Products::find()
            .filter(ProductColumn::Id.is_in(product_ids))
            .all(conn)
            .await?
        {
            products.insert(product.id, product);
        }
    }

    for item in items {
        let product = products.get(&item.product_id).cloned();
        grouped
            .entry(item.order_id)
            .or_default()
            .push(OrderItemRecord { item, product });
    }

    Ok(grouped)
}
