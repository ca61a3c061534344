use axum_storefront_api::{
    db::create_orm_conn,
    dto::{
        auth::{LoginRequest, RegisterRequest},
        cart::{AddToCartRequest, UpdateQuantityRequest},
        categories::CreateCategoryRequest,
        orders::{CreateOrderRequest, OrderLineRequest, UpdateOrderRequest},
        products::{CreateProductRequest, UpdateProductRequest},
        qna::{CreateAnswerRequest, CreateQuestionRequest},
        reviews::CreateReviewRequest,
    },
    entity::users,
    error::AppError,
    middleware::auth::AuthUser,
    models::Role,
    routes::params::UserListQuery,
    services::{
        auth_service, cart_service, category_service, order_service, product_service, qna_service,
        review_service, user_service, wishlist_service,
    },
    state::{AppState, JwtKeys},
};
use sea_orm::{ActiveModelTrait, ConnectionTrait, IntoActiveModel, Set, Statement};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

// Full storefront pass: signup, catalog, cart merging, checkout with a frozen
// unit price, the order lifecycle, wishlist, reviews, QnA, and account removal.
#[tokio::test]
async fn storefront_checkout_and_admin_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
                );
                return Ok(());
            }
        };

    let state = setup_state(&database_url).await?;

    // Sign up a shopper and a staff account; staff gets promoted directly.
    let (alice, alice_token) = auth_service::register(
        &state,
        RegisterRequest {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password: "password123".into(),
        },
    )
    .await?;
    assert!(!alice_token.is_empty());
    assert_eq!(alice.role, "USER");

    let (bob, _) = auth_service::register(
        &state,
        RegisterRequest {
            name: "Bob".into(),
            email: "bob@example.com".into(),
            password: "password123".into(),
        },
    )
    .await?;
    promote(&state, &bob, "ADMIN").await?;

    let (logged_in, _) = auth_service::login(
        &state,
        LoginRequest {
            email: "alice@example.com".into(),
            password: "password123".into(),
        },
    )
    .await?;
    assert_eq!(logged_in.id, alice.id);

    let shopper = auth_user(&alice, Role::User);
    let staff = auth_user(&bob, Role::Admin);

    // Catalog: one category, one product at $49.99.
    let category = category_service::create_category(
        &state,
        &staff,
        CreateCategoryRequest {
            name: "Keyboards".into(),
            image_url: None,
        },
    )
    .await?;
    let (product, _) = product_service::create_product(
        &state,
        &staff,
        CreateProductRequest {
            name: "Test Keyboard".into(),
            description: "A board for integration tests".into(),
            price: 49.99,
            category_id: category.id,
            stock: 10,
            image_url: None,
            specs: Some(serde_json::json!({"layout": "TKL"})),
        },
    )
    .await?;
    assert_eq!(product.price, 4999);

    // Shoppers cannot touch the catalog.
    let denied_create = category_service::create_category(
        &state,
        &shopper,
        CreateCategoryRequest {
            name: "Nope".into(),
            image_url: None,
        },
    )
    .await;
    assert!(matches!(denied_create, Err(AppError::Forbidden(_))));

    // Adding the same product twice folds into one row.
    cart_service::add_to_cart(
        &state,
        &shopper,
        AddToCartRequest {
            product_id: product.id,
            quantity: 2,
        },
    )
    .await?;
    let (merged, _) = cart_service::add_to_cart(
        &state,
        &shopper,
        AddToCartRequest {
            product_id: product.id,
            quantity: 3,
        },
    )
    .await?;
    assert_eq!(merged.quantity, 5);

    let (items, total_cents) = cart_service::get_cart(&state, &shopper).await?;
    assert_eq!(items.len(), 1);
    assert_eq!(total_cents, 5 * 4999);

    // Zero quantity removes the row.
    let removed = cart_service::update_quantity(
        &state,
        &shopper,
        merged.id,
        UpdateQuantityRequest { quantity: 0 },
    )
    .await?;
    assert!(removed.is_none());
    let (items, total_cents) = cart_service::get_cart(&state, &shopper).await?;
    assert!(items.is_empty());
    assert_eq!(total_cents, 0);

    // Checkout two units.
    let order = order_service::place_order(
        &state,
        &shopper,
        CreateOrderRequest {
            items: vec![OrderLineRequest {
                product_id: product.id,
                quantity: 2,
            }],
            address: "1 Main St".into(),
        },
    )
    .await?;
    assert_eq!(order.order.total, 2 * 4999);
    assert_eq!(order.order.status, "PENDING");
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].item.unit_price, 4999);

    // An unknown product fails the whole order; nothing sticks.
    let bad = order_service::place_order(
        &state,
        &shopper,
        CreateOrderRequest {
            items: vec![
                OrderLineRequest {
                    product_id: product.id,
                    quantity: 1,
                },
                OrderLineRequest {
                    product_id: Uuid::new_v4(),
                    quantity: 1,
                },
            ],
            address: "1 Main St".into(),
        },
    )
    .await;
    assert!(matches!(bad, Err(AppError::NotFound(_))));
    let orders = order_service::list_orders(&state, &shopper).await?;
    assert_eq!(orders.len(), 1);

    // A later price change must not touch the recorded order.
    product_service::update_product(
        &state,
        &staff,
        product.id,
        UpdateProductRequest {
            price: Some(59.99),
            name: None,
            description: None,
            category_id: None,
            stock: None,
            image_url: None,
            specs: None,
        },
    )
    .await?;
    let orders = order_service::list_orders(&state, &shopper).await?;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].items[0].item.unit_price, 4999);
    assert_eq!(orders[0].order.total, 2 * 4999);

    // Lifecycle: PENDING -> PAID -> SHIPPED -> COMPLETED, no going back.
    let order_id = order.order.id;
    let paid =
        order_service::update_order(&state, &staff, order_id, status_change("PAID")).await?;
    assert_eq!(paid.order.status, "PAID");

    let back = order_service::update_order(&state, &staff, order_id, status_change("PENDING")).await;
    assert!(matches!(back, Err(AppError::BadRequest(_))));

    let shipped =
        order_service::update_order(&state, &staff, order_id, status_change("SHIPPED")).await?;
    assert_eq!(shipped.order.status, "SHIPPED");
    let completed =
        order_service::update_order(&state, &staff, order_id, status_change("COMPLETED")).await?;
    assert_eq!(completed.order.status, "COMPLETED");

    // Re-sending the current status is accepted as a no-op.
    let still =
        order_service::update_order(&state, &staff, order_id, status_change("COMPLETED")).await?;
    assert_eq!(still.order.status, "COMPLETED");

    // Terminal states accept nothing.
    let reopened = order_service::update_order(&state, &staff, order_id, status_change("PAID")).await;
    assert!(matches!(reopened, Err(AppError::BadRequest(_))));

    // Shoppers cannot drive the lifecycle.
    let denied_update =
        order_service::update_order(&state, &shopper, order_id, status_change("PAID")).await;
    assert!(matches!(denied_update, Err(AppError::Forbidden(_))));

    // Wishlist toggling flips membership.
    assert!(wishlist_service::toggle(&state, &shopper, product.id).await?);
    assert!(!wishlist_service::toggle(&state, &shopper, product.id).await?);
    assert!(wishlist_service::toggle(&state, &shopper, product.id).await?);

    // Reviews are author-owned; even staff cannot delete someone else's.
    let (review, author) = review_service::create_review(
        &state,
        &shopper,
        CreateReviewRequest {
            product_id: product.id,
            rating: 5,
            comment: Some("Clacky in the best way".into()),
            photos: None,
        },
    )
    .await?;
    assert_eq!(author.map(|a| a.id), Some(alice.id));

    let denied_delete = review_service::delete_review(&state, &staff, review.id).await;
    assert!(matches!(denied_delete, Err(AppError::Forbidden(_))));
    review_service::delete_review(&state, &shopper, review.id).await?;

    // QnA thread on the product.
    let question = qna_service::create_question(
        &state,
        &shopper,
        CreateQuestionRequest {
            product_id: product.id,
            content: "Hot-swappable switches?".into(),
        },
    )
    .await?;
    qna_service::create_answer(
        &state,
        &staff,
        CreateAnswerRequest {
            question_id: question.question.id,
            content: "Yes, both plates.".into(),
        },
    )
    .await?;
    let threads = qna_service::list_questions(&state, product.id).await?;
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].answers.len(), 1);

    // Role filter on the admin user list.
    let admins = user_service::list_users(
        &state,
        &staff,
        &UserListQuery {
            role: Some("ADMIN".into()),
        },
    )
    .await?;
    assert!(!admins.is_empty());
    assert!(admins.iter().all(|u| u.role == "ADMIN"));

    // Account removal takes the user's orders, cart, and wishlist along.
    promote(&state, &bob, "SUPER_ADMIN").await?;
    let root = auth_user(&bob, Role::SuperAdmin);
    user_service::delete_user(&state, &root, alice.id).await?;

    let remaining_orders: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1")
            .bind(alice.id)
            .fetch_one(&state.pool)
            .await?;
    assert_eq!(remaining_orders, 0);

    let gone = auth_service::login(
        &state,
        LoginRequest {
            email: "alice@example.com".into(),
            password: "password123".into(),
        },
    )
    .await;
    assert!(gone.is_err());

    Ok(())
}

fn status_change(status: &str) -> UpdateOrderRequest {
    UpdateOrderRequest {
        status: Some(status.to_string()),
        address: None,
        phone: None,
    }
}

fn auth_user(user: &users::Model, role: Role) -> AuthUser {
    AuthUser {
        user_id: user.id,
        email: user.email.clone(),
        role,
    }
}

async fn promote(state: &AppState, user: &users::Model, role: &str) -> anyhow::Result<()> {
    let mut active = user.clone().into_active_model();
    active.role = Set(role.to_string());
    active.update(&state.orm).await?;
    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let orm = create_orm_conn(&pool);

    // Clean tables between runs.
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE order_items, orders, cart_items, wishlist_items, reviews, answers, questions, images, audit_logs, products, categories, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState {
        pool,
        orm,
        jwt: JwtKeys::from_secret("integration-test-secret"),
    })
}
