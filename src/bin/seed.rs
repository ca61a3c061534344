use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum_storefront_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let user_id = ensure_user(&pool, "Demo User", "user@example.com", "user1234", "USER").await?;
    let admin_id = ensure_user(&pool, "Demo Admin", "admin@example.com", "admin1234", "ADMIN").await?;
    ensure_user(&pool, "Root", "root@example.com", "root1234", "SUPER_ADMIN").await?;

    let keyboards = ensure_category(&pool, "Keyboards", Some("/api/v2/images/cat-keyboards")).await?;
    let mice = ensure_category(&pool, "Mice", Some("/api/v2/images/cat-mice")).await?;
    let audio = ensure_category(&pool, "Audio", None).await?;
    seed_products(&pool, keyboards, mice, audio).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_optional(pool)
    .await?;

    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn ensure_category(
    pool: &sqlx::PgPool,
    name: &str,
    image_url: Option<&str>,
) -> anyhow::Result<Uuid> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO categories (id, name, image_url)
        VALUES ($1, $2, $3)
        ON CONFLICT (name) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(image_url)
    .fetch_optional(pool)
    .await?;

    let category_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM categories WHERE name = $1")
                .bind(name)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured category {name}");
    Ok(category_id)
}

async fn seed_products(
    pool: &sqlx::PgPool,
    keyboards: Uuid,
    mice: Uuid,
    audio: Uuid,
) -> anyhow::Result<()> {
    // Prices are cents.
    let products = vec![
        (
            "Tenkeyless Mechanical Keyboard",
            "Hot-swappable switches, PBT keycaps",
            12999_i64,
            40,
            keyboards,
            Some(r#"{"layout":"TKL","switches":"tactile","connectivity":"USB-C"}"#),
        ),
        (
            "Low-Profile Wireless Keyboard",
            "Slim board for travel setups",
            8950,
            65,
            keyboards,
            None,
        ),
        (
            "Ultralight Gaming Mouse",
            "55 grams with PTFE feet",
            6499,
            120,
            mice,
            Some(r#"{"weight":"55g","dpi":26000,"connectivity":"2.4GHz"}"#),
        ),
        (
            "Ergonomic Vertical Mouse",
            "Keeps the wrist neutral on long days",
            4420,
            80,
            mice,
            None,
        ),
        (
            "Closed-Back Studio Headphones",
            "Flat response for editing",
            19900,
            25,
            audio,
            Some(r#"{"impedance":"38ohm","driver":"40mm"}"#),
        ),
    ];

    for (name, desc, price, stock, category_id, specs) in products {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, stock, category_id, specs)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(desc)
        .bind(price)
        .bind(stock)
        .bind(category_id)
        .bind(specs)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
