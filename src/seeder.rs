//! Startup seeding of demo catalog data.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::product::{self, Entity as Product};
use crate::errors::ServiceError;

/// Inserts the demo product set when the table is empty. Safe to call on
/// every startup.
pub async fn seed_products(db: &DatabaseConnection) -> Result<(), ServiceError> {
    if Product::find().count(db).await? > 0 {
        debug!("Products table already populated; skipping seed");
        return Ok(());
    }

    let now = Utc::now();
    let rows: [(&str, &str, Decimal, i64); 15] = [
        ("Almond Milk", "Unsweetened almond milk.", dec!(3.49), 12),
        ("Coffee Beans", "Single origin medium roast.", dec!(12.99), 25),
        ("Matcha Powder", "Ceremonial grade matcha.", dec!(19.50), 7),
        ("Olive Oil", "Extra virgin olive oil.", dec!(14.75), 30),
        ("Dark Chocolate", "70% cacao dark chocolate.", dec!(4.25), 3),
        ("Sea Salt", "Flaky sea salt.", dec!(2.10), 20),
        ("Pasta", "Durum wheat fusilli.", dec!(3.20), 9),
        ("Tomato Sauce", "Slow cooked tomato sauce.", dec!(5.60), 15),
        ("Green Tea", "Loose leaf green tea.", dec!(8.30), 18),
        ("Granola", "Honey almond granola.", dec!(6.75), 6),
        ("Coconut Water", "Natural coconut water.", dec!(3.95), 11),
        ("Yogurt", "Greek yogurt plain.", dec!(4.80), 4),
        ("Peanut Butter", "Creamy peanut butter.", dec!(5.10), 22),
        ("Honey", "Wildflower honey.", dec!(7.40), 27),
        ("Basmati Rice", "Aromatic basmati rice.", dec!(9.99), 14),
    ];

    for (name, description, price, days_ago) in rows {
        let row = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            price: Set(price),
            created_at: Set(now - Duration::days(days_ago)),
        };
        row.insert(db).await?;
    }

    info!("Seeded {} demo products", rows.len());
    Ok(())
}
