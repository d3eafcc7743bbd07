//! Offline unit tests for nearpro-db pool configuration and row types.
//! These tests do not require a live database connection.

use nearpro_core::{AppConfig, Category, Environment, ProfessionalRecord};
use nearpro_db::{PoolConfig, ProfessionalRow};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        seed_path: PathBuf::from("./config/professionals.yaml"),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        request_timeout_secs: 15,
        rate_limit_per_minute: 120,
        api_keys: vec![],
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout, Duration::from_secs(9));
}

/// Compile-time smoke test: confirm that [`ProfessionalRow`] has all expected
/// fields and converts into a domain record. No database required.
#[test]
fn professional_row_converts_to_record() {
    use chrono::Utc;
    use uuid::Uuid;

    let user_id = Uuid::new_v4();
    let row = ProfessionalRow {
        id: 42_i64,
        public_id: Uuid::new_v4(),
        user_id,
        display_name: "Barbería Centro".to_string(),
        category: "BARBER".to_string(),
        is_available: true,
        is_active: true,
        latitude: Some(-33.4489),
        longitude: Some(-70.6693),
        prices: serde_json::json!({"Cut": 15000, "Beard": {"price": 8000, "duration": 30}}),
        rating_average: 4.6,
        review_count: 12_i32,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let record = ProfessionalRecord::try_from(row).expect("row should convert");
    assert_eq!(record.id, 42);
    assert_eq!(record.user_id, user_id);
    assert_eq!(record.category, Category::Barber);
    assert!(record.is_searchable());
    assert_eq!(record.review_count, 12);
}

#[test]
fn negative_review_count_is_rejected() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = ProfessionalRow {
        id: 3,
        public_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        display_name: "Ink".to_string(),
        category: "TATTOO_ARTIST".to_string(),
        is_available: true,
        is_active: true,
        latitude: None,
        longitude: None,
        prices: serde_json::json!({}),
        rating_average: 0.0,
        review_count: -1,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    assert!(ProfessionalRecord::try_from(row).is_err());
}
