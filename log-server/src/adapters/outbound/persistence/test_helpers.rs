use chrono::{Duration, Utc};

use crate::adapters::outbound::persistence::Database;
use crate::domain::models::LogRecord;

pub(crate) async fn create_test_db() -> Database {
    Database::new("sqlite::memory:").await.unwrap()
}

/// Database seeded with three records, oldest first:
/// INFO "service started", WARN "disk usage warning", ERROR "upstream error: timeout"
pub(crate) async fn create_seeded_db() -> Database {
    let db = create_test_db().await;
    let now = Utc::now();

    let records = [
        LogRecord::new("INFO", "service started").with_timestamp(now - Duration::minutes(3)),
        LogRecord::new("WARN", "disk usage warning").with_timestamp(now - Duration::minutes(2)),
        LogRecord::new("ERROR", "upstream error: timeout").with_timestamp(now - Duration::minutes(1)),
    ];
    for record in records {
        db.insert_log(&record, None).await.unwrap();
    }

    db
}
