//! PostgreSQL adapter suite.
//!
//! Runs only when `PUPIL_TRACKER_TEST_DATABASE_URL` points at a scratch
//! database; the tables are truncated before use. Everything runs in one test
//! so the steps never race on the shared tables.

use std::env;
use std::sync::Arc;

use chrono::NaiveDate;
use diesel::{Connection, PgConnection, RunQueryDsl};

use pupil_tracker::domain::{
    CategoryDraft, ClassDraft, DateWindow, EntryDraft, ErrorCode, PupilDraft, SchoolYearDraft,
    Snapshot,
};
use pupil_tracker::inbound::http::state::{HttpState, HttpStatePorts};
use pupil_tracker::outbound::documents::{DocxRenderer, PdfRenderer};
use pupil_tracker::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselClassRepository, DieselEntryRepository,
    DieselPupilRepository, DieselSchoolYearRepository, DieselSnapshotRepository, PoolConfig,
    run_pending_migrations,
};

const DATABASE_URL_VAR: &str = "PUPIL_TRACKER_TEST_DATABASE_URL";

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).expect("valid date")
}

fn reset_tables(database_url: &str) {
    run_pending_migrations(database_url).expect("migrations apply");
    let mut conn = PgConnection::establish(database_url).expect("connect");
    diesel::sql_query(
        "TRUNCATE entries, pupils, classes, categories, school_years RESTART IDENTITY CASCADE",
    )
    .execute(&mut conn)
    .expect("truncate");
}

fn diesel_state(pool: &DbPool) -> HttpState {
    HttpState::new(HttpStatePorts {
        school_years: Arc::new(DieselSchoolYearRepository::new(pool.clone())),
        classes: Arc::new(DieselClassRepository::new(pool.clone())),
        pupils: Arc::new(DieselPupilRepository::new(pool.clone())),
        categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
        entries: Arc::new(DieselEntryRepository::new(pool.clone())),
        snapshots: Arc::new(DieselSnapshotRepository::new(pool.clone())),
        pdf: Arc::new(PdfRenderer),
        docx: Arc::new(DocxRenderer),
    })
}

fn year(name: &str, active: bool) -> SchoolYearDraft {
    SchoolYearDraft {
        name: name.into(),
        start_date: date(8, 1),
        end_date: date(12, 31),
        is_active: active,
    }
}

fn sizes(snapshot: &Snapshot) -> [usize; 5] {
    [
        snapshot.school_years.len(),
        snapshot.classes.len(),
        snapshot.pupils.len(),
        snapshot.categories.len(),
        snapshot.entries.len(),
    ]
}

#[tokio::test(flavor = "multi_thread")]
async fn diesel_adapters_honour_store_rules() {
    let Ok(database_url) = env::var(DATABASE_URL_VAR) else {
        return;
    };
    let url = database_url.clone();
    tokio::task::spawn_blocking(move || reset_tables(&url))
        .await
        .expect("reset task");
    let pool = DbPool::new(PoolConfig::new(database_url.as_str()).with_max_size(4))
        .await
        .expect("pool");
    let state = diesel_state(&pool);

    // Seeding is idempotent.
    assert_eq!(state.categories.seed_predefined().await.expect("seed"), 8);
    assert_eq!(state.categories.seed_predefined().await.expect("reseed"), 0);

    // Active flag moves to the most recent active year.
    let first = state.school_years.create(year("2023/2024", true)).await.expect("year");
    let second = state.school_years.create(year("2024/2025", true)).await.expect("year");
    let active = state.school_years.get_active().await.expect("active");
    assert_eq!(active.id, second.id);
    let reloaded = state.school_years.get(first.id).await.expect("first year");
    assert!(!reloaded.is_active);

    let class = state
        .classes
        .create(ClassDraft {
            name: "1A".into(),
            school_year_id: second.id,
        })
        .await
        .expect("class");
    let pupil = state
        .pupils
        .create(PupilDraft {
            first_name: "Max".into(),
            last_name: "Mustermann".into(),
            class_id: class.id,
        })
        .await
        .expect("pupil");
    let category = state
        .categories
        .create(CategoryDraft {
            name_de: "Test".into(),
            name_en: "Test".into(),
            is_predefined: false,
        })
        .await
        .expect("category");
    for (day, text) in [(2, "Early"), (20, "Late")] {
        state
            .entries
            .create(EntryDraft {
                pupil_id: pupil.id,
                category_id: category.id,
                date: date(9, day),
                text: text.into(),
                grade: Some("A".into()),
                subject: None,
            })
            .await
            .expect("entry");
    }

    // Report window is inclusive on both ends.
    let window = DateWindow::new(Some(date(9, 2)), Some(date(9, 2))).expect("window");
    let report = state.reports.build(pupil.id, window).await.expect("report");
    let groups: Vec<(&str, usize)> = report
        .entries_by_category
        .iter()
        .map(|(label, entries)| (label, entries.len()))
        .collect();
    assert_eq!(groups, [("Test", 1)]);

    // Referential rules.
    let err = state.school_years.delete(second.id).await.expect_err("has classes");
    assert_eq!(err.code(), ErrorCode::Conflict);
    let err = state.pupils.delete(9_999.into()).await.expect_err("unknown pupil");
    assert_eq!(err.code(), ErrorCode::NotFound);
    let predefined = state.categories.list(true).await.expect("predefined");
    let protected = predefined.first().expect("seeded category");
    let err = state.categories.delete(protected.id).await.expect_err("protected");
    assert_eq!(err.code(), ErrorCode::Forbidden);
    let err = state
        .classes
        .create(ClassDraft {
            name: "Orphan".into(),
            school_year_id: 9_999.into(),
        })
        .await
        .expect_err("unknown parent");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);

    // Export is consistent; re-import remaps every key and skips the seed set.
    let exported = state.transfer.export().await.expect("export");
    assert_eq!(sizes(&exported), [2, 1, 1, 9, 2]);
    let summary = state.transfer.import(exported.clone()).await.expect("import");
    assert_eq!(
        [
            summary.school_years,
            summary.classes,
            summary.pupils,
            summary.categories,
            summary.entries
        ],
        [2, 1, 1, 1, 2]
    );
    let after = state.transfer.export().await.expect("export");
    assert_eq!(sizes(&after), [4, 2, 2, 10, 4]);
    let imported_class = after.classes.last().expect("imported class");
    assert_ne!(imported_class.draft.school_year_id, class.school_year_id);
    assert_eq!(
        after.school_years.iter().filter(|row| row.draft.is_active).count(),
        1
    );

    // A dangling pass-through key rolls back the whole batch.
    let mut broken = exported;
    if let Some(entry) = broken.entries.last_mut() {
        entry.draft.pupil_id = 9_999.into();
        entry.draft.category_id = 9_998.into();
    }
    broken.entries.iter_mut().for_each(|entry| entry.id = None);
    broken.pupils.clear();
    let err = state.transfer.import(broken).await.expect_err("dangling key");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let unchanged = state.transfer.export().await.expect("export");
    assert_eq!(sizes(&unchanged), sizes(&after));
}
