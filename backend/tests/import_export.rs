//! Whole-store export and transactional import over HTTP.

mod support;

use actix_web::http::StatusCode;
use actix_web::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use actix_web::{App, test};
use chrono::NaiveDate;
use serde_json::{Value, json};

use pupil_tracker::domain::{
    CategoryDraft, ClassDraft, DateWindow, EntryDraft, PupilDraft, SchoolYearDraft,
};
use pupil_tracker::inbound::http::state::HttpState;
use support::{api, id_of, memory_state, send};

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).expect("valid date")
}

/// One school year, class and pupil with three entries over two categories.
async fn populate(state: &HttpState) -> i32 {
    let year = state
        .school_years
        .create(SchoolYearDraft {
            name: "2024/2025".into(),
            start_date: date(8, 1),
            end_date: date(12, 31),
            is_active: true,
        })
        .await
        .expect("school year");
    let class = state
        .classes
        .create(ClassDraft {
            name: "1A".into(),
            school_year_id: year.id,
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
    let work = state
        .categories
        .create(CategoryDraft {
            name_de: "Arbeitsverhalten".into(),
            name_en: "Work Behavior".into(),
            is_predefined: false,
        })
        .await
        .expect("category");
    let social = state
        .categories
        .create(CategoryDraft {
            name_de: "Sozialverhalten".into(),
            name_en: "Social Behavior".into(),
            is_predefined: false,
        })
        .await
        .expect("category");
    for (category, day, text, grade) in [
        (work.id, 2, "Quiet, focused", Some("A")),
        (social.id, 3, "Said \"thanks\"", None),
        (work.id, 4, "Finished early", Some("B")),
    ] {
        state
            .entries
            .create(EntryDraft {
                pupil_id: pupil.id,
                category_id: category,
                date: date(9, day),
                text: text.into(),
                grade: grade.map(Into::into),
                subject: Some("Math".into()),
            })
            .await
            .expect("entry");
    }
    pupil.id.get()
}

fn counts(snapshot: &Value) -> Vec<usize> {
    ["school_years", "classes", "pupils", "categories", "entries"]
        .iter()
        .map(|key| snapshot[*key].as_array().map_or(0, Vec::len))
        .collect()
}

#[actix_web::test]
async fn export_then_import_reproduces_row_counts() {
    let source = memory_state();
    populate(&source).await;
    let source_app = test::init_service(App::new().configure(api(source))).await;
    let (status, exported) = send(
        &source_app,
        test::TestRequest::get().uri("/export/json").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let target_app = test::init_service(App::new().configure(api(memory_state()))).await;
    let (status, body) = send(
        &target_app,
        test::TestRequest::post()
            .uri("/import/json")
            .set_json(&exported)
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Import successful");
    assert_eq!(
        body["imported"],
        json!({"school_years": 1, "classes": 1, "pupils": 1, "categories": 2, "entries": 3})
    );

    let (_, reexported) = send(
        &target_app,
        test::TestRequest::get().uri("/export/json").to_request(),
    )
    .await;
    assert_eq!(counts(&reexported), counts(&exported));
    assert_eq!(counts(&reexported), [1, 1, 1, 2, 3]);
}

#[actix_web::test]
async fn colliding_identifiers_are_remapped() {
    let app = test::init_service(App::new().configure(api(memory_state()))).await;
    let (_, existing) = send(
        &app,
        test::TestRequest::post()
            .uri("/school_years")
            .set_json(json!({
                "name": "2023/2024",
                "start_date": "2023-08-01",
                "end_date": "2024-07-31",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(id_of(&existing), 1);

    let (status, _) = send(
        &app,
        test::TestRequest::post()
            .uri("/import/json")
            .set_json(json!({
                "school_years": [{
                    "id": 1,
                    "name": "2024/2025",
                    "start_date": "2024-08-01",
                    "end_date": "2025-07-31",
                    "is_active": false,
                }],
                "classes": [{"id": 1, "name": "1A", "school_year_id": 1}],
            }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, classes) = send(&app, test::TestRequest::get().uri("/classes").to_request()).await;
    assert_eq!(classes[0]["name"], "1A");
    assert_eq!(classes[0]["school_year_id"], 2);
}

#[actix_web::test]
async fn failed_import_leaves_the_store_untouched() {
    let app = test::init_service(App::new().configure(api(memory_state()))).await;
    let (status, error) = send(
        &app,
        test::TestRequest::post()
            .uri("/import/json")
            .set_json(json!({
                "school_years": [{
                    "id": 1,
                    "name": "2024/2025",
                    "start_date": "2024-08-01",
                    "end_date": "2025-07-31",
                }],
                "classes": [{"id": 1, "name": "1A", "school_year_id": 1}],
                "pupils": [{"first_name": "Max", "last_name": "Mustermann", "class_id": 77}],
            }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["details"]["fields"][0]["field"], "pupils[0].class_id");
    assert_eq!(error["details"]["fields"][0]["code"], "unknown_reference");

    let (_, snapshot) = send(&app, test::TestRequest::get().uri("/export/json").to_request()).await;
    assert_eq!(counts(&snapshot), [0, 0, 0, 0, 0]);
}

#[actix_web::test]
async fn invalid_records_are_reported_by_path() {
    let app = test::init_service(App::new().configure(api(memory_state()))).await;
    let (status, error) = send(
        &app,
        test::TestRequest::post()
            .uri("/import/json")
            .set_json(json!({
                "categories": [
                    {"name_de": "Motorik", "name_en": "Motor Skills"},
                    {"name_de": " ", "name_en": "Blank"},
                ],
            }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["details"]["fields"][0]["field"], "categories[1].name_de");
}

#[actix_web::test]
async fn seeded_categories_are_not_duplicated() {
    let source = memory_state();
    source.categories.seed_predefined().await.expect("seed source");
    let exported = source.transfer.export().await.expect("export");

    let target = memory_state();
    target.categories.seed_predefined().await.expect("seed target");
    let summary = target.transfer.import(exported).await.expect("import");
    assert_eq!(summary.categories, 0);
    assert_eq!(target.categories.list(true).await.expect("list").len(), 8);
}

#[actix_web::test]
async fn transliterated_seed_labels_match_the_seed_set() {
    let state = memory_state();
    state.categories.seed_predefined().await.expect("seed");
    let app = test::init_service(App::new().configure(api(state))).await;
    let categories: Vec<Value> = [
        ("Arbeitsverhalten", "Work Behavior"),
        ("Sozialverhalten", "Social Behavior"),
        ("Lernentwicklung", "Learning Development"),
        ("Besondere Vorkommnisse", "Special Incidents"),
        ("Motorik", "Motor Skills"),
        ("Kreativitaet", "Creativity"),
        ("Sprachentwicklung", "Language Development"),
        ("Selbststaendigkeit", "Independence"),
    ]
    .iter()
    .enumerate()
    .map(|(index, (de, en))| {
        json!({"id": index + 1, "name_de": de, "name_en": en, "is_predefined": true})
    })
    .collect();

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/import/json")
            .set_json(json!({"categories": categories}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imported"]["categories"], 0);

    let (_, listed) = send(
        &app,
        test::TestRequest::get()
            .uri("/categories?predefined_only=true")
            .to_request(),
    )
    .await;
    assert_eq!(listed.as_array().map(Vec::len), Some(8));
}

#[actix_web::test]
async fn csv_export_quotes_fields() {
    let state = memory_state();
    populate(&state).await;
    let app = test::init_service(App::new().configure(api(state))).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/export/csv").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("text/csv; charset=utf-8")
    );
    assert_eq!(
        res.headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok()),
        Some("attachment; filename=export.csv")
    );
    let body = test::read_body(res).await;
    let csv = std::str::from_utf8(&body).expect("utf8 csv");
    let lines: Vec<&str> = csv.split("\r\n").collect();
    assert_eq!(
        lines,
        [
            "Pupil,Category,Date,Text,Grade,Subject",
            "Max Mustermann,Work Behavior,2024-09-02,\"Quiet, focused\",A,Math",
            "Max Mustermann,Social Behavior,2024-09-03,\"Said \"\"thanks\"\"\",,Math",
            "Max Mustermann,Work Behavior,2024-09-04,Finished early,B,Math",
            "",
        ]
    );
}

#[actix_web::test]
async fn export_payload_shape() {
    let state = memory_state();
    let year = state
        .school_years
        .create(SchoolYearDraft {
            name: "2024/2025".into(),
            start_date: date(8, 1),
            end_date: date(12, 31),
            is_active: true,
        })
        .await
        .expect("school year");
    state
        .classes
        .create(ClassDraft {
            name: "1A".into(),
            school_year_id: year.id,
        })
        .await
        .expect("class");

    let snapshot = state.transfer.export().await.expect("export");
    insta::assert_json_snapshot!(snapshot, @r#"
    {
      "school_years": [
        {
          "id": 1,
          "name": "2024/2025",
          "start_date": "2024-08-01",
          "end_date": "2024-12-31",
          "is_active": true
        }
      ],
      "classes": [
        {
          "id": 1,
          "name": "1A",
          "school_year_id": 1
        }
      ],
      "pupils": [],
      "categories": [],
      "entries": []
    }
    "#);
}

#[actix_web::test]
async fn report_payload_shape() {
    let state = memory_state();
    let pupil_id = populate(&state).await;
    let window = DateWindow::new(Some(date(9, 3)), Some(date(9, 30))).expect("window");
    let report = state
        .reports
        .build(pupil_id.into(), window)
        .await
        .expect("report");
    insta::assert_json_snapshot!(report, @r#"
    {
      "pupil_id": 1,
      "pupil_name": "Max Mustermann",
      "class_name": "1A",
      "start_date": "2024-09-03",
      "end_date": "2024-09-30",
      "entries_by_category": {
        "Social Behavior": [
          {
            "date": "2024-09-03",
            "text": "Said \"thanks\"",
            "grade": null,
            "subject": "Math"
          }
        ],
        "Work Behavior": [
          {
            "date": "2024-09-04",
            "text": "Finished early",
            "grade": "B",
            "subject": "Math"
          }
        ]
      }
    }
    "#);
}
