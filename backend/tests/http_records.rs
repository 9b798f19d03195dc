//! End-to-end record keeping over HTTP against the in-memory store.

mod support;

use actix_web::http::StatusCode;
use actix_web::{App, test};
use chrono::Local;
use rstest::rstest;
use serde_json::{Value, json};

use pupil_tracker::Trace;
use support::{api, id_of, memory_state, send};

macro_rules! app {
    () => {
        test::init_service(App::new().wrap(Trace).configure(api(memory_state()))).await
    };
}

fn school_year(name: &str, active: bool) -> Value {
    json!({
        "name": name,
        "start_date": "2024-08-01",
        "end_date": "2025-07-31",
        "is_active": active,
    })
}

#[actix_web::test]
async fn concrete_scenario_produces_the_expected_report() {
    let app = app!();
    let today = Local::now().date_naive().to_string();

    let (status, year) = send(
        &app,
        test::TestRequest::post()
            .uri("/school_years")
            .set_json(school_year("2024/2025", true))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, class) = send(
        &app,
        test::TestRequest::post()
            .uri("/classes")
            .set_json(json!({"name": "1A", "school_year_id": id_of(&year)}))
            .to_request(),
    )
    .await;
    let (_, pupil) = send(
        &app,
        test::TestRequest::post()
            .uri("/pupils")
            .set_json(json!({
                "first_name": "Max",
                "last_name": "Mustermann",
                "class_id": id_of(&class),
            }))
            .to_request(),
    )
    .await;
    let (_, category) = send(
        &app,
        test::TestRequest::post()
            .uri("/categories")
            .set_json(json!({"name_de": "Test", "name_en": "Test"}))
            .to_request(),
    )
    .await;
    let (status, _) = send(
        &app,
        test::TestRequest::post()
            .uri("/entries")
            .set_json(json!({
                "pupil_id": id_of(&pupil),
                "category_id": id_of(&category),
                "date": today,
                "text": "Test entry",
                "grade": "A",
                "subject": "Math",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, report) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/reports/pupil/{}", id_of(&pupil)))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["pupil_name"], "Max Mustermann");
    assert_eq!(
        report["entries_by_category"],
        json!({"Test": [{"date": today, "text": "Test entry", "grade": "A", "subject": "Math"}]})
    );
}

#[actix_web::test]
async fn predefined_categories_cannot_be_deleted() {
    let app = app!();
    let (_, category) = send(
        &app,
        test::TestRequest::post()
            .uri("/categories")
            .set_json(json!({
                "name_de": "Arbeitsverhalten",
                "name_en": "Work Behavior",
                "is_predefined": true,
            }))
            .to_request(),
    )
    .await;
    let uri = format!("/categories/{}", id_of(&category));

    let (status, error) = send(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["code"], "forbidden");

    let (status, kept) = send(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kept["is_predefined"], true);
}

#[actix_web::test]
async fn updates_keep_the_predefined_flag() {
    let app = app!();
    let (_, category) = send(
        &app,
        test::TestRequest::post()
            .uri("/categories")
            .set_json(json!({"name_de": "Motorik", "name_en": "Motor Skills", "is_predefined": true}))
            .to_request(),
    )
    .await;
    let (status, updated) = send(
        &app,
        test::TestRequest::put()
            .uri(&format!("/categories/{}", id_of(&category)))
            .set_json(json!({"name_de": "Motorik", "name_en": "Motor skills", "is_predefined": false}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name_en"], "Motor skills");
    assert_eq!(updated["is_predefined"], true);
}

#[actix_web::test]
async fn at_most_one_school_year_is_active() {
    let app = app!();
    let (status, _) = send(
        &app,
        test::TestRequest::get().uri("/school_years/active").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(
        &app,
        test::TestRequest::post()
            .uri("/school_years")
            .set_json(school_year("2023/2024", true))
            .to_request(),
    )
    .await;
    let (_, latest) = send(
        &app,
        test::TestRequest::post()
            .uri("/school_years")
            .set_json(school_year("2024/2025", true))
            .to_request(),
    )
    .await;

    let (status, active) = send(
        &app,
        test::TestRequest::get().uri("/school_years/active").to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active["id"], latest["id"]);

    let (_, all) = send(&app, test::TestRequest::get().uri("/school_years").to_request()).await;
    let active_count = all
        .as_array()
        .expect("list")
        .iter()
        .filter(|year| year["is_active"] == true)
        .count();
    assert_eq!(active_count, 1);
}

#[rstest]
#[case("/school_years/999")]
#[case("/classes/999")]
#[case("/pupils/999")]
#[case("/categories/999")]
#[case("/entries/999")]
#[actix_rt::test]
async fn deleting_unknown_rows_is_not_found(#[case] uri: &str) {
    let app = app!();
    let (status, error) = send(&app, test::TestRequest::delete().uri(uri).to_request()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "not_found");
}

#[actix_web::test]
async fn parents_with_children_are_kept() {
    let app = app!();
    let (_, year) = send(
        &app,
        test::TestRequest::post()
            .uri("/school_years")
            .set_json(school_year("2024/2025", false))
            .to_request(),
    )
    .await;
    send(
        &app,
        test::TestRequest::post()
            .uri("/classes")
            .set_json(json!({"name": "1A", "school_year_id": id_of(&year)}))
            .to_request(),
    )
    .await;

    let (status, error) = send(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/school_years/{}", id_of(&year)))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "conflict");
}

#[actix_web::test]
async fn unknown_parent_is_a_field_error() {
    let app = app!();
    let (status, error) = send(
        &app,
        test::TestRequest::post()
            .uri("/classes")
            .set_json(json!({"name": "1A", "school_year_id": 42}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["details"]["fields"][0]["field"], "school_year_id");
    assert_eq!(error["details"]["fields"][0]["code"], "unknown_reference");
}

#[actix_web::test]
async fn missing_fields_are_listed_together() {
    let app = app!();
    let (status, error) = send(
        &app,
        test::TestRequest::post()
            .uri("/pupils")
            .set_json(json!({"first_name": "Max"}))
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = error["details"]["fields"]
        .as_array()
        .expect("field list")
        .iter()
        .filter_map(|field| field["field"].as_str())
        .collect();
    assert_eq!(fields, ["last_name", "class_id"]);
}

#[actix_web::test]
async fn malformed_json_uses_the_error_envelope() {
    let app = app!();
    let (status, error) = send(
        &app,
        test::TestRequest::post()
            .uri("/school_years")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_request");
    assert!(error["trace_id"].is_string());
}

#[actix_web::test]
async fn report_groups_follow_first_seen_category() {
    let app = app!();
    let (_, year) = send(
        &app,
        test::TestRequest::post()
            .uri("/school_years")
            .set_json(school_year("2024/2025", true))
            .to_request(),
    )
    .await;
    let (_, class) = send(
        &app,
        test::TestRequest::post()
            .uri("/classes")
            .set_json(json!({"name": "2B", "school_year_id": id_of(&year)}))
            .to_request(),
    )
    .await;
    let (_, pupil) = send(
        &app,
        test::TestRequest::post()
            .uri("/pupils")
            .set_json(json!({"first_name": "Erika", "last_name": "Musterfrau", "class_id": id_of(&class)}))
            .to_request(),
    )
    .await;
    let mut categories = Vec::new();
    for (de, en) in [("Sozialverhalten", "Social Behavior"), ("Motorik", "Motor Skills")] {
        let (_, category) = send(
            &app,
            test::TestRequest::post()
                .uri("/categories")
                .set_json(json!({"name_de": de, "name_en": en}))
                .to_request(),
        )
        .await;
        categories.push(id_of(&category));
    }
    let motor = categories.pop().expect("second category");
    let social = categories.pop().expect("first category");
    for (category, day, text) in [
        (motor, "2024-09-02", "Jumps rope"),
        (social, "2024-09-03", "Helps others"),
        (motor, "2024-09-04", "Catches a ball"),
    ] {
        send(
            &app,
            test::TestRequest::post()
                .uri("/entries")
                .set_json(json!({
                    "pupil_id": id_of(&pupil),
                    "category_id": category,
                    "date": day,
                    "text": text,
                }))
                .to_request(),
        )
        .await;
    }

    let (_, report) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/reports/pupil/{}", id_of(&pupil)))
            .to_request(),
    )
    .await;
    let groups = report["entries_by_category"].as_object().expect("groups");
    assert_eq!(groups.len(), 2);
    let motor_texts: Vec<&str> = report["entries_by_category"]["Motor Skills"]
        .as_array()
        .expect("motor group")
        .iter()
        .filter_map(|entry| entry["text"].as_str())
        .collect();
    assert_eq!(motor_texts, ["Jumps rope", "Catches a ball"]);
    assert_eq!(
        report["entries_by_category"]["Social Behavior"][0]["text"],
        "Helps others"
    );

    let (_, empty) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!(
                "/reports/pupil/{}?start_date=2025-01-01",
                id_of(&pupil)
            ))
            .to_request(),
    )
    .await;
    assert_eq!(empty["entries_by_category"], json!({}));
}

#[actix_web::test]
async fn list_filters_narrow_results() {
    let app = app!();
    let mut years = Vec::new();
    for name in ["2023/2024", "2024/2025"] {
        let (_, year) = send(
            &app,
            test::TestRequest::post()
                .uri("/school_years")
                .set_json(school_year(name, false))
                .to_request(),
        )
        .await;
        years.push(id_of(&year));
    }
    for (name, year) in [("1A", years.first()), ("2A", years.last()), ("2B", years.last())] {
        send(
            &app,
            test::TestRequest::post()
                .uri("/classes")
                .set_json(json!({"name": name, "school_year_id": year}))
                .to_request(),
        )
        .await;
    }

    let last = years.last().expect("second year");
    let (_, classes) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/classes?school_year_id={last}"))
            .to_request(),
    )
    .await;
    let names: Vec<&str> = classes
        .as_array()
        .expect("list")
        .iter()
        .filter_map(|class| class["name"].as_str())
        .collect();
    assert_eq!(names, ["2A", "2B"]);
}

#[actix_web::test]
async fn responses_carry_a_trace_header() {
    let app = app!();
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/school_years").to_request(),
    )
    .await;
    assert!(res.headers().contains_key("trace-id"));
}
