//! Report builder behaviour over mocked repositories.

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockCategoryRepository, MockClassRepository, MockEntryRepository, MockPupilRepository,
};
use crate::domain::{Category, Class, ClassId, EntryId, ErrorCode, SchoolYearId};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, day).expect("valid date")
}

fn entry(id: i32, category: i32, text: &str) -> Entry {
    Entry {
        id: EntryId::new(id),
        pupil_id: PupilId::new(1),
        category_id: CategoryId::new(category),
        date: date(u32::try_from(id).expect("small id")),
        text: text.into(),
        grade: None,
        subject: None,
    }
}

#[fixture]
fn pupil() -> Pupil {
    Pupil {
        id: PupilId::new(1),
        first_name: "Max".into(),
        last_name: "Mustermann".into(),
        class_id: ClassId::new(4),
    }
}

fn category(id: CategoryId) -> Option<Category> {
    let name_en = match id.get() {
        1 => "Work Behavior",
        2 => "Creativity",
        _ => return None,
    };
    Some(Category {
        id,
        name_de: name_en.into(),
        name_en: name_en.into(),
        is_predefined: true,
    })
}

fn service(
    pupil: Option<Pupil>,
    class_exists: bool,
    entries: Vec<Entry>,
) -> ReportService {
    let mut pupils = MockPupilRepository::new();
    pupils
        .expect_find()
        .returning(move |_| Ok(pupil.clone()));
    let mut classes = MockClassRepository::new();
    classes.expect_find().returning(move |id| {
        Ok(class_exists.then(|| Class {
            id,
            name: "1A".into(),
            school_year_id: SchoolYearId::new(1),
        }))
    });
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_find()
        .returning(|id| Ok(category(id)));
    let mut entry_repo = MockEntryRepository::new();
    entry_repo
        .expect_list_for_pupil_between()
        .returning(move |_, _, _| Ok(entries.clone()));
    ReportService::new(
        Arc::new(pupils),
        Arc::new(classes),
        Arc::new(categories),
        Arc::new(entry_repo),
    )
}

fn unbounded() -> DateWindow {
    DateWindow::new(None, None).expect("default window is valid")
}

#[rstest]
#[tokio::test]
async fn groups_by_category_in_first_seen_order(pupil: Pupil) {
    let entries = vec![
        entry(1, 2, "painted"),
        entry(2, 1, "focused"),
        entry(3, 2, "sculpted"),
    ];
    let report = service(Some(pupil), true, entries)
        .build(PupilId::new(1), unbounded())
        .await
        .expect("report builds");

    let groups: Vec<(&str, Vec<&str>)> = report
        .entries_by_category
        .iter()
        .map(|(name, entries)| (name, entries.iter().map(|e| e.text.as_str()).collect()))
        .collect();
    assert_eq!(
        groups,
        [
            ("Creativity", vec!["painted", "sculpted"]),
            ("Work Behavior", vec!["focused"]),
        ]
    );
    let json = serde_json::to_string(&report.entries_by_category).expect("groups serialise");
    assert!(json.starts_with(r#"{"Creativity":"#));
}

#[rstest]
#[tokio::test]
async fn empty_window_yields_empty_groups(pupil: Pupil) {
    let report = service(Some(pupil), true, vec![])
        .build(PupilId::new(1), unbounded())
        .await
        .expect("report builds");

    assert!(report.entries_by_category.is_empty());
    let value = serde_json::to_value(&report).expect("report serialises");
    assert_eq!(value["entries_by_category"], serde_json::json!({}));
    assert_eq!(value["pupil_name"], "Max Mustermann");
    assert_eq!(value["start_date"], "2000-01-01");
    assert_eq!(value["end_date"], "2100-12-31");
}

#[rstest]
#[tokio::test]
async fn missing_links_resolve_to_sentinel(pupil: Pupil) {
    let report = service(Some(pupil), false, vec![entry(1, 77, "orphan")])
        .build(PupilId::new(1), unbounded())
        .await
        .expect("report builds");

    assert_eq!(report.class_name, "N/A");
    let (name, _) = report
        .entries_by_category
        .iter()
        .next()
        .expect("one group");
    assert_eq!(name, "N/A");
}

#[rstest]
#[tokio::test]
async fn unknown_pupil_is_not_found() {
    let error = service(None, true, vec![])
        .build(PupilId::new(9), unbounded())
        .await
        .expect_err("pupil is missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Pupil not found");
}

#[rstest]
fn file_stem_uses_last_then_first(pupil: Pupil) {
    let report = Report::new(&pupil, "1A".into(), unbounded());
    assert_eq!(report.file_stem(), "report_Mustermann_Max");
}

#[rstest]
fn line_omits_empty_grade() {
    let mut item = ReportEntry::from(entry(2, 1, "quiet"));
    assert_eq!(item.line(), "[2024-09-02] quiet");
    item.grade = Some("B+".into());
    assert_eq!(item.line(), "[2024-09-02] quiet (Grade: B+)");
}
