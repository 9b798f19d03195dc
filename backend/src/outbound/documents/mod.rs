//! Document renderers implementing [`ReportRenderer`](crate::domain::ports::ReportRenderer).
//!
//! Both formats lay out the same outline: a title, the covered period, and
//! one heading per category followed by a line per entry.

mod docx;
mod pdf;

pub use docx::DocxRenderer;
pub use pdf::PdfRenderer;

use crate::domain::Report;

/// One block of the printed report.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    Title(String),
    Paragraph(String),
    Heading(String),
    Bullet(String),
}

impl Block {
    fn text(&self) -> &str {
        match self {
            Self::Title(text) | Self::Paragraph(text) | Self::Heading(text) | Self::Bullet(text) => {
                text
            }
        }
    }
}

/// Flatten a report into printable blocks in reading order.
fn outline(report: &Report) -> Vec<Block> {
    let mut blocks = vec![
        Block::Title(format!("Development Report: {}", report.pupil_name)),
        Block::Paragraph(format!("Period: {} - {}", report.start_date, report.end_date)),
    ];
    for (category, entries) in report.entries_by_category.iter() {
        blocks.push(Block::Heading(category.to_owned()));
        blocks.extend(entries.iter().map(|entry| Block::Bullet(entry.line())));
    }
    blocks
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::domain::{ClassId, DateWindow, Pupil, PupilId, Report, ReportEntry};

    pub fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, day).expect("valid date")
    }

    pub fn sample_report(entries: &[(&str, &str, Option<&str>)]) -> Report {
        let pupil = Pupil {
            id: PupilId::new(1),
            first_name: "Max".into(),
            last_name: "Mustermann".into(),
            class_id: ClassId::new(1),
        };
        let window = DateWindow::new(Some(date(1)), Some(date(30))).expect("ordered window");
        let mut report = Report::new(&pupil, "1A".into(), window);
        for (day, (category, text, grade)) in (1..).zip(entries) {
            report.entries_by_category.push(
                category,
                ReportEntry {
                    date: date(day),
                    text: (*text).to_owned(),
                    grade: grade.map(str::to_owned),
                    subject: Some("Math".into()),
                },
            );
        }
        report
    }
}
