use std::cell::RefCell;

use evalia_core::{Field, Record};
use evalia_export::render_report;
use evalia_rewrite::batch::is_improvable;
use evalia_rewrite::{RewriteError, TextImprover, improve_fields};

/// Upper-cases text, except for one input it rejects with a 500.
struct FakeImprover {
    reject: &'static str,
    calls: RefCell<Vec<String>>,
}

impl FakeImprover {
    fn new(reject: &'static str) -> Self {
        Self {
            reject,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl TextImprover for FakeImprover {
    fn improve(&self, text: &str) -> Result<String, RewriteError> {
        self.calls.borrow_mut().push(text.to_string());
        if text == self.reject {
            return Err(RewriteError::Status {
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(text.to_uppercase())
    }
}

fn record() -> Record {
    let mut record = Record::new();
    record.set(Field::PerinatalHistory, "parto normal");
    record.set(Field::ProblemOrigins, "ansiedad");
    record.set(Field::ReasonsToChange, "salud");
    record
}

#[test]
fn one_failure_leaves_other_fields_improved() {
    let mut record = record();
    let improver = FakeImprover::new("ansiedad");
    let fields = [
        Field::PerinatalHistory,
        Field::ProblemOrigins,
        Field::ReasonsToChange,
    ];

    let summary = improve_fields(&mut record, &fields, &improver);

    assert_eq!(summary.improved, vec![Field::PerinatalHistory, Field::ReasonsToChange]);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, Field::ProblemOrigins);
    assert!(summary.failed[0].1.contains("500"));
    assert!(!summary.all_succeeded());

    assert_eq!(record.text(Field::PerinatalHistory), "PARTO NORMAL");
    assert_eq!(record.text(Field::ProblemOrigins), "ansiedad");
    assert_eq!(record.text(Field::ReasonsToChange), "SALUD");

    let rendered = render_report(&record).unwrap();
    assert!(rendered.bytes.starts_with(b"%PDF"));
}

#[test]
fn empty_field_fails_without_calling_the_service() {
    let mut record = record();
    let improver = FakeImprover::new("");

    let summary = improve_fields(&mut record, &[Field::Observations], &improver);

    assert!(summary.improved.is_empty());
    assert_eq!(summary.failed.len(), 1);
    assert!(improver.calls.borrow().is_empty());
    assert!(record.get(Field::Observations).is_none());
}

#[test]
fn only_sanitized_prose_fields_are_improvable() {
    assert!(is_improvable(Field::PerinatalHistory));
    assert!(is_improvable(Field::Observations));
    assert!(!is_improvable(Field::FullName));
    assert!(!is_improvable(Field::MentalHealthHistory));

    let mut record = record();
    record.set(Field::FullName, "ana");
    let improver = FakeImprover::new("");
    let summary = improve_fields(&mut record, &[Field::FullName], &improver);

    assert_eq!(summary.failed.len(), 1);
    assert_eq!(record.text(Field::FullName), "ana");
    assert!(improver.calls.borrow().is_empty());
}

#[test]
fn no_fields_selected_is_a_clean_pass() {
    let mut record = record();
    let before = record.clone();
    let summary = improve_fields(&mut record, &[], &FakeImprover::new(""));

    assert!(summary.all_succeeded());
    assert!(summary.improved.is_empty());
    assert_eq!(record, before);
}
